//! Course feedback submissions.
//!
//! Feedback is unrelated to the timetable grid; it only shares the error type
//! and the delimited-file conventions.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::errors::{TimetableError, TimetableResult};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column names of the feedback log, in file order.
pub const COLUMNS: [&str; 6] = [
    "Timestamp",
    "Clarity Rating",
    "Content Rating",
    "Pace Appropriate",
    "Recommend",
    "Comments",
];

pub const CLARITY_QUESTION: &str = "Rate the teacher's clarity:";
pub const CONTENT_QUESTION: &str = "Rate the course content:";
pub const PACE_QUESTION: &str = "Was the pace of the class appropriate?";
pub const RECOMMEND_QUESTION: &str = "Would you recommend this course/teacher?";

/// A score from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8, question: &str) -> TimetableResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TimetableError::validation(format!("Please rate: '{question}'")))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

impl FromStr for Answer {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Answer::Yes),
            "no" | "n" => Ok(Answer::No),
            other => Err(TimetableError::validation(format!(
                "expected Yes or No, found '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub timestamp: NaiveDateTime,
    pub clarity: Rating,
    pub content: Rating,
    pub pace: Answer,
    pub recommend: Answer,
    pub comments: String,
}

impl FeedbackEntry {
    /// Validates raw form answers. Ratings must be 1-5 and both yes/no
    /// questions must be answered; comments are optional.
    pub fn from_form(
        timestamp: NaiveDateTime,
        clarity: u8,
        content: u8,
        pace: Option<&str>,
        recommend: Option<&str>,
        comments: &str,
    ) -> TimetableResult<Self> {
        let clarity = Rating::new(clarity, CLARITY_QUESTION)?;
        let content = Rating::new(content, CONTENT_QUESTION)?;
        let pace = answer(pace, PACE_QUESTION)?;
        let recommend = answer(recommend, RECOMMEND_QUESTION)?;
        Ok(Self {
            timestamp,
            clarity,
            content,
            pace,
            recommend,
            comments: comments.trim().to_string(),
        })
    }

    /// Field values in [`COLUMNS`] order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.clarity.value().to_string(),
            self.content.value().to_string(),
            self.pace.to_string(),
            self.recommend.to_string(),
            self.comments.clone(),
        ]
    }

    pub fn from_record(record: &[String]) -> TimetableResult<Self> {
        if record.len() != COLUMNS.len() {
            return Err(TimetableError::validation(format!(
                "feedback row has {} fields, expected {}",
                record.len(),
                COLUMNS.len()
            )));
        }
        let timestamp = NaiveDateTime::parse_from_str(&record[0], TIMESTAMP_FORMAT).map_err(|e| {
            TimetableError::validation(format!("invalid timestamp '{}': {e}", record[0]))
        })?;
        let rating = |field: &str, question: &str| {
            field
                .trim()
                .parse::<u8>()
                .map_err(|_| TimetableError::validation(format!("invalid rating '{field}'")))
                .and_then(|v| Rating::new(v, question))
        };
        Ok(Self {
            timestamp,
            clarity: rating(&record[1], CLARITY_QUESTION)?,
            content: rating(&record[2], CONTENT_QUESTION)?,
            pace: record[3].parse()?,
            recommend: record[4].parse()?,
            comments: record[5].clone(),
        })
    }
}

fn answer(raw: Option<&str>, question: &str) -> TimetableResult<Answer> {
    raw.and_then(|s| s.parse().ok())
        .ok_or_else(|| TimetableError::validation(format!("Please answer: '{question}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_from_form_valid() {
        let entry =
            FeedbackEntry::from_form(ts(), 4, 5, Some("Yes"), Some("no"), "  Great pace \n").unwrap();
        assert_eq!(entry.clarity.value(), 4);
        assert_eq!(entry.pace, Answer::Yes);
        assert_eq!(entry.recommend, Answer::No);
        assert_eq!(entry.comments, "Great pace");
    }

    #[test]
    fn test_missing_rating_names_question() {
        let err = FeedbackEntry::from_form(ts(), 0, 5, Some("Yes"), Some("Yes"), "").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Please rate: 'Rate the teacher's clarity:'");

        let err = FeedbackEntry::from_form(ts(), 3, 6, Some("Yes"), Some("Yes"), "").unwrap_err();
        assert_eq!(err.to_string(), "Please rate: 'Rate the course content:'");
    }

    #[test]
    fn test_missing_answer_names_question() {
        let err = FeedbackEntry::from_form(ts(), 3, 3, None, Some("Yes"), "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please answer: 'Was the pace of the class appropriate?'"
        );
        let err = FeedbackEntry::from_form(ts(), 3, 3, Some("Yes"), Some("maybe"), "").unwrap_err();
        assert!(err.to_string().contains("recommend"));
    }

    #[test]
    fn test_record_fields() {
        let entry = FeedbackEntry::from_form(ts(), 2, 3, Some("no"), Some("yes"), "ok").unwrap();
        assert_eq!(
            entry.to_record(),
            [
                "2026-10-19 14:30:05".to_string(),
                "2".to_string(),
                "3".to_string(),
                "No".to_string(),
                "Yes".to_string(),
                "ok".to_string(),
            ]
        );
        assert_eq!(FeedbackEntry::from_record(&entry.to_record()).unwrap(), entry);
    }

    #[test]
    fn test_from_record_rejects_short_rows() {
        let row = vec!["2026-10-19 14:30:05".to_string(), "2".to_string()];
        assert!(FeedbackEntry::from_record(&row).is_err());
    }
}
