use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::domain::feedback::{COLUMNS, FeedbackEntry};
use crate::domain::{TimetableError, TimetableResult};

const NO_SUBMISSIONS: &str = "No feedback submissions yet.";
const RULE_WIDTH: usize = 60;

/// Append-only delimited log of feedback submissions.
///
/// The header row is written once, when the file is first created; each
/// submission then appends exactly one row.
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one submission. A new or empty file gets the header first; an
    /// existing log with different columns is left untouched.
    pub fn append(&self, entry: &FeedbackEntry) -> TimetableResult<()> {
        let needs_header = match self.header()? {
            Some(header) => {
                self.check_header(&header)?;
                false
            }
            None => true,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        if needs_header {
            writer.write_record(COLUMNS)?;
        }
        writer.write_record(entry.to_record())?;
        writer.flush()?;
        tracing::info!(path = %self.path.display(), "feedback appended");
        Ok(())
    }

    /// All stored submissions, oldest first. A missing log has none.
    pub fn entries(&self) -> TimetableResult<Vec<FeedbackEntry>> {
        let Some(header) = self.header()? else {
            return Ok(Vec::new());
        };
        self.check_header(&header)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let mut entries = Vec::new();
        for record in reader.records() {
            let record: Vec<String> = record?.iter().map(str::to_string).collect();
            entries.push(FeedbackEntry::from_record(&record)?);
        }
        Ok(entries)
    }

    /// Human-readable listing of every row, labelled with whatever columns
    /// the file's header names.
    pub fn render_preview(&self) -> TimetableResult<String> {
        if self.header()?.is_none() {
            return Ok(NO_SUBMISSIONS.to_string());
        }
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        let rule = "-".repeat(RULE_WIDTH);
        let mut lines = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            lines.push(format!("Feedback Entry #{}", idx + 1));
            lines.push(rule.clone());
            for (column, value) in headers.iter().zip(record.iter()) {
                lines.push(format!("{column:<18}: {value}"));
            }
            lines.push(rule.clone());
            lines.push(String::new());
        }
        Ok(lines.join("\n"))
    }

    /// First row of the file, or `None` when the file is missing or empty.
    fn header(&self) -> TimetableResult<Option<Vec<String>>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        match reader.records().next() {
            Some(record) => Ok(Some(record?.iter().map(str::to_string).collect())),
            None => Ok(None),
        }
    }

    fn check_header(&self, header: &[String]) -> TimetableResult<()> {
        if header.iter().map(String::as_str).eq(COLUMNS) {
            return Ok(());
        }
        Err(TimetableError::validation(format!(
            "{} has columns [{}], expected [{}]",
            self.path.display(),
            header.join(", "),
            COLUMNS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn entry(clarity: u8, comments: &str) -> FeedbackEntry {
        let ts = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        FeedbackEntry::from_form(ts, clarity, 4, Some("Yes"), Some("No"), comments).unwrap()
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let log = FeedbackLog::new(dir.path().join("feedback.csv"));

        log.append(&entry(5, "first")).unwrap();
        log.append(&entry(3, "second, with comma")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Timestamp,Clarity Rating,Content Rating,Pace Appropriate,Recommend,Comments",
                "2026-10-19 09:00:00,5,4,Yes,No,first",
                "2026-10-19 09:00:00,3,4,Yes,No,\"second, with comma\"",
            ]
        );
    }

    #[test]
    fn test_existing_file_header_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        std::fs::write(
            &path,
            "Timestamp,Clarity Rating,Content Rating,Pace Appropriate,Recommend,Comments\n",
        )
        .unwrap();

        let log = FeedbackLog::new(&path);
        log.append(&entry(2, "")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Timestamp").count(), 1);
        assert_eq!(log.entries().unwrap(), vec![entry(2, "")]);
    }

    #[test]
    fn test_entries_round_trip() {
        let dir = TempDir::new().unwrap();
        let log = FeedbackLog::new(dir.path().join("feedback.csv"));
        assert!(log.entries().unwrap().is_empty());

        log.append(&entry(1, "multi\nline")).unwrap();
        assert_eq!(log.entries().unwrap(), vec![entry(1, "multi\nline")]);
    }

    #[test]
    fn test_preview() {
        let dir = TempDir::new().unwrap();
        let log = FeedbackLog::new(dir.path().join("feedback.csv"));
        assert_eq!(log.render_preview().unwrap(), "No feedback submissions yet.");

        log.append(&entry(4, "nice")).unwrap();
        let preview = log.render_preview().unwrap();
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines[0], "Feedback Entry #1");
        assert_eq!(lines[1], "-".repeat(60));
        assert_eq!(lines[2], "Timestamp         : 2026-10-19 09:00:00");
        assert_eq!(lines[3], "Clarity Rating    : 4");
        assert_eq!(lines[7], "Comments          : nice");
        assert_eq!(lines[8], "-".repeat(60));
    }

    const LEGACY_LOG: &str =
        "Timestamp,Clarity Rating,Content Rating,Comments\n2025-05-01 08:30:00,4,5,Great class\n";

    #[test]
    fn test_append_refuses_foreign_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        std::fs::write(&path, LEGACY_LOG).unwrap();

        let log = FeedbackLog::new(&path);
        let err = log.append(&entry(3, "x")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), LEGACY_LOG);
        assert!(log.entries().unwrap_err().is_validation());
    }

    #[test]
    fn test_preview_uses_file_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        std::fs::write(&path, LEGACY_LOG).unwrap();

        let preview = FeedbackLog::new(&path).render_preview().unwrap();
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines[0], "Feedback Entry #1");
        assert_eq!(lines[2], "Timestamp         : 2025-05-01 08:30:00");
        assert_eq!(lines[5], "Comments          : Great class");
        assert_eq!(lines[6], "-".repeat(60));
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        std::fs::write(&path, "").unwrap();

        let log = FeedbackLog::new(&path);
        assert_eq!(log.render_preview().unwrap(), "No feedback submissions yet.");
        log.append(&entry(5, "")).unwrap();
        assert_eq!(log.entries().unwrap(), vec![entry(5, "")]);
    }
}
