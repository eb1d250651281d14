use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{GridLayout, Palette, Rgb, TimetableError, TimetableResult};

pub const DEFAULT_CONFIG_FILE: &str = "weektable.json";

/// Startup configuration. Any field missing from the file keeps its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    pub days: Vec<String>,
    pub slots: Vec<String>,
    /// Subject name to `#RRGGBB` colour.
    pub subject_colors: BTreeMap<String, String>,
    /// Colour for subjects missing from `subject_colors`.
    pub default_color: String,
    /// Prepend the "Weekly Timetable" title to text exports.
    pub include_title: bool,
    pub feedback_log: PathBuf,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        let subject_colors = [
            ("Math", "#AED6F1"),
            ("Science", "#A9DFBF"),
            ("English", "#F9E79F"),
            ("History", "#F5B7B1"),
            ("Computer", "#D2B4DE"),
        ]
        .into_iter()
        .map(|(subject, color)| (subject.to_string(), color.to_string()))
        .collect();

        Self {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .map(String::from)
                .to_vec(),
            slots: ["9-10 AM", "10-11 AM", "11-12 PM", "12-1 PM", "2-3 PM", "3-4 PM"]
                .map(String::from)
                .to_vec(),
            subject_colors,
            default_color: "#D5D8DC".to_string(),
            include_title: true,
            feedback_log: PathBuf::from("feedback.csv"),
        }
    }
}

impl TimetableConfig {
    /// Reads the config file at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> TimetableResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            TimetableError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            TimetableError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;
        // Surface bad day/slot lists and colours at startup rather than on first use.
        config.layout()?;
        config.palette()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn layout(&self) -> TimetableResult<GridLayout> {
        GridLayout::new(self.days.iter().cloned(), self.slots.iter().cloned())
    }

    pub fn palette(&self) -> TimetableResult<Palette> {
        let colors = self
            .subject_colors
            .iter()
            .map(|(subject, color)| -> TimetableResult<(String, Rgb)> {
                Ok((subject.clone(), color.parse()?))
            })
            .collect::<TimetableResult<HashMap<_, _>>>()?;
        Ok(Palette::new(colors, self.default_color.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimetableConfig::default();
        let layout = config.layout().unwrap();
        assert_eq!(layout.days().len(), 5);
        assert_eq!(layout.slots()[0], "9-10 AM");
        assert_eq!(layout.cell_count(), 30);

        let palette = config.palette().unwrap();
        assert_eq!(palette.resolve_color("Math"), Rgb(0xAE, 0xD6, 0xF1));
        assert_eq!(palette.resolve_color("Art"), Rgb(0xD5, 0xD8, 0xDC));
        assert!(config.include_title);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TimetableConfig =
            serde_json::from_str(r#"{"days": ["Mon", "Tue"], "include_title": false}"#).unwrap();
        assert_eq!(config.days, vec!["Mon", "Tue"]);
        assert_eq!(config.slots.len(), 6);
        assert!(!config.include_title);
        assert_eq!(config.default_color, "#D5D8DC");
    }

    #[test]
    fn test_bad_colour_is_config_error() {
        let mut config = TimetableConfig::default();
        config.subject_colors.insert("Art".to_string(), "pink".to_string());
        assert!(matches!(config.palette(), Err(TimetableError::Config(_))));
    }

    #[test]
    fn test_duplicate_day_is_config_error() {
        let config = TimetableConfig {
            days: vec!["Mon".to_string(), "Mon".to_string()],
            ..TimetableConfig::default()
        };
        assert!(matches!(config.layout(), Err(TimetableError::Config(_))));
    }
}
