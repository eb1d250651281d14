//! Textual projections of a [`GridStore`].
//!
//! Everything here is a pure function of the store's current contents:
//! calling any of them twice without a mutation in between produces identical
//! output.

use std::borrow::Cow;

use super::errors::{TimetableError, TimetableResult};
use super::grid::GridStore;
use super::models::{Coordinate, GridLayout, Label};

/// Text of the top-left header cell.
pub const CORNER_LABEL: &str = "Time/Day";
/// Older exports spelled the corner with spaces; accepted on import.
const LEGACY_CORNER_LABEL: &str = "Time / Day";
/// Stand-in for an empty cell in the tab-separated table.
pub const EMPTY_PLACEHOLDER: &str = "-";
/// Title line written above the table when titles are enabled.
pub const TITLE: &str = "Weekly Timetable";

pub struct Projector;

impl Projector {
    /// Tab-separated table: a header row of day names, then one row per time
    /// slot with `-` for empty cells. Rows are joined with `\n`, no trailing
    /// newline. Tabs and line breaks inside a cell are written as `\t`, `\r`
    /// and `\n` so every slot stays on one line.
    ///
    /// # Examples
    ///
    /// ```
    /// use weektable::domain::{GridLayout, GridStore, Projector};
    ///
    /// let layout = GridLayout::new(["Mon", "Tue"], ["9-10", "10-11"]).unwrap();
    /// let mut store = GridStore::new(layout);
    /// store.set("Mon", "9-10", "Math").unwrap();
    ///
    /// assert_eq!(
    ///     Projector::render_table(&store),
    ///     "Time/Day\tMon\tTue\n9-10\tMath\t-\n10-11\t-\t-"
    /// );
    /// ```
    pub fn render_table(store: &GridStore) -> String {
        Self::rows(store, EMPTY_PLACEHOLDER)
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| escape_table_cell(cell))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The plain-text export document: optional title line and blank line,
    /// the table, and a trailing newline.
    pub fn render_text_document(store: &GridStore, with_title: bool) -> String {
        let mut doc = String::new();
        if with_title {
            doc.push_str(TITLE);
            doc.push_str("\n\n");
        }
        doc.push_str(&Self::render_table(store));
        doc.push('\n');
        doc
    }

    /// Rows for a delimited-file writer. Same shape as [`render_table`],
    /// but empty cells are empty strings.
    ///
    /// [`render_table`]: Projector::render_table
    pub fn render_delimited(store: &GridStore) -> Vec<Vec<String>> {
        Self::rows(store, "")
    }

    /// The delimited rows written as comma-separated text with standard
    /// quoting.
    pub fn render_csv(store: &GridStore) -> TimetableResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in Self::render_delimited(store) {
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| TimetableError::Io(err.into_error()))?;
        // Every field came from a String, so the output is valid UTF-8.
        String::from_utf8(bytes).map_err(|err| TimetableError::Io(std::io::Error::other(err)))
    }

    /// Parses rows produced by [`render_delimited`] back into assignments.
    ///
    /// The header must name the layout's days in order and every body row
    /// must start with a known time slot. Blank cells are skipped.
    ///
    /// [`render_delimited`]: Projector::render_delimited
    pub fn assignments_from_rows(
        layout: &GridLayout,
        rows: &[Vec<String>],
    ) -> TimetableResult<Vec<(Coordinate, Label)>> {
        let (header, body) = rows
            .split_first()
            .ok_or_else(|| TimetableError::validation("Timetable file is empty"))?;

        // Spreadsheet tools often save CSV with a byte-order mark.
        let corner = header
            .first()
            .map(|s| s.trim_start_matches('\u{feff}').trim())
            .unwrap_or_default();
        if corner != CORNER_LABEL && corner != LEGACY_CORNER_LABEL {
            return Err(TimetableError::validation(format!(
                "Expected '{CORNER_LABEL}' in the first header cell, found '{corner}'"
            )));
        }
        if header[1..] != *layout.days() {
            return Err(TimetableError::validation(format!(
                "Header days [{}] do not match the configured days [{}]",
                header[1..].join(", "),
                layout.days().join(", ")
            )));
        }

        let mut seen_slots: Vec<&str> = Vec::with_capacity(body.len());
        let mut assignments = Vec::new();
        for row in body {
            let Some((slot, cells)) = row.split_first() else {
                continue;
            };
            if seen_slots.contains(&slot.as_str()) {
                return Err(TimetableError::validation(format!(
                    "Time slot '{slot}' appears more than once"
                )));
            }
            seen_slots.push(slot);
            if cells.len() != layout.days().len() {
                return Err(TimetableError::validation(format!(
                    "Row '{slot}' has {} cells, expected {}",
                    cells.len(),
                    layout.days().len()
                )));
            }
            for (day, cell) in layout.days().iter().zip(cells) {
                if cell.trim().is_empty() {
                    continue;
                }
                let coord = layout.coordinate(day, slot)?;
                assignments.push((coord, Label::new(cell)?));
            }
        }
        assignments.sort_by_key(|(coord, _)| *coord);
        Ok(assignments)
    }

    fn rows(store: &GridStore, empty: &str) -> Vec<Vec<String>> {
        let layout = store.layout();
        let mut rows = Vec::with_capacity(layout.slots().len() + 1);

        let mut header = Vec::with_capacity(layout.days().len() + 1);
        header.push(CORNER_LABEL.to_string());
        header.extend(layout.days().iter().cloned());
        rows.push(header);

        for slot in 0..layout.slots().len() {
            let mut row = Vec::with_capacity(layout.days().len() + 1);
            row.push(layout.slots()[slot].clone());
            for day in 0..layout.days().len() {
                let cell = store
                    .get_at(Coordinate::new(day, slot))
                    .map(Label::as_str)
                    .unwrap_or(empty);
                row.push(cell.to_string());
            }
            rows.push(row);
        }
        rows
    }
}

fn escape_table_cell(cell: &str) -> Cow<'_, str> {
    if !cell.contains(['\t', '\r', '\n']) {
        return Cow::Borrowed(cell);
    }
    let mut escaped = String::with_capacity(cell.len() + 2);
    for ch in cell.chars() {
        match ch {
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
