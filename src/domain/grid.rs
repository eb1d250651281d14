use std::collections::BTreeMap;

use super::errors::{TimetableError, TimetableResult};
use super::models::{Coordinate, GridLayout, Label};

/// Sparse assignment of labels to the cells of a fixed weekly grid.
///
/// The store is the single source of truth for "what subject is in what
/// slot". Coordinates without an entry are empty; an entry is never empty.
///
/// # Examples
///
/// ```
/// use weektable::domain::{GridLayout, GridStore};
///
/// let layout = GridLayout::new(["Mon", "Tue"], ["9-10", "10-11"]).unwrap();
/// let mut store = GridStore::new(layout);
/// store.set("Mon", "9-10", "Math").unwrap();
/// assert_eq!(store.get("Mon", "9-10").unwrap().unwrap().as_str(), "Math");
/// assert!(store.get("Tue", "9-10").unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct GridStore {
    layout: GridLayout,
    cells: BTreeMap<Coordinate, Label>,
}

impl GridStore {
    pub fn new(layout: GridLayout) -> Self {
        Self {
            layout,
            cells: BTreeMap::new(),
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Assigns `label` to the cell at (`day`, `slot`), replacing any previous
    /// assignment. The label is trimmed first.
    ///
    /// # Errors
    ///
    /// `TimetableError::Validation` if the label is blank or the day/slot is
    /// not part of the layout. The store is left untouched in that case.
    pub fn set(&mut self, day: &str, slot: &str, label: &str) -> TimetableResult<()> {
        let coord = self.layout.coordinate(day, slot)?;
        let label = Label::new(label)?;
        self.set_at(coord, label)
    }

    pub fn set_at(&mut self, coord: Coordinate, label: Label) -> TimetableResult<()> {
        self.check(coord)?;
        tracing::debug!(
            day = self.layout.day_name(coord),
            slot = self.layout.slot_name(coord),
            label = label.as_str(),
            "cell assigned"
        );
        self.cells.insert(coord, label);
        Ok(())
    }

    /// Current label at (`day`, `slot`); `None` means the cell is empty.
    pub fn get(&self, day: &str, slot: &str) -> TimetableResult<Option<&Label>> {
        let coord = self.layout.coordinate(day, slot)?;
        Ok(self.get_at(coord))
    }

    pub fn get_at(&self, coord: Coordinate) -> Option<&Label> {
        self.cells.get(&coord)
    }

    /// Empties the cell, returning the label it held.
    pub fn clear(&mut self, day: &str, slot: &str) -> TimetableResult<Option<Label>> {
        let coord = self.layout.coordinate(day, slot)?;
        self.clear_at(coord)
    }

    pub fn clear_at(&mut self, coord: Coordinate) -> TimetableResult<Option<Label>> {
        self.check(coord)?;
        let removed = self.cells.remove(&coord);
        if removed.is_some() {
            tracing::debug!(
                day = self.layout.day_name(coord),
                slot = self.layout.slot_name(coord),
                "cell cleared"
            );
        }
        Ok(removed)
    }

    /// Assigned cells only, days outer then slots, in layout order.
    pub fn all(&self) -> impl Iterator<Item = (Coordinate, &Label)> {
        self.cells.iter().map(|(coord, label)| (*coord, label))
    }

    /// Assigned cells as (day name, slot name, label) triples, in canonical order.
    pub fn triples(&self) -> Vec<(String, String, String)> {
        self.all()
            .map(|(coord, label)| {
                (
                    self.layout.day_name(coord).to_string(),
                    self.layout.slot_name(coord).to_string(),
                    label.to_string(),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn check(&self, coord: Coordinate) -> TimetableResult<()> {
        if self.layout.contains(coord) {
            Ok(())
        } else {
            Err(TimetableError::validation(format!(
                "Cell ({}, {}) is outside the timetable",
                coord.day, coord.slot
            )))
        }
    }
}
