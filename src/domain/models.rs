use std::fmt;

use super::errors::{TimetableError, TimetableResult};

/// Fixed day and time-slot enumerations of a weekly grid.
///
/// Both lists keep the order they were configured in; that order is the
/// canonical order for every projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    days: Vec<String>,
    slots: Vec<String>,
}

impl GridLayout {
    /// Builds a layout, rejecting empty enumerations and duplicate names.
    pub fn new<D, S>(days: D, slots: S) -> TimetableResult<Self>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let days: Vec<String> = days.into_iter().map(Into::into).collect();
        let slots: Vec<String> = slots.into_iter().map(Into::into).collect();
        check_names("day", &days)?;
        check_names("time slot", &slots)?;
        Ok(Self { days, slots })
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn cell_count(&self) -> usize {
        self.days.len() * self.slots.len()
    }

    /// Resolves a (day, slot) name pair to a coordinate of this grid.
    pub fn coordinate(&self, day: &str, slot: &str) -> TimetableResult<Coordinate> {
        let day_index = self
            .days
            .iter()
            .position(|d| d == day)
            .ok_or_else(|| TimetableError::validation(format!("Unknown day: {day}")))?;
        let slot_index = self
            .slots
            .iter()
            .position(|s| s == slot)
            .ok_or_else(|| TimetableError::validation(format!("Unknown time slot: {slot}")))?;
        Ok(Coordinate::new(day_index, slot_index))
    }

    pub fn day_name(&self, coord: Coordinate) -> &str {
        &self.days[coord.day]
    }

    pub fn slot_name(&self, coord: Coordinate) -> &str {
        &self.slots[coord.slot]
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.day < self.days.len() && coord.slot < self.slots.len()
    }

    /// Every coordinate, days outer and slots inner.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.days.len())
            .flat_map(move |day| (0..self.slots.len()).map(move |slot| Coordinate::new(day, slot)))
    }
}

fn check_names(kind: &str, names: &[String]) -> TimetableResult<()> {
    if names.is_empty() {
        return Err(TimetableError::Config(format!("at least one {kind} is required")));
    }
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(TimetableError::Config(format!("{kind} names must not be blank")));
        }
        if names[..i].contains(name) {
            return Err(TimetableError::Config(format!("duplicate {kind}: {name}")));
        }
    }
    Ok(())
}

/// Position of one cell, as indices into the layout's day and slot lists.
///
/// Ordering is day first, then slot, which is the canonical iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub day: usize,
    pub slot: usize,
}

impl Coordinate {
    pub fn new(day: usize, slot: usize) -> Self {
        Self { day, slot }
    }
}

/// Subject text stored in a cell. Never empty, never padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(raw: &str) -> TimetableResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TimetableError::validation("Please enter a subject."));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
