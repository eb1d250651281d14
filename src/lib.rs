//! weektable - Weekly Timetable Library
//!
//! Assign subjects to the cells of a fixed day × time-slot grid, preview the
//! grid as a table, and export it as plain text or CSV.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
