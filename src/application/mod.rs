//! Application layer managing UI state and user workflows.
//!
//! This module sits between the timetable domain and the terminal front end.

pub mod state;

pub use state::*;
