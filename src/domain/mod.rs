pub mod errors;
pub mod feedback;
pub mod grid;
pub mod models;
pub mod palette;
pub mod projector;

pub use errors::*;
pub use feedback::{Answer, FeedbackEntry, Rating};
pub use grid::*;
pub use models::*;
pub use palette::*;
pub use projector::*;
