pub mod category;
pub mod loader;
pub mod models;

pub use models::{AircraftRecord, Condition, Direction, Metric, VerificationStatus};
