//! Shared monitor state.

mod store;

pub use store::{AppState, AssessmentEvent, StationStatus};
