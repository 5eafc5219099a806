//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: logging init,
//! problem-details assertions and unique test values.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
