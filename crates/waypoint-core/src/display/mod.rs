//! Display formatting for models and operation outcomes.
//!
//! The crate separates domain data from presentation: models carry state,
//! and this module renders it as markdown for terminals and tool results.
//!
//! - [`models`]: `Display` implementations for [`crate::models`] types
//! - [`reports`]: operation outcome types returned by the manager
//! - [`datetime`]: timestamp and duration formatting wrappers

pub mod datetime;
pub mod models;
pub mod reports;

// Re-export commonly used types for convenience
pub use datetime::{HumanDuration, LocalDateTime};
pub use models::ArchivedPlan;
pub use reports::{AbortReport, CreateReport, ExecutionReport, FailureReport, NoPlanStatus};
