//! Core library for the Waypoint plan execution tracker.
//!
//! Waypoint lets an external decision-maker (typically a tool-calling
//! language model, but any driver works) declare a multi-step plan toward a
//! goal and drive it to completion one operation at a time. The tracker owns
//! plan and step state, lifecycle transitions, timing, and failure
//! bookkeeping; deciding what the steps are and actually performing them is
//! the caller's job.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): `Plan` and `Step` records whose statuses only
//!   move forward, enforced by explicit transition tables
//! - **Manager** ([`manager`]): [`PlanManager`] holds at most one active
//!   plan and exposes the operation set that drives it
//! - **Observer** ([`observer`]): injected sink receiving every state change
//! - **Display** ([`display`]): markdown formatting for models and the
//!   report types each operation returns
//!
//! Every operation is synchronous and returns a result the caller can act
//! on; errors are descriptive values meant to be read (and reasoned about)
//! by the driver, never process-fatal faults.
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{
//!     params::{CreatePlan, ExecuteStep},
//!     PlanManager,
//! };
//!
//! # fn example() -> waypoint_core::Result<()> {
//! let mut manager = PlanManager::new();
//!
//! // Declare the plan
//! manager.create_plan(&CreatePlan {
//!     goal: "Ship feature X".to_string(),
//!     description: "Incremental rollout".to_string(),
//!     steps: vec!["Write code".to_string(), "Write tests".to_string()],
//! })?;
//!
//! // Work on step 1 out-of-band, then report the outcome
//! let report = manager.execute_next_step(&ExecuteStep {
//!     step_result: "Implemented the endpoint".to_string(),
//! })?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod manager;
pub mod models;
pub mod observer;
pub mod params;

// Re-export commonly used types
pub use display::{
    AbortReport, CreateReport, ExecutionReport, FailureReport, HumanDuration, LocalDateTime,
    NoPlanStatus,
};
pub use error::{PlanError, Result};
pub use manager::{PlanManager, PlanManagerBuilder};
pub use models::{
    Plan, PlanSnapshot, PlanStatus, Step, StepDigest, StepStatus, TransitionError,
};
pub use observer::{LogObserver, NullObserver, PlanEvent, PlanObserver};
