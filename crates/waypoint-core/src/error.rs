//! Error types for the execution tracker.
//!
//! Every variant's message names the offending condition in plain language
//! and, where applicable, the valid next operation. The intended caller is a
//! tool-driving agent that reads the text and decides what to do next, so
//! nothing here is fatal. Hosting layers render these as ordinary result
//! text rather than raising them past the manager boundary.

use thiserror::Error;

use crate::models::{PlanStatus, TransitionError};

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Plan creation was given an unusable step list; no plan was created or
    /// replaced.
    #[error("invalid plan: {reason}; provide at least one non-blank step description")]
    InvalidPlan { reason: String },

    /// A step-level operation arrived before any plan exists.
    #[error("no plan exists; create a plan before executing steps")]
    NoPlan,

    /// Step execution was requested on a plan that already finished.
    #[error(
        "the plan is already {status} and no steps remain to execute; \
         create a new plan to continue"
    )]
    PlanFinished { status: PlanStatus },

    /// A step failure was reported while no step was in progress.
    #[error(
        "no step is currently in progress; execute the next step first, \
         or create a new plan"
    )]
    NoActiveStep,

    /// A status change was rejected by the transition table. Operations
    /// check their preconditions before transitioning, so surfacing this
    /// indicates a bug in the tracker itself.
    #[error(transparent)]
    IllegalTransition(#[from] TransitionError),
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, PlanError>;
