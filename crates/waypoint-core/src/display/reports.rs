//! Operation report types returned by the plan manager.
//!
//! Each mutating operation returns one of these instead of a bare unit so
//! every surface (terminal, MCP tool result) can render the same outcome
//! consistently: what just happened, whether more steps remain, and which
//! operations are valid next. They are data first and display second; all
//! fields are public and serializable where a hosting layer wants JSON.

use std::fmt;

use jiff::SignedDuration;
use serde::Serialize;

use super::datetime::HumanDuration;
use crate::models::{PlanSnapshot, PlanStatus, StepDigest};

/// Outcome of a successful plan creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReport {
    /// Snapshot of the freshly created plan
    pub snapshot: PlanSnapshot,
    /// Whether a previous plan was displaced into history
    pub superseded_previous: bool,
}

impl fmt::Display for CreateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created plan with {} steps: {}",
            self.snapshot.total_steps, self.snapshot.goal
        )?;
        if self.superseded_previous {
            writeln!(f)?;
            writeln!(f, "The previous plan was moved to history.")?;
        }
        writeln!(f)?;
        for step in &self.snapshot.steps {
            writeln!(f, "{}. {}", step.id, step.description)?;
        }
        write!(f, "\nCall execute_next_step after working on step 1.")
    }
}

/// Outcome of executing the next step.
#[derive(Debug, Clone, Serialize)]
pub enum ExecutionReport {
    /// A step completed and the next one is now in progress.
    Advanced {
        /// The step that was just completed
        completed: StepDigest,
        /// The step now in progress
        next: StepDigest,
        /// Steps still pending after the new current one
        remaining: u32,
    },
    /// The last step completed and the plan is finished.
    PlanComplete {
        /// The plan's goal
        goal: String,
        /// Total number of steps driven to a terminal status
        total_steps: u32,
        /// How many of them failed along the way
        failed_steps: u32,
        /// Wall-clock span from first step start to plan completion
        duration: Option<SignedDuration>,
    },
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionReport::Advanced {
                completed,
                next,
                remaining,
            } => {
                writeln!(f, "Completed step {}: {}", completed.id, completed.description)?;
                writeln!(f)?;
                write!(
                    f,
                    "Now in progress: step {}. {} ({} pending after it)",
                    next.id, next.description, remaining
                )
            }
            ExecutionReport::PlanComplete {
                goal,
                total_steps,
                failed_steps,
                duration,
            } => {
                writeln!(f, "Plan complete: {goal}")?;
                writeln!(f)?;
                write!(f, "All {total_steps} steps finished")?;
                if *failed_steps > 0 {
                    write!(f, " ({failed_steps} failed)")?;
                }
                if let Some(d) = duration {
                    write!(f, " in {}", HumanDuration(*d))?;
                }
                write!(f, ".")
            }
        }
    }
}

/// Outcome of marking the in-progress step as failed.
///
/// Unlike the success path, a failure does not start the next step: the
/// report names both follow-up operations so the caller chooses.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    /// The step that was marked failed
    pub failed: StepDigest,
    /// The error recorded on the step
    pub error_message: String,
    /// The next pending step, when one remains
    pub next: Option<StepDigest>,
}

impl FailureReport {
    /// Whether the failure exhausted the plan (no pending steps remained).
    pub fn plan_complete(&self) -> bool {
        self.next.is_none()
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Step {} failed: {}", self.failed.id, self.failed.description)?;
        writeln!(f)?;
        writeln!(f, "Error: {}", self.error_message)?;
        writeln!(f)?;
        match &self.next {
            Some(next) => write!(
                f,
                "Step {} ({}) is still pending. Call execute_next_step to \
                 continue with it, or abort_plan to stop here.",
                next.id, next.description
            ),
            None => write!(
                f,
                "No steps remain; the plan is now completed (with failures)."
            ),
        }
    }
}

/// Outcome of an abort request. Aborting is idempotent: repeat calls on a
/// finished plan report the situation instead of erroring.
#[derive(Debug, Clone, Serialize)]
pub enum AbortReport {
    /// The plan was aborted and its remaining steps skipped.
    Aborted {
        /// The plan's goal
        goal: String,
        /// Steps already in a terminal status before the abort
        completed_before: u32,
        /// Steps transitioned to skipped by the abort
        skipped: u32,
    },
    /// The plan had already finished; nothing changed.
    AlreadyFinished { status: PlanStatus },
    /// There is no plan to abort; nothing changed.
    NoPlan,
}

impl fmt::Display for AbortReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReport::Aborted {
                goal,
                completed_before,
                skipped,
            } => {
                writeln!(f, "Plan aborted: {goal}")?;
                writeln!(f)?;
                write!(
                    f,
                    "{completed_before} steps had finished before the abort; \
                     {skipped} steps were skipped."
                )
            }
            AbortReport::AlreadyFinished { status } => {
                write!(f, "Nothing to abort: the plan is already {status}.")
            }
            AbortReport::NoPlan => write!(f, "Nothing to abort: no plan exists."),
        }
    }
}

/// Sentinel rendering for a status query with no plan.
pub struct NoPlanStatus;

impl fmt::Display for NoPlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No plan exists yet. Create one with create_plan to start tracking."
        )
    }
}
