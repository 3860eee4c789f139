//! Step model definition and lifecycle methods.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::{StepEvent, StepStatus, TransitionError};

/// One atomic, caller-verifiable unit of work within a plan.
///
/// Identity (`id`, `description`) is fixed at creation; everything else is
/// mutated exclusively through the lifecycle methods below, which route every
/// status change through [`StepStatus::transition`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// 1-based position within the plan, assigned in declaration order
    pub id: u32,

    /// What this step does, in imperative mood ("Create project folder")
    pub description: String,

    /// Current lifecycle status
    pub status: StepStatus,

    /// What was done (Completed) or why the step was skipped (Skipped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Why the step failed (Failed only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Timestamp when the step left `Pending` (UTC); set exactly once
    pub started_at: Option<Timestamp>,

    /// Timestamp when the step entered a terminal status (UTC); set exactly
    /// once
    pub completed_at: Option<Timestamp>,
}

impl Step {
    /// Creates a pending step with the given id and description.
    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            status: StepStatus::Pending,
            result: None,
            error_message: None,
            started_at: None,
            completed_at: None,
        }
    }

    /// Begins work on the step, stamping `started_at`.
    pub fn start(&mut self, now: Timestamp) -> Result<(), TransitionError> {
        self.status = self.status.transition(StepEvent::Start)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// Finishes the step successfully, recording what was accomplished.
    pub fn complete(
        &mut self,
        result: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        self.status = self.status.transition(StepEvent::Complete)?;
        self.result = Some(result.into());
        self.completed_at = Some(now);
        Ok(())
    }

    /// Finishes the step unsuccessfully, recording the error.
    pub fn fail(
        &mut self,
        error_message: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        self.status = self.status.transition(StepEvent::Fail)?;
        self.error_message = Some(error_message.into());
        self.completed_at = Some(now);
        Ok(())
    }

    /// Abandons the step, recording why it was skipped.
    ///
    /// Valid from `Pending` or `InProgress`; a skipped step that was never
    /// started keeps `started_at = None`.
    pub fn skip(
        &mut self,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        self.status = self.status.transition(StepEvent::Skip)?;
        self.result = Some(reason.into());
        self.completed_at = Some(now);
        Ok(())
    }

    /// Whether the step reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Wall-clock time the step spent in `InProgress`, when both timestamps
    /// are present.
    pub fn duration(&self) -> Option<SignedDuration> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed.duration_since(started)),
            _ => None,
        }
    }
}
