//! Plan model definition and derived progress accessors.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::{PlanEventKind, PlanStatus, Step, StepStatus, TransitionError};

/// The full effort toward one goal: an ordered list of steps plus the plan's
/// own lifecycle status.
///
/// The step list is fixed at creation; insertion order is execution order.
/// Progress values (`completed_steps`, `progress_percentage`, `current_step`,
/// `next_step`) are derived from step statuses, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// The objective supplied by the caller
    pub goal: String,

    /// The caller's stated approach
    pub description: String,

    /// Current lifecycle status
    pub status: PlanStatus,

    /// Ordered steps; insertion order is execution order
    pub steps: Vec<Step>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the first step was started (UTC)
    pub started_at: Option<Timestamp>,

    /// Timestamp when the plan reached a terminal status (UTC)
    pub completed_at: Option<Timestamp>,
}

impl Plan {
    /// Creates a plan in `Created` status owning the given steps.
    pub fn new(
        goal: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<Step>,
        now: Timestamp,
    ) -> Self {
        Self {
            goal: goal.into(),
            description: description.into(),
            status: PlanStatus::Created,
            steps,
            created_at: now,
            started_at: None,
            completed_at: None,
        }
    }

    /// Total number of steps in the plan.
    pub fn total_steps(&self) -> u32 {
        self.steps.len() as u32
    }

    /// Number of steps that reached a terminal status.
    ///
    /// Failed and skipped steps count as completed for progress purposes, so
    /// `completed_steps == total_steps` exactly when the plan is terminal.
    pub fn completed_steps(&self) -> u32 {
        self.steps.iter().filter(|s| s.is_terminal()).count() as u32
    }

    /// Number of steps that failed.
    pub fn failed_steps(&self) -> u32 {
        self.count_with_status(StepStatus::Failed)
    }

    /// Number of steps that were skipped.
    pub fn skipped_steps(&self) -> u32 {
        self.count_with_status(StepStatus::Skipped)
    }

    fn count_with_status(&self, status: StepStatus) -> u32 {
        self.steps.iter().filter(|s| s.status == status).count() as u32
    }

    /// Fraction of terminal steps, as a percentage in `0.0..=100.0`.
    pub fn progress_percentage(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        f64::from(self.completed_steps()) / f64::from(self.total_steps()) * 100.0
    }

    /// The unique step in `InProgress`, if any.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps
            .iter()
            .find(|s| s.status == StepStatus::InProgress)
    }

    pub(crate) fn current_step_mut(&mut self) -> Option<&mut Step> {
        self.steps
            .iter_mut()
            .find(|s| s.status == StepStatus::InProgress)
    }

    /// The lowest-id step still `Pending`, if any.
    pub fn next_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.status == StepStatus::Pending)
    }

    pub(crate) fn next_step_mut(&mut self) -> Option<&mut Step> {
        self.steps
            .iter_mut()
            .find(|s| s.status == StepStatus::Pending)
    }

    /// Whether the plan reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Wall-clock span from the first step starting to the plan reaching a
    /// terminal status. This is the plan's total duration convention; it is
    /// not a sum of per-step durations.
    pub fn total_duration(&self) -> Option<SignedDuration> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed.duration_since(started)),
            _ => None,
        }
    }

    /// Marks the plan as executing, stamping `started_at`.
    pub(crate) fn begin(&mut self, now: Timestamp) -> Result<(), TransitionError> {
        self.status = self.status.transition(PlanEventKind::Start)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// Marks the plan as completed, stamping `completed_at`.
    pub(crate) fn finish(&mut self, now: Timestamp) -> Result<(), TransitionError> {
        self.status = self.status.transition(PlanEventKind::Finish)?;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Marks the plan as cancelled, stamping `completed_at`.
    pub(crate) fn cancel(&mut self, now: Timestamp) -> Result<(), TransitionError> {
        self.status = self.status.transition(PlanEventKind::Abort)?;
        self.completed_at = Some(now);
        Ok(())
    }
}
