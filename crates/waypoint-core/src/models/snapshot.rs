//! Read-only snapshot types returned by status queries.

use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus, Step};

/// Minimal identity of a step, used in operation reports and events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDigest {
    /// 1-based step id
    pub id: u32,
    /// Step description
    pub description: String,
}

impl From<&Step> for StepDigest {
    fn from(step: &Step) -> Self {
        Self {
            id: step.id,
            description: step.description.clone(),
        }
    }
}

/// Point-in-time view of a plan with its derived progress values.
///
/// Snapshots are plain data: taking one never mutates the plan, and two
/// snapshots taken with no intervening operation are identical.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSnapshot {
    /// The objective supplied by the caller
    pub goal: String,
    /// The caller's stated approach
    pub description: String,
    /// Plan lifecycle status
    pub status: PlanStatus,
    /// Total number of steps
    pub total_steps: u32,
    /// Number of steps in a terminal status (completed, failed, or skipped)
    pub completed_steps: u32,
    /// Number of failed steps
    pub failed_steps: u32,
    /// Number of skipped steps
    pub skipped_steps: u32,
    /// `completed_steps / total_steps`, as a percentage
    pub progress_percentage: f64,
    /// The step currently in progress, if any
    pub current_step: Option<StepDigest>,
    /// Full ordered step list
    pub steps: Vec<Step>,
}

impl From<&Plan> for PlanSnapshot {
    fn from(plan: &Plan) -> Self {
        Self {
            goal: plan.goal.clone(),
            description: plan.description.clone(),
            status: plan.status,
            total_steps: plan.total_steps(),
            completed_steps: plan.completed_steps(),
            failed_steps: plan.failed_steps(),
            skipped_steps: plan.skipped_steps(),
            progress_percentage: plan.progress_percentage(),
            current_step: plan.current_step().map(Into::into),
            steps: plan.steps.clone(),
        }
    }
}
