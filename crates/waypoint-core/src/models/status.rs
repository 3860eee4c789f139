//! Status enumerations and transition tables for plans and steps.
//!
//! Every lifecycle change in the tracker is routed through the
//! [`StepStatus::transition`] and [`PlanStatus::transition`] tables, so the
//! legality of each move is checked in exactly one place. The mutating
//! methods on [`crate::models::Step`] and [`crate::models::Plan`] call into
//! these tables and refuse to stamp timestamps or store results for an
//! illegal move.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An attempted move between two statuses that the transition table rejects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal transition: cannot apply '{event}' to a {kind} in status '{from}'")]
pub struct TransitionError {
    /// "step" or "plan"
    pub kind: &'static str,
    /// Status the entity was in when the event arrived
    pub from: &'static str,
    /// The rejected event
    pub event: &'static str,
}

/// Events that drive a step through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Begin work on a pending step
    Start,
    /// Finish an in-progress step successfully
    Complete,
    /// Finish an in-progress step unsuccessfully
    Fail,
    /// Abandon a step that never reached a terminal state (abort path)
    Skip,
}

impl StepEvent {
    fn as_str(self) -> &'static str {
        match self {
            StepEvent::Start => "start",
            StepEvent::Complete => "complete",
            StepEvent::Fail => "fail",
            StepEvent::Skip => "skip",
        }
    }
}

/// Events that drive a plan through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEventKind {
    /// First step started
    Start,
    /// Last step reached a terminal status
    Finish,
    /// Caller-requested abort
    Abort,
}

impl PlanEventKind {
    fn as_str(self) -> &'static str {
        match self {
            PlanEventKind::Start => "start",
            PlanEventKind::Finish => "finish",
            PlanEventKind::Abort => "abort",
        }
    }
}

/// Type-safe enumeration of step statuses.
///
/// A step only ever moves forward: `Pending → InProgress → Completed/Failed`,
/// or `Pending/InProgress → Skipped` when the plan is aborted. `Completed`,
/// `Failed`, and `Skipped` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step has not been started yet
    #[default]
    Pending,

    /// Step is being worked on
    InProgress,

    /// Step finished successfully
    Completed,

    /// Step finished with an error
    Failed,

    /// Step was abandoned when the plan was aborted
    Skipped,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "inprogress" | "in_progress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            "failed" => Ok(StepStatus::Failed),
            "skipped" => Ok(StepStatus::Skipped),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "inprogress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        }
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Pending => "○ Pending",
            StepStatus::InProgress => "➤ In Progress",
            StepStatus::Completed => "✓ Completed",
            StepStatus::Failed => "✗ Failed",
            StepStatus::Skipped => "⊘ Skipped",
        }
    }

    /// Whether no further transition is possible from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped
        )
    }

    /// Apply a lifecycle event, returning the successor status.
    ///
    /// This is the single source of truth for step transition legality.
    pub fn transition(self, event: StepEvent) -> Result<StepStatus, TransitionError> {
        match (self, event) {
            (StepStatus::Pending, StepEvent::Start) => Ok(StepStatus::InProgress),
            (StepStatus::InProgress, StepEvent::Complete) => Ok(StepStatus::Completed),
            (StepStatus::InProgress, StepEvent::Fail) => Ok(StepStatus::Failed),
            (StepStatus::Pending | StepStatus::InProgress, StepEvent::Skip) => {
                Ok(StepStatus::Skipped)
            }
            (from, event) => Err(TransitionError {
                kind: "step",
                from: from.as_str(),
                event: event.as_str(),
            }),
        }
    }
}

/// Type-safe enumeration of plan statuses.
///
/// `Completed` and `Cancelled` are terminal; nothing mutates a terminal plan
/// except a superseding plan creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan exists but no step has been started
    #[default]
    Created,

    /// At least one step has been started
    Executing,

    /// Every step reached a terminal status
    Completed,

    /// Plan was aborted by the caller
    Cancelled,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(PlanStatus::Created),
            "executing" => Ok(PlanStatus::Executing),
            "completed" => Ok(PlanStatus::Completed),
            "cancelled" => Ok(PlanStatus::Cancelled),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Created => "created",
            PlanStatus::Executing => "executing",
            PlanStatus::Completed => "completed",
            PlanStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlanStatus::Completed | PlanStatus::Cancelled)
    }

    /// Apply a lifecycle event, returning the successor status.
    pub fn transition(self, event: PlanEventKind) -> Result<PlanStatus, TransitionError> {
        match (self, event) {
            (PlanStatus::Created, PlanEventKind::Start) => Ok(PlanStatus::Executing),
            (PlanStatus::Executing, PlanEventKind::Finish) => Ok(PlanStatus::Completed),
            (PlanStatus::Created | PlanStatus::Executing, PlanEventKind::Abort) => {
                Ok(PlanStatus::Cancelled)
            }
            (from, event) => Err(TransitionError {
                kind: "plan",
                from: from.as_str(),
                event: event.as_str(),
            }),
        }
    }
}
