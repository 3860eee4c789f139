//! Observer interface for plan lifecycle events.
//!
//! The manager reports every state change through an injected
//! [`PlanObserver`], so hosting layers can route progress to a log, a UI, or
//! a metrics pipeline without the core depending on any concrete sink. The
//! default sink is [`LogObserver`], which emits one line per event through
//! the `log` facade.

use std::fmt;

use jiff::SignedDuration;

use crate::display::HumanDuration;

/// A single plan or step state change.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    /// A new plan was created (steps follow as individual `StepAdded` events)
    PlanCreated { goal: String, total_steps: u32 },
    /// One step of a newly created plan was registered
    StepAdded { id: u32, description: String },
    /// The first step was started and the plan began executing
    PlanStarted { goal: String },
    /// A step moved to in-progress
    StepStarted { id: u32, description: String },
    /// A step completed successfully
    StepCompleted {
        id: u32,
        duration: Option<SignedDuration>,
    },
    /// A step failed
    StepFailed { id: u32, error_message: String },
    /// A step was skipped during an abort
    StepSkipped { id: u32 },
    /// Every step reached a terminal status
    PlanCompleted {
        goal: String,
        total_steps: u32,
        duration: Option<SignedDuration>,
    },
    /// The plan was aborted by the caller
    PlanAborted { reason: String, skipped_steps: u32 },
}

impl fmt::Display for PlanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanEvent::PlanCreated { goal, total_steps } => {
                write!(f, "plan created: {goal} ({total_steps} steps)")
            }
            PlanEvent::StepAdded { id, description } => {
                write!(f, "step {id} added: {description}")
            }
            PlanEvent::PlanStarted { goal } => write!(f, "plan started: {goal}"),
            PlanEvent::StepStarted { id, description } => {
                write!(f, "step {id} started: {description}")
            }
            PlanEvent::StepCompleted { id, duration } => match duration {
                Some(d) => write!(f, "step {id} completed in {}", HumanDuration(*d)),
                None => write!(f, "step {id} completed"),
            },
            PlanEvent::StepFailed { id, error_message } => {
                write!(f, "step {id} failed: {error_message}")
            }
            PlanEvent::StepSkipped { id } => write!(f, "step {id} skipped"),
            PlanEvent::PlanCompleted {
                goal,
                total_steps,
                duration,
            } => match duration {
                Some(d) => write!(
                    f,
                    "plan completed: {goal} ({total_steps} steps in {})",
                    HumanDuration(*d)
                ),
                None => write!(f, "plan completed: {goal} ({total_steps} steps)"),
            },
            PlanEvent::PlanAborted {
                reason,
                skipped_steps,
            } => {
                write!(f, "plan aborted ({skipped_steps} steps skipped): {reason}")
            }
        }
    }
}

/// Sink for plan lifecycle events, called synchronously on each state change.
pub trait PlanObserver: Send + Sync {
    fn on_event(&self, event: &PlanEvent);
}

/// Default observer: routes each event through `log::info!`.
#[derive(Debug, Default)]
pub struct LogObserver;

impl PlanObserver for LogObserver {
    fn on_event(&self, event: &PlanEvent) {
        log::info!("{event}");
    }
}

/// Observer that discards all events, for embedders that poll status instead.
#[derive(Debug, Default)]
pub struct NullObserver;

impl PlanObserver for NullObserver {
    fn on_event(&self, _event: &PlanEvent) {}
}
