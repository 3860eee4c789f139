//! High-level manager API for driving a plan to completion.
//!
//! This module provides the main [`PlanManager`] interface of the execution
//! tracker. The manager owns at most one active plan and exposes the small
//! operation set an external driver (a tool-calling model, a human at a
//! prompt) invokes to move the plan through its lifecycle:
//!
//! ```text
//! ┌────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │   Driver   │───▶│   PlanManager    │───▶│   Plan / Steps   │
//! │ (CLI, MCP) │    │ (ops, reports)   │    │ (state machine)  │
//! └────────────┘    └──────────────────┘    └──────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: factory for manager instances with observer injection
//! - [`ops`]: the operation set (create, execute, status, fail, abort)
//!
//! ## Design principles
//!
//! 1. **Synchronous**: every operation mutates state and returns immediately;
//!    there is no background work and nothing to await.
//! 2. **Forward-only**: all status changes go through the transition tables,
//!    so no step or plan ever re-enters an earlier state.
//! 3. **Recoverable errors**: every error names the condition and the valid
//!    next operation; nothing is fatal to the hosting process.
//! 4. **Observable**: each state change is reported to the injected
//!    [`PlanObserver`](crate::observer::PlanObserver) before the operation
//!    returns.
//!
//! The manager assumes one sequential driver. Surfaces that accept
//! concurrent callers must serialize whole operations externally (the MCP
//! server holds the manager behind an async mutex for exactly this reason).

use crate::{models::Plan, observer::PlanObserver};

pub mod builder;
pub mod ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::PlanManagerBuilder;

/// Main manager interface owning the current plan and its history.
pub struct PlanManager {
    pub(crate) current: Option<Plan>,
    pub(crate) history: Vec<Plan>,
    pub(crate) observer: Box<dyn PlanObserver>,
}

impl PlanManager {
    /// Creates a manager with the default log-based observer.
    pub fn new() -> Self {
        PlanManagerBuilder::new().build()
    }

    /// Returns a builder for configuring the manager.
    pub fn builder() -> PlanManagerBuilder {
        PlanManagerBuilder::new()
    }

    /// The active plan, if one exists.
    pub fn current_plan(&self) -> Option<&Plan> {
        self.current.as_ref()
    }

    /// Plans displaced by a superseding creation, oldest first.
    pub fn history(&self) -> &[Plan] {
        &self.history
    }
}

impl Default for PlanManager {
    fn default() -> Self {
        Self::new()
    }
}
