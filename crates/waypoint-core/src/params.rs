//! Parameter structures for tracker operations.
//!
//! These structures are shared across interfaces (CLI, MCP) without
//! framework-specific derives: interface layers wrap them with their own
//! derives (clap arguments, MCP JSON schemas) and convert via `.into()` or a
//! transparent serde wrapper, keeping the core free of UI dependencies.
//! JSON schema generation is available behind the `schema` feature for
//! interfaces that need it.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for creating a new plan.
///
/// Replaces the current plan, if any; the previous plan is moved into the
/// manager's history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// The objective the plan works toward (required)
    pub goal: String,
    /// The intended approach, for the record
    #[serde(default)]
    pub description: String,
    /// Ordered step descriptions, one per step, in execution order. Must be
    /// non-empty; each entry must be non-blank.
    pub steps: Vec<String>,
}

/// Parameters for completing the step being worked on and arming the next.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExecuteStep {
    /// What was actually accomplished for the step just worked on.
    ///
    /// Example: "Created the project folder and initialized git with a
    /// default .gitignore."
    pub step_result: String,
}

/// Parameters for marking the in-progress step as failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FailStep {
    /// Why the step could not be completed
    pub error_message: String,
}

/// Parameters for aborting the current plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AbortPlan {
    /// Why the plan is being abandoned; recorded on every skipped step
    pub reason: String,
}
