//! Display implementations for domain models.
//!
//! All output is markdown so it renders well both through the terminal
//! renderer and as MCP tool result text. Step formatting is compact: one
//! heading line with the status icon, then result/error paragraphs only
//! where they carry information.

use std::fmt;

use super::datetime::{HumanDuration, LocalDateTime};
use crate::models::{PlanSnapshot, PlanStatus, Step, StepStatus};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "### {}. {} ({}",
            self.id,
            self.description,
            self.status.with_icon()
        )?;
        if let Some(duration) = self.duration() {
            write!(f, ", {}", HumanDuration(duration))?;
        }
        writeln!(f, ")")?;

        // Result is set for completed and skipped steps
        if let Some(result) = &self.result {
            writeln!(f)?;
            writeln!(f, "{result}")?;
        }

        if let Some(error) = &self.error_message {
            writeln!(f)?;
            writeln!(f, "Error: {error}")?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.goal)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(
            f,
            "- Progress: {}/{} steps ({:.0}%)",
            self.completed_steps, self.total_steps, self.progress_percentage
        )?;
        if self.failed_steps > 0 {
            writeln!(f, "- Failed: {}", self.failed_steps)?;
        }
        if self.skipped_steps > 0 {
            writeln!(f, "- Skipped: {}", self.skipped_steps)?;
        }
        if let Some(current) = &self.current_step {
            writeln!(f, "- Current step: {}. {}", current.id, current.description)?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }

        Ok(())
    }
}

/// Contextual wrapper that adds creation timestamps to a step listing.
///
/// Used by surfaces that show a plan's history entries, where the creation
/// time matters more than live progress.
pub struct ArchivedPlan<'a> {
    pub snapshot: &'a PlanSnapshot,
    pub created_at: &'a jiff::Timestamp,
}

impl<'a> fmt::Display for ArchivedPlan<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} ({}, {}/{} steps, created {})",
            self.snapshot.goal,
            self.snapshot.status,
            self.snapshot.completed_steps,
            self.snapshot.total_steps,
            LocalDateTime(self.created_at)
        )
    }
}
