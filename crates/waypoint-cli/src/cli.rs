//! Interactive drive session.
//!
//! The tracker is in-memory and single-process, so the human-facing surface
//! is a line-oriented session rather than one-shot subcommands: the plan
//! would be gone before a second invocation could see it. Commands mirror
//! the manager's operation set one-to-one; every outcome and every error is
//! rendered as markdown through the terminal renderer.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use waypoint_core::{
    display::ArchivedPlan,
    params::{AbortPlan, CreatePlan, ExecuteStep, FailStep},
    NoPlanStatus, PlanManager, PlanSnapshot,
};

use crate::renderer::TerminalRenderer;

const HELP: &str = "\
# Commands

- `create`: declare a new plan (prompts for goal, approach, and steps)
- `next <result>`: report the step just worked on as done; arms the next one
- `fail <error>`: report the in-progress step as failed
- `abort <reason>`: abandon the plan, skipping all remaining steps
- `status`: show the plan snapshot
- `history`: list plans superseded in this session
- `help`: show this text
- `quit`: leave the session
";

/// Interactive session driving a single manager from stdin.
pub struct DriveSession {
    manager: PlanManager,
    renderer: TerminalRenderer,
}

impl DriveSession {
    pub fn new(manager: PlanManager, renderer: TerminalRenderer) -> Self {
        Self { manager, renderer }
    }

    /// Run the session until `quit` or end of input.
    pub fn run(mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        self.renderer
            .render("Waypoint drive session. Type `help` for commands.\n")?;

        loop {
            prompt("> ")?;
            let Some(line) = read_line(&mut lines)? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (command, rest) = match line.split_once(char::is_whitespace) {
                Some((command, rest)) => (command, rest.trim()),
                None => (line, ""),
            };

            match command {
                "create" => self.handle_create(&mut lines)?,
                "next" => self.handle_next(rest)?,
                "fail" => self.handle_fail(rest)?,
                "abort" => self.handle_abort(rest)?,
                "status" => self.handle_status()?,
                "history" => self.handle_history()?,
                "help" => self.renderer.render(HELP)?,
                "quit" | "exit" => break,
                other => self
                    .renderer
                    .render(&format!("Unknown command `{other}`. Type `help`.\n"))?,
            }
        }

        Ok(())
    }

    /// Collect goal, approach, and step list through sub-prompts.
    fn handle_create(&mut self, lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<()> {
        prompt("Goal: ")?;
        let Some(goal) = read_line(lines)? else {
            return Ok(());
        };
        prompt("Approach: ")?;
        let Some(description) = read_line(lines)? else {
            return Ok(());
        };

        self.renderer
            .render("Steps, one per line; finish with a blank line:\n")?;
        let mut steps = Vec::new();
        loop {
            prompt(&format!("{}. ", steps.len() + 1))?;
            match read_line(lines)? {
                Some(step) if !step.trim().is_empty() => steps.push(step),
                _ => break,
            }
        }

        let params = CreatePlan {
            goal,
            description,
            steps,
        };
        match self.manager.create_plan(&params) {
            Ok(report) => self.renderer.render(&report.to_string()),
            Err(e) => self.render_error(&e),
        }
    }

    fn handle_next(&mut self, result: &str) -> Result<()> {
        if result.is_empty() {
            return self
                .renderer
                .render("Usage: `next <what was accomplished>`\n");
        }
        let params = ExecuteStep {
            step_result: result.to_string(),
        };
        match self.manager.execute_next_step(&params) {
            Ok(report) => self.renderer.render(&report.to_string()),
            Err(e) => self.render_error(&e),
        }
    }

    fn handle_fail(&mut self, error_message: &str) -> Result<()> {
        if error_message.is_empty() {
            return self.renderer.render("Usage: `fail <what went wrong>`\n");
        }
        let params = FailStep {
            error_message: error_message.to_string(),
        };
        match self.manager.mark_step_failed(&params) {
            Ok(report) => self.renderer.render(&report.to_string()),
            Err(e) => self.render_error(&e),
        }
    }

    fn handle_abort(&mut self, reason: &str) -> Result<()> {
        let reason = if reason.is_empty() {
            "aborted from drive session"
        } else {
            reason
        };
        let params = AbortPlan {
            reason: reason.to_string(),
        };
        match self.manager.abort_plan(&params) {
            Ok(report) => self.renderer.render(&report.to_string()),
            Err(e) => self.render_error(&e),
        }
    }

    fn handle_status(&mut self) -> Result<()> {
        match self.manager.plan_status() {
            Some(snapshot) => self.renderer.render(&snapshot.to_string()),
            None => self.renderer.render(&NoPlanStatus.to_string()),
        }
    }

    fn handle_history(&mut self) -> Result<()> {
        if self.manager.history().is_empty() {
            return self.renderer.render("No superseded plans this session.\n");
        }
        let mut text = String::from("# History\n\n");
        for plan in self.manager.history() {
            let snapshot = PlanSnapshot::from(plan);
            text.push_str(
                &ArchivedPlan {
                    snapshot: &snapshot,
                    created_at: &plan.created_at,
                }
                .to_string(),
            );
        }
        self.renderer.render(&text)
    }

    fn render_error(&self, error: &waypoint_core::PlanError) -> Result<()> {
        self.renderer.render(&format!("Error: {error}\n"))
    }
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(())
}

fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
