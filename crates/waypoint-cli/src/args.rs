use clap::{Parser, Subcommand};

/// Main command-line interface for the Waypoint execution tracker
///
/// Waypoint tracks a multi-step plan toward a goal and drives it to
/// completion one step at a time. The plan lives in memory for the lifetime
/// of the process: `drive` hosts it behind an interactive prompt, `serve`
/// hosts it behind an MCP server so a tool-calling model can drive it.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waypoint CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Drive a plan interactively from the terminal (default)
    #[command(alias = "d")]
    Drive,
    /// Start the MCP server
    Serve,
}
