//! Waypoint CLI Application
//!
//! Command-line host for the waypoint plan execution tracker: an interactive
//! drive session for humans, and an MCP server mode for tool-calling agents.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::DriveSession;
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::PlanManager;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { no_color, command } = Args::parse();

    info!("Waypoint started");

    match command {
        Some(Commands::Serve) => {
            info!("Starting Waypoint MCP server");
            run_stdio_server(WaypointMcpServer::new(PlanManager::new()))
                .await
                .context("MCP server failed")
        }
        Some(Commands::Drive) | None => {
            let renderer = TerminalRenderer::new(!no_color);
            DriveSession::new(PlanManager::new(), renderer).run()
        }
    }
}
