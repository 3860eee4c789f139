//! MCP server implementation for Waypoint
//!
//! This module implements the Model Context Protocol server for Waypoint,
//! exposing the tracker's five operations as tools so a tool-calling model
//! can declare a plan and drive it step by step. The manager is held behind
//! an async mutex and each tool handler holds the lock for the whole
//! operation, so concurrent tool calls never interleave inside one
//! operation.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};
use waypoint_core::PlanManager;

pub mod errors;
pub mod handlers;
pub mod prompts;

// Re-export parameter types and result type from handlers for external use
pub use handlers::{AbortPlan, CreatePlan, ExecuteStep, FailStep, McpResult};

/// MCP server for Waypoint
#[derive(Clone)]
pub struct WaypointMcpServer {
    manager: Arc<Mutex<PlanManager>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    /// Create a new Waypoint MCP server
    pub fn new(manager: PlanManager) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "create_plan",
        description = "Declare a new plan toward a goal. Provide the goal, a short description of your approach, and the ordered list of step descriptions (imperative mood, one atomic unit of work each). Steps execute strictly in this order; the list is fixed once created. Replaces any existing plan (the old one moves to history)."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.manager.clone());
        handlers.create_plan(params).await
    }

    #[tool(
        name = "execute_next_step",
        description = "Report the step you just worked on as completed. Provide step_result describing what was actually accomplished. The tracker records the result, marks the step completed, and tells you which step is now in progress, or that the plan is complete. Work on the named step, then call this again."
    )]
    async fn execute_next_step(&self, params: Parameters<ExecuteStep>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.manager.clone());
        handlers.execute_next_step(params).await
    }

    #[tool(
        name = "get_plan_status",
        description = "Show the full plan snapshot: goal, plan status, progress counts and percentage, and every step with its status, result, and timing. Read-only; safe to call at any time."
    )]
    async fn get_plan_status(&self) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.manager.clone());
        handlers.get_plan_status().await
    }

    #[tool(
        name = "mark_step_failed",
        description = "Report the step currently in progress as failed, with error_message explaining why. The next step is NOT started automatically: decide whether to continue (execute_next_step) or give up (abort_plan) based on whether the failure blocks the remaining work."
    )]
    async fn mark_step_failed(&self, params: Parameters<FailStep>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.manager.clone());
        handlers.mark_step_failed(params).await
    }

    #[tool(
        name = "abort_plan",
        description = "Abandon the current plan. Every step that has not finished is marked skipped with your reason recorded. Safe to repeat: aborting a finished plan is a no-op that reports the situation."
    )]
    async fn abort_plan(&self, params: Parameters<AbortPlan>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.manager.clone());
        handlers.abort_plan(params).await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        let handlers = handlers::McpHandlers::new(self.manager.clone());
        handlers.list_prompts(request, context).await
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let handlers = handlers::McpHandlers::new(self.manager.clone());
        handlers.get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "waypoint".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Waypoint tracks one multi-step plan toward a goal and drives it to completion one step at a time. You decide what the steps are and do the actual work; Waypoint owns the bookkeeping: step order, statuses, timing, and failure handling.

## Core Concepts
- **Plan**: a goal, your approach, and an ordered step list. One plan is active at a time; creating a new plan moves the old one to history.
- **Step**: one atomic unit of work. Steps run strictly in declaration order; exactly one step is in progress between calls.

## Drive Loop
1. `create_plan` with the goal and the full ordered step list
2. Do the work for step 1 yourself (outside Waypoint)
3. `execute_next_step` with what you accomplished; the tracker completes the step and names the next one
4. Repeat work → `execute_next_step` until the tracker reports the plan complete

## When Something Goes Wrong
- `mark_step_failed` records the error on the in-progress step. Nothing advances automatically: follow up with `execute_next_step` to press on with the next step, or `abort_plan` if the failure blocks the rest.
- `abort_plan` skips every unfinished step and cancels the plan.

## Best Practices
- Keep steps small and verifiable; write them in imperative mood
- Put real detail into step_result; it is the permanent record of what happened
- Check `get_plan_status` whenever you lose track of where you are"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Waypoint MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
