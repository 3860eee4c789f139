//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;
use waypoint_core::{params as core, NoPlanStatus, PlanManager};

use super::{errors::error_reply, prompts::prompt_templates};

/// Generic MCP wrapper for core parameter types with serde integration
///
/// The core parameter structs carry no framework derives; this transparent
/// wrapper adds JSON deserialization and schema generation for the MCP
/// protocol layer without duplicating each struct.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ExecuteStep = McpParams<core::ExecuteStep>;
pub type FailStep = McpParams<core::FailStep>;
pub type AbortPlan = McpParams<core::AbortPlan>;

pub type McpResult = Result<CallToolResult, McpError>;

fn text_result(text: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    manager: Arc<Mutex<PlanManager>>,
}

impl McpHandlers {
    pub fn new(manager: Arc<Mutex<PlanManager>>) -> Self {
        Self { manager }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {:?}", params);

        match self.manager.lock().await.create_plan(params.as_ref()) {
            Ok(report) => text_result(report.to_string()),
            Err(e) => Ok(error_reply(&e)),
        }
    }

    pub async fn execute_next_step(
        &self,
        Parameters(params): Parameters<ExecuteStep>,
    ) -> McpResult {
        debug!("execute_next_step: {:?}", params);

        match self.manager.lock().await.execute_next_step(params.as_ref()) {
            Ok(report) => text_result(report.to_string()),
            Err(e) => Ok(error_reply(&e)),
        }
    }

    pub async fn get_plan_status(&self) -> McpResult {
        debug!("get_plan_status");

        let text = match self.manager.lock().await.plan_status() {
            Some(snapshot) => snapshot.to_string(),
            None => NoPlanStatus.to_string(),
        };
        text_result(text)
    }

    pub async fn mark_step_failed(&self, Parameters(params): Parameters<FailStep>) -> McpResult {
        debug!("mark_step_failed: {:?}", params);

        match self.manager.lock().await.mark_step_failed(params.as_ref()) {
            Ok(report) => text_result(report.to_string()),
            Err(e) => Ok(error_reply(&e)),
        }
    }

    pub async fn abort_plan(&self, Parameters(params): Parameters<AbortPlan>) -> McpResult {
        debug!("abort_plan: {:?}", params);

        match self.manager.lock().await.abort_plan(params.as_ref()) {
            Ok(report) => text_result(report.to_string()),
            Err(e) => Ok(error_reply(&e)),
        }
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let prompts = prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let templates = prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(McpError::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(McpError::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(McpError::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
