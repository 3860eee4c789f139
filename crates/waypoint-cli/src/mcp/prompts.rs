//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Get predefined prompt templates for plan driving
pub fn prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan".to_string(),
            description: "Break a goal into a Waypoint plan".to_string(),
            template: r#"You are an execution planner working against Waypoint's tracker tools.

# Goal
{goal}

# Your Task
Break this goal into a linear sequence of atomic, verifiable steps and register it with `create_plan`.

## Writing the step list
- One unit of work per step, in imperative mood ("Create the project folder")
- Strictly linear: each step must be completable before the next begins
- Small enough that you can verify each one finished before reporting it
- 3 to 8 steps is usually right; prefer fewer, well-scoped steps

## Register the plan
Call `create_plan` with:
- **goal**: the goal above, verbatim or tightened
- **description**: one or two sentences on your intended approach
- **steps**: the ordered step descriptions

Then confirm the plan with `get_plan_status` before starting work."#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "goal".to_string(),
                description: "The objective to plan toward".to_string(),
                required: true,
            }],
        },
        PromptTemplate {
            name: "drive".to_string(),
            description: "Drive the current Waypoint plan to a terminal outcome".to_string(),
            template: r#"You are driving the current Waypoint plan to completion.

# The Loop
1. Call `get_plan_status` to see where the plan stands
2. Do the real work for the step the tracker names as current (or the first pending step)
3. Report it with `execute_next_step`, describing concretely what you accomplished
4. Repeat until the tracker reports the plan complete

# On Failure
If a step cannot be completed, call `mark_step_failed` with a precise error message. Then decide:
- The failure is local → continue with `execute_next_step`
- The failure blocks everything after it → `abort_plan` with the reason

# Ground Rules
- Never report a step done without having verified the work
- Step results are the permanent record; write them for a reader who was not there
- Do not reorder or skip steps; the tracker enforces declaration order"#
                .to_string(),
            arguments: vec![],
        },
    ]
}
