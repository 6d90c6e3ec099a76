//! Guidance tools: render the static guidance catalog as markdown.

use std::fmt::Write as _;

use serde::Deserialize;

use crate::error::ToolResult;
use crate::guidance::{GuidanceCatalog, ToolGuidance};
use crate::server::ToolDefinition;

#[derive(Debug, Deserialize)]
pub struct ToolGuidanceParams {
    pub tool_name: String,
    #[serde(default)]
    pub guidance_type: GuidanceType,
}

/// Which sections of a tool's guidance to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceType {
    #[default]
    All,
    BestPractices,
    Patterns,
    Examples,
    Security,
}

impl GuidanceType {
    fn includes(self, section: Self) -> bool {
        self == Self::All || self == section
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkflowGuidanceParams {
    #[serde(default)]
    pub workflow_type: WorkflowType,
    #[serde(default)]
    pub specific_workflow: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    #[default]
    All,
    CommonWorkflows,
    DecisionMaking,
}

#[derive(Debug, Deserialize)]
pub struct ErrorHelpParams {
    #[serde(default)]
    pub error_message: Option<String>,
    /// Accepted for context; matching uses the message only.
    #[serde(default)]
    pub tool_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickStartParams {
    #[serde(default = "default_task_type")]
    pub task_type: String,
}

fn default_task_type() -> String {
    "general".to_owned()
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "GetToolGuidance".to_owned(),
            description: "Get comprehensive guidance on how to use specific tools effectively, \
                including best practices, common patterns, and examples"
                .to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "tool_name": {
                        "type": "string",
                        "description": "The name of the tool to get guidance for (e.g., \"Read\", \"Edit\", \"Bash\")"
                    },
                    "guidance_type": {
                        "type": "string",
                        "enum": ["all", "best_practices", "patterns", "examples", "security"],
                        "description": "Type of guidance to retrieve (default: all)",
                        "default": "all"
                    }
                },
                "required": ["tool_name"]
            }),
        },
        ToolDefinition {
            name: "GetWorkflowGuidance".to_owned(),
            description: "Get guidance on common workflows and decision-making patterns for complex tasks"
                .to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "workflow_type": {
                        "type": "string",
                        "enum": ["common_workflows", "decision_making", "all"],
                        "description": "Type of workflow guidance to retrieve",
                        "default": "all"
                    },
                    "specific_workflow": {
                        "type": "string",
                        "description": "Specific workflow to get guidance for (e.g., \"File Analysis\", \"Code Refactoring\")"
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "GetErrorHelp".to_owned(),
            description: "Get help with common errors and troubleshooting guidance".to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "error_message": {
                        "type": "string",
                        "description": "The error message you encountered"
                    },
                    "tool_name": {
                        "type": "string",
                        "description": "The tool that generated the error (optional)"
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "GetQuickStart".to_owned(),
            description: "Get a quick start guide for using the developer tools effectively".to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "task_type": {
                        "type": "string",
                        "enum": ["file_operations", "code_analysis", "debugging", "project_setup", "general"],
                        "description": "Type of task you want to accomplish",
                        "default": "general"
                    }
                },
                "required": []
            }),
        },
    ]
}

pub fn execute_tool_guidance(
    catalog: &GuidanceCatalog,
    params: ToolGuidanceParams,
) -> ToolResult<String> {
    let Some(guidance) = catalog.tool(&params.tool_name) else {
        return Ok(format!(
            "No guidance found for tool: {}. Available tools: {}",
            params.tool_name,
            catalog.tool_names().collect::<Vec<_>>().join(", ")
        ));
    };
    Ok(render_tool_guidance(guidance, params.guidance_type))
}

fn render_tool_guidance(guidance: &ToolGuidance, kind: GuidanceType) -> String {
    let mut out = format!("# {} Tool Guidance\n\n", guidance.tool);

    if kind.includes(GuidanceType::BestPractices) && !guidance.best_practices.is_empty() {
        push_list(&mut out, "## Best Practices", guidance.best_practices, "- ");
        out.push('\n');
    }
    if kind.includes(GuidanceType::Patterns) && !guidance.common_patterns.is_empty() {
        push_list(&mut out, "## Common Patterns", guidance.common_patterns, "- ");
        out.push('\n');
    }
    if kind.includes(GuidanceType::Examples) && !guidance.examples.is_empty() {
        out.push_str("## Examples\n");
        for example in guidance.examples {
            let _ = write!(
                out,
                "**{}:**\n```json\n{}\n```\n\n",
                example.description, example.code
            );
        }
    }
    if kind.includes(GuidanceType::Security) {
        if !guidance.security_notes.is_empty() {
            push_list(&mut out, "## Security Notes", guidance.security_notes, "⚠️ ");
            out.push('\n');
        }
        if !guidance.limitations.is_empty() {
            push_list(&mut out, "## Limitations", guidance.limitations, "- ");
            out.push('\n');
        }
    }
    out
}

pub fn execute_workflow_guidance(
    catalog: &GuidanceCatalog,
    params: WorkflowGuidanceParams,
) -> ToolResult<String> {
    let mut out = String::from("# Workflow Guidance\n\n");

    if let Some(name) = &params.specific_workflow {
        let Some(workflow) = catalog.workflow(name) else {
            let available: Vec<_> = catalog.workflows().iter().map(|w| w.name).collect();
            return Ok(format!(
                "Workflow \"{name}\" not found. Available workflows: {}",
                available.join(", ")
            ));
        };
        let _ = write!(
            out,
            "## {}\n\n**Example Use Case:** {}\n\n",
            workflow.name, workflow.example
        );
        push_list(&mut out, "**Steps:**", workflow.steps, "");
        return Ok(out);
    }

    let kind = params.workflow_type;
    if kind == WorkflowType::All || kind == WorkflowType::CommonWorkflows {
        out.push_str("## Common Workflows\n\n");
        for workflow in catalog.workflows() {
            let _ = write!(
                out,
                "### {}\n**Use Case:** {}\n",
                workflow.name, workflow.example
            );
            push_list(&mut out, "**Steps:**", workflow.steps, "");
            out.push('\n');
        }
    }
    if kind == WorkflowType::All || kind == WorkflowType::DecisionMaking {
        out.push_str("## Decision Making Guidelines\n\n");
        for decision in catalog.decisions() {
            let _ = writeln!(out, "### {}", decision.topic);
            for (condition, items) in decision.branches {
                push_list(&mut out, &format!("**{condition}:**"), items, "- ");
            }
            out.push('\n');
        }
    }
    Ok(out)
}

pub fn execute_error_help(catalog: &GuidanceCatalog, params: ErrorHelpParams) -> ToolResult<String> {
    let mut out = String::from("# Error Help\n\n");

    if let Some(message) = &params.error_message {
        if let Some(known) = catalog.match_error(message) {
            let _ = write!(
                out,
                "## Identified Error: {}\n\n**Error Pattern:** {}\n\n",
                known.name, known.pattern
            );
            push_list(&mut out, "**Solutions:**", known.solutions, "- ");
        } else {
            let _ = write!(
                out,
                "## Error Analysis\n\n**Your Error:** {message}\n\n"
            );
            if let Some(tool) = &params.tool_name {
                let _ = write!(out, "**Tool:** {tool}\n\n");
            }
            out.push_str(
                "**General Troubleshooting Steps:**\n\
                 1. Check the tool documentation with GetToolGuidance\n\
                 2. Verify file paths are absolute and correct\n\
                 3. Check file permissions and existence\n\
                 4. Review the exact parameters you're using\n\
                 5. Try a simpler version of the command first\n\n",
            );
        }
    }

    out.push_str("## All Common Errors\n\n");
    for known in catalog.known_errors() {
        let _ = write!(out, "### {}\n**Error:** {}\n", known.name, known.pattern);
        push_list(&mut out, "**Solutions:**", known.solutions, "- ");
        out.push('\n');
    }
    Ok(out)
}

pub fn execute_quick_start(catalog: &GuidanceCatalog, params: QuickStartParams) -> ToolResult<String> {
    let Some(guide) = catalog.quick_start(&params.task_type) else {
        return Ok(format!(
            "No quick start for task type: {}. Available task types: \
             file_operations, code_analysis, debugging, project_setup, general",
            params.task_type
        ));
    };

    let mut out = format!("# Quick Start Guide\n\n## {}\n\n", guide.title);
    push_list(&mut out, "### Steps", guide.steps, "");
    out.push('\n');
    push_list(&mut out, "### Tips", guide.tips, "💡 ");
    out.push_str(
        "\n### Need More Help?\n\
         - Use **GetToolGuidance** for specific tool documentation\n\
         - Use **GetWorkflowGuidance** for complex workflows\n\
         - Use **GetErrorHelp** when you encounter errors\n",
    );
    Ok(out)
}

/// Append `heading` and one `prefix`ed line per item.
fn push_list(out: &mut String, heading: &str, items: &[&str], prefix: &str) {
    out.push_str(heading);
    out.push('\n');
    for item in items {
        out.push_str(prefix);
        out.push_str(item);
        out.push('\n');
    }
}
