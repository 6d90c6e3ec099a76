//! TodoWrite, Task, and exit_plan_mode tools.
//!
//! The todo list is session state owned by the router: each `TodoWrite`
//! replaces it wholesale, and it is dropped when the session ends.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ToolError, ToolResult};
use crate::server::ToolDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub content: String,
    pub status: TodoStatus,
    pub priority: TodoPriority,
}

/// The session's current todo list.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Replace the whole list and return the status summary line.
    pub fn replace(&mut self, items: Vec<TodoItem>) -> String {
        self.items = items;
        self.summary()
    }

    pub fn summary(&self) -> String {
        let count = |status: TodoStatus| self.items.iter().filter(|t| t.status == status).count();
        format!(
            "{} total tasks ({} pending, {} in progress, {} completed)",
            self.items.len(),
            count(TodoStatus::Pending),
            count(TodoStatus::InProgress),
            count(TodoStatus::Completed)
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct TodoWriteParams {
    pub todos: Vec<TodoItem>,
}

#[derive(Debug, Deserialize)]
pub struct TaskParams {
    pub description: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ExitPlanModeParams {
    pub plan: String,
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "TodoWrite".to_owned(),
            description: "Use this tool to create and manage a structured task list for your current coding session"
                .to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "todos": {
                        "type": "array",
                        "description": "The updated todo list",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string" },
                                "content": { "type": "string", "minLength": 1 },
                                "status": {
                                    "type": "string",
                                    "enum": ["pending", "in_progress", "completed"]
                                },
                                "priority": {
                                    "type": "string",
                                    "enum": ["high", "medium", "low"]
                                }
                            },
                            "required": ["content", "status", "priority", "id"]
                        }
                    }
                },
                "required": ["todos"]
            }),
        },
        ToolDefinition {
            name: "Task".to_owned(),
            description: "Queue a task description for an autonomous agent. No agent is launched by \
                this server; the task is acknowledged with an id."
                .to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "description": {
                        "type": "string",
                        "description": "A short (3-5 word) description of the task"
                    },
                    "prompt": {
                        "type": "string",
                        "description": "The task for the agent to perform"
                    }
                },
                "required": ["description", "prompt"]
            }),
        },
        ToolDefinition {
            name: "exit_plan_mode".to_owned(),
            description: "Use this tool when you are in plan mode and have finished presenting your plan and are ready to code"
                .to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "plan": {
                        "type": "string",
                        "description": "The plan you came up with, that you want to run by the user for approval. Supports markdown."
                    }
                },
                "required": ["plan"]
            }),
        },
    ]
}

pub fn execute_todo_write(todos: &Mutex<TodoList>, params: TodoWriteParams) -> ToolResult<String> {
    if let Some(empty) = params.todos.iter().find(|t| t.content.is_empty()) {
        return Err(ToolError::InvalidArguments {
            tool: "TodoWrite".to_owned(),
            reason: format!("todo {:?} has empty content", empty.id),
        });
    }

    let summary = todos
        .lock()
        .map_err(|e| ToolError::SessionState(e.to_string()))?
        .replace(params.todos);
    info!(%summary, "todo list replaced");

    Ok(format!(
        "Todos have been modified successfully. Ensure that you continue to use the todo list to \
         track your progress. Please proceed with the current tasks if applicable\n\nSummary: {summary}"
    ))
}

pub fn execute_task(params: TaskParams) -> ToolResult<String> {
    let task_id = uuid::Uuid::new_v4();
    info!(%task_id, description = %params.description, "task queued");
    Ok(format!(
        "Task \"{}\" (ID: {task_id}) has been queued for execution.\n\nPrompt: {}\n\n\
         Note: this server does not run agents; the task is acknowledged and logged only.",
        params.description, params.prompt
    ))
}

pub fn execute_exit_plan_mode(params: ExitPlanModeParams) -> ToolResult<String> {
    Ok(format!(
        "Exiting plan mode. Here's the plan for approval:\n\n{}\n\n\
         Ready to begin implementation when you give the go-ahead.",
        params.plan
    ))
}
