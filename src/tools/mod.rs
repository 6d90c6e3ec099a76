//! Tool router: registers and dispatches MCP tool calls.
//!
//! Each tool module exposes its JSON Schema definition(s) and an
//! `execute`-style handler returning the text shown to the client. The
//! router owns the per-session state handlers share: the file store, the
//! guidance catalog, and the todo list.

pub mod bash;
pub mod edit;
pub mod glob;
pub mod grep;
pub mod guidance;
pub mod ls;
pub mod notebook;
pub mod read;
pub mod task;
pub mod web;
pub mod write;

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::error::{ToolError, ToolResult};
use crate::guidance::GuidanceCatalog;
use crate::server::ToolDefinition;
use crate::storage::FileStore;
use task::TodoList;

/// Tool router that dispatches MCP tool calls to implementations.
///
/// One router serves one client session; its todo list starts empty and is
/// dropped with the router.
pub struct ToolRouter {
    files: FileStore,
    guidance: GuidanceCatalog,
    todos: Mutex<TodoList>,
}

impl ToolRouter {
    pub fn new(config: &ServerConfig) -> Self {
        info!(
            workspace = %config.workspace.display(),
            confined = config.confine_to_workspace,
            "tool router ready"
        );
        Self {
            files: FileStore::new(config.workspace.clone(), config.confine_to_workspace),
            guidance: GuidanceCatalog::new(),
            todos: Mutex::new(TodoList::default()),
        }
    }

    /// List all available tools with their JSON Schema definitions.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        let mut tools = vec![
            read::tool_definition(),
            write::tool_definition(),
            edit::edit_definition(),
            edit::multi_edit_definition(),
            glob::tool_definition(),
            grep::tool_definition(),
            ls::tool_definition(),
            bash::tool_definition(),
            notebook::read_definition(),
            notebook::edit_definition(),
            web::fetch_definition(),
            web::search_definition(),
        ];
        tools.extend(task::tool_definitions());
        tools.extend(guidance::tool_definitions());
        tools
    }

    /// Call a tool by name with the given JSON arguments.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> ToolResult<String> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "Read" => read::execute(&self.files, parse_args(name, arguments)?),
            "Write" => write::execute(&self.files, parse_args(name, arguments)?),
            "Edit" => edit::execute_edit(&self.files, parse_args(name, arguments)?),
            "MultiEdit" => edit::execute_multi_edit(&self.files, parse_args(name, arguments)?),
            "Glob" => glob::execute(&self.files, parse_args(name, arguments)?),
            "Grep" => grep::execute(&self.files, parse_args(name, arguments)?),
            "LS" => ls::execute(&self.files, parse_args(name, arguments)?),
            "Bash" => bash::execute(self.files.root(), parse_args(name, arguments)?),
            "NotebookRead" => notebook::execute_read(&self.files, parse_args(name, arguments)?),
            "NotebookEdit" => notebook::execute_edit(&self.files, parse_args(name, arguments)?),
            "WebFetch" => web::execute_fetch(parse_args(name, arguments)?),
            "WebSearch" => web::execute_search(parse_args(name, arguments)?),
            "TodoWrite" => task::execute_todo_write(&self.todos, parse_args(name, arguments)?),
            "Task" => task::execute_task(parse_args(name, arguments)?),
            "exit_plan_mode" => task::execute_exit_plan_mode(parse_args(name, arguments)?),
            "GetToolGuidance" => {
                guidance::execute_tool_guidance(&self.guidance, parse_args(name, arguments)?)
            }
            "GetWorkflowGuidance" => {
                guidance::execute_workflow_guidance(&self.guidance, parse_args(name, arguments)?)
            }
            "GetErrorHelp" => {
                guidance::execute_error_help(&self.guidance, parse_args(name, arguments)?)
            }
            "GetQuickStart" => {
                guidance::execute_quick_start(&self.guidance, parse_args(name, arguments)?)
            }
            _ => Err(ToolError::UnknownTool(name.to_owned())),
        }
    }

    /// Snapshot of the session's todo list.
    pub fn todos(&self) -> ToolResult<TodoList> {
        self.todos
            .lock()
            .map(|list| list.clone())
            .map_err(|e| ToolError::SessionState(e.to_string()))
    }
}

/// Deserialize tool arguments, treating a missing argument object as `{}`.
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: serde_json::Value) -> ToolResult<T> {
    let arguments = if arguments.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_owned(),
        reason: e.to_string(),
    })
}

/// Sort paths newest-modified first; ties and unreadable metadata fall back
/// to path order.
pub(crate) fn sort_newest_first(paths: &mut Vec<PathBuf>) {
    let mtime = |p: &Path| {
        std::fs::metadata(p)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH)
    };
    let mut keyed: Vec<(SystemTime, PathBuf)> =
        paths.drain(..).map(|p| (mtime(&p), p)).collect();
    keyed.sort_by(|(ta, pa), (tb, pb)| tb.cmp(ta).then_with(|| pa.cmp(pb)));
    paths.extend(keyed.into_iter().map(|(_, p)| p));
}

/// Directory names never descended into by the glob and grep walkers.
pub(crate) fn is_noise_dir(name: &str) -> bool {
    name.starts_with('.') || name == "node_modules" || name == "target"
}
