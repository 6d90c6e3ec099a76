//! Write tool: create or overwrite a file, creating parent directories.

use serde::Deserialize;
use tracing::info;

use crate::error::ToolResult;
use crate::server::ToolDefinition;
use crate::storage::FileStore;

#[derive(Debug, Deserialize)]
pub struct WriteParams {
    pub file_path: String,
    pub content: String,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "Write".to_owned(),
        description: "Writes a file to the local filesystem. Creates parent directories as needed \
            and overwrites any existing content."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to write (must be absolute, not relative)"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["file_path", "content"]
        }),
    }
}

pub fn execute(files: &FileStore, params: WriteParams) -> ToolResult<String> {
    let path = files.resolve(&params.file_path)?;
    let existed = files.write_text(&path, &params.content)?;

    info!(path = %path.display(), bytes = params.content.len(), existed, "file written");

    let action = if existed { "updated" } else { "created" };
    Ok(format!("File {action} successfully at: {}", path.display()))
}
