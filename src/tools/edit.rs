//! Edit and MultiEdit tools: exact string replacement in a file.
//!
//! Both read the file once, run the replacement engine in memory, and
//! write back only when every replacement succeeded.

use serde::Deserialize;
use tracing::info;

use crate::edit::{self, ReplacementSpec, diff};
use crate::error::ToolResult;
use crate::server::ToolDefinition;
use crate::storage::FileStore;

#[derive(Debug, Deserialize)]
pub struct EditParams {
    pub file_path: String,
    pub old_string: String,
    pub new_string: String,
    #[serde(default)]
    pub replace_all: bool,
}

#[derive(Debug, Deserialize)]
pub struct MultiEditParams {
    pub file_path: String,
    pub edits: Vec<EditEntry>,
}

/// One entry of a `MultiEdit` request.
#[derive(Debug, Deserialize)]
pub struct EditEntry {
    pub old_string: String,
    pub new_string: String,
    #[serde(default)]
    pub replace_all: bool,
}

impl From<EditEntry> for ReplacementSpec {
    fn from(entry: EditEntry) -> Self {
        Self {
            old_text: entry.old_string,
            new_text: entry.new_string,
            replace_all: entry.replace_all,
        }
    }
}

fn edit_entry_schema() -> serde_json::Value {
    serde_json::json!({
        "old_string": {
            "type": "string",
            "description": "The text to replace"
        },
        "new_string": {
            "type": "string",
            "description": "The text to replace it with (must be different from old_string)"
        },
        "replace_all": {
            "type": "boolean",
            "description": "Replace all occurences of old_string (default false)",
            "default": false
        }
    })
}

pub fn edit_definition() -> ToolDefinition {
    let mut properties = edit_entry_schema();
    properties["file_path"] = serde_json::json!({
        "type": "string",
        "description": "The absolute path to the file to modify"
    });

    ToolDefinition {
        name: "Edit".to_owned(),
        description: "Performs exact string replacements in files. old_string must match the file \
            exactly and be unique unless replace_all is set."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": ["file_path", "old_string", "new_string"]
        }),
    }
}

pub fn multi_edit_definition() -> ToolDefinition {
    ToolDefinition {
        name: "MultiEdit".to_owned(),
        description: "This is a tool for making multiple edits to a single file in one operation. \
            Edits are applied in order and atomically: if any edit fails, the file is left untouched."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to modify"
                },
                "edits": {
                    "type": "array",
                    "description": "Array of edit operations to perform sequentially on the file",
                    "items": {
                        "type": "object",
                        "properties": edit_entry_schema(),
                        "required": ["old_string", "new_string"]
                    },
                    "minItems": 1
                }
            },
            "required": ["file_path", "edits"]
        }),
    }
}

pub fn execute_edit(files: &FileStore, params: EditParams) -> ToolResult<String> {
    let path = files.resolve(&params.file_path)?;
    let original = files.read_text(&path)?;

    let replaced = if params.replace_all {
        edit::count_occurrences(&original, &params.old_string)
    } else {
        1
    };
    let spec = ReplacementSpec {
        old_text: params.old_string,
        new_text: params.new_string,
        replace_all: params.replace_all,
    };
    let updated = edit::apply_single(&original, &spec)?;

    if updated != original {
        files.write_text(&path, &updated)?;
    }
    info!(path = %path.display(), replaced, "edit applied");

    let display = path.display().to_string();
    let summary = format!(
        "Successfully edited {display} ({replaced} {})",
        if replaced == 1 { "replacement" } else { "replacements" }
    );
    Ok(diff::render_report(&summary, &display, &original, &updated))
}

pub fn execute_multi_edit(files: &FileStore, params: MultiEditParams) -> ToolResult<String> {
    let path = files.resolve(&params.file_path)?;
    let original = files.read_text(&path)?;

    let specs: Vec<ReplacementSpec> = params.edits.into_iter().map(Into::into).collect();
    let outcome = edit::apply_sequence(&original, &specs)?;

    if outcome.content != original {
        files.write_text(&path, &outcome.content)?;
    }
    info!(path = %path.display(), applied = outcome.applied, "multi-edit applied");

    let display = path.display().to_string();
    let summary = format!(
        "Successfully applied {} edits to {display}",
        outcome.applied
    );
    Ok(diff::render_report(&summary, &display, &original, &outcome.content))
}
