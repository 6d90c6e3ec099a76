//! LS tool: single-level directory listing.

use anyhow::Context;
use serde::Deserialize;

use crate::error::{StorageError, ToolResult};
use crate::server::ToolDefinition;
use crate::storage::FileStore;

#[derive(Debug, Deserialize)]
pub struct LsParams {
    pub path: String,
    /// Glob patterns matched against entry names.
    #[serde(default)]
    pub ignore: Vec<String>,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "LS".to_owned(),
        description: "Lists files and directories in a given path.".to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The absolute path to the directory to list (must be absolute, not relative)"
                },
                "ignore": {
                    "type": "array",
                    "description": "List of glob patterns to ignore",
                    "items": { "type": "string" }
                }
            },
            "required": ["path"]
        }),
    }
}

pub fn execute(files: &FileStore, params: LsParams) -> ToolResult<String> {
    let dir = files.resolve(&params.path)?;

    let mut ignore = globset::GlobSetBuilder::new();
    for pattern in &params.ignore {
        ignore.add(
            globset::Glob::new(pattern)
                .with_context(|| format!("invalid ignore pattern: {pattern}"))?,
        );
    }
    let ignore = ignore.build().context("failed to build ignore set")?;

    let entries = std::fs::read_dir(&dir).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound { path: dir.clone() }
        } else {
            StorageError::Io {
                path: dir.clone(),
                source,
            }
        }
    })?;

    let mut listing = Vec::new();
    for entry in entries {
        let entry = entry.context("failed to read directory entry")?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore.is_match(&name) {
            continue;
        }
        // Follows symlinks so a link to a directory lists as one.
        let Ok(meta) = std::fs::metadata(entry.path()) else {
            continue;
        };
        let line = if meta.is_dir() {
            format!("{name}/")
        } else {
            format!("{name} ({} bytes)", meta.len())
        };
        listing.push((name, line));
    }
    listing.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(listing
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n"))
}
