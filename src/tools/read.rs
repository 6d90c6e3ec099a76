//! Read tool: numbered file contents with an offset/limit window.

use std::io::Read as _;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::{StorageError, ToolResult};
use crate::server::ToolDefinition;
use crate::storage::FileStore;
use crate::util::text::truncate_chars;

#[derive(Debug, Deserialize)]
pub struct ReadParams {
    pub file_path: String,
    /// Number of lines to skip before the window starts.
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

const fn default_limit() -> usize {
    2000
}

/// Bytes sniffed for NUL when deciding a file is binary.
const BINARY_CHECK_BYTES: usize = 8192;

/// Longest line shown before it is cut.
const MAX_LINE_CHARS: usize = 2000;

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "Read".to_owned(),
        description: "Reads a file from the local filesystem. You can access any file directly by using this tool. \
            Output is numbered like `cat -n`."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to read"
                },
                "offset": {
                    "type": "number",
                    "description": "The line number to start reading from. Only provide if the file is too large to read at once"
                },
                "limit": {
                    "type": "number",
                    "description": "The number of lines to read. Only provide if the file is too large to read at once."
                }
            },
            "required": ["file_path"]
        }),
    }
}

pub fn execute(files: &FileStore, params: ReadParams) -> ToolResult<String> {
    let path = files.resolve(&params.file_path)?;

    if let Some(size) = binary_size(&path)? {
        return Ok(format!(
            "Binary file detected: {} ({size} bytes)",
            path.display()
        ));
    }

    let content = files.read_text(&path)?;
    Ok(render_window(&content, params.offset, params.limit))
}

/// Size of the file if its first bytes contain a NUL, `None` for text.
fn binary_size(path: &Path) -> ToolResult<Option<u64>> {
    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
            .into());
        }
    };

    let mut head = Vec::with_capacity(BINARY_CHECK_BYTES);
    file.by_ref()
        .take(BINARY_CHECK_BYTES as u64)
        .read_to_end(&mut head)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if head.contains(&0) {
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        return Ok(Some(size));
    }
    Ok(None)
}

/// Render lines `offset+1 ..= offset+limit` with 6-wide line numbers.
fn render_window(content: &str, offset: usize, limit: usize) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let total = lines.len();
    let start = offset.min(total);
    let end = start.saturating_add(limit).min(total);

    let mut output = lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "{:>6}\t{}",
                start + i + 1,
                truncate_chars(line, MAX_LINE_CHARS, "...")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    if end < total {
        output.push_str(&format!(
            "\n\n... ({} more lines, {total} total)",
            total - end
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_and_tab() {
        let out = render_window("a\nb", 0, 2000);
        assert_eq!(out, "     1\ta\n     2\tb");
    }

    #[test]
    fn test_offset_skips_lines() {
        let out = render_window("a\nb\nc\nd", 1, 2);
        assert_eq!(out, "     2\tb\n     3\tc\n\n... (1 more lines, 4 total)");
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        assert_eq!(render_window("a\nb", 10, 5), "");
    }

    #[test]
    fn test_long_line_truncated() {
        let line = "x".repeat(MAX_LINE_CHARS + 5);
        let out = render_window(&line, 0, 1);
        assert!(out.ends_with("..."));
        assert_eq!(out.len(), 7 + MAX_LINE_CHARS + 3);
    }
}
