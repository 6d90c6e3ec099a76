//! Error types for tool handlers and the file-storage layer.

use std::path::PathBuf;

use crate::edit::EditError;
use crate::notebook::NotebookError;

/// Failures of the file-storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Nothing exists at the resolved path.
    #[error("File not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// The path resolves outside the configured workspace.
    #[error("path escapes workspace boundary: {path}")]
    OutsideWorkspace { path: String },

    /// The path string itself is unusable.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// The file exists but is not valid UTF-8 text.
    #[error("file is not valid UTF-8 text: {}", .path.display())]
    NotText { path: PathBuf },

    /// I/O error with context.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by tool handlers.
///
/// The server maps [`ToolError::UnknownTool`] and
/// [`ToolError::InvalidArguments`] to their JSON-RPC codes; everything else
/// is reported as an internal error carrying the display message.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Notebook(#[from] NotebookError),

    /// Shell command exited unsuccessfully.
    #[error("Command failed with exit code {code}{}{}", labeled("Stdout", .stdout), labeled("Stderr", .stderr))]
    CommandFailed {
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Command timed out after {timeout_ms}ms")]
    CommandTimedOut { timeout_ms: u64 },

    #[error("Failed to fetch URL: {0}")]
    Fetch(String),

    /// Task list lock was poisoned by a panicking handler.
    #[error("session state unavailable: {0}")]
    SessionState(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn labeled(label: &str, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("\n{label}: {text}")
    }
}

/// Convenience result type for tool handlers.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_matches_error_help_pattern() {
        let err = StorageError::NotFound {
            path: PathBuf::from("/tmp/missing.txt"),
        };
        assert_eq!(err.to_string(), "File not found at /tmp/missing.txt");
    }

    #[test]
    fn test_command_failed_includes_streams() {
        let err = ToolError::CommandFailed {
            code: 2,
            stdout: String::new(),
            stderr: "boom".to_owned(),
        };
        assert_eq!(err.to_string(), "Command failed with exit code 2\nStderr: boom");
    }

    #[test]
    fn test_edit_error_is_transparent() {
        let err = ToolError::from(EditError::EmptySpecList);
        assert_eq!(err.to_string(), "at least one edit is required");
    }
}
