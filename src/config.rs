//! Server configuration.

use std::path::PathBuf;

/// Configuration for the MCP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root for relative paths, the working directory of shell commands.
    pub workspace: PathBuf,
    /// Reject file paths that resolve outside `workspace`.
    pub confine_to_workspace: bool,
}

impl ServerConfig {
    /// Confined configuration rooted at `workspace`.
    pub fn for_workspace(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            confine_to_workspace: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::for_workspace(".")
    }
}
