//! devtools-mcp -- standalone MCP server for coding assistants.
//!
//! Usage: devtools-mcp [--workspace <path>] [--allow-outside-workspace]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "devtools-mcp", version, about)]
struct Cli {
    /// Workspace root for relative paths and shell commands.
    #[arg(long, env = "DEVTOOLS_WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Allow file tools to touch paths outside the workspace.
    #[arg(long, env = "DEVTOOLS_ALLOW_OUTSIDE_WORKSPACE")]
    allow_outside_workspace: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not interfere with MCP stdio.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let workspace = cli
        .workspace
        .canonicalize()
        .with_context(|| format!("invalid workspace: {}", cli.workspace.display()))?;

    let config = devtools_mcp::ServerConfig {
        workspace,
        confine_to_workspace: !cli.allow_outside_workspace,
    };

    devtools_mcp::run_mcp_server(&config)
}
