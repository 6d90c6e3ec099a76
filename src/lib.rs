//! `devtools-mcp`: developer-assistant tools served over the Model Context
//! Protocol (JSON-RPC 2.0, newline-delimited stdio).
//!
//! # Tools
//!
//! - `Read` / `Write` — numbered reads with offset/limit, atomic writes
//! - `Edit` / `MultiEdit` — exact-match replacement with uniqueness checks;
//!   multi-edits apply in order and all-or-nothing
//! - `Glob` / `Grep` / `LS` — file discovery, content search, listings
//! - `Bash` — shell commands with timeout and output caps
//! - `NotebookRead` / `NotebookEdit` — Jupyter cell access
//! - `WebFetch` / `WebSearch` — page fetch and text extraction (search is
//!   a placeholder)
//! - `TodoWrite` / `Task` / `exit_plan_mode` — session task bookkeeping
//! - `GetToolGuidance` / `GetWorkflowGuidance` / `GetErrorHelp` /
//!   `GetQuickStart` — static usage guidance
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → server::serve → ToolRouter → tools::* → FileStore / edit / notebook
//! stdout (JSON-RPC) ←──────────────────┘
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod guidance;
pub mod notebook;
pub mod server;
pub mod storage;
pub mod tools;
pub mod util;

pub use config::ServerConfig;
pub use error::{ToolError, ToolResult};
pub use server::{run_mcp_server, serve};
pub use tools::ToolRouter;
