//! MCP protocol integration tests.
//!
//! Drives the JSON-RPC server through in-memory buffers and calls the tool
//! router directly for per-tool behavior.

use std::path::{Path, PathBuf};

use devtools_mcp::{ServerConfig, ToolError, ToolRouter};
use serde_json::{Value, json};

fn workspace() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().canonicalize().expect("canonicalize");
    (dir, root)
}

fn router(root: &Path) -> ToolRouter {
    ToolRouter::new(&ServerConfig::for_workspace(root))
}

/// Feed `requests` to the server and return the parsed response lines.
fn exchange(root: &Path, requests: &[Value]) -> Vec<Value> {
    let mut input = String::new();
    for req in requests {
        input.push_str(&req.to_string());
        input.push('\n');
    }
    let mut output = Vec::new();
    devtools_mcp::serve(input.as_bytes(), &mut output, &router(root)).expect("serve");

    String::from_utf8(output)
        .expect("utf-8 output")
        .lines()
        .map(|l| serde_json::from_str(l).expect("response json"))
        .collect()
}

#[test]
fn test_json_rpc_request_parsing() {
    let req: devtools_mcp::server::JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "0.1.0" }
        }
    }))
    .expect("should parse initialize request");

    assert_eq!(req.method, "initialize");
    assert_eq!(req.id, Some(json!(1)));
}

#[test]
fn test_json_rpc_error_response_serialization() {
    let resp = devtools_mcp::server::JsonRpcResponse {
        jsonrpc: "2.0".to_owned(),
        id: Some(json!(2)),
        result: None,
        error: Some(devtools_mcp::server::JsonRpcError {
            code: -32601,
            message: "method not found".to_owned(),
            data: None,
        }),
    };

    let json_str = serde_json::to_string(&resp).expect("should serialize");
    assert!(json_str.contains("-32601"));
    assert!(!json_str.contains("result"));
}

#[test]
fn test_session_over_buffers() {
    let (_dir, root) = workspace();
    let responses = exchange(
        &root,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
        ],
    );

    assert_eq!(responses.len(), 3, "notification must not be answered");
    assert_eq!(responses[0]["result"]["protocolVersion"], "2025-06-18");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "devtools-mcp");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"].as_array().map(Vec::len), Some(19));
    assert_eq!(responses[2]["result"], json!({}));
}

#[test]
fn test_protocol_errors() {
    let (_dir, root) = workspace();
    let mut input = b"{not json\n".to_vec();
    for req in [
        json!({"jsonrpc": "1.0", "id": 1, "method": "ping"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "Nope", "arguments": {}}}),
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "Read", "arguments": {}}}),
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "Read", "arguments": {"file_path": "missing.txt"}}}),
    ] {
        input.extend_from_slice(req.to_string().as_bytes());
        input.push(b'\n');
    }

    let mut output = Vec::new();
    devtools_mcp::serve(input.as_slice(), &mut output, &router(&root)).expect("serve");
    let responses: Vec<Value> = String::from_utf8(output)
        .expect("utf-8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("json"))
        .collect();

    let codes: Vec<i64> = responses
        .iter()
        .map(|r| r["error"]["code"].as_i64().expect("error code"))
        .collect();
    assert_eq!(codes, vec![-32700, -32600, -32601, -32601, -32602, -32603]);
    assert_eq!(responses[3]["error"]["message"], "Unknown tool: Nope");
    let message = responses[5]["error"]["message"].as_str().expect("message");
    assert!(message.starts_with("Tool execution failed: File not found at "));
}

#[test]
fn test_tool_definitions_complete() {
    let (_dir, root) = workspace();
    let tools = router(&root).list_tools();

    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Read",
            "Write",
            "Edit",
            "MultiEdit",
            "Glob",
            "Grep",
            "LS",
            "Bash",
            "NotebookRead",
            "NotebookEdit",
            "WebFetch",
            "WebSearch",
            "TodoWrite",
            "Task",
            "exit_plan_mode",
            "GetToolGuidance",
            "GetWorkflowGuidance",
            "GetErrorHelp",
            "GetQuickStart",
        ]
    );

    for tool in &tools {
        assert!(!tool.description.is_empty(), "tool {} missing description", tool.name);
        assert_eq!(tool.input_schema["type"], "object", "tool {} schema", tool.name);
    }
}

#[test]
fn test_write_then_read() {
    let (_dir, root) = workspace();
    let router = router(&root);
    let path = root.join("nested/dir/notes.txt");

    let out = router
        .call_tool(
            "Write",
            json!({"file_path": path.to_str().expect("path"), "content": "line1\nline2\nline3"}),
        )
        .expect("write");
    assert_eq!(out, format!("File created successfully at: {}", path.display()));

    let out = router
        .call_tool(
            "Write",
            json!({"file_path": "nested/dir/notes.txt", "content": "line1\nline2\nline3"}),
        )
        .expect("overwrite");
    assert!(out.starts_with("File updated successfully at: "));

    let out = router
        .call_tool("Read", json!({"file_path": "nested/dir/notes.txt", "offset": 1, "limit": 1}))
        .expect("read");
    assert_eq!(out, "     2\tline2\n\n... (1 more lines, 3 total)");
}

#[test]
fn test_path_outside_workspace_rejected() {
    let (_dir, root) = workspace();
    let err = router(&root)
        .call_tool("Write", json!({"file_path": "../escape.txt", "content": "x"}))
        .expect_err("escape");
    assert!(err.to_string().contains("escapes workspace"));
}

#[test]
fn test_edit_unique_and_ambiguous() {
    let (_dir, root) = workspace();
    let router = router(&root);
    let file = root.join("main.rs");
    std::fs::write(&file, "let a = foo();\nlet b = foo();\nlet c = bar();\n").expect("write");

    let err = router
        .call_tool(
            "Edit",
            json!({"file_path": "main.rs", "old_string": "foo()", "new_string": "qux()"}),
        )
        .expect_err("ambiguous");
    assert!(err.to_string().contains("appears 2 times"));

    let out = router
        .call_tool(
            "Edit",
            json!({"file_path": "main.rs", "old_string": "bar()", "new_string": "baz()"}),
        )
        .expect("edit");
    assert!(out.starts_with("Successfully edited"));
    assert!(out.contains("-let c = bar();"));
    assert!(out.contains("+let c = baz();"));

    let out = router
        .call_tool(
            "Edit",
            json!({"file_path": "main.rs", "old_string": "foo()", "new_string": "qux()", "replace_all": true}),
        )
        .expect("replace all");
    assert!(out.contains("(2 replacements)"));
    assert_eq!(
        std::fs::read_to_string(&file).expect("read"),
        "let a = qux();\nlet b = qux();\nlet c = baz();\n"
    );
}

#[test]
fn test_multi_edit_sequential() {
    let (_dir, root) = workspace();
    let router = router(&root);
    let file = root.join("cfg.toml");
    std::fs::write(&file, "name = \"old\"\nversion = 1\n").expect("write");

    let out = router
        .call_tool(
            "MultiEdit",
            json!({
                "file_path": "cfg.toml",
                "edits": [
                    {"old_string": "\"old\"", "new_string": "\"new\""},
                    {"old_string": "\"new\"\nversion = 1", "new_string": "\"new\"\nversion = 2"}
                ]
            }),
        )
        .expect("multi edit");
    assert!(out.starts_with(&format!("Successfully applied 2 edits to {}", file.display())));
    assert_eq!(
        std::fs::read_to_string(&file).expect("read"),
        "name = \"new\"\nversion = 2\n"
    );
}

#[test]
fn test_multi_edit_failure_leaves_file_untouched() {
    let (_dir, root) = workspace();
    let router = router(&root);
    let file = root.join("a.txt");
    std::fs::write(&file, "alpha beta gamma").expect("write");

    let err = router
        .call_tool(
            "MultiEdit",
            json!({
                "file_path": "a.txt",
                "edits": [
                    {"old_string": "alpha", "new_string": "ALPHA"},
                    {"old_string": "delta", "new_string": "DELTA"}
                ]
            }),
        )
        .expect_err("second edit misses");
    assert!(matches!(err, ToolError::Edit(_)));
    assert_eq!(std::fs::read_to_string(&file).expect("read"), "alpha beta gamma");

    let err = router
        .call_tool("MultiEdit", json!({"file_path": "a.txt", "edits": []}))
        .expect_err("empty list");
    assert_eq!(err.to_string(), "at least one edit is required");
}

#[test]
fn test_glob_ls_grep() {
    let (_dir, root) = workspace();
    let router = router(&root);
    std::fs::write(root.join("top.rs"), "fn main() {}\n").expect("write");
    std::fs::write(root.join("readme.txt"), "hello\n").expect("write");
    std::fs::create_dir_all(root.join("sub")).expect("mkdir");
    std::fs::write(root.join("sub/nested.rs"), "fn helper() {}\n").expect("write");
    std::fs::create_dir_all(root.join("target")).expect("mkdir");
    std::fs::write(root.join("target/build.rs"), "fn built() {}\n").expect("write");

    let out = router.call_tool("Glob", json!({"pattern": "**/*.rs"})).expect("glob");
    let mut found: Vec<&str> = out.lines().collect();
    found.sort_unstable();
    let top = root.join("top.rs");
    let nested = root.join("sub/nested.rs");
    assert_eq!(found, vec![nested.to_str().expect("path"), top.to_str().expect("path")]);

    let out = router
        .call_tool("Glob", json!({"pattern": "*.md"}))
        .expect("glob no match");
    assert_eq!(out, "No files matching pattern: *.md");

    let out = router
        .call_tool("LS", json!({"path": root.to_str().expect("path"), "ignore": ["target"]}))
        .expect("ls");
    assert_eq!(out, "readme.txt (6 bytes)\nsub/\ntop.rs (13 bytes)");

    let out = router
        .call_tool("Grep", json!({"pattern": "fn \\w+\\(", "include": "*.rs"}))
        .expect("grep");
    assert!(out.contains("top.rs"));
    assert!(out.contains("nested.rs"));
    assert!(!out.contains("readme.txt"));
}

#[test]
fn test_bash_output_and_failure() {
    let (_dir, root) = workspace();
    let router = router(&root);

    let out = router
        .call_tool("Bash", json!({"command": "echo devtools-test-output"}))
        .expect("bash");
    assert_eq!(out, "devtools-test-output\n");

    let err = router
        .call_tool("Bash", json!({"command": "exit 7"}))
        .expect_err("failure");
    assert!(matches!(err, ToolError::CommandFailed { code: 7, .. }));

    let err = router
        .call_tool("Bash", json!({"command": "sleep 5", "timeout": 100}))
        .expect_err("timeout");
    assert_eq!(err.to_string(), "Command timed out after 100ms");
}

#[test]
fn test_notebook_round_trip() {
    let (_dir, root) = workspace();
    let router = router(&root);
    std::fs::write(
        root.join("nb.ipynb"),
        r#"{"cells": [{"cell_type": "code", "metadata": {}, "outputs": [], "execution_count": null, "source": ["a = 1\n", "b = 2"]}], "metadata": {}, "nbformat": 4, "nbformat_minor": 5}"#,
    )
    .expect("write");

    let out = router
        .call_tool(
            "NotebookEdit",
            json!({"notebook_path": "nb.ipynb", "cell_id": "cell-1", "new_source": "# Notes", "cell_type": "markdown", "edit_mode": "insert"}),
        )
        .expect("insert");
    assert_eq!(out, "Successfully inserted new markdown cell with ID cell-2");

    let out = router
        .call_tool("NotebookRead", json!({"notebook_path": "nb.ipynb"}))
        .expect("read");
    assert_eq!(
        out,
        "Cell 1 (code):\nID: cell-1\nSource:\na = 1\nb = 2\n\n---\nCell 2 (markdown):\nID: cell-2\nSource:\n# Notes\n"
    );
}

#[test]
fn test_todo_state_is_per_router() {
    let (_dir, root) = workspace();
    let first = router(&root);
    let out = first
        .call_tool(
            "TodoWrite",
            json!({"todos": [
                {"id": "1", "content": "write tests", "status": "in_progress", "priority": "high"},
                {"id": "2", "content": "ship", "status": "pending", "priority": "low"}
            ]}),
        )
        .expect("todo write");
    assert!(out.ends_with("Summary: 2 total tasks (1 pending, 1 in progress, 0 completed)"));
    assert_eq!(first.todos().expect("todos").items().len(), 2);

    let second = router(&root);
    assert!(second.todos().expect("todos").items().is_empty());
}

#[test]
fn test_guidance_tools() {
    let (_dir, root) = workspace();
    let router = router(&root);

    let out = router
        .call_tool("GetToolGuidance", json!({"tool_name": "MultiEdit"}))
        .expect("guidance");
    assert!(out.starts_with("# MultiEdit Tool Guidance"));

    let out = router
        .call_tool("GetErrorHelp", json!({"error_message": "old_string not found in file"}))
        .expect("error help");
    assert!(out.contains("## Identified Error: old_string not found"));

    let out = router.call_tool("GetQuickStart", Value::Null).expect("quick start");
    assert!(out.contains("## General Quick Start"));

    let err = router
        .call_tool("GetToolGuidance", json!({"guidance_type": "everything", "tool_name": "Read"}))
        .expect_err("bad enum");
    assert!(matches!(err, ToolError::InvalidArguments { .. }));
}
