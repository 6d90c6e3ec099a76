//! Bash tool: run a shell command in the workspace directory.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ToolError, ToolResult};
use crate::server::ToolDefinition;
use crate::util::text::truncate_chars;

#[derive(Debug, Deserialize)]
pub struct BashParams {
    pub command: String,
    /// Free-form note from the caller; only logged.
    #[serde(default)]
    pub description: Option<String>,
    /// Timeout in milliseconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

const DEFAULT_TIMEOUT_MS: u64 = 120_000;
const MAX_TIMEOUT_MS: u64 = 600_000;

/// Per-stream capture limit; the rest of the stream is drained and dropped.
const MAX_STREAM_BYTES: usize = 10 * 1024 * 1024;

/// Longest combined output returned to the client.
const MAX_OUTPUT_CHARS: usize = 30_000;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to keep reading after the shell exits, for output still in
/// flight. Bounded by the remaining timeout.
const PIPE_CLOSE_GRACE: Duration = Duration::from_millis(500);

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "Bash".to_owned(),
        description: "Executes a given bash command in the workspace directory with optional timeout."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The command to execute"
                },
                "description": {
                    "type": "string",
                    "description": "Clear, concise description of what this command does in 5-10 words"
                },
                "timeout": {
                    "type": "number",
                    "description": "Optional timeout in milliseconds (max 600000)"
                }
            },
            "required": ["command"]
        }),
    }
}

pub fn execute(workspace: &Path, params: BashParams) -> ToolResult<String> {
    let timeout_ms = params
        .timeout
        .filter(|&ms| ms > 0)
        .unwrap_or(DEFAULT_TIMEOUT_MS)
        .min(MAX_TIMEOUT_MS);

    debug!(
        command = %params.command,
        description = params.description.as_deref().unwrap_or(""),
        timeout_ms,
        "running shell command"
    );

    let mut child = Command::new(shell())
        .arg("-c")
        .arg(&params.command)
        .current_dir(workspace)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn: {}", params.command))?;

    let (tx, rx) = mpsc::channel();
    let mut output = CapturedOutput::default();
    if let Some(stdout) = child.stdout.take() {
        capture(stdout, Pipe::Stdout, tx.clone());
        output.open += 1;
    }
    if let Some(stderr) = child.stderr.take() {
        capture(stderr, Pipe::Stderr, tx.clone());
        output.open += 1;
    }
    drop(tx);

    let timeout = Duration::from_millis(timeout_ms);
    let start = Instant::now();

    // Collect output in short waits until the process exits or the timeout hits.
    let status = loop {
        if let Some(status) = child.try_wait().context("failed to check process status")? {
            break status;
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            warn!(command = %params.command, timeout_ms, "shell command timed out");
            return Err(ToolError::CommandTimedOut { timeout_ms });
        }
        output.receive(&rx, POLL_INTERVAL);
    };

    // A backgrounded process can keep the pipes open after the shell exits.
    let grace = timeout.saturating_sub(start.elapsed()).min(PIPE_CLOSE_GRACE);
    if !output.finish(&rx, Instant::now() + grace) {
        debug!(command = %params.command, "output pipes still open after shell exit");
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !status.success() {
        return Err(ToolError::CommandFailed {
            code: status.code().unwrap_or(-1),
            stdout,
            stderr,
        });
    }

    let output = stdout + &stderr;
    if output.is_empty() {
        return Ok("Command executed successfully with no output".to_owned());
    }
    Ok(truncate_chars(
        &output,
        MAX_OUTPUT_CHARS,
        "\n... (output truncated)",
    ))
}

/// `bash` when it is on PATH, otherwise POSIX `sh`.
fn shell() -> PathBuf {
    which::which("bash").unwrap_or_else(|_| PathBuf::from("sh"))
}

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

enum Captured {
    Data(Pipe, Vec<u8>),
    Closed(Pipe),
}

/// Output gathered from the reader threads so far.
#[derive(Debug, Default)]
struct CapturedOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    /// Pipes that have not reported EOF yet.
    open: usize,
}

impl CapturedOutput {
    fn apply(&mut self, message: Captured) {
        match message {
            Captured::Data(Pipe::Stdout, bytes) => self.stdout.extend_from_slice(&bytes),
            Captured::Data(Pipe::Stderr, bytes) => self.stderr.extend_from_slice(&bytes),
            Captured::Closed(_) => self.open = self.open.saturating_sub(1),
        }
    }

    /// Wait up to `wait` for the next chunk.
    fn receive(&mut self, rx: &Receiver<Captured>, wait: Duration) {
        if self.open == 0 {
            std::thread::sleep(wait);
            return;
        }
        if let Ok(message) = rx.recv_timeout(wait) {
            self.apply(message);
        }
    }

    /// Collect until every pipe is closed or `deadline` passes. Returns
    /// whether all pipes closed.
    fn finish(&mut self, rx: &Receiver<Captured>, deadline: Instant) -> bool {
        while self.open > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(message) => self.apply(message),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => self.open = 0,
            }
        }
        for message in rx.try_iter() {
            self.apply(message);
        }
        self.open == 0
    }
}

/// Forward up to [`MAX_STREAM_BYTES`] of a pipe from a background thread,
/// draining the remainder so the child never blocks on a full pipe.
fn capture(mut stream: impl Read + Send + 'static, pipe: Pipe, tx: Sender<Captured>) {
    std::thread::spawn(move || {
        let mut buf = [0u8; 8192];
        let mut captured = 0usize;
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    let keep = n.min(MAX_STREAM_BYTES.saturating_sub(captured));
                    if keep == 0 {
                        continue;
                    }
                    captured += keep;
                    if tx.send(Captured::Data(pipe, buf[..keep].to_vec())).is_err() {
                        // Receiver gone: the call already returned.
                        return;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(_) => break,
            }
        }
        let _ = tx.send(Captured::Closed(pipe));
    });
}
