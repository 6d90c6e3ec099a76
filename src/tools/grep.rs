//! Grep tool: list files whose contents match a regex.
//!
//! Shells out to `rg --files-with-matches` when ripgrep is on PATH
//! (gitignore-aware, parallel). Otherwise walks the tree itself with the
//! `regex` crate, filtering file names through the `include` glob.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ToolError, ToolResult};
use crate::server::ToolDefinition;
use crate::storage::FileStore;

#[derive(Debug, Deserialize)]
pub struct GrepParams {
    /// Regex pattern to search for.
    pub pattern: String,
    /// Directory to search in (default: workspace root).
    #[serde(default)]
    pub path: Option<String>,
    /// Glob filter on file names (e.g. "*.rs", "*.{ts,tsx}").
    #[serde(default)]
    pub include: Option<String>,
}

/// Maximum recursion depth for the fallback walker.
const MAX_WALK_DEPTH: usize = 50;

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "Grep".to_owned(),
        description: "Fast content search tool that works with any codebase size. Returns the paths \
            of files containing a match, most recently modified first."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "The regular expression pattern to search for in file contents"
                },
                "path": {
                    "type": "string",
                    "description": "The directory to search in. Defaults to the current working directory."
                },
                "include": {
                    "type": "string",
                    "description": "File pattern to include in the search (e.g. \"*.js\", \"*.{ts,tsx}\")"
                }
            },
            "required": ["pattern"]
        }),
    }
}

pub fn execute(files: &FileStore, params: GrepParams) -> ToolResult<String> {
    let search_path = match &params.path {
        Some(p) => files.resolve(p)?,
        None => files.root().to_path_buf(),
    };

    let mut matches = match which::which("rg") {
        Ok(rg) => search_rg(&rg, &search_path, &params)?,
        Err(_) => {
            debug!("rg not found on PATH, using built-in search");
            search_fallback(&search_path, &params)?
        }
    };
    super::sort_newest_first(&mut matches);

    if matches.is_empty() {
        return Ok("No files found".to_owned());
    }
    Ok(matches
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn search_rg(rg: &Path, search_path: &Path, params: &GrepParams) -> ToolResult<Vec<PathBuf>> {
    let mut cmd = Command::new(rg);
    cmd.arg("--color")
        .arg("never")
        .arg("--files-with-matches")
        .arg("--no-messages");

    if let Some(include) = &params.include {
        cmd.arg("--glob").arg(include);
    }

    cmd.arg("--regexp").arg(&params.pattern).arg(search_path);

    let output = cmd.output().context("failed to execute rg")?;

    // rg exit code: 0 = matches found, 1 = no matches, 2 = error.
    if output.status.code() == Some(2) {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ToolError::Other(anyhow::anyhow!("rg failed: {}", stderr.trim())));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| {
            let p = PathBuf::from(l);
            if p.is_absolute() { p } else { search_path.join(p) }
        })
        .collect())
}

fn search_fallback(search_path: &Path, params: &GrepParams) -> ToolResult<Vec<PathBuf>> {
    let re = regex::Regex::new(&params.pattern)
        .with_context(|| format!("invalid regex pattern: {}", params.pattern))?;

    let include = params
        .include
        .as_deref()
        .map(|glob| {
            globset::Glob::new(glob)
                .map(|g| g.compile_matcher())
                .with_context(|| format!("invalid include pattern: {glob}"))
        })
        .transpose()?;

    let mut results = Vec::new();
    walk_files(search_path, 0, &mut |path: &Path| {
        let included = include.as_ref().is_none_or(|m| {
            path.file_name().is_some_and(|name| m.is_match(name))
        });
        if !included {
            return;
        }
        // Unreadable and non-UTF-8 files are skipped.
        if let Ok(content) = std::fs::read_to_string(path)
            && re.is_match(&content)
        {
            results.push(path.to_path_buf());
        }
    })?;

    Ok(results)
}

/// Recursive file walker. Symlinks are not followed.
fn walk_files(dir: &Path, depth: usize, cb: &mut impl FnMut(&Path)) -> anyhow::Result<()> {
    if depth > MAX_WALK_DEPTH {
        return Ok(());
    }

    match std::fs::symlink_metadata(dir) {
        Ok(m) if m.is_file() => {
            cb(dir);
            return Ok(());
        }
        Ok(m) if m.is_dir() => {}
        _ => return Ok(()),
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if depth > 0 => {
            debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read directory {}", dir.display()));
        }
    };

    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();

        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            let noise = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(super::is_noise_dir);
            if !noise {
                walk_files(&path, depth + 1, cb)?;
            }
        } else if file_type.is_file() {
            cb(&path);
        }
    }

    Ok(())
}
