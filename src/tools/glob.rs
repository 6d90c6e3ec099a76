//! Glob tool: file discovery via globset patterns.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::error::ToolResult;
use crate::server::ToolDefinition;
use crate::storage::FileStore;

#[derive(Debug, Deserialize)]
pub struct GlobParams {
    /// Glob pattern (e.g. "**/*.rs", "src/**/*.ts").
    pub pattern: String,
    /// Directory to search in (default: workspace root).
    #[serde(default)]
    pub path: Option<String>,
}

/// Maximum recursion depth for the walker.
const MAX_WALK_DEPTH: usize = 50;

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "Glob".to_owned(),
        description: "Fast file pattern matching tool that works with any codebase size. Supports ** \
            for recursive matching and {a,b} alternation. Returns absolute paths, most recently \
            modified first."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "The glob pattern to match files against"
                },
                "path": {
                    "type": "string",
                    "description": "The directory to search in. If not specified, the current working directory will be used."
                }
            },
            "required": ["pattern"]
        }),
    }
}

pub fn execute(files: &FileStore, params: GlobParams) -> ToolResult<String> {
    let search_dir = match &params.path {
        Some(p) => files.resolve(p)?,
        None => files.root().to_path_buf(),
    };

    let matcher = globset::GlobBuilder::new(&params.pattern)
        .literal_separator(false)
        .build()
        .with_context(|| format!("invalid glob pattern: {}", params.pattern))?
        .compile_matcher();

    let mut matches = Vec::new();
    collect_matches(&search_dir, &search_dir, &matcher, &mut matches, 0)?;
    super::sort_newest_first(&mut matches);

    if matches.is_empty() {
        return Ok(format!("No files matching pattern: {}", params.pattern));
    }

    Ok(matches
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Recursively collect files under `dir` whose path relative to `root`
/// matches. Symlinks are not followed.
fn collect_matches(
    root: &Path,
    dir: &Path,
    matcher: &globset::GlobMatcher,
    matches: &mut Vec<PathBuf>,
    depth: usize,
) -> anyhow::Result<()> {
    if depth > MAX_WALK_DEPTH {
        return Ok(());
    }

    // Only the search root itself must be readable; unreadable
    // subdirectories are skipped.
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
                collect_matches(root, &path, matcher, matches, depth + 1)?;
            }
        } else if file_type.is_file()
            && path
                .strip_prefix(root)
                .is_ok_and(|relative| matcher.is_match(relative))
        {
            matches.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_relative_to_search_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("src/nested")).expect("mkdir");
        std::fs::write(dir.path().join("src/lib.rs"), "").expect("write");
        std::fs::write(dir.path().join("src/nested/mod.rs"), "").expect("write");
        std::fs::write(dir.path().join("README.md"), "").expect("write");

        let matcher = globset::Glob::new("**/*.rs").expect("glob").compile_matcher();
        let mut found = Vec::new();
        collect_matches(dir.path(), dir.path(), &matcher, &mut found, 0).expect("walk");
        found.sort();
        assert_eq!(
            found,
            vec![dir.path().join("src/lib.rs"), dir.path().join("src/nested/mod.rs")]
        );
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        let matcher = globset::Glob::new("*").expect("glob").compile_matcher();
        let mut found = Vec::new();
        assert!(collect_matches(&missing, &missing, &matcher, &mut found, 0).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).expect("mkdir");
        std::fs::write(locked.join("hidden.txt"), "").expect("write");
        std::fs::write(dir.path().join("visible.txt"), "").expect("write");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).expect("chmod");

        let matcher = globset::Glob::new("**/*.txt").expect("glob").compile_matcher();
        let mut found = Vec::new();
        let walked = collect_matches(dir.path(), dir.path(), &matcher, &mut found, 0);

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        walked.expect("walk continues past unreadable directory");
        assert!(found.contains(&dir.path().join("visible.txt")));
    }
}
