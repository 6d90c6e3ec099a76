//! Static usage guidance served by the `Get*` guidance tools.
//!
//! The tables live in [`tables`]; [`GuidanceCatalog`] indexes them once
//! into a flat tool-name lookup and is immutable afterwards.

mod tables;

use std::collections::HashMap;

/// Example invocation shown in tool guidance.
#[derive(Debug)]
pub struct GuidanceExample {
    pub description: &'static str,
    pub code: &'static str,
}

/// Guidance for one tool.
#[derive(Debug)]
pub struct ToolGuidance {
    pub tool: &'static str,
    pub best_practices: &'static [&'static str],
    pub common_patterns: &'static [&'static str],
    pub examples: &'static [GuidanceExample],
    pub security_notes: &'static [&'static str],
    pub limitations: &'static [&'static str],
}

/// A named multi-step workflow.
#[derive(Debug)]
pub struct Workflow {
    pub name: &'static str,
    pub example: &'static str,
    pub steps: &'static [&'static str],
}

/// "When to use X vs Y" guidance: each branch is a condition plus reasons.
#[derive(Debug)]
pub struct Decision {
    pub topic: &'static str,
    pub branches: &'static [(&'static str, &'static [&'static str])],
}

/// A commonly seen error and how to recover from it.
#[derive(Debug)]
pub struct KnownError {
    pub name: &'static str,
    pub pattern: &'static str,
    pub solutions: &'static [&'static str],
}

/// Quick start guide for one kind of task.
#[derive(Debug)]
pub struct QuickStart {
    pub task_type: &'static str,
    pub title: &'static str,
    pub steps: &'static [&'static str],
    pub tips: &'static [&'static str],
}

/// Read-only index over the guidance tables.
#[derive(Debug)]
pub struct GuidanceCatalog {
    by_tool: HashMap<&'static str, &'static ToolGuidance>,
}

impl Default for GuidanceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidanceCatalog {
    pub fn new() -> Self {
        let by_tool = tables::TOOL_GUIDANCE
            .iter()
            .map(|g| (g.tool, g))
            .collect();
        Self { by_tool }
    }

    /// Guidance for `tool`, matched exactly.
    pub fn tool(&self, tool: &str) -> Option<&'static ToolGuidance> {
        self.by_tool.get(tool).copied()
    }

    /// Tool names with guidance, in catalog order.
    pub fn tool_names(&self) -> impl Iterator<Item = &'static str> {
        tables::TOOL_GUIDANCE.iter().map(|g| g.tool)
    }

    pub fn workflows(&self) -> &'static [Workflow] {
        tables::WORKFLOWS
    }

    pub fn workflow(&self, name: &str) -> Option<&'static Workflow> {
        tables::WORKFLOWS.iter().find(|w| w.name == name)
    }

    pub fn decisions(&self) -> &'static [Decision] {
        tables::DECISIONS
    }

    pub fn known_errors(&self) -> &'static [KnownError] {
        tables::KNOWN_ERRORS
    }

    /// First known error whose name or pattern occurs in `message`,
    /// ignoring case.
    pub fn match_error(&self, message: &str) -> Option<&'static KnownError> {
        let message = message.to_lowercase();
        tables::KNOWN_ERRORS.iter().find(|e| {
            message.contains(&e.name.to_lowercase()) || message.contains(&e.pattern.to_lowercase())
        })
    }

    pub fn quick_start(&self, task_type: &str) -> Option<&'static QuickStart> {
        tables::QUICK_STARTS.iter().find(|q| q.task_type == task_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_is_indexed_once() {
        let catalog = GuidanceCatalog::new();
        let names: Vec<_> = catalog.tool_names().collect();
        assert_eq!(names.len(), catalog.by_tool.len(), "duplicate tool guidance");
        for name in names {
            assert!(catalog.tool(name).is_some());
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = GuidanceCatalog::new();
        assert!(catalog.tool("MultiEdit").is_some());
        assert!(catalog.tool("multiedit").is_none());
        assert!(catalog.tool("Nope").is_none());
    }

    #[test]
    fn test_match_error_by_name_or_pattern() {
        let catalog = GuidanceCatalog::new();
        let hit = catalog
            .match_error("Tool execution failed: PERMISSION DENIED while writing")
            .expect("match");
        assert_eq!(hit.name, "Permission denied");

        let hit = catalog
            .match_error("File not found at /tmp/x")
            .expect("match");
        assert_eq!(hit.name, "File not found");

        assert!(catalog.match_error("segfault").is_none());
    }

    #[test]
    fn test_quick_starts_cover_all_task_types() {
        let catalog = GuidanceCatalog::new();
        for kind in ["general", "file_operations", "code_analysis", "debugging", "project_setup"] {
            assert!(catalog.quick_start(kind).is_some(), "missing quick start {kind}");
        }
    }

    #[test]
    fn test_workflow_lookup() {
        let catalog = GuidanceCatalog::new();
        let wf = catalog.workflow("Code Refactoring").expect("workflow");
        assert_eq!(wf.steps.len(), 5);
        assert!(catalog.workflow("code refactoring").is_none());
    }
}
