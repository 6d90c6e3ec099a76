//! Change summaries for edit results, built on `similar`.

use similar::{Algorithm, ChangeTag, TextDiff};

/// Line-level insert/delete counts for an edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeStats {
    pub insertions: usize,
    pub deletions: usize,
}

/// Unified diff between `old` and `new`, headed with `a/<path>` / `b/<path>`.
///
/// Patience keeps hunks aligned on unique lines, which reads better for
/// source files than plain Myers.
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    TextDiff::configure()
        .algorithm(Algorithm::Patience)
        .diff_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{path}"), &format!("b/{path}"))
        .to_string()
}

/// Count inserted and deleted lines between `old` and `new`.
pub fn change_stats(old: &str, new: &str) -> ChangeStats {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Patience)
        .diff_lines(old, new);

    diff.iter_all_changes()
        .fold(ChangeStats::default(), |mut stats, change| {
            match change.tag() {
                ChangeTag::Insert => stats.insertions += 1,
                ChangeTag::Delete => stats.deletions += 1,
                ChangeTag::Equal => {}
            }
            stats
        })
}

/// Human-readable edit report: a summary line followed by the diff.
pub fn render_report(summary: &str, path: &str, old: &str, new: &str) -> String {
    let stats = change_stats(old, new);
    let diff = unified_diff(path, old, new);
    if diff.is_empty() {
        return format!("{summary} (no textual change)");
    }
    format!(
        "{summary} (+{} -{})\n\n{diff}",
        stats.insertions, stats.deletions
    )
}
