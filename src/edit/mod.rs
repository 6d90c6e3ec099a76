//! Exact-match replacement engine.
//!
//! Backs both the `Edit` and `MultiEdit` tools. Every replacement is a
//! literal substring match: no patterns, no whitespace or case
//! normalization, no fuzzy fallback.
//!
//! # Rules
//!
//! - `old_text == new_text` is rejected before anything else.
//! - Empty `old_text` is rejected (it would match at every position).
//! - Without `replace_all`, `old_text` must occur exactly once. Zero
//!   occurrences is [`EditError::NotFound`], more than one is
//!   [`EditError::AmbiguousMatch`] with the count.
//! - With `replace_all`, every non-overlapping occurrence is replaced in a
//!   single left-to-right pass; text produced by a replacement is never
//!   rescanned. Zero occurrences is a no-op.
//! - [`apply_sequence`] threads each spec's output into the next and
//!   either applies every spec or reports the first failure. The input is
//!   borrowed, so a failed sequence leaves nothing half-applied.

pub mod diff;

use tracing::debug;

/// One exact-match replacement instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementSpec {
    /// Literal text to locate.
    pub old_text: String,
    /// Text substituted for each replaced occurrence.
    pub new_text: String,
    /// Replace every occurrence instead of requiring a unique one.
    pub replace_all: bool,
}

impl ReplacementSpec {
    /// A spec that requires `old_text` to be unique.
    pub fn new(old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            old_text: old_text.into(),
            new_text: new_text.into(),
            replace_all: false,
        }
    }

    /// Switch this spec to replace-all mode.
    #[must_use]
    pub const fn all(mut self) -> Self {
        self.replace_all = true;
        self
    }
}

/// Result of a successful [`apply_sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Document text after every spec was applied.
    pub content: String,
    /// Number of specs applied.
    pub applied: usize,
}

/// Reasons a replacement is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("old_string and new_string must be different")]
    IdenticalStrings,

    #[error("old_string must not be empty")]
    EmptyOldText,

    #[error("old_string not found in file: {old_text:?}")]
    NotFound { old_text: String },

    #[error(
        "old_string {old_text:?} appears {count} times in file. Use replace_all or provide more context."
    )]
    AmbiguousMatch { old_text: String, count: usize },

    #[error("at least one edit is required")]
    EmptySpecList,
}

/// Apply a single spec to `content`.
pub fn apply_single(content: &str, spec: &ReplacementSpec) -> Result<String, EditError> {
    if spec.old_text == spec.new_text {
        return Err(EditError::IdenticalStrings);
    }
    if spec.old_text.is_empty() {
        return Err(EditError::EmptyOldText);
    }

    let old = spec.old_text.as_str();

    if spec.replace_all {
        let result = content.replace(old, &spec.new_text);
        debug!(replaced = content.matches(old).count(), "replace_all applied");
        return Ok(result);
    }

    let mut occurrences = content.match_indices(old);
    let Some((index, _)) = occurrences.next() else {
        return Err(EditError::NotFound {
            old_text: spec.old_text.clone(),
        });
    };

    let extra = occurrences.count();
    if extra > 0 {
        return Err(EditError::AmbiguousMatch {
            old_text: spec.old_text.clone(),
            count: extra + 1,
        });
    }

    let mut result = String::with_capacity(content.len() - old.len() + spec.new_text.len());
    result.push_str(&content[..index]);
    result.push_str(&spec.new_text);
    result.push_str(&content[index + old.len()..]);
    Ok(result)
}

/// Apply `specs` in order, each one seeing the previous one's output.
pub fn apply_sequence(content: &str, specs: &[ReplacementSpec]) -> Result<EditOutcome, EditError> {
    if specs.is_empty() {
        return Err(EditError::EmptySpecList);
    }

    let mut current = content.to_owned();
    for (i, spec) in specs.iter().enumerate() {
        current = apply_single(&current, spec).inspect_err(|e| {
            debug!(index = i, error = %e, "edit sequence aborted");
        })?;
    }

    Ok(EditOutcome {
        content: current,
        applied: specs.len(),
    })
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
///
/// Returns 0 for an empty needle.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
