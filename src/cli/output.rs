//! CLI output: error mapping and change-summary formatting.

use crate::error::ApiError;
use crate::store::ChangeSummary;

/// Map an error to the line printed on stderr. Invariant violations are
/// flagged so they are not mistaken for bad input.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::StoreError(inner) if inner.is_fatal() => format!("Corrupt database: {}", inner),
        other => other.to_string(),
    }
}

pub(crate) fn format_changes_text(changes: &ChangeSummary) -> String {
    if changes.is_empty() {
        return "No changes".to_string();
    }
    let mut lines = Vec::new();
    lines.extend(changes.added_nodes.iter().map(|p| format!("+ node {}", p)));
    lines.extend(changes.modified_nodes.iter().map(|p| format!("~ node {}", p)));
    lines.extend(changes.added_notes.iter().map(|id| format!("+ note {}", id)));
    lines.extend(changes.modified_notes.iter().map(|id| format!("~ note {}", id)));
    lines.join("\n")
}
