//! Reconcile stored content with replacement text.

use super::myers::{diff_lines, Edit};
use crate::error::StoreError;
use crate::model::content::logical_text;
use crate::model::Content;
use tracing::{debug, error};

/// Reconcile behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Emit removed lines as `deleted` spans instead of dropping them. Lines
    /// deleted by earlier edits stay in place as `deleted` spans.
    pub track_deletions: bool,
}

/// Result of a reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub content: Vec<Content>,
    pub changed: bool,
}

/// Reconcile with default options: removed lines vanish from the output.
pub fn reconcile(original: &[Content], new_text: &str) -> Result<Reconciled, StoreError> {
    reconcile_with(original, new_text, ReconcileOptions::default())
}

/// Compare the current logical text with `new_text` (both trimmed). When they
/// match the input is returned untouched with `changed = false`; otherwise a
/// line diff produces one span per line: unchanged lines become `staged`,
/// new lines `added`.
pub fn reconcile_with(
    original: &[Content],
    new_text: &str,
    options: ReconcileOptions,
) -> Result<Reconciled, StoreError> {
    let current = logical_text(original);
    if current.trim() == new_text.trim() {
        return Ok(Reconciled {
            content: original.to_vec(),
            changed: false,
        });
    }

    // Every stored line in order, flagged when it is already deleted.
    let stored: Vec<(&str, bool)> = original
        .iter()
        .flat_map(|span| span.lines().map(move |line| (line, span.is_deleted())))
        .collect();
    let original_lines: Vec<&str> = stored
        .iter()
        .filter(|(_, deleted)| !deleted)
        .map(|(line, _)| *line)
        .collect();
    let new_lines: Vec<&str> = new_text.split('\n').collect();
    let script = diff_lines(&original_lines, &new_lines);

    let mut content = Vec::with_capacity(script.len());
    let mut cursor = 0usize;
    let mut from_new_text = 0usize;
    for edit in script {
        if matches!(edit, Edit::Equal(_) | Edit::Delete(_)) {
            cursor = carry_deleted(&stored, cursor, options, &mut content) + 1;
        }
        match edit {
            Edit::Equal(line) => {
                from_new_text += 1;
                content.push(Content::staged(line));
            }
            Edit::Insert(line) => {
                from_new_text += 1;
                content.push(Content::added(line));
            }
            Edit::Delete(line) => {
                if options.track_deletions {
                    content.push(Content::deleted(line));
                }
            }
        }
    }
    carry_deleted(&stored, cursor, options, &mut content);

    if from_new_text != new_lines.len() {
        error!(
            expected = new_lines.len(),
            processed = from_new_text,
            "Line diff lost lines of the new text"
        );
        return Err(StoreError::InvariantViolation(format!(
            "line diff failed to process all lines: expected {}, processed {}",
            new_lines.len(),
            from_new_text
        )));
    }

    debug!(
        original_lines = original_lines.len(),
        new_lines = new_lines.len(),
        spans = content.len(),
        "Reconciled note content"
    );
    Ok(Reconciled {
        content,
        changed: true,
    })
}

/// Re-emit the already deleted lines from `cursor` up to the next live line
/// when deletions are tracked. Returns the index of that live line.
fn carry_deleted(
    stored: &[(&str, bool)],
    mut cursor: usize,
    options: ReconcileOptions,
    content: &mut Vec<Content>,
) -> usize {
    while let Some((line, true)) = stored.get(cursor) {
        if options.track_deletions {
            content.push(Content::deleted(*line));
        }
        cursor += 1;
    }
    cursor
}

/// Coalesce adjacent spans with the same status when both are non-blank.
/// Blank spans stay separate and act as boundaries. The logical text is
/// unchanged; only the span count shrinks.
pub fn merge_consecutive_content(content: Vec<Content>) -> Vec<Content> {
    let mut merged: Vec<Content> = Vec::with_capacity(content.len());
    for span in content {
        match merged.last_mut() {
            Some(last) if last.status == span.status && !last.is_blank() && !span.is_blank() => {
                last.text.push('\n');
                last.text.push_str(&span.text);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Flat storage text: non-deleted spans joined by newline, with blank spans at
/// either end dropped. Blank spans between text survive as empty lines:
/// dropping them would change the text on reload, and reloading stored text
/// must give back the same logical text.
pub fn to_storage_string(content: &[Content]) -> String {
    let live: Vec<&Content> = content.iter().filter(|span| !span.is_deleted()).collect();
    let first = live.iter().position(|span| !span.is_blank());
    let last = live.iter().rposition(|span| !span.is_blank());
    match (first, last) {
        (Some(first), Some(last)) => live[first..=last]
            .iter()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}
