//! Path resolution over database trees.
//!
//! Paths are slash-delimited. Absolute paths start with a database kind token
//! (`concrete/family/mother`); relative paths start with `.` followed by the
//! name of the current node (`./family/mother` while focused on `family`
//! resolves to `family/mother`). Note paths carry a trailing numeric note id.
//! Resolution only reads the trees.

use super::Forest;
use crate::error::StoreError;
use crate::types::{DatabaseKind, NodeRef, NoteId};

/// Outcome of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub node: NodeRef,
    pub note_id: Option<NoteId>,
}

/// Resolve `path` against `forest`.
///
/// When `expect_note_id` is set the last segment is parsed as a note id and
/// excluded from the descent. Locating that id among the node's notes is left
/// to the caller (see [`resolve_note`]).
pub fn resolve(
    forest: &Forest,
    path: &str,
    current: NodeRef,
    expect_note_id: bool,
) -> Result<Resolved, StoreError> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::invalid_path(path, "path cannot be empty"));
    }
    let segments: Vec<&str> = trimmed.split('/').collect();

    let (start, skip) = if segments[0] == "." {
        let current_name = forest.node(current).name();
        match segments.get(1) {
            Some(anchor) if *anchor == current_name => (current, 2),
            _ => {
                return Err(StoreError::invalid_path(
                    trimmed,
                    format!(
                        "relative path must still include the current node '{}'",
                        current_name
                    ),
                ))
            }
        }
    } else {
        let kind = DatabaseKind::from_token(segments[0]).ok_or_else(|| {
            StoreError::invalid_path(
                trimmed,
                format!(
                    "absolute path must start with a valid database kind: {}",
                    DatabaseKind::known_tokens()
                ),
            )
        })?;
        (forest.root_of(kind), 1)
    };

    let (descent, note_id) = if expect_note_id {
        if segments.len() <= skip {
            return Err(StoreError::invalid_path(
                trimmed,
                "path does not end with a note id",
            ));
        }
        let last = segments[segments.len() - 1];
        let note_id = last.parse::<NoteId>().map_err(|_| {
            StoreError::invalid_path(trimmed, format!("'{}' is not a note id", last))
        })?;
        (&segments[skip..segments.len() - 1], Some(note_id))
    } else {
        (&segments[skip..], None)
    };

    let tree = forest.get(start.kind);
    let mut node = start.node;
    for segment in descent {
        if segment.is_empty() {
            return Err(StoreError::invalid_path(trimmed, "path contains an empty segment"));
        }
        node = tree
            .find_child(node, segment)
            .ok_or_else(|| StoreError::not_found(format!("Node '{}'", segment), trimmed))?;
    }

    Ok(Resolved {
        node: NodeRef::new(start.kind, node),
        note_id,
    })
}

/// Resolve a note path and check that the note is filed under the node.
pub fn resolve_note(
    forest: &Forest,
    path: &str,
    current: NodeRef,
) -> Result<(NodeRef, NoteId), StoreError> {
    let resolved = resolve(forest, path, current, true)?;
    let note_id = resolved
        .note_id
        .ok_or_else(|| StoreError::invalid_path(path, "path does not end with a note id"))?;
    if !forest.node(resolved.node).has_note(note_id) {
        return Err(StoreError::not_found(
            format!("Note with id {}", note_id),
            path.trim(),
        ));
    }
    Ok((resolved.node, note_id))
}
