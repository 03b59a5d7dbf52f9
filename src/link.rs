//! Cross-database references ("ties").
//!
//! A fixed permission table keyed on the ordered pair of database kinds says
//! which entity kind is linkable on each side. Note sides must already be in
//! that interface's working set; node sides are resolved against that
//! interface's tree.

use crate::error::StoreError;
use crate::interface::Interface;
use crate::store::Store;
use crate::types::{DatabaseKind, NodeRef, NoteId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Note,
    Node,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Note => f.write_str("note"),
            EntityKind::Node => f.write_str("node"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPolicy {
    rules: BTreeMap<(DatabaseKind, DatabaseKind), (EntityKind, EntityKind)>,
    enabled: bool,
}

impl Default for LinkPolicy {
    /// concrete→conceptual links notes to notes; temporal→concrete links a
    /// temporal node to a concrete note.
    fn default() -> Self {
        Self::empty()
            .allow(
                DatabaseKind::Concrete,
                DatabaseKind::Conceptual,
                EntityKind::Note,
                EntityKind::Note,
            )
            .allow(
                DatabaseKind::Temporal,
                DatabaseKind::Concrete,
                EntityKind::Node,
                EntityKind::Note,
            )
    }
}

impl LinkPolicy {
    /// A policy that permits nothing until rules are added.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
            enabled: true,
        }
    }

    /// Every link attempt is refused.
    pub fn disabled() -> Self {
        Self {
            rules: BTreeMap::new(),
            enabled: false,
        }
    }

    /// Permit `first` entities of kind `a` to link with `second` entities of
    /// kind `b`. Same-kind pairs are ignored.
    pub fn allow(
        mut self,
        a: DatabaseKind,
        b: DatabaseKind,
        first: EntityKind,
        second: EntityKind,
    ) -> Self {
        if a != b {
            self.rules.insert((a, b), (first, second));
        }
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Entity kinds linkable on each side of `(a, b)`.
    pub fn rule(&self, a: DatabaseKind, b: DatabaseKind) -> Result<(EntityKind, EntityKind), StoreError> {
        if !self.enabled {
            return Err(StoreError::PermissionDenied(
                "cross-references are disabled".to_string(),
            ));
        }
        if a == b {
            return Err(StoreError::PermissionDenied(format!(
                "cannot link the '{}' database to itself",
                a
            )));
        }
        self.rules.get(&(a, b)).copied().ok_or_else(|| {
            StoreError::PermissionDenied(format!(
                "links from '{}' to '{}' are not permitted",
                a, b
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Note(NoteId),
    Node(NodeRef),
}

/// Link the entity named by `a.1` in interface `a.0` with the one named by
/// `b.1` in `b.0`. Returns whether a reference was added; linking an existing
/// pair again is a no-op.
pub fn link(
    store: &mut Store,
    policy: &LinkPolicy,
    a: (&Interface, &str),
    b: (&Interface, &str),
) -> Result<bool, StoreError> {
    let (first, second) = policy.rule(a.0.kind(), b.0.kind())?;
    let left = endpoint(store, a.0, a.1, first)?;
    let right = endpoint(store, b.0, b.1, second)?;

    let changed = match (left, right) {
        (Endpoint::Note(x), Endpoint::Note(y)) => store.link_notes(x, y)?,
        (Endpoint::Node(node), Endpoint::Note(note)) | (Endpoint::Note(note), Endpoint::Node(node)) => {
            store.link_node_note(node, note)?
        }
        (Endpoint::Node(_), Endpoint::Node(_)) => {
            return Err(StoreError::PermissionDenied(
                "nodes cannot reference other nodes".to_string(),
            ))
        }
    };

    if changed {
        debug!(from = %a.0.kind(), to = %b.0.kind(), ?left, ?right, "Linked entities");
    } else {
        warn!(from = %a.0.kind(), to = %b.0.kind(), ?left, ?right, "Link already present");
    }
    Ok(changed)
}

fn endpoint(
    store: &Store,
    interface: &Interface,
    reference: &str,
    kind: EntityKind,
) -> Result<Endpoint, StoreError> {
    match kind {
        EntityKind::Note => {
            let id = note_reference(store, interface, reference)?;
            if !interface.opened().contains(id) {
                return Err(StoreError::not_found(
                    format!("Note with id {} in the opened notes of '{}'", id, interface.kind()),
                    reference.trim(),
                ));
            }
            Ok(Endpoint::Note(id))
        }
        EntityKind::Node => {
            let node = store
                .resolve(reference, interface.explorer().current(), false)?
                .node;
            if node.kind != interface.kind() {
                return Err(StoreError::invalid_path(
                    reference.trim(),
                    format!("path must address the '{}' database", interface.kind()),
                ));
            }
            Ok(Endpoint::Node(node))
        }
    }
}

/// A bare id or a path ending in one.
fn note_reference(store: &Store, interface: &Interface, reference: &str) -> Result<NoteId, StoreError> {
    let trimmed = reference.trim();
    if trimmed.contains('/') {
        let (_, id) = store.resolve_note(trimmed, interface.explorer().current())?;
        return Ok(id);
    }
    trimmed
        .parse::<NoteId>()
        .map_err(|_| StoreError::invalid_path(trimmed, format!("'{}' is not a note id", trimmed)))
}
