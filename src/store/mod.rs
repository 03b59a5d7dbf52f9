//! Store
//!
//! The explicitly constructed handle for one session: the three database
//! trees, the flat note arena and the id allocator. Every mutation validates
//! its inputs before touching an entity, so a failed call leaves the store as
//! it was.

pub mod persistence;
pub mod records;

pub use persistence::{DirectoryStore, RecordStore};
pub use records::{NoteRecord, StoreRecords};

use crate::diff::{merge_consecutive_content, reconcile_with, ReconcileOptions};
use crate::error::StoreError;
use crate::model::{Note, Status};
use crate::tree::{resolve, resolve_note, DatabaseTree, Forest, Resolved, Scaffold};
use crate::types::{DatabaseKind, NodeRef, NoteId};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Hands out note ids. Never reuses an id within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// Seed past the highest id already in use.
    pub fn after(highest: Option<NoteId>) -> Self {
        Self {
            next: highest.map(|id| id.0 + 1).unwrap_or(1),
        }
    }

    pub fn peek(&self) -> NoteId {
        NoteId(self.next)
    }

    pub fn allocate(&mut self) -> NoteId {
        let id = NoteId(self.next);
        self.next += 1;
        id
    }
}

/// Entities that left `staged` during the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub added_nodes: Vec<String>,
    pub modified_nodes: Vec<String>,
    pub added_notes: Vec<NoteId>,
    pub modified_notes: Vec<NoteId>,
}

impl ChangeSummary {
    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.modified_nodes.is_empty()
            && self.added_notes.is_empty()
            && self.modified_notes.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    forest: Forest,
    notes: BTreeMap<NoteId, Note>,
    ids: IdAllocator,
}

impl Store {
    /// Three bare roots and no notes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn tree(&self, kind: DatabaseKind) -> &DatabaseTree {
        self.forest.get(kind)
    }

    pub fn root_of(&self, kind: DatabaseKind) -> NodeRef {
        self.forest.root_of(kind)
    }

    pub fn node_path(&self, node: NodeRef) -> String {
        self.forest.path_of(node)
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    /// Notes in id order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn next_note_id(&self) -> NoteId {
        self.ids.peek()
    }

    pub fn resolve(
        &self,
        path: &str,
        current: NodeRef,
        expect_note_id: bool,
    ) -> Result<Resolved, StoreError> {
        resolve(&self.forest, path, current, expect_note_id)
    }

    pub fn resolve_note(&self, path: &str, current: NodeRef) -> Result<(NodeRef, NoteId), StoreError> {
        resolve_note(&self.forest, path, current)
    }

    /// Resolve a list of node paths, dropping repeats. Nothing is mutated.
    pub fn resolve_nodes(&self, paths: &[String], current: NodeRef) -> Result<Vec<NodeRef>, StoreError> {
        let mut nodes = Vec::with_capacity(paths.len());
        for path in paths {
            let node = self.resolve(path, current, false)?.node;
            if !nodes.contains(&node) {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    /// The note if it exists and may be edited.
    pub fn editable_note(&self, id: NoteId) -> Result<&Note, StoreError> {
        let note = self.note_or_not_found(id)?;
        if note.read_only() {
            return Err(StoreError::PermissionDenied(format!(
                "note {} is read only",
                id
            )));
        }
        Ok(note)
    }

    fn note_or_not_found(&self, id: NoteId) -> Result<&Note, StoreError> {
        self.notes
            .get(&id)
            .ok_or_else(|| StoreError::not_found(format!("Note with id {}", id), id.to_string()))
    }

    pub(crate) fn validate_filing(&self, refs: &[NodeRef]) -> Result<(), StoreError> {
        if refs.is_empty() {
            return Err(StoreError::invalid_path(
                "",
                "a note must reference at least one node",
            ));
        }
        if let Some(root) = refs.iter().find(|node| self.forest.node(**node).is_root()) {
            return Err(StoreError::PermissionDenied(format!(
                "notes cannot be filed directly under the root node '{}'",
                self.node_path(*root)
            )));
        }
        Ok(())
    }

    /// Create an `added` note filed under every node in `refs`.
    pub(crate) fn create_note(
        &mut self,
        name: &str,
        text: &str,
        refs: Vec<NodeRef>,
    ) -> Result<NoteId, StoreError> {
        self.validate_filing(&refs)?;
        let id = self.ids.allocate();
        self.insert_note(Note::added(id, name, text, refs))?;
        debug!(note_id = %id, name, "Created note");
        Ok(id)
    }

    /// Add a note to the arena and file it under its node references.
    pub(crate) fn insert_note(&mut self, note: Note) -> Result<(), StoreError> {
        let id = note.id();
        if self.notes.contains_key(&id) {
            return Err(StoreError::InvariantViolation(format!(
                "duplicate note id {}",
                id
            )));
        }
        for node in note.node_refs() {
            self.forest.get_mut(node.kind).node_mut(node.node).file_note(id);
        }
        self.notes.insert(id, note);
        Ok(())
    }

    pub(crate) fn append_note_content(&mut self, id: NoteId, text: &str) -> Result<(), StoreError> {
        self.editable_note(id)?;
        if let Some(note) = self.notes.get_mut(&id) {
            note.append_content(text);
        }
        Ok(())
    }

    /// Replace the content through reconcile. Returns whether it changed.
    pub(crate) fn replace_note_content(
        &mut self,
        id: NoteId,
        text: &str,
        options: ReconcileOptions,
    ) -> Result<bool, StoreError> {
        let reconciled = reconcile_with(self.editable_note(id)?.content(), text, options)?;
        if !reconciled.changed {
            return Ok(false);
        }
        let merged = merge_consecutive_content(reconciled.content);
        if let Some(note) = self.notes.get_mut(&id) {
            note.replace_content(merged);
        }
        Ok(true)
    }

    pub(crate) fn rename_note(&mut self, id: NoteId, name: &str) -> Result<(), StoreError> {
        self.editable_note(id)?;
        if let Some(note) = self.notes.get_mut(&id) {
            note.rename(name);
        }
        Ok(())
    }

    /// Replace the filing set and keep every node's note list in step.
    pub(crate) fn set_note_filing(&mut self, id: NoteId, refs: Vec<NodeRef>) -> Result<(), StoreError> {
        self.validate_filing(&refs)?;
        let previous = self.editable_note(id)?.node_refs().to_vec();
        for node in previous.iter().filter(|node| !refs.contains(node)) {
            self.forest.get_mut(node.kind).node_mut(node.node).unfile_note(id);
        }
        for node in refs.iter().filter(|node| !previous.contains(node)) {
            self.forest.get_mut(node.kind).node_mut(node.node).file_note(id);
        }
        if let Some(note) = self.notes.get_mut(&id) {
            note.set_node_refs(refs);
        }
        Ok(())
    }

    /// Symmetric note link. Returns whether either side gained a reference.
    pub(crate) fn link_notes(&mut self, a: NoteId, b: NoteId) -> Result<bool, StoreError> {
        if a == b {
            return Err(StoreError::PermissionDenied(format!(
                "note {} cannot reference itself",
                a
            )));
        }
        self.editable_note(a)?;
        self.editable_note(b)?;
        let mut changed = false;
        if let Some(note) = self.notes.get_mut(&a) {
            changed |= note.add_note_ref(b);
        }
        if let Some(note) = self.notes.get_mut(&b) {
            changed |= note.add_note_ref(a);
        }
        Ok(changed)
    }

    /// File `note` under `node`. Only the note records the reference; the
    /// node's status is left alone.
    pub(crate) fn link_node_note(&mut self, node: NodeRef, note: NoteId) -> Result<bool, StoreError> {
        self.editable_note(note)?;
        self.validate_filing(&[node])?;
        let changed = match self.notes.get_mut(&note) {
            Some(entry) => entry.add_node_ref(node),
            None => false,
        };
        if changed {
            self.forest.get_mut(node.kind).node_mut(node.node).file_note(note);
        }
        Ok(changed)
    }

    pub(crate) fn rename_node(&mut self, node: NodeRef, name: &str) -> Result<(), StoreError> {
        self.forest.get_mut(node.kind).rename(node.node, name)
    }

    /// Graft `added` nodes below `parent`. Returns how many were created.
    pub(crate) fn graft(&mut self, parent: NodeRef, scaffold: &Scaffold) -> Result<usize, StoreError> {
        self.forest.get_mut(parent.kind).graft(parent.node, scaffold)
    }

    /// Everything that is no longer `staged`.
    pub fn changes(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();
        for tree in self.forest.iter() {
            for (id, node) in tree.iter() {
                match node.status() {
                    Status::Added => summary.added_nodes.push(tree.path_of(id)),
                    Status::Modified => summary.modified_nodes.push(tree.path_of(id)),
                    Status::Staged => {}
                }
            }
        }
        for note in self.notes.values() {
            match note.status() {
                Status::Added => summary.added_notes.push(note.id()),
                Status::Modified => summary.modified_notes.push(note.id()),
                Status::Staged => {}
            }
        }
        summary
    }
}
