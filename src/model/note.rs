//! Notes: shared documents with versioned content and cross-references.

use super::content::{logical_text, Content};
use super::status::Status;
use crate::diff::reconcile::to_storage_string;
use crate::types::{NodeRef, NoteId};

/// A document. Notes live in the store's flat arena and are filed under any
/// number of nodes through `node_refs`.
///
/// `original_name` and the original reference sets are the baseline values.
/// They are fixed when the note is built and never rewritten by later edits, so
/// they always describe the state before the first transition.
#[derive(Debug, Clone)]
pub struct Note {
    id: NoteId,
    name: String,
    original_name: String,
    read_only: bool,
    content: Vec<Content>,
    node_refs: Vec<NodeRef>,
    original_node_refs: Vec<NodeRef>,
    note_refs: Vec<NoteId>,
    original_note_refs: Vec<NoteId>,
    status: Status,
}

impl Note {
    /// A note as loaded from storage: one staged span holding the stored text.
    pub(crate) fn staged(
        id: NoteId,
        name: impl Into<String>,
        read_only: bool,
        text: impl Into<String>,
        node_refs: Vec<NodeRef>,
    ) -> Self {
        Self::build(id, name.into(), read_only, Content::staged(text), node_refs, Status::Staged)
    }

    /// A note created during the session.
    pub(crate) fn added(
        id: NoteId,
        name: impl Into<String>,
        text: impl Into<String>,
        node_refs: Vec<NodeRef>,
    ) -> Self {
        Self::build(id, name.into(), false, Content::added(text), node_refs, Status::Added)
    }

    fn build(
        id: NoteId,
        name: String,
        read_only: bool,
        span: Content,
        node_refs: Vec<NodeRef>,
        status: Status,
    ) -> Self {
        Self {
            id,
            original_name: name.clone(),
            name,
            read_only,
            content: vec![span],
            original_node_refs: node_refs.clone(),
            node_refs,
            note_refs: Vec::new(),
            original_note_refs: Vec::new(),
            status,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    pub fn node_refs(&self) -> &[NodeRef] {
        &self.node_refs
    }

    pub fn original_node_refs(&self) -> &[NodeRef] {
        &self.original_node_refs
    }

    pub fn note_refs(&self) -> &[NoteId] {
        &self.note_refs
    }

    pub fn original_note_refs(&self) -> &[NoteId] {
        &self.original_note_refs
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current logical text (deleted spans excluded).
    pub fn text(&self) -> String {
        logical_text(&self.content)
    }

    /// Flat text as persisted, with provenance stripped.
    pub fn to_storage_string(&self) -> String {
        to_storage_string(&self.content)
    }

    pub fn name_changed(&self) -> bool {
        self.original_name != self.name
    }

    pub fn node_refs_changed(&self) -> bool {
        self.original_node_refs != self.node_refs
    }

    pub fn note_refs_changed(&self) -> bool {
        self.original_note_refs != self.note_refs
    }

    pub(crate) fn rename(&mut self, new_name: impl Into<String>) {
        let new_name = new_name.into();
        if new_name == self.name {
            return;
        }
        self.status.touch();
        self.name = new_name;
    }

    pub(crate) fn append_content(&mut self, text: impl Into<String>) {
        self.status.touch();
        self.content.push(Content::added(text));
    }

    pub(crate) fn replace_content(&mut self, content: Vec<Content>) {
        self.status.touch();
        self.content = content;
    }

    pub(crate) fn set_node_refs(&mut self, refs: Vec<NodeRef>) {
        if refs == self.node_refs {
            return;
        }
        self.status.touch();
        self.node_refs = refs;
    }

    pub(crate) fn add_node_ref(&mut self, node: NodeRef) -> bool {
        if self.node_refs.contains(&node) {
            return false;
        }
        self.status.touch();
        self.node_refs.push(node);
        true
    }

    pub(crate) fn add_note_ref(&mut self, note: NoteId) -> bool {
        if self.note_refs.contains(&note) {
            return false;
        }
        self.status.touch();
        self.note_refs.push(note);
        true
    }

    /// Install the note references read from storage as part of the baseline.
    pub(crate) fn load_note_refs(&mut self, refs: Vec<NoteId>) {
        self.original_note_refs = refs.clone();
        self.note_refs = refs;
    }
}

/// Fresh comparison between a baseline reference set and the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDiff<T> {
    /// Both sets are equal; rendered as one flat listing.
    Unchanged(Vec<T>),
    Changed {
        removed: Vec<T>,
        added: Vec<T>,
        kept: Vec<T>,
    },
}

pub fn compare_references<T: PartialEq + Clone>(original: &[T], current: &[T]) -> ReferenceDiff<T> {
    if original == current {
        return ReferenceDiff::Unchanged(current.to_vec());
    }
    let removed = original
        .iter()
        .filter(|r| !current.contains(r))
        .cloned()
        .collect();
    let (kept, added) = current
        .iter()
        .cloned()
        .partition(|r| original.contains(r));
    ReferenceDiff::Changed {
        removed,
        added,
        kept,
    }
}
