//! Category nodes. A node owns its children exclusively and files notes by id.

use super::status::Status;
use crate::types::{NodeId, NoteId};

#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    original_name: String,
    status: Status,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    notes: Vec<NoteId>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, parent: Option<NodeId>, status: Status) -> Self {
        let name = name.into();
        Self {
            original_name: name.clone(),
            name,
            status,
            parent,
            children: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name at creation; only used for display once the node is modified.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Notes filed directly under this node, in filing order.
    pub fn notes(&self) -> &[NoteId] {
        &self.notes
    }

    pub fn has_note(&self, id: NoteId) -> bool {
        self.notes.contains(&id)
    }

    pub fn name_changed(&self) -> bool {
        self.status == Status::Modified && self.original_name != self.name
    }

    /// Rename the node. Renaming to the current name is not a mutation.
    pub(crate) fn rename(&mut self, new_name: impl Into<String>) {
        let new_name = new_name.into();
        if new_name == self.name {
            return;
        }
        self.status.touch();
        self.name = new_name;
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// File a note under this node. Filing does not change the node's status.
    pub(crate) fn file_note(&mut self, id: NoteId) -> bool {
        if self.notes.contains(&id) {
            return false;
        }
        self.notes.push(id);
        true
    }

    pub(crate) fn unfile_note(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|filed| *filed != id);
        before != self.notes.len()
    }
}
