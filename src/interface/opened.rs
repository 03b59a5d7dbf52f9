//! The working set: notes opened during the session, in opening order.

use crate::error::StoreError;
use crate::store::Store;
use crate::types::{NodeRef, NoteId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedNotes {
    ids: Vec<NoteId>,
}

impl OpenedNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[NoteId] {
        &self.ids
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve `path` (ending in a note id) and open that note. Opening a note
    /// twice is a no-op.
    pub fn open_note(&mut self, store: &Store, path: &str, current: NodeRef) -> Result<NoteId, StoreError> {
        let (_, id) = store.resolve_note(path, current)?;
        self.insert(id);
        Ok(id)
    }

    pub(crate) fn insert(&mut self, id: NoteId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }
}
