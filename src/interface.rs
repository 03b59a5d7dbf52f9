//! Interface
//!
//! One working session over a single database kind: an explorer focused on a
//! node, the working set of opened notes and a notification log. Callers only
//! pass paths, note ids and raw text; every operation resolves them against
//! the store first.

pub mod explorer;
pub mod notifications;
pub mod opened;

pub use explorer::Explorer;
pub use notifications::Notifications;
pub use opened::OpenedNotes;

use crate::diff::ReconcileOptions;
use crate::error::StoreError;
use crate::store::Store;
use crate::tree::Scaffold;
use crate::types::{DatabaseKind, NodeRef, NoteId};
use serde::{Deserialize, Serialize};

/// New content for a note: appended as an `added` span, or reconciled
/// against the current text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUpdate {
    pub content: String,
    #[serde(default)]
    pub append: bool,
}

/// A batch of changes to one note. Every part is validated before any part is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEdit {
    pub path_to_note: String,
    #[serde(default)]
    pub content_update: Option<ContentUpdate>,
    #[serde(default)]
    pub updated_name: Option<String>,
    #[serde(default)]
    pub updated_references: Option<Vec<String>>,
}

impl NoteEdit {
    pub fn new(path_to_note: impl Into<String>) -> Self {
        Self {
            path_to_note: path_to_note.into(),
            content_update: None,
            updated_name: None,
            updated_references: None,
        }
    }

    pub fn append(mut self, content: impl Into<String>) -> Self {
        self.content_update = Some(ContentUpdate {
            content: content.into(),
            append: true,
        });
        self
    }

    pub fn replace(mut self, content: impl Into<String>) -> Self {
        self.content_update = Some(ContentUpdate {
            content: content.into(),
            append: false,
        });
        self
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.updated_name = Some(name.into());
        self
    }

    pub fn references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.updated_references = Some(references.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Interface {
    kind: DatabaseKind,
    explorer: Explorer,
    opened: OpenedNotes,
    notifications: Notifications,
}

impl Interface {
    /// Focus on the root. A read-only first note at the root (a manifest) is
    /// opened straight away.
    pub fn new(kind: DatabaseKind, store: &Store) -> Self {
        let mut opened = OpenedNotes::new();
        let root = store.tree(kind).root();
        if let Some(first) = root.notes().first() {
            if store.note(*first).map(|note| note.read_only()).unwrap_or(false) {
                opened.insert(*first);
            }
        }
        Self {
            kind,
            explorer: Explorer::new(store.root_of(kind)),
            opened,
            notifications: Notifications::new(),
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn opened(&self) -> &OpenedNotes {
        &self.opened
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(message);
    }

    pub fn open_node(&mut self, store: &Store, path: &str) -> Result<NodeRef, StoreError> {
        let node = self.explorer.open_node(store, path)?;
        self.notifications
            .push(format!("Opened node: {}", store.node_path(node)));
        Ok(node)
    }

    pub fn open_note(&mut self, store: &Store, path: &str) -> Result<NoteId, StoreError> {
        self.opened.open_note(store, path, self.explorer.current())
    }

    /// Create a note and open it.
    pub fn create_note(
        &mut self,
        store: &mut Store,
        name: &str,
        content: &str,
        references: &[String],
    ) -> Result<NoteId, StoreError> {
        let id = self.explorer.create_note(store, name, content, references)?;
        self.opened.insert(id);
        Ok(id)
    }

    /// Apply `edit` and open the note.
    pub fn edit_note(
        &mut self,
        store: &mut Store,
        edit: &NoteEdit,
        options: ReconcileOptions,
    ) -> Result<NoteId, StoreError> {
        let id = self.explorer.edit_note(store, edit, options)?;
        self.opened.insert(id);
        Ok(id)
    }

    pub fn rename_node(&mut self, store: &mut Store, path: &str, new_name: &str) -> Result<NodeRef, StoreError> {
        self.explorer.rename_node(store, path, new_name)
    }

    pub fn generate_scaffolding(
        &mut self,
        store: &mut Store,
        parent_path: &str,
        scaffold: &Scaffold,
    ) -> Result<usize, StoreError> {
        self.explorer.generate_scaffolding(store, parent_path, scaffold)
    }
}
