//! Explorer: the focused node and every structural mutation.

use super::NoteEdit;
use crate::diff::ReconcileOptions;
use crate::error::StoreError;
use crate::store::Store;
use crate::tree::Scaffold;
use crate::types::{DatabaseKind, NodeRef, NoteId};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explorer {
    current: NodeRef,
}

impl Explorer {
    pub fn new(current: NodeRef) -> Self {
        Self { current }
    }

    pub fn kind(&self) -> DatabaseKind {
        self.current.kind
    }

    pub fn current(&self) -> NodeRef {
        self.current
    }

    /// Canonical path of the focused node.
    pub fn current_path(&self, store: &Store) -> String {
        store.node_path(self.current)
    }

    /// Focus on the node at `path`, which must belong to this explorer's tree.
    pub fn open_node(&mut self, store: &Store, path: &str) -> Result<NodeRef, StoreError> {
        let node = store.resolve(path, self.current, false)?.node;
        if node.kind != self.kind() {
            return Err(StoreError::invalid_path(
                path.trim(),
                format!("path must address the '{}' database", self.kind()),
            ));
        }
        self.current = node;
        Ok(node)
    }

    pub fn create_note(
        &self,
        store: &mut Store,
        name: &str,
        content: &str,
        references: &[String],
    ) -> Result<NoteId, StoreError> {
        if references.is_empty() {
            return Err(StoreError::invalid_path("", "references cannot be empty"));
        }
        let refs = store.resolve_nodes(references, self.current)?;
        let id = store.create_note(name, content, refs)?;
        info!(note_id = %id, name, "Note created");
        Ok(id)
    }

    /// Validate every part of `edit`, then apply content, name and references
    /// in that order.
    pub fn edit_note(
        &self,
        store: &mut Store,
        edit: &NoteEdit,
        options: ReconcileOptions,
    ) -> Result<NoteId, StoreError> {
        let (node, id) = store.resolve_note(&edit.path_to_note, self.current)?;
        if store.forest().node(node).is_root() {
            return Err(StoreError::PermissionDenied(format!(
                "cannot edit notes in the root node '{}'",
                store.node_path(node)
            )));
        }
        store.editable_note(id)?;
        // An empty reference list leaves the filing as it is.
        let refs = match &edit.updated_references {
            Some(paths) if !paths.is_empty() => {
                let refs = store.resolve_nodes(paths, self.current)?;
                store.validate_filing(&refs)?;
                Some(refs)
            }
            _ => None,
        };

        if let Some(update) = &edit.content_update {
            if update.append {
                store.append_note_content(id, &update.content)?;
            } else {
                let changed = store.replace_note_content(id, &update.content, options)?;
                debug!(note_id = %id, changed, "Reconciled replacement content");
            }
        }
        if let Some(name) = &edit.updated_name {
            store.rename_note(id, name)?;
        }
        if let Some(refs) = refs {
            store.set_note_filing(id, refs)?;
        }
        Ok(id)
    }

    pub fn rename_node(&self, store: &mut Store, path: &str, new_name: &str) -> Result<NodeRef, StoreError> {
        let node = store.resolve(path, self.current, false)?.node;
        store.rename_node(node, new_name)?;
        Ok(node)
    }

    /// Graft `scaffold` below the node at `parent_path`. Returns the number
    /// of nodes created.
    pub fn generate_scaffolding(
        &self,
        store: &mut Store,
        parent_path: &str,
        scaffold: &Scaffold,
    ) -> Result<usize, StoreError> {
        let parent = store.resolve(parent_path, self.current, false)?.node;
        let created = store.graft(parent, scaffold)?;
        debug!(parent = %store.node_path(parent), created, "Scaffolding generated");
        Ok(created)
    }
}
