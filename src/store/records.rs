//! Flat external representation of a store.
//!
//! Structure is a nested name→children mapping per database kind; notes are a
//! flat list of records whose references are paths; content is one raw text
//! blob per note id.

use super::{IdAllocator, Store};
use crate::error::StoreError;
use crate::model::Note;
use crate::tree::{Forest, Scaffold, TreeBuilder};
use crate::types::{DatabaseKind, NodeRef, NoteId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: NoteId,
    pub name: String,
    #[serde(default)]
    pub node_references: Vec<String>,
    #[serde(default)]
    pub note_references: Vec<String>,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecords {
    /// Keyed by database kind token.
    pub structure: BTreeMap<String, Scaffold>,
    pub notes: Vec<NoteRecord>,
    pub contents: BTreeMap<NoteId, String>,
}

impl StoreRecords {
    /// Records of a store holding three bare roots.
    pub fn empty() -> Self {
        Store::new().to_records()
    }
}

impl Store {
    /// Rebuild a store from its records. Every entity comes back `staged`.
    #[instrument(skip(records), fields(notes = records.notes.len()))]
    pub fn from_records(records: StoreRecords) -> Result<Store, StoreError> {
        let start = Instant::now();

        for token in records.structure.keys() {
            if DatabaseKind::from_token(token).is_none() {
                error!(kind = %token, "Unknown database kind in records");
                return Err(StoreError::InvariantViolation(format!(
                    "unknown database kind '{}'",
                    token
                )));
            }
        }
        let mut forest = Forest::new();
        for kind in DatabaseKind::ALL {
            let structure = records.structure.get(kind.token()).ok_or_else(|| {
                StoreError::InvariantViolation(format!("records have no structure for '{}'", kind))
            })?;
            forest.insert(TreeBuilder::new(kind).build(structure)?);
        }

        let mut store = Store {
            forest,
            notes: BTreeMap::new(),
            ids: IdAllocator::default(),
        };
        let anchor = store.root_of(DatabaseKind::Conceptual);

        // Node references first: note references need every note filed.
        for record in &records.notes {
            let node_refs = store.resolve_nodes(&record.node_references, anchor)?;
            if node_refs.is_empty() {
                return Err(StoreError::InvariantViolation(format!(
                    "note {} is not filed under any node",
                    record.id
                )));
            }
            let text = records.contents.get(&record.id).ok_or_else(|| {
                StoreError::InvariantViolation(format!("note {} has no stored content", record.id))
            })?;
            store.insert_note(Note::staged(
                record.id,
                record.name.as_str(),
                record.read_only,
                text.as_str(),
                node_refs,
            ))?;
        }

        for record in &records.notes {
            let mut note_refs = Vec::with_capacity(record.note_references.len());
            for path in &record.note_references {
                let (_, id) = store.resolve_note(path, anchor)?;
                if !note_refs.contains(&id) {
                    note_refs.push(id);
                }
            }
            if let Some(note) = store.notes.get_mut(&record.id) {
                note.load_note_refs(note_refs);
            }
        }

        let orphans = records
            .contents
            .keys()
            .filter(|id| !store.notes.contains_key(id))
            .count();
        if orphans > 0 {
            warn!(orphans, "Ignoring content blobs without a note record");
        }

        store.ids = IdAllocator::after(store.notes.keys().next_back().copied());
        info!(
            notes = store.notes.len(),
            next_id = %store.ids.peek(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Store loaded from records"
        );
        Ok(store)
    }

    /// Current names, reference paths and flat storage text.
    pub fn to_records(&self) -> StoreRecords {
        let structure = self
            .forest
            .iter()
            .map(|tree| (tree.kind().token().to_string(), tree.to_scaffold()))
            .collect();

        let mut notes = Vec::with_capacity(self.notes.len());
        let mut contents = BTreeMap::new();
        for note in self.notes.values() {
            let node_references = note
                .node_refs()
                .iter()
                .map(|node| self.node_path(*node))
                .collect();
            let note_references = note
                .note_refs()
                .iter()
                .filter_map(|id| match self.note_path(*id) {
                    Some(path) => Some(path),
                    None => {
                        warn!(note_id = %note.id(), target = %id, "Dropping reference to unfiled note");
                        None
                    }
                })
                .collect();
            notes.push(NoteRecord {
                id: note.id(),
                name: note.name().to_string(),
                node_references,
                note_references,
                read_only: note.read_only(),
            });
            contents.insert(note.id(), note.to_storage_string());
        }

        StoreRecords {
            structure,
            notes,
            contents,
        }
    }

    /// `<first filing node path>/<id>`.
    pub fn note_path(&self, id: NoteId) -> Option<String> {
        let note = self.notes.get(&id)?;
        let node: &NodeRef = note.node_refs().first()?;
        Some(format!("{}/{}", self.node_path(*node), id))
    }
}
