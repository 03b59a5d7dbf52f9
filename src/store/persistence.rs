//! Persistence layer for store records

use super::records::{NoteRecord, StoreRecords};
use super::Store;
use crate::error::StoreError;
use crate::tree::Scaffold;
use crate::types::NoteId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const NODES_FILE: &str = "nodes.json";
const NOTES_DIR: &str = "notes";
const NOTES_FILE: &str = "notes.json";
const CONTENT_DIR: &str = "content";

/// Where records are read from and written to.
pub trait RecordStore {
    fn load_records(&self) -> Result<StoreRecords, StoreError>;
    fn save_records(&self, records: &StoreRecords) -> Result<(), StoreError>;

    fn load(&self) -> Result<Store, StoreError> {
        Store::from_records(self.load_records()?)
    }

    fn save(&self, store: &Store) -> Result<(), StoreError> {
        self.save_records(&store.to_records())
    }
}

/// Records laid out as JSON files under one directory:
///
/// ```text
/// <root>/nodes.json
/// <root>/notes/notes.json
/// <root>/notes/content/<id>.md
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.nodes_file().is_file()
    }

    /// Write an empty database unless one is already present.
    pub fn initialize(&self) -> Result<bool, StoreError> {
        if self.exists() {
            return Ok(false);
        }
        self.save_records(&StoreRecords::empty())?;
        info!(root = %self.root.display(), "Initialized empty database");
        Ok(true)
    }

    fn nodes_file(&self) -> PathBuf {
        self.root.join(NODES_FILE)
    }

    fn notes_file(&self) -> PathBuf {
        self.root.join(NOTES_DIR).join(NOTES_FILE)
    }

    fn content_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIR).join(CONTENT_DIR)
    }

    fn content_file(&self, id: NoteId) -> PathBuf {
        self.content_dir().join(format!("{}.md", id))
    }
}

impl RecordStore for DirectoryStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load_records(&self) -> Result<StoreRecords, StoreError> {
        let structure: BTreeMap<String, Scaffold> = read_json(&self.nodes_file())?;
        let notes: Vec<NoteRecord> = read_json(&self.notes_file())?;

        // A missing blob is left out; loading reports it.
        let mut contents = BTreeMap::new();
        for record in &notes {
            match fs::read_to_string(self.content_file(record.id)) {
                Ok(text) => {
                    contents.insert(record.id, text);
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }

        debug!(
            kinds = structure.len(),
            notes = notes.len(),
            blobs = contents.len(),
            "Read records"
        );
        Ok(StoreRecords {
            structure,
            notes,
            contents,
        })
    }

    #[instrument(skip(self, records), fields(root = %self.root.display(), notes = records.notes.len()))]
    fn save_records(&self, records: &StoreRecords) -> Result<(), StoreError> {
        fs::create_dir_all(self.content_dir())?;
        write_json(&self.nodes_file(), &records.structure)?;
        write_json(&self.notes_file(), &records.notes)?;
        for (id, text) in &records.contents {
            fs::write(self.content_file(*id), text)?;
        }
        info!(notes = records.notes.len(), "Saved records");
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| StoreError::Serialization(format!("{}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(path, raw)?;
    Ok(())
}
