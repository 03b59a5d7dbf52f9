//! Shared fixtures for integration tests
//!
//! One small family database used across the suites:
//!
//! ```text
//! conceptual/love            note 3 "care"  (linked with note 2)
//! conceptual/duty
//! concrete                   note 1 "manifest" (read-only)
//! concrete/family            note 4 "dad"
//! concrete/family/mother     note 2 "mom"
//! concrete/family/father     note 4 "dad"
//! temporal/2024/jan
//! ```

use dendrite::store::NoteRecord;
use dendrite::tree::Scaffold;
use dendrite::{DirectoryStore, NoteId, RecordStore, Session, Store, StoreRecords};
use std::collections::BTreeMap;
use std::path::Path;

fn root(token: &str, children: Scaffold) -> Scaffold {
    Scaffold::new().with(token, children)
}

fn record(id: u64, name: &str, nodes: &[&str], notes: &[&str], read_only: bool) -> NoteRecord {
    NoteRecord {
        id: NoteId(id),
        name: name.to_string(),
        node_references: nodes.iter().map(|p| p.to_string()).collect(),
        note_references: notes.iter().map(|p| p.to_string()).collect(),
        read_only,
    }
}

pub fn family_records() -> StoreRecords {
    let mut structure = BTreeMap::new();
    structure.insert(
        "conceptual".to_string(),
        root(
            "conceptual",
            Scaffold::new()
                .with("love", Scaffold::new())
                .with("duty", Scaffold::new()),
        ),
    );
    structure.insert(
        "concrete".to_string(),
        root(
            "concrete",
            Scaffold::new().with(
                "family",
                Scaffold::new()
                    .with("mother", Scaffold::new())
                    .with("father", Scaffold::new()),
            ),
        ),
    );
    structure.insert(
        "temporal".to_string(),
        root(
            "temporal",
            Scaffold::new().with("2024", Scaffold::new().with("jan", Scaffold::new())),
        ),
    );

    let notes = vec![
        record(1, "manifest", &["concrete"], &[], true),
        record(
            2,
            "mom",
            &["concrete/family/mother"],
            &["conceptual/love/3"],
            false,
        ),
        record(
            3,
            "care",
            &["conceptual/love"],
            &["concrete/family/mother/2"],
            false,
        ),
        record(
            4,
            "dad",
            &["concrete/family/father", "concrete/family"],
            &[],
            false,
        ),
    ];

    let contents = BTreeMap::from([
        (NoteId(1), "Top-level index".to_string()),
        (NoteId(2), "kind\nwarm\n\npatient".to_string()),
        (NoteId(3), "giving".to_string()),
        (NoteId(4), "tall".to_string()),
    ]);

    StoreRecords {
        structure,
        notes,
        contents,
    }
}

pub fn family_store() -> Store {
    Store::from_records(family_records()).expect("fixture records load")
}

pub fn family_session() -> Session {
    Session::new(family_store())
}

/// Write the fixture under `dir` and return a handle to it.
pub fn seed_directory(dir: &Path) -> DirectoryStore {
    let disk = DirectoryStore::new(dir);
    disk.save_records(&family_records()).expect("fixture records save");
    disk
}
