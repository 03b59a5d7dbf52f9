//! Records and on-disk round trips

use super::test_utils::{family_records, family_session, family_store, seed_directory};
use dendrite::config::DendriteConfig;
use dendrite::model::Status;
use dendrite::{DatabaseKind, NoteEdit, NoteId, RecordStore, Session, Store, StoreError};
use std::fs;
use tempfile::TempDir;

const CONCRETE: DatabaseKind = DatabaseKind::Concrete;

#[test]
fn test_records_round_trip_unchanged() {
    let store = family_store();
    assert_eq!(store.to_records(), family_records());
    assert!(store.changes().is_empty());
    assert_eq!(store.next_note_id(), NoteId(5));
}

#[test]
fn test_directory_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let disk = seed_directory(temp_dir.path());
    assert!(temp_dir.path().join("nodes.json").is_file());
    assert!(temp_dir.path().join("notes/notes.json").is_file());
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("notes/content/2.md")).unwrap(),
        "kind\nwarm\n\npatient"
    );

    let loaded = disk.load().unwrap();
    assert_eq!(loaded.to_records(), family_records());
}

#[test]
fn test_session_edits_persist_as_new_baseline() {
    let temp_dir = TempDir::new().unwrap();
    let disk = seed_directory(temp_dir.path());
    let mut session = Session::open(&disk, &DendriteConfig::default()).unwrap();

    session
        .rename_node(CONCRETE, "concrete/family/mother", "mum")
        .unwrap();
    session
        .edit_note(
            CONCRETE,
            &NoteEdit::new("concrete/family/mum/2").append("funny"),
        )
        .unwrap();
    let id = session
        .create_note(CONCRETE, "aunt", "far away", &["concrete/family".to_string()])
        .unwrap();
    assert!(!session.changes().is_empty());
    session.save(&disk).unwrap();

    let reloaded = disk.load().unwrap();
    assert!(reloaded.changes().is_empty());
    assert!(reloaded.notes().all(|note| note.status() == Status::Staged));
    assert_eq!(reloaded.note(id).unwrap().name(), "aunt");
    assert_eq!(reloaded.next_note_id(), NoteId(id.0 + 1));

    let (node, mom) = reloaded
        .resolve_note("concrete/family/mum/2", reloaded.root_of(CONCRETE))
        .unwrap();
    assert_eq!(reloaded.node_path(node), "concrete/family/mum");
    assert_eq!(reloaded.note(mom).unwrap().text(), "kind\nwarm\n\npatient\nfunny");
    // Note 3 still points at note 2 through the renamed node.
    assert_eq!(reloaded.note(NoteId(3)).unwrap().note_refs(), &[NoteId(2)]);
}

#[test]
fn test_deleted_lines_are_not_persisted() {
    let mut config = DendriteConfig::default();
    config.render.track_deletions = true;
    let mut session = Session::with_config(family_store(), &config);
    session
        .edit_note(
            CONCRETE,
            &NoteEdit::new("concrete/family/mother/2").replace("kind\n\npatient"),
        )
        .unwrap();
    let note = session.store().note(NoteId(2)).unwrap();
    assert!(note.content().iter().any(|span| span.is_deleted()));

    let records = session.records();
    assert_eq!(records.contents[&NoteId(2)], "kind\n\npatient");
}

#[test]
fn test_unfiled_note_is_fatal() {
    let mut records = family_records();
    records.notes[3].node_references.clear();
    let err = Store::from_records(records).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_duplicate_note_id_is_fatal() {
    let mut records = family_records();
    let mut copy = records.notes[2].clone();
    copy.name = "copy".to_string();
    records.notes.push(copy);
    assert!(matches!(
        Store::from_records(records),
        Err(StoreError::InvariantViolation(_))
    ));
}

#[test]
fn test_dangling_reference_fails_load() {
    let mut records = family_records();
    records.notes[1].node_references = vec!["concrete/family/uncle".to_string()];
    assert!(matches!(
        Store::from_records(records),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn test_unsaved_session_changes_do_not_leak() {
    let mut session = family_session();
    session
        .edit_note(CONCRETE, &NoteEdit::new("concrete/family/father/4").rename("papa"))
        .unwrap();
    let fresh = family_store();
    assert_eq!(fresh.note(NoteId(4)).unwrap().name(), "dad");
}
