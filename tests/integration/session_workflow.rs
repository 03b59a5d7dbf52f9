//! End-to-end session operations over the family fixture

use super::test_utils::family_session;
use dendrite::model::{ContentStatus, Status};
use dendrite::tree::Scaffold;
use dendrite::{DatabaseKind, NoteEdit, NoteId, StoreError, ViewMode};

const CONCRETE: DatabaseKind = DatabaseKind::Concrete;

#[test]
fn test_manifest_is_opened_per_kind() {
    let session = family_session();
    assert_eq!(session.interface(CONCRETE).opened().ids(), &[NoteId(1)]);
    assert!(session.interface(DatabaseKind::Conceptual).opened().is_empty());
    assert!(session.interface(DatabaseKind::Temporal).opened().is_empty());
}

#[test]
fn test_relative_edit_marks_modified_and_renders_provenance() {
    let mut session = family_session();
    session.open_node(CONCRETE, "concrete/family").unwrap();

    session
        .edit_note(
            CONCRETE,
            &NoteEdit::new("./family/mother/2").replace("kind\nvery warm\n\npatient"),
        )
        .unwrap();

    let note = session.store().note(NoteId(2)).unwrap();
    assert_eq!(note.status(), Status::Modified);
    assert_eq!(note.text(), "kind\nvery warm\n\npatient");
    assert!(note
        .content()
        .iter()
        .any(|span| span.status == ContentStatus::Added && span.text == "very warm"));
    assert_eq!(session.changes().modified_notes, vec![NoteId(2)]);
    assert!(session.interface(CONCRETE).opened().contains(NoteId(2)));

    let out = session.render(CONCRETE, ViewMode::WorkingSet);
    assert!(out.contains("~ <note id=\"2\" name=\"mom\">"));
    assert!(out.contains("1:   kind"));
    assert!(out.contains("2: + very warm"));
}

#[test]
fn test_reapplying_identical_text_is_a_no_op() {
    let mut session = family_session();
    session
        .edit_note(
            CONCRETE,
            &NoteEdit::new("concrete/family/mother/2").replace("kind\nwarm\n\npatient"),
        )
        .unwrap();
    assert_eq!(session.store().note(NoteId(2)).unwrap().status(), Status::Staged);
    assert!(session.changes().is_empty());
}

#[test]
fn test_original_name_survives_repeated_renames() {
    let mut session = family_session();
    let path = "concrete/family/father/4";
    session
        .edit_note(CONCRETE, &NoteEdit::new(path).rename("papa"))
        .unwrap();
    session
        .edit_note(CONCRETE, &NoteEdit::new(path).rename("pop"))
        .unwrap();

    let note = session.store().note(NoteId(4)).unwrap();
    assert_eq!(note.name(), "pop");
    assert_eq!(note.original_name(), "dad");

    let out = session.render(CONCRETE, ViewMode::WorkingSet);
    assert!(out.contains("- name: dad"));
    assert!(out.contains("+ name: pop"));
}

#[test]
fn test_read_only_and_root_notes_cannot_be_edited() {
    let mut session = family_session();
    let err = session
        .edit_note(CONCRETE, &NoteEdit::new("concrete/1").append("more"))
        .unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(_)));
    assert_eq!(session.store().note(NoteId(1)).unwrap().text(), "Top-level index");
}

#[test]
fn test_failed_edit_leaves_note_untouched() {
    let mut session = family_session();
    let err = session
        .edit_note(
            CONCRETE,
            &NoteEdit::new("concrete/family/mother/2")
                .replace("something else")
                .rename("mum")
                .references(["concrete/family/uncle"]),
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    let note = session.store().note(NoteId(2)).unwrap();
    assert_eq!(note.name(), "mom");
    assert_eq!(note.text(), "kind\nwarm\n\npatient");
    assert_eq!(note.status(), Status::Staged);
    assert!(session.changes().is_empty());
}

#[test]
fn test_note_must_be_filed_under_addressed_node() {
    let mut session = family_session();
    let err = session
        .edit_note(CONCRETE, &NoteEdit::new("concrete/family/mother/4").append("x"))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_refiling_keeps_node_membership_in_sync() {
    let mut session = family_session();
    session
        .edit_note(
            CONCRETE,
            &NoteEdit::new("concrete/family/mother/2").references(["concrete/family/father"]),
        )
        .unwrap();

    let store = session.store();
    let mother = store
        .resolve("concrete/family/mother", store.root_of(CONCRETE), false)
        .unwrap()
        .node;
    let father = store
        .resolve("concrete/family/father", store.root_of(CONCRETE), false)
        .unwrap()
        .node;
    assert!(!store.forest().node(mother).has_note(NoteId(2)));
    assert!(store.forest().node(father).has_note(NoteId(2)));

    let out = session.render(CONCRETE, ViewMode::WorkingSet);
    assert!(out.contains("- ref: concrete/family/mother"));
    assert!(out.contains("+ ref: concrete/family/father"));
}

#[test]
fn test_create_note_validates_references() {
    let mut session = family_session();
    let err = session.create_note(CONCRETE, "aunt", "x", &[]).unwrap_err();
    assert!(matches!(err, StoreError::InvalidPath { .. }));

    let err = session
        .create_note(CONCRETE, "aunt", "x", &["concrete".to_string()])
        .unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(_)));
    assert_eq!(session.store().note_count(), 4);

    let id = session
        .create_note(
            CONCRETE,
            "aunt",
            "x",
            &["concrete/family".to_string(), "concrete/family/mother".to_string()],
        )
        .unwrap();
    assert_eq!(id, NoteId(5));
    let note = session.store().note(id).unwrap();
    assert_eq!(note.status(), Status::Added);
    assert_eq!(note.node_refs().len(), 2);
    assert!(session.interface(CONCRETE).opened().contains(id));
}

#[test]
fn test_rename_node_and_scaffolding_show_in_explorer() {
    let mut session = family_session();
    session
        .rename_node(CONCRETE, "concrete/family/mother", "mum")
        .unwrap();
    session
        .generate_scaffolding(
            CONCRETE,
            "concrete/family",
            &Scaffold::new().with("father", Scaffold::new().with("hobbies", Scaffold::new())),
        )
        .unwrap();
    session.open_node(CONCRETE, "concrete/family/mum").unwrap();

    let changes = session.changes();
    assert_eq!(changes.modified_nodes, vec!["concrete/family/mum".to_string()]);
    assert_eq!(
        changes.added_nodes,
        vec!["concrete/family/father/hobbies".to_string()]
    );

    let out = session.render(CONCRETE, ViewMode::Full);
    assert!(out.contains("<current_path>concrete/family/mum</current_path>"));
    assert!(out.contains("~ <node name=\"mum\" original=\"mother\">"));
    assert!(out.contains("+ <node name=\"hobbies\">"));
    assert!(out.contains("Opened node: concrete/family/mum"));
}

#[test]
fn test_roots_cannot_be_renamed() {
    let mut session = family_session();
    let err = session.rename_node(CONCRETE, "concrete", "things").unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(_)));
}
