//! Cross-database links through a session

use super::test_utils::{family_session, family_store};
use dendrite::config::DendriteConfig;
use dendrite::model::Status;
use dendrite::{DatabaseKind, NoteId, Session, StoreError, ViewMode};

use DatabaseKind::{Conceptual, Concrete, Temporal};

#[test]
fn test_concrete_note_links_conceptual_note() {
    let mut session = family_session();
    session.open_note(Concrete, "concrete/family/father/4").unwrap();
    session.open_note(Conceptual, "conceptual/love/3").unwrap();

    assert!(session
        .link(Concrete, "4", Conceptual, "conceptual/love/3")
        .unwrap());

    let store = session.store();
    assert_eq!(store.note(NoteId(4)).unwrap().note_refs(), &[NoteId(3)]);
    assert_eq!(
        store.note(NoteId(3)).unwrap().note_refs(),
        &[NoteId(2), NoteId(4)]
    );
    assert_eq!(store.note(NoteId(4)).unwrap().status(), Status::Modified);

    let out = session.render(Conceptual, ViewMode::Tie);
    assert!(out.contains("  note_ref: concrete/family/mother/2"));
    assert!(out.contains("+ note_ref: concrete/family/father/4"));
}

#[test]
fn test_relinking_is_idempotent() {
    let mut session = family_session();
    session.open_note(Concrete, "concrete/family/mother/2").unwrap();
    session.open_note(Conceptual, "conceptual/love/3").unwrap();

    assert!(!session.link(Concrete, "2", Conceptual, "3").unwrap());
    let store = session.store();
    assert_eq!(store.note(NoteId(2)).unwrap().note_refs(), &[NoteId(3)]);
    assert_eq!(store.note(NoteId(2)).unwrap().status(), Status::Staged);
    assert!(session.changes().is_empty());
}

#[test]
fn test_temporal_node_files_concrete_note() {
    let mut session = family_session();
    session.open_note(Concrete, "concrete/family/mother/2").unwrap();

    assert!(session.link(Temporal, "temporal/2024/jan", Concrete, "2").unwrap());

    let records = session.records();
    let mom = records.notes.iter().find(|n| n.id == NoteId(2)).unwrap();
    assert_eq!(
        mom.node_references,
        vec![
            "concrete/family/mother".to_string(),
            "temporal/2024/jan".to_string()
        ]
    );
    // Only the note records the link.
    assert!(session.changes().added_nodes.is_empty());
    assert!(session.changes().modified_nodes.is_empty());
}

#[test]
fn test_unopened_note_cannot_be_linked() {
    let mut session = family_session();
    session.open_note(Conceptual, "conceptual/love/3").unwrap();
    let err = session.link(Concrete, "4", Conceptual, "3").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(session.store().note(NoteId(3)).unwrap().note_refs(), &[NoteId(2)]);
}

#[test]
fn test_disallowed_pairs_are_denied() {
    let mut session = family_session();
    session.open_note(Concrete, "concrete/family/mother/2").unwrap();
    session.open_note(Conceptual, "conceptual/love/3").unwrap();

    for (a, a_ref, b, b_ref) in [
        (Conceptual, "3", Concrete, "2"),
        (Concrete, "2", Concrete, "2"),
        (Concrete, "2", Temporal, "temporal/2024"),
    ] {
        let err = session.link(a, a_ref, b, b_ref).unwrap_err();
        assert!(matches!(err, StoreError::PermissionDenied(_)), "{:?}", err);
    }
    assert!(session.changes().is_empty());
}

#[test]
fn test_temporal_root_cannot_take_notes() {
    let mut session = family_session();
    session.open_note(Concrete, "concrete/family/mother/2").unwrap();
    let err = session.link(Temporal, "temporal", Concrete, "2").unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(_)));
}

#[test]
fn test_disabled_links_from_config() {
    let mut config = DendriteConfig::default();
    config.links.enabled = false;
    let mut session = Session::with_config(family_store(), &config);
    session.open_note(Concrete, "concrete/family/father/4").unwrap();
    session.open_note(Conceptual, "conceptual/love/3").unwrap();
    let err = session.link(Concrete, "4", Conceptual, "3").unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(_)));
}
