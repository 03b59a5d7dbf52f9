//! Budget behavior of the rendered views

use super::test_utils::family_session;
use dendrite::views::{render_explorer, render_working_set};
use dendrite::{DatabaseKind, ViewMode};

const CONCRETE: DatabaseKind = DatabaseKind::Concrete;

#[test]
fn test_rendering_is_deterministic() {
    let mut session = family_session();
    session.open_node(CONCRETE, "concrete/family").unwrap();
    session.open_note(CONCRETE, "concrete/family/mother/2").unwrap();
    for mode in [ViewMode::WorkingSet, ViewMode::Full, ViewMode::Tie] {
        assert_eq!(session.render(CONCRETE, mode), session.render(CONCRETE, mode));
    }
}

#[test]
fn test_working_set_keeps_opening_order_until_budget() {
    let mut session = family_session();
    session.open_note(CONCRETE, "concrete/family/mother/2").unwrap();
    session.open_note(CONCRETE, "concrete/family/father/4").unwrap();
    let store = session.store();
    let opened = session.interface(CONCRETE).opened();

    let full = render_working_set(store, opened, 10_000, "", false);
    let manifest = full.find("name=\"manifest\"").unwrap();
    let mom = full.find("name=\"mom\"").unwrap();
    let dad = full.find("name=\"dad\"").unwrap();
    assert!(manifest < mom && mom < dad);
    assert!(!full.contains("truncated"));

    // Room for exactly the first block.
    let first_len = full.find("\n  <note").unwrap();
    let cut = render_working_set(store, opened, first_len, "", false);
    assert!(cut.contains("name=\"manifest\""));
    assert!(!cut.contains("name=\"mom\""));
    assert!(cut.ends_with("<note truncated=\"true\">...</note>"));

    let none = render_working_set(store, opened, 0, "", false);
    assert_eq!(none, "<note truncated=\"true\">...</note>");
}

#[test]
fn test_explorer_sections_truncate_whole() {
    let mut session = family_session();
    session.open_node(CONCRETE, "concrete/family").unwrap();
    let store = session.store();
    let explorer = session.interface(CONCRETE).explorer();

    let roomy = render_explorer(store, explorer, 10_000, 0.7, "");
    assert!(roomy.starts_with("<current_path>concrete/family</current_path>\n"));
    assert!(!roomy.contains("truncated"));

    let tight = render_explorer(store, explorer, 60, 0.7, "");
    assert!(tight.contains("<schema truncated=\"true\">...</schema>"));
    assert!(tight.contains("<current_node truncated=\"true\">...</current_node>"));
    assert!(!tight.contains("name=\"mother\""));
}

#[test]
fn test_interface_budget_extremes() {
    let mut session = family_session();
    session.open_node(CONCRETE, "concrete/family").unwrap();
    session.open_note(CONCRETE, "concrete/family/mother/2").unwrap();

    let roomy = session.render_with_budget(CONCRETE, ViewMode::Full, 20_000);
    assert!(!roomy.contains("truncated"));
    assert!(roomy.contains("name=\"mom\""));

    let starved = session.render_with_budget(CONCRETE, ViewMode::Full, 0);
    assert!(starved.starts_with("<interface>\n"));
    assert!(starved.ends_with("</interface>"));
    for marker in [
        "<schema truncated=\"true\">...</schema>",
        "<current_node truncated=\"true\">...</current_node>",
        "<note truncated=\"true\">...</note>",
        "<notification truncated=\"true\">...</notification>",
    ] {
        assert!(starved.contains(marker), "missing {}", marker);
    }
    assert!(!starved.contains("name=\"mom\""));
}
