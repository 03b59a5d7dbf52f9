//! Laws of the byte-bounded working set view

use dendrite::tree::Scaffold;
use dendrite::views::render_working_set;
use dendrite::{DatabaseKind, Session, Store};
use proptest::prelude::*;

const MARKER: &str = "<note truncated=\"true\">...</note>";

fn session_with_notes(bodies: &[String]) -> Session {
    let mut session = Session::new(Store::new());
    session
        .generate_scaffolding(
            DatabaseKind::Temporal,
            "temporal",
            &Scaffold::new().with("2024", Scaffold::new()),
        )
        .unwrap();
    for (i, body) in bodies.iter().enumerate() {
        session
            .create_note(
                DatabaseKind::Temporal,
                &format!("day{}", i),
                body,
                &["temporal/2024".to_string()],
            )
            .unwrap();
    }
    session
}

proptest! {
    #[test]
    fn working_set_is_a_budgeted_prefix(
        bodies in prop::collection::vec("[a-z\n]{0,40}", 0..6),
        budget in 0usize..600,
    ) {
        let session = session_with_notes(&bodies);
        let store = session.store();
        let opened = session.interface(DatabaseKind::Temporal).opened();
        let untruncated = render_working_set(store, opened, usize::MAX, "", false);
        let out = render_working_set(store, opened, budget, "", false);

        if let Some(kept) = out.strip_suffix(MARKER) {
            let kept = kept.strip_suffix('\n').unwrap_or(kept);
            prop_assert!(kept.len() <= budget);
            prop_assert!(untruncated.starts_with(kept));
        } else {
            prop_assert!(out.len() <= budget);
            prop_assert_eq!(out, untruncated);
        }
    }

    #[test]
    fn bigger_budgets_keep_at_least_as_many_notes(
        bodies in prop::collection::vec("[a-z]{0,30}", 1..6),
        small in 0usize..300,
        extra in 0usize..300,
    ) {
        let session = session_with_notes(&bodies);
        let store = session.store();
        let opened = session.interface(DatabaseKind::Temporal).opened();
        let count = |budget: usize| {
            render_working_set(store, opened, budget, "", false)
                .matches("<note id=")
                .count()
        };
        prop_assert!(count(small) <= count(small + extra));
    }
}
