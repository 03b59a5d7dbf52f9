//! Laws of path resolution over generated trees

use dendrite::tree::Scaffold;
use dendrite::{DatabaseKind, Session, Store, StoreError};
use proptest::prelude::*;

const NAMES: [&str; 4] = ["ant", "bee", "cat", "dog"];

fn chain(segments: &[usize]) -> Scaffold {
    segments
        .iter()
        .rev()
        .fold(Scaffold::new(), |inner, &i| Scaffold::new().with(NAMES[i], inner))
}

fn paths() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..NAMES.len(), 1..4), 1..6)
}

fn as_path(segments: &[usize]) -> String {
    let names: Vec<&str> = segments.iter().map(|&i| NAMES[i]).collect();
    format!("concrete/{}", names.join("/"))
}

fn grown(generated: &[Vec<usize>]) -> Session {
    let mut session = Session::new(Store::new());
    for segments in generated {
        session
            .generate_scaffolding(DatabaseKind::Concrete, "concrete", &chain(segments))
            .unwrap();
    }
    session
}

proptest! {
    #[test]
    fn existing_paths_resolve_to_themselves(generated in paths(), slashes in 0usize..3) {
        let session = grown(&generated);
        let store = session.store();
        let anchor = store.root_of(DatabaseKind::Concrete);
        for segments in &generated {
            let path = as_path(segments);
            let padded = format!("{}{}{}", "/".repeat(slashes), path, "/".repeat(slashes));
            let resolved = store.resolve(&padded, anchor, false).unwrap();
            prop_assert_eq!(store.node_path(resolved.node), path);
            prop_assert_eq!(resolved.note_id, None);
        }
    }

    #[test]
    fn absent_segment_is_not_found(generated in paths()) {
        let session = grown(&generated);
        let store = session.store();
        let anchor = store.root_of(DatabaseKind::Concrete);
        for segments in &generated {
            let path = format!("{}/eel", as_path(segments));
            match store.resolve(&path, anchor, false) {
                Err(StoreError::NotFound { what, path: attempted }) => {
                    prop_assert!(what.contains("eel"));
                    prop_assert!(attempted.contains("eel"));
                }
                other => prop_assert!(false, "expected NotFound, got {:?}", other),
            }
        }
    }

    #[test]
    fn relative_paths_match_absolute(generated in paths()) {
        let mut session = grown(&generated);
        for segments in generated.iter().filter(|s| s.len() >= 2) {
            let parent = as_path(&segments[..segments.len() - 1]);
            let focus = session.open_node(DatabaseKind::Concrete, &parent).unwrap();
            let store = session.store();
            let relative = format!(
                "./{}/{}",
                store.forest().node(focus).name(),
                NAMES[segments[segments.len() - 1]]
            );
            let resolved = store.resolve(&relative, focus, false).unwrap();
            prop_assert_eq!(store.node_path(resolved.node), as_path(segments));
        }
    }

    #[test]
    fn regrafting_creates_nothing(generated in paths()) {
        let mut session = grown(&generated);
        let before = session.store().tree(DatabaseKind::Concrete).len();
        for segments in &generated {
            let created = session
                .generate_scaffolding(DatabaseKind::Concrete, "concrete", &chain(segments))
                .unwrap();
            prop_assert_eq!(created, 0);
        }
        prop_assert_eq!(session.store().tree(DatabaseKind::Concrete).len(), before);
    }
}
