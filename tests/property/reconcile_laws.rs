//! Laws of line reconciliation and storage serialization

use dendrite::diff::{merge_consecutive_content, reconcile, reconcile_with, to_storage_string, ReconcileOptions};
use dendrite::model::content::logical_text;
use dendrite::model::{Content, ContentStatus};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec("[ab ]{0,3}", 0..8).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn reconciled_content_spells_the_new_text(original in text(), replacement in text(), track in any::<bool>()) {
        let base = vec![Content::staged(original.as_str())];
        let result = reconcile_with(&base, &replacement, ReconcileOptions { track_deletions: track }).unwrap();
        if result.changed {
            prop_assert_eq!(logical_text(&result.content), replacement.clone());
            let merged = merge_consecutive_content(result.content.clone());
            prop_assert_eq!(logical_text(&merged), replacement);
            prop_assert!(merged.len() <= result.content.len());
        } else {
            prop_assert_eq!(original.trim(), replacement.trim());
            prop_assert_eq!(result.content, base);
        }
    }

    #[test]
    fn reconcile_is_idempotent(original in text(), replacement in text()) {
        let base = vec![Content::staged(original)];
        let first = reconcile(&base, &replacement).unwrap();
        let second = reconcile(&first.content, &replacement).unwrap();
        prop_assert!(!second.changed);
        prop_assert_eq!(second.content, first.content);
    }

    #[test]
    fn storage_string_reloads_unchanged(original in text(), replacement in text()) {
        let base = vec![Content::staged(original)];
        let merged = merge_consecutive_content(reconcile(&base, &replacement).unwrap().content);
        let stored = to_storage_string(&merged);
        prop_assert_eq!(stored.trim(), replacement.trim());
        let reloaded = vec![Content::staged(stored)];
        prop_assert!(!reconcile(&reloaded, &replacement).unwrap().changed);
    }

    #[test]
    fn only_deletion_tracking_emits_deleted_spans(original in text(), replacement in text()) {
        let base = vec![Content::staged(original)];
        let plain = reconcile(&base, &replacement).unwrap();
        prop_assert!(plain.content.iter().all(|span| span.status != ContentStatus::Deleted));

        let tracked = reconcile_with(&base, &replacement, ReconcileOptions { track_deletions: true }).unwrap();
        let live: Vec<Content> = tracked.content.into_iter().filter(|span| !span.is_deleted()).collect();
        prop_assert_eq!(live, plain.content);
    }
}
