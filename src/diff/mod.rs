//! Diff & Merge
//!
//! Line-level reconciliation of a note's stored content against newly
//! supplied text, keeping per-line provenance.

pub mod myers;
pub mod reconcile;

pub use myers::{diff_lines, Edit};
pub use reconcile::{
    merge_consecutive_content, reconcile, reconcile_with, to_storage_string, ReconcileOptions,
    Reconciled,
};
