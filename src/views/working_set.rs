//! Working set view and notification view.

use super::budget::fit_blocks;
use super::markup::note_block;
use crate::interface::{Notifications, OpenedNotes};
use crate::store::Store;
use crate::types::TAB;

/// Opened notes in opening order, greedily, until the budget runs out.
pub fn render_working_set(
    store: &Store,
    opened: &OpenedNotes,
    max_length: usize,
    indent: &str,
    show_note_refs: bool,
) -> String {
    let blocks = opened
        .ids()
        .iter()
        .filter_map(|id| store.note(*id))
        .map(|note| note_block(store, note, indent, show_note_refs));
    fit_blocks(
        blocks,
        max_length,
        &format!("{}<note truncated=\"true\">...</note>", indent),
    )
}

pub fn render_notifications(notifications: &Notifications, max_length: usize, indent: &str) -> String {
    let inner = format!("\n{}{}", indent, TAB);
    let blocks = notifications.messages().iter().map(|message| {
        format!(
            "{}<notification>{}{}\n{}</notification>",
            indent,
            inner,
            message.replace('\n', &inner),
            indent
        )
    });
    fit_blocks(
        blocks,
        max_length,
        &format!("{}<notification truncated=\"true\">...</notification>", indent),
    )
}
