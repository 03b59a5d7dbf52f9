//! Tagged text for nodes and notes, annotated with status markers.

use crate::model::{compare_references, Node, Note, ReferenceDiff, Status};
use crate::store::Store;
use crate::tree::DatabaseTree;
use crate::types::{NodeId, NodeRef, NoteId, TAB};

fn node_open(node: &Node, indent: &str, close_inline: bool) -> String {
    let tail = if close_inline { "</node>" } else { "" };
    if node.name_changed() {
        format!(
            "{}{} <node name=\"{}\" original=\"{}\">{}",
            indent,
            Status::Modified.marker(),
            node.name(),
            node.original_name(),
            tail
        )
    } else {
        format!(
            "{}{} <node name=\"{}\">{}",
            indent,
            node.status().marker(),
            node.name(),
            tail
        )
    }
}

fn node_close(node: &Node, indent: &str) -> String {
    format!("{}{} </node>", indent, node.status().marker())
}

/// One-line note entry: id, name and, when modified, which fields changed.
pub fn note_stub(note: &Note, indent: &str) -> String {
    let mut line = format!(
        "{}{} <note id=\"{}\" name=\"{}\"",
        indent,
        note.status().marker(),
        note.id(),
        note.name()
    );
    if note.status() == Status::Modified {
        if note.name_changed() {
            line.push_str(&format!(" name_changed=\"{}\"", note.original_name()));
        }
        if note.node_refs_changed() {
            line.push_str(" refs_changed=\"true\"");
        }
    }
    line.push_str("></note>");
    line
}

/// Whole subtree below `id`: nested nodes with a stub per filed note.
pub fn node_schema(store: &Store, tree: &DatabaseTree, id: NodeId, indent: &str) -> String {
    let mut lines = Vec::new();
    push_schema(store, tree, id, indent, &mut lines);
    lines.join("\n")
}

fn push_schema(store: &Store, tree: &DatabaseTree, id: NodeId, indent: &str, lines: &mut Vec<String>) {
    let node = tree.node(id);
    lines.push(node_open(node, indent, false));
    let inner = format!("{}{}", indent, TAB);
    for child in node.children() {
        push_schema(store, tree, *child, &inner, lines);
    }
    for note in node.notes().iter().filter_map(|note| store.note(*note)) {
        lines.push(note_stub(note, &inner));
    }
    lines.push(node_close(node, indent));
}

/// The focused node: immediate children collapsed, filed notes as stubs.
pub fn node_detail(store: &Store, node: NodeRef, indent: &str) -> String {
    let tree = store.tree(node.kind);
    let current = tree.node(node.node);
    let inner = format!("{}{}", indent, TAB);

    let mut lines = vec![node_open(current, indent, false)];
    for child in current.children() {
        lines.push(node_open(tree.node(*child), &inner, true));
    }
    for note in current.notes().iter().filter_map(|note| store.note(*note)) {
        lines.push(note_stub(note, &inner));
    }
    lines.push(node_close(current, indent));
    lines.join("\n")
}

fn reference_lines(label: &str, diff: ReferenceDiff<String>, indent: &str) -> Vec<String> {
    match diff {
        ReferenceDiff::Unchanged(refs) => {
            vec![format!("{}{}{}s: [{}]", indent, TAB, label, refs.join(", "))]
        }
        ReferenceDiff::Changed {
            removed,
            added,
            kept,
        } => {
            let mut lines = Vec::with_capacity(removed.len() + added.len() + kept.len());
            lines.extend(removed.iter().map(|r| format!("{}{}- {}: {}", indent, TAB, label, r)));
            lines.extend(added.iter().map(|r| format!("{}{}+ {}: {}", indent, TAB, label, r)));
            lines.extend(kept.iter().map(|r| format!("{}{}  {}: {}", indent, TAB, label, r)));
            lines
        }
    }
}

fn note_label(store: &Store, id: NoteId) -> String {
    store.note_path(id).unwrap_or_else(|| id.to_string())
}

/// Full note: header, name change, reference comparison, numbered content.
/// With `show_note_refs` the note-to-note comparison is included as well.
pub fn note_block(store: &Store, note: &Note, indent: &str, show_note_refs: bool) -> String {
    let marker = note.status().marker();
    let mut lines = vec![format!(
        "{}{} <note id=\"{}\" name=\"{}\">",
        indent,
        marker,
        note.id(),
        note.name()
    )];

    if note.status() == Status::Modified && note.name_changed() {
        lines.push(format!("{}{}- name: {}", indent, TAB, note.original_name()));
        lines.push(format!("{}{}+ name: {}", indent, TAB, note.name()));
    }

    let paths = |refs: &[NodeRef]| -> Vec<String> { refs.iter().map(|n| store.node_path(*n)).collect() };
    lines.extend(reference_lines(
        "ref",
        compare_references(&paths(note.original_node_refs()), &paths(note.node_refs())),
        indent,
    ));
    if show_note_refs {
        let labels = |refs: &[NoteId]| -> Vec<String> { refs.iter().map(|id| note_label(store, *id)).collect() };
        lines.extend(reference_lines(
            "note_ref",
            compare_references(&labels(note.original_note_refs()), &labels(note.note_refs())),
            indent,
        ));
    }

    let mut number = 0usize;
    for span in note.content() {
        for line in span.lines() {
            number += 1;
            lines.push(format!(
                "{}{}{}: {} {}",
                indent,
                TAB,
                number,
                span.status.prefix(),
                line
            ));
        }
    }

    lines.push(format!("{}{} </note>", indent, marker));
    lines.join("\n")
}
