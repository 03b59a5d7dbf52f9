//! Explorer view: current path, full schema and current node detail.

use super::budget::{fit_section, split_explorer_budget};
use super::markup::{node_detail, node_schema};
use crate::interface::Explorer;
use crate::store::Store;
use crate::types::TAB;

/// Render the explorer within `max_length`. The schema section gets
/// `schema_priority` of the space left after the header; each section is
/// swapped for a truncation marker if it does not fit its share.
pub fn render_explorer(
    store: &Store,
    explorer: &Explorer,
    max_length: usize,
    schema_priority: f64,
    indent: &str,
) -> String {
    let inner = format!("{}{}", indent, TAB);
    let header = format!(
        "{}<current_path>{}</current_path>\n",
        indent,
        explorer.current_path(store)
    );
    let (schema_budget, detail_budget) =
        split_explorer_budget(max_length, header.len(), schema_priority);

    let tree = store.tree(explorer.kind());
    let schema = node_schema(store, tree, tree.root_id(), &inner);
    let schema_marker = format!("{}<schema truncated=\"true\">...</schema>", inner);
    let detail = node_detail(store, explorer.current(), &inner);
    let detail_marker = format!("{}<current_node truncated=\"true\">...</current_node>", inner);

    let mut out = header;
    out.push_str(&format!(
        "{indent}<schema>\n{}\n{indent}</schema>\n",
        fit_section(&schema, schema_budget, &schema_marker),
        indent = indent
    ));
    out.push_str(&format!(
        "{indent}<current_node>\n{}\n{indent}</current_node>\n",
        fit_section(&detail, detail_budget, &detail_marker),
        indent = indent
    ));
    out
}
