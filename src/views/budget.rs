//! Budget allocation and truncation. All lengths are in bytes.

/// Split what is left after `header` between the schema (a `priority` share,
/// rounded down) and the current node detail (the rest).
pub fn split_explorer_budget(total: usize, header: usize, priority: f64) -> (usize, usize) {
    let available = total.saturating_sub(header);
    let schema = ((available as f64) * priority.clamp(0.0, 1.0)).floor() as usize;
    let schema = schema.min(available);
    (schema, available - schema)
}

/// `content` when it fits `budget`, otherwise `marker` in its place. A section
/// is never cut part way.
pub fn fit_section<'a>(content: &'a str, budget: usize, marker: &'a str) -> &'a str {
    if content.len() > budget {
        marker
    } else {
        content
    }
}

/// Join rendered blocks with newlines, in order, while the joined text stays
/// within `max_length`. The first block that would overflow is replaced by
/// `marker` and nothing after it is rendered.
pub fn fit_blocks<I>(blocks: I, max_length: usize, marker: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut accepted: Vec<String> = Vec::new();
    let mut joined_len = 0usize;
    for block in blocks {
        let separator = usize::from(!accepted.is_empty());
        let candidate = joined_len + separator + block.len();
        if candidate > max_length {
            accepted.push(marker.to_string());
            break;
        }
        joined_len = candidate;
        accepted.push(block);
    }
    accepted.join("\n")
}
