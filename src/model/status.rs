//! Versioning status for nodes, notes and content spans.

use serde::{Deserialize, Serialize};

/// Lifecycle of a node or note relative to the session baseline.
///
/// `Staged` entities were loaded unchanged. `Added` entities were created this
/// session and stay `Added` whatever happens to them. `Modified` is reached
/// from `Staged` on the first mutation and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Staged,
    Added,
    Modified,
}

impl Status {
    /// Record a mutation. Returns true only on the `Staged -> Modified` step.
    pub fn touch(&mut self) -> bool {
        if *self == Status::Staged {
            *self = Status::Modified;
            true
        } else {
            false
        }
    }

    /// Single-character marker used in rendered views.
    pub fn marker(self) -> &'static str {
        match self {
            Status::Staged => " ",
            Status::Added => "+",
            Status::Modified => "~",
        }
    }

    pub fn is_changed(self) -> bool {
        self != Status::Staged
    }
}

/// Provenance of a content span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    /// Present in the baseline and unchanged.
    Staged,
    /// Introduced this session.
    Added,
    /// Removed this session; only produced when deletion tracking is on.
    Deleted,
}

impl ContentStatus {
    /// Line prefix used when rendering content.
    pub fn prefix(self) -> &'static str {
        match self {
            ContentStatus::Staged => " ",
            ContentStatus::Added => "+",
            ContentStatus::Deleted => "-",
        }
    }
}
