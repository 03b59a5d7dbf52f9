//! Core identifiers and database kinds shared across the store.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Indentation unit used by every rendered view.
pub const TAB: &str = "  ";

/// Default total budget for a rendered interface, in bytes.
pub const DEFAULT_MAX_INTERFACE_LENGTH: usize = 20_000;

/// Default share of the explorer budget given to the schema section.
pub const DEFAULT_SCHEMA_PRIORITY: f64 = 0.7;

/// The named top-level trees of a deployment. Each kind owns exactly one root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Conceptual,
    Concrete,
    Temporal,
}

impl DatabaseKind {
    /// All known kinds, in load order.
    pub const ALL: [DatabaseKind; 3] = [
        DatabaseKind::Conceptual,
        DatabaseKind::Concrete,
        DatabaseKind::Temporal,
    ];

    /// Path token of this kind; also the name of its root node.
    pub fn token(self) -> &'static str {
        match self {
            DatabaseKind::Conceptual => "conceptual",
            DatabaseKind::Concrete => "concrete",
            DatabaseKind::Temporal => "temporal",
        }
    }

    /// Position of this kind in [`DatabaseKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            DatabaseKind::Conceptual => 0,
            DatabaseKind::Concrete => 1,
            DatabaseKind::Temporal => 2,
        }
    }

    /// Look up a kind by its exact path token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }

    pub(crate) fn known_tokens() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DatabaseKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            StoreError::invalid_path(
                s,
                format!("unknown database kind, expected one of: {}", Self::known_tokens()),
            )
        })
    }
}

/// Store-wide note identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(NoteId)
    }
}

/// Index of a node inside its tree's arena. Only meaningful together with the
/// tree it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node addressed across trees: the kind selects the tree, the id the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    pub kind: DatabaseKind,
    pub node: NodeId,
}

impl NodeRef {
    pub fn new(kind: DatabaseKind, node: NodeId) -> Self {
        Self { kind, node }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tokens_round_trip() {
        for kind in DatabaseKind::ALL {
            assert_eq!(DatabaseKind::from_token(kind.token()), Some(kind));
            assert_eq!(kind.token().parse::<DatabaseKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_index_matches_all() {
        for (position, kind) in DatabaseKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
    }

    #[test]
    fn test_kind_tokens_are_case_sensitive() {
        assert!(DatabaseKind::from_token("Concrete").is_none());
        assert!("CONCRETE".parse::<DatabaseKind>().is_err());
    }

    #[test]
    fn test_note_id_parse() {
        assert_eq!("42".parse::<NoteId>().unwrap(), NoteId(42));
        assert!("-1".parse::<NoteId>().is_err());
        assert!("mother".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&DatabaseKind::Temporal).unwrap();
        assert_eq!(json, "\"temporal\"");
    }
}
