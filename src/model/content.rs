//! Content spans: runs of lines sharing one provenance tag.

use super::status::ContentStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    pub status: ContentStatus,
}

impl Content {
    pub fn new(text: impl Into<String>, status: ContentStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }

    pub fn staged(text: impl Into<String>) -> Self {
        Self::new(text, ContentStatus::Staged)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(text, ContentStatus::Added)
    }

    pub fn deleted(text: impl Into<String>) -> Self {
        Self::new(text, ContentStatus::Deleted)
    }

    /// Whitespace-only spans act as merge boundaries.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn is_deleted(&self) -> bool {
        self.status == ContentStatus::Deleted
    }

    pub fn lines(&self) -> std::str::Split<'_, char> {
        self.text.split('\n')
    }
}

/// Logical text of a span sequence: every non-deleted span, newline-joined.
pub fn logical_text(content: &[Content]) -> String {
    content
        .iter()
        .filter(|span| !span.is_deleted())
        .map(|span| span.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
