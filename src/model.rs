//! Entity Model
//!
//! Nodes, notes and content spans, plus the status state machine that tracks
//! how each entity differs from the baseline loaded at session start.

pub mod content;
pub mod node;
pub mod note;
pub mod status;

pub use content::Content;
pub use node::Node;
pub use note::{compare_references, Note, ReferenceDiff};
pub use status::{ContentStatus, Status};
