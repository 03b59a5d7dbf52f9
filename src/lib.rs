//! Dendrite: Versioned Hierarchical Content Store
//!
//! Three independent trees of category nodes (conceptual, concrete, temporal)
//! hold shared notes. Mutations are tracked against the baseline loaded at
//! session start, and the state renders into byte-bounded tagged text.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod interface;
pub mod link;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod tree;
pub mod types;
pub mod views;

pub use error::{ApiError, StoreError};
pub use interface::{ContentUpdate, Interface, NoteEdit};
pub use link::{EntityKind, LinkPolicy};
pub use session::Session;
pub use store::{DirectoryStore, RecordStore, Store, StoreRecords};
pub use types::{DatabaseKind, NodeId, NodeRef, NoteId};
pub use views::ViewMode;
