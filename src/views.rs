//! Budget-Constrained Views
//!
//! Pure renderers from store state to tagged text. Output is bounded by a
//! byte budget; a section that does not fit is replaced wholesale by a
//! truncation marker. Identical inputs give identical output.

pub mod budget;
pub mod explorer;
pub mod interface;
pub mod markup;
pub mod working_set;

pub use budget::{fit_blocks, fit_section, split_explorer_budget};
pub use explorer::render_explorer;
pub use interface::{render_interface, ViewMode};
pub use markup::{node_detail, node_schema, note_block, note_stub};
pub use working_set::{render_notifications, render_working_set};
