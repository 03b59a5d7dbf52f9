//! Integration tests for the dendrite content store

mod cross_reference;
mod persistence_roundtrip;
mod rendering_budget;
mod session_workflow;
pub mod test_utils;
