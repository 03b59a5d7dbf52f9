//! Property-based tests for the dendrite content store

mod reconcile_laws;
mod resolver_laws;
mod working_set_laws;
