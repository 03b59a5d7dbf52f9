//! Merge rules: built-in defaults under every other source.

use crate::types::{DEFAULT_MAX_INTERFACE_LENGTH, DEFAULT_SCHEMA_PRIORITY};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// A builder seeded with the defaults every later source overrides.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("render.max_interface_length", DEFAULT_MAX_INTERFACE_LENGTH as i64)?
        .set_default("render.schema_priority", DEFAULT_SCHEMA_PRIORITY)?
        .set_default("render.track_deletions", false)?
        .set_default("links.enabled", true)
}
