//! Entry points for loading configuration.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::DendriteConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then the workspace files, then the
    /// environment.
    pub fn load(workspace_root: &Path) -> Result<DendriteConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        let config: DendriteConfig = builder.build()?.try_deserialize()?;
        debug!(workspace_root = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Defaults overlaid with exactly one file.
    pub fn load_from_file(path: &Path) -> Result<DendriteConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn default() -> DendriteConfig {
        DendriteConfig::default()
    }
}
