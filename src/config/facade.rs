//! Config loader facade: builds a validated `WordcastConfig` from the layered
//! sources.

use super::merge::merge_policy;
use super::sources::{environment, global_file, local_file};
use super::WordcastConfig;
use crate::error::ApiError;
use std::path::Path;
use tracing::debug;

/// Loads configuration once at startup
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, `config/wordcast.toml` under
    /// `base_dir`, and `WORDCAST_*` environment variables.
    pub fn load(base_dir: &Path) -> Result<WordcastConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = local_file::add_to_builder(builder, base_dir)?;
        let builder = environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Load from defaults, `path`, and `WORDCAST_*` environment variables.
    ///
    /// The global and local files are skipped when a file is named explicitly.
    pub fn load_from_file(path: &Path) -> Result<WordcastConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = local_file::add_required(builder, path)?;
        let builder = environment::add_to_builder(builder);
        debug!(config_path = %path.display(), "Loading configuration file");
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<WordcastConfig, ApiError> {
        let config: WordcastConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
