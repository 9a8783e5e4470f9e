//! Local config file source: config/wordcast.toml under the base directory,
//! or an explicit file passed with --config.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};

/// Default location of the local config file under `base_dir`.
pub fn local_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join("wordcast.toml")
}

/// Add config/wordcast.toml under `base_dir` if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = local_config_path(base_dir);
    if path.exists() {
        Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
    } else {
        Ok(builder)
    }
}

/// Add an explicitly requested config file. Missing files are an error.
pub fn add_required(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(
        File::from(path.to_path_buf())
            .format(FileFormat::Toml)
            .required(true),
    ))
}
