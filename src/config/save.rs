use super::{Config, ConfigError, InstallPaths};
use crate::shared::fs_atomic::atomic_write_file;
use std::fs;
use std::path::PathBuf;

/// Creates the config root and its fixed subdirectories. Safe to call on
/// every run.
pub fn ensure_root_dir(paths: &InstallPaths) -> Result<PathBuf, ConfigError> {
    for dir in paths.required_directories() {
        fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
    }
    Ok(paths.root())
}

/// Replaces the config file with `config`. The previous file stays intact
/// until the new one is fully on disk.
pub fn write_config(paths: &InstallPaths, config: &Config) -> Result<PathBuf, ConfigError> {
    config.validate()?;

    let path = paths.config_file();
    let mut body = serde_json::to_vec_pretty(config).map_err(|source| ConfigError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    body.push(b'\n');
    atomic_write_file(&path, &body).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}
