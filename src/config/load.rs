use super::{Config, ConfigError, InstallPaths};
use std::fs;

pub fn read_config(paths: &InstallPaths) -> Result<Config, ConfigError> {
    Config::from_path(&paths.config_file())
}

/// Reads only the `version` marker of the config file.
///
/// `Ok(None)` when there is no config object to inspect (file absent, not
/// JSON, or not an object). `Ok(Some(None))` when the object has no string
/// `version`.
pub fn read_config_version(paths: &InstallPaths) -> Result<Option<Option<String>>, ConfigError> {
    let path = paths.config_file();
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return Ok(None);
    };
    let Some(object) = value.as_object() else {
        return Ok(None);
    };
    Ok(Some(
        object
            .get("version")
            .and_then(|v| v.as_str())
            .map(str::to_string),
    ))
}
