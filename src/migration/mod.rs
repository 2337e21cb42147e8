pub mod legacy;

use crate::config::{
    is_older_schema_version, read_config_version, InstallPaths, CONFIG_FILE_NAME,
    CONFIG_SCHEMA_VERSION,
};
use crate::shared::fs_atomic::{atomic_write_file, move_file};
use legacy::{has_legacy_layout, legacy_areas, legacy_candidates, LegacyCandidate};
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    NotNeeded,
    Needed,
    InProgress,
    Done,
}

impl MigrationState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotNeeded => "not_needed",
            Self::Needed => "needed",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for MigrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one migration attempt. Every legacy file lands in exactly one
/// list; legacy locations that do not exist produce no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub migrated_files: Vec<String>,
    /// Legacy files whose destination already existed.
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl MigrationResult {
    pub fn is_empty(&self) -> bool {
        self.migrated_files.is_empty() && self.skipped.is_empty() && self.errors.is_empty()
    }
}

fn config_version_is_stale(paths: &InstallPaths) -> bool {
    match read_config_version(paths) {
        Ok(Some(None)) => true,
        Ok(Some(Some(version))) => is_older_schema_version(&version),
        Ok(None) | Err(_) => false,
    }
}

/// Read-only check for anything the current layout does not expect: a
/// legacy directory, or a config whose `version` is missing or older than
/// [`CONFIG_SCHEMA_VERSION`].
pub fn needs_migration(paths: &InstallPaths) -> bool {
    has_legacy_layout(paths) || config_version_is_stale(paths)
}

pub fn migration_state(paths: &InstallPaths) -> MigrationState {
    if needs_migration(paths) {
        MigrationState::Needed
    } else {
        MigrationState::NotNeeded
    }
}

/// Tracks one migration run through its states.
#[derive(Debug)]
pub struct Migration<'a> {
    paths: &'a InstallPaths,
    state: MigrationState,
}

impl<'a> Migration<'a> {
    pub fn new(paths: &'a InstallPaths) -> Self {
        Self {
            paths,
            state: migration_state(paths),
        }
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    /// Performs the migration if the layout still needs one. The check is
    /// repeated here, so a run that is no longer needed mutates nothing.
    pub fn run(&mut self) -> MigrationResult {
        if !needs_migration(self.paths) {
            self.state = MigrationState::NotNeeded;
            return MigrationResult::default();
        }
        self.state = MigrationState::InProgress;

        let mut result = MigrationResult::default();
        let (candidates, scan_errors) = legacy_candidates(self.paths);
        result.errors.extend(scan_errors);
        for candidate in &candidates {
            migrate_candidate(candidate, &mut result);
        }
        upgrade_config_version(self.paths, &mut result);

        for (legacy, _) in legacy_areas(self.paths) {
            legacy::prune_empty_dirs(&legacy);
        }
        if let Some(parent) = self.paths.legacy_prompts_dir().parent() {
            let _ = fs::remove_dir(parent);
        }

        self.state = MigrationState::Done;
        result
    }
}

pub fn migrate(paths: &InstallPaths) -> MigrationResult {
    Migration::new(paths).run()
}

fn migrate_candidate(candidate: &LegacyCandidate, result: &mut MigrationResult) {
    let LegacyCandidate {
        source,
        destination,
        label,
    } = candidate;

    if destination.exists() {
        if !destination.is_file() {
            result.errors.push(format!(
                "{label}: destination {} exists and is not a file",
                destination.display()
            ));
            return;
        }
        match fs::remove_file(source) {
            Ok(()) => result.skipped.push(label.clone()),
            Err(err) => result
                .errors
                .push(format!("{label}: already migrated but failed to remove source: {err}")),
        }
        return;
    }

    match move_file(source, destination) {
        Ok(()) => result.migrated_files.push(label.clone()),
        Err(err) => result.errors.push(format!(
            "{label}: failed to move to {}: {err}",
            destination.display()
        )),
    }
}

/// Stamps a stale canonical config with the current schema version and
/// leaves every other field as it was.
fn upgrade_config_version(paths: &InstallPaths, result: &mut MigrationResult) {
    let found = match read_config_version(paths) {
        Ok(Some(None)) => None,
        Ok(Some(Some(version))) if is_older_schema_version(&version) => Some(version),
        Ok(_) => return,
        Err(err) => {
            result.errors.push(format!("{CONFIG_FILE_NAME}: {err}"));
            return;
        }
    };

    let path = paths.config_file();
    let rewritten = fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).map_err(|e| e.to_string()))
        .and_then(|mut value| {
            let object = value
                .as_object_mut()
                .ok_or_else(|| "config is not a JSON object".to_string())?;
            object.insert(
                "version".to_string(),
                serde_json::Value::String(CONFIG_SCHEMA_VERSION.to_string()),
            );
            serde_json::to_string_pretty(&value).map_err(|e| e.to_string())
        })
        .and_then(|mut body| {
            body.push('\n');
            atomic_write_file(&path, body.as_bytes()).map_err(|e| e.to_string())
        });

    match rewritten {
        Ok(()) => result.migrated_files.push(format!(
            "{CONFIG_FILE_NAME} (version {} -> {CONFIG_SCHEMA_VERSION})",
            found.as_deref().unwrap_or("none")
        )),
        Err(err) => result
            .errors
            .push(format!("{CONFIG_FILE_NAME}: failed to update version: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn fresh_home_needs_nothing() {
        let temp = tempdir().expect("tempdir");
        let paths = InstallPaths::with_default_install_dir(temp.path());
        assert!(!needs_migration(&paths));
        assert_eq!(migration_state(&paths), MigrationState::NotNeeded);
        assert!(migrate(&paths).is_empty());
        assert!(!paths.root().exists());
    }

    #[test]
    fn run_walks_states_to_done() {
        let temp = tempdir().expect("tempdir");
        let paths = InstallPaths::with_default_install_dir(temp.path());
        fs::create_dir_all(paths.legacy_root()).expect("mkdir");
        fs::write(paths.legacy_root().join("config.toml"), "lang = 'en'").expect("write");

        let mut migration = Migration::new(&paths);
        assert_eq!(migration.state(), MigrationState::Needed);
        let result = migration.run();
        assert_eq!(migration.state(), MigrationState::Done);
        assert_eq!(result.migrated_files, vec!["~/.ccg/config.toml"]);
        assert!(paths.root().join("config.toml").is_file());
        assert!(!paths.legacy_root().exists());
    }

    #[test]
    fn existing_destination_wins_and_source_is_removed() {
        let temp = tempdir().expect("tempdir");
        let paths = InstallPaths::with_default_install_dir(temp.path());
        fs::create_dir_all(paths.legacy_root()).expect("mkdir");
        fs::create_dir_all(paths.root()).expect("mkdir");
        fs::write(paths.legacy_root().join("notes.md"), "old").expect("write");
        fs::write(paths.root().join("notes.md"), "new").expect("write");

        let result = migrate(&paths);
        assert_eq!(result.skipped, vec!["~/.ccg/notes.md"]);
        assert!(result.migrated_files.is_empty());
        assert_eq!(
            fs::read_to_string(paths.root().join("notes.md")).expect("read"),
            "new"
        );
        assert!(!paths.legacy_root().exists());
    }

    #[test]
    fn stale_config_version_is_rewritten_in_place() {
        let temp = tempdir().expect("tempdir");
        let paths = InstallPaths::with_default_install_dir(temp.path());
        fs::create_dir_all(paths.root()).expect("mkdir");
        fs::write(
            paths.config_file(),
            json!({"version": "1.2.0", "language": "en"}).to_string(),
        )
        .expect("write");

        assert!(needs_migration(&paths));
        let result = migrate(&paths);
        assert_eq!(
            result.migrated_files,
            vec![format!("config.json (version 1.2.0 -> {CONFIG_SCHEMA_VERSION})")]
        );
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(paths.config_file()).expect("read"))
                .expect("json");
        assert_eq!(value["version"], CONFIG_SCHEMA_VERSION);
        assert_eq!(value["language"], "en");
        assert!(!needs_migration(&paths));
    }

    #[test]
    fn config_without_version_counts_as_stale() {
        let temp = tempdir().expect("tempdir");
        let paths = InstallPaths::with_default_install_dir(temp.path());
        fs::create_dir_all(paths.root()).expect("mkdir");
        fs::write(paths.config_file(), "{}").expect("write");
        assert!(needs_migration(&paths));

        fs::write(paths.config_file(), "not json").expect("write");
        assert!(!needs_migration(&paths));
    }
}
