use crate::app::command_support::{parse_install_dir_only, resolve_env};
use crate::config::ensure_root_dir;
use crate::migration::{migrate, migration_state, MigrationState};
use crate::shared::logging::{append_install_log, LogLevel};

pub fn cmd_migrate(args: &[String]) -> Result<String, String> {
    let install_dir = parse_install_dir_only(args, "migrate [--install-dir <path>]")?;
    let env = resolve_env(install_dir.as_deref())?;
    let paths = &env.paths;

    let state = migration_state(paths);
    if state == MigrationState::NotNeeded {
        return Ok(format!("migration={state}"));
    }

    let result = migrate(paths);
    if ensure_root_dir(paths).is_ok() {
        append_install_log(
            &paths.install_log_path(),
            if result.errors.is_empty() {
                LogLevel::Info
            } else {
                LogLevel::Warn
            },
            "migration.completed",
            &format!(
                "migrated={} skipped={} errors={}",
                result.migrated_files.len(),
                result.skipped.len(),
                result.errors.len()
            ),
        );
    }

    let mut lines = vec![
        format!("migration={}", MigrationState::Done),
        format!("migrated={}", result.migrated_files.len()),
        format!("skipped={}", result.skipped.len()),
        format!("errors={}", result.errors.len()),
    ];
    lines.extend(result.migrated_files.iter().map(|f| format!("migrated_file={f}")));
    lines.extend(result.skipped.iter().map(|f| format!("skipped_file={f}")));
    lines.extend(result.errors.iter().map(|e| format!("error={e}")));
    Ok(lines.join("\n"))
}
