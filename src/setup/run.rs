use super::env::InstallEnv;
use super::intent::InstallIntent;
use super::path_config::{
    ensure_path_configured, export_command, windows_path_instructions, PathConfigResult,
    PathConfigStatus,
};
use crate::config::{create_default_config, ensure_root_dir, write_config, ConfigError, McpProvider};
use crate::installer::mcp::{install_ace_tool, install_auggie, AceToolOptions, McpInstallResult};
use crate::installer::workflows::{install_workflows, InstallOptions, InstallResult};
use crate::migration::{migrate, needs_migration, MigrationResult};
use crate::shared::logging::{append_install_log, LogLevel};
use std::path::{Path, PathBuf};

/// Failures that stop a run before anything useful could be installed.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to prepare config root: {source}")]
    RootDir {
        #[source]
        source: ConfigError,
    },
    #[error("failed to persist config: {source}")]
    Config {
        #[source]
        source: ConfigError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpStep {
    NotRequested,
    /// A provider was chosen but no credential was supplied.
    MissingToken { provider: McpProvider },
    Installed(McpInstallResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// No companion binary was placed, so there is nothing to put on PATH.
    NotNeeded,
    Attempted(PathConfigResult),
    Manual { rc_file: PathBuf, command: String },
    Unsupported { instructions: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub migration: Option<MigrationResult>,
    pub config_path: PathBuf,
    pub install: InstallResult,
    pub mcp: McpStep,
    pub path: PathStep,
}

impl InstallReport {
    /// True when some step finished only partially. The run itself still
    /// counts as successful.
    pub fn has_warnings(&self) -> bool {
        let migration_errors = self
            .migration
            .as_ref()
            .is_some_and(|m| !m.errors.is_empty());
        let mcp_failed = matches!(&self.mcp, McpStep::Installed(r) if !r.success)
            || matches!(self.mcp, McpStep::MissingToken { .. });
        let path_failed = matches!(
            &self.path,
            PathStep::Attempted(r) if r.status == PathConfigStatus::Failed
        );
        migration_errors
            || !self.install.errors.is_empty()
            || self.install.bin_error.is_some()
            || mcp_failed
            || path_failed
    }
}

/// Runs one install end to end: migrate, persist config, install
/// workflows, then the optional MCP and PATH steps. Earlier steps are never
/// undone when a later one fails.
pub fn run_install(env: &InstallEnv, intent: &InstallIntent) -> Result<InstallReport, SetupError> {
    let paths = &env.paths;
    let log = paths.install_log_path();

    let migration = if needs_migration(paths) {
        let result = migrate(paths);
        Some(result)
    } else {
        None
    };

    ensure_root_dir(paths)
        .map_err(|source| log_failure(&log, SetupError::RootDir { source }))?;
    if let Some(result) = &migration {
        let level = if result.errors.is_empty() {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        append_install_log(
            &log,
            level,
            "migration.completed",
            &format!(
                "migrated={} skipped={} errors={}",
                result.migrated_files.len(),
                result.skipped.len(),
                result.errors.len()
            ),
        );
    }

    let config = create_default_config(intent.config_overrides());
    let config_path = write_config(paths, &config)
        .map_err(|source| log_failure(&log, SetupError::Config { source }))?;
    append_install_log(
        &log,
        LogLevel::Info,
        "config.written",
        &config_path.display().to_string(),
    );

    let install = install_workflows(
        env,
        &intent.workflows,
        intent.force,
        InstallOptions {
            routing: &config.routing,
        },
    );
    append_install_log(
        &log,
        if install.errors.is_empty() {
            LogLevel::Info
        } else {
            LogLevel::Warn
        },
        "workflows.installed",
        &format!(
            "commands={} prompts={} errors={} bin_installed={}",
            install.installed_commands.len(),
            install.installed_prompts.len(),
            install.errors.len(),
            install.bin_installed
        ),
    );

    let mcp = run_mcp_step(env, intent);
    match &mcp {
        McpStep::Installed(result) if result.success => {
            append_install_log(&log, LogLevel::Info, "mcp.installed", intent.mcp.provider.as_str())
        }
        McpStep::Installed(result) => append_install_log(
            &log,
            LogLevel::Warn,
            "mcp.failed",
            result.message.as_deref().unwrap_or("unknown failure"),
        ),
        McpStep::MissingToken { provider } => append_install_log(
            &log,
            LogLevel::Warn,
            "mcp.skipped",
            &format!("{provider} selected without a token"),
        ),
        McpStep::NotRequested => {}
    }

    let path = match install.bin_path.as_deref() {
        Some(bin_path) if install.bin_installed => run_path_step(env, intent, bin_path),
        _ => PathStep::NotNeeded,
    };
    if let PathStep::Attempted(result) = &path {
        append_install_log(
            &log,
            if result.status == PathConfigStatus::Failed {
                LogLevel::Warn
            } else {
                LogLevel::Info
            },
            &format!("path.{}", result.status.as_str().replace('-', "_")),
            &result.rc_file.display().to_string(),
        );
    }

    let report = InstallReport {
        migration,
        config_path,
        install,
        mcp,
        path,
    };
    append_install_log(
        &log,
        if report.has_warnings() {
            LogLevel::Warn
        } else {
            LogLevel::Info
        },
        "install.completed",
        &format!("warnings={}", report.has_warnings()),
    );
    Ok(report)
}

fn log_failure(log: &Path, err: SetupError) -> SetupError {
    append_install_log(log, LogLevel::Error, "install.failed", &err.to_string());
    err
}

fn run_mcp_step(env: &InstallEnv, intent: &InstallIntent) -> McpStep {
    let mcp = &intent.mcp;
    match mcp.provider {
        McpProvider::Skip => McpStep::NotRequested,
        provider if !mcp.has_token() => McpStep::MissingToken { provider },
        McpProvider::AceTool => McpStep::Installed(install_ace_tool(
            env,
            &AceToolOptions {
                base_url: mcp.base_url.clone(),
                token: mcp.token.clone(),
            },
        )),
        McpProvider::Auggie => McpStep::Installed(install_auggie(env, &mcp.token)),
    }
}

fn run_path_step(env: &InstallEnv, intent: &InstallIntent, bin_path: &Path) -> PathStep {
    if !env.platform.supports_rc_editing() {
        return PathStep::Unsupported {
            instructions: windows_path_instructions(bin_path),
        };
    }
    if intent.configure_path {
        PathStep::Attempted(ensure_path_configured(env, bin_path))
    } else {
        PathStep::Manual {
            rc_file: env.shell_rc_path(),
            command: export_command(bin_path),
        }
    }
}
