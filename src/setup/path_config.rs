use super::env::InstallEnv;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Any rc line containing this is treated as an existing PATH entry for the
/// companion binary, whichever install dir it was written for.
pub const PATH_SENTINEL: &str = "/.claude/bin";
pub const PATH_BLOCK_MARKER: &str = "# CCG multi-model collaboration system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathConfigStatus {
    AlreadyConfigured,
    Configured,
    Failed,
}

impl PathConfigStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyConfigured => "already-configured",
            Self::Configured => "configured",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PathConfigStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathConfigResult {
    pub status: PathConfigStatus,
    pub rc_file: PathBuf,
    /// What to run by hand if the rc file could not be updated.
    pub manual_command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn export_command(bin_path: &Path) -> String {
    format!("export PATH=\"{}:$PATH\"", bin_path.display())
}

fn path_block(bin_path: &Path) -> String {
    format!("\n{PATH_BLOCK_MARKER}\n{}\n", export_command(bin_path))
}

pub fn rc_references_bin(content: &str, bin_path: &Path) -> bool {
    content.contains(&bin_path.display().to_string()) || content.contains(PATH_SENTINEL)
}

/// Makes sure the user's shell rc puts `bin_path` on PATH. The rc file is
/// only ever appended to, and only when it does not already reference the
/// binary directory.
pub fn ensure_path_configured(env: &InstallEnv, bin_path: &Path) -> PathConfigResult {
    let rc_file = env.shell_rc_path();
    let manual_command = export_command(bin_path);
    let finish = |status: PathConfigStatus, error: Option<String>| PathConfigResult {
        status,
        rc_file: rc_file.clone(),
        manual_command: manual_command.clone(),
        error,
    };

    // Scanned lossily: non-UTF-8 bytes never match the bin path anyway.
    let content = if rc_file.exists() {
        match fs::read(&rc_file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                return finish(
                    PathConfigStatus::Failed,
                    Some(format!("failed to read {}: {err}", rc_file.display())),
                )
            }
        }
    } else {
        String::new()
    };

    if rc_references_bin(&content, bin_path) {
        return finish(PathConfigStatus::AlreadyConfigured, None);
    }

    let appended = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&rc_file)
        .and_then(|mut file| {
            file.write_all(path_block(bin_path).as_bytes())?;
            file.sync_all()
        });
    match appended {
        Ok(()) => finish(PathConfigStatus::Configured, None),
        Err(err) => finish(
            PathConfigStatus::Failed,
            Some(format!("failed to update {}: {err}", rc_file.display())),
        ),
    }
}

/// PowerShell snippet that appends `bin_path` to the user PATH on Windows.
pub fn windows_path_instructions(bin_path: &Path) -> String {
    let windows_path = bin_path.display().to_string().replace('/', "\\");
    [
        "$currentPath = [System.Environment]::GetEnvironmentVariable('PATH', 'User')".to_string(),
        format!("$newPath = '{windows_path}'"),
        "if ($currentPath -notlike \"*$newPath*\") {".to_string(),
        "    [System.Environment]::SetEnvironmentVariable('PATH', \"$currentPath;$newPath\", 'User')"
            .to_string(),
        "}".to_string(),
    ]
    .join("\n")
}
