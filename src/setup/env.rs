use crate::config::{default_install_dir, InstallPaths};
use std::path::{Path, PathBuf};

pub const PACKAGE_ROOT_ENV: &str = "CCG_PACKAGE_ROOT";

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("failed to resolve home directory; set HOME")]
    HomeDirectoryUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Linux,
    MacOs,
    Windows,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: OsKind,
    pub arch: String,
}

impl Platform {
    pub fn new(os: OsKind, arch: impl Into<String>) -> Self {
        Self {
            os,
            arch: arch.into(),
        }
    }

    pub fn current() -> Self {
        let os = match std::env::consts::OS {
            "linux" => OsKind::Linux,
            "macos" => OsKind::MacOs,
            "windows" => OsKind::Windows,
            _ => OsKind::Other,
        };
        Self::new(os, std::env::consts::ARCH)
    }

    /// Windows keeps PATH in the registry, not in a startup script.
    pub fn supports_rc_editing(&self) -> bool {
        matches!(self.os, OsKind::Linux | OsKind::MacOs)
    }

    pub fn is_windows(&self) -> bool {
        self.os == OsKind::Windows
    }

    /// OS segment used in prebuilt release asset names.
    pub fn release_os(&self) -> Option<&'static str> {
        match self.os {
            OsKind::Linux => Some("linux"),
            OsKind::MacOs => Some("darwin"),
            OsKind::Windows => Some("windows"),
            OsKind::Other => None,
        }
    }

    /// Arch segment used in prebuilt release asset names.
    pub fn release_arch(&self) -> String {
        match self.arch.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => "amd64".to_string(),
            "aarch64" | "arm64" => "arm64".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Zsh,
    Bash,
}

impl ShellKind {
    pub fn from_shell_var(shell: Option<&str>) -> Self {
        match shell {
            Some(value) if value.contains("zsh") => Self::Zsh,
            _ => Self::Bash,
        }
    }

    pub fn rc_file_name(self) -> &'static str {
        match self {
            Self::Zsh => ".zshrc",
            Self::Bash => ".bashrc",
        }
    }

    pub fn rc_display(self) -> &'static str {
        match self {
            Self::Zsh => "~/.zshrc",
            Self::Bash => "~/.bashrc",
        }
    }
}

/// Resolved process context handed to every installer component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallEnv {
    pub paths: InstallPaths,
    /// Directory holding `bin/codeagent-wrapper-<os>-<arch>` release assets.
    pub package_root: PathBuf,
    pub shell: ShellKind,
    pub platform: Platform,
}

impl InstallEnv {
    pub fn new(paths: InstallPaths, package_root: impl Into<PathBuf>) -> Self {
        Self {
            paths,
            package_root: package_root.into(),
            shell: ShellKind::Bash,
            platform: Platform::current(),
        }
    }

    pub fn with_shell(mut self, shell: ShellKind) -> Self {
        self.shell = shell;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn from_process(install_dir: Option<&str>) -> Result<Self, EnvError> {
        let home = home_dir()?;
        let install_dir = install_dir
            .map(|raw| expand_home(raw, &home))
            .unwrap_or_else(|| default_install_dir(&home));
        let package_root = std::env::var_os(PACKAGE_ROOT_ENV)
            .map(PathBuf::from)
            .or_else(executable_package_root)
            .unwrap_or_else(|| PathBuf::from("."));
        let shell = ShellKind::from_shell_var(std::env::var("SHELL").ok().as_deref());

        Ok(Self {
            paths: InstallPaths::new(home, install_dir),
            package_root,
            shell,
            platform: Platform::current(),
        })
    }

    pub fn shell_rc_path(&self) -> PathBuf {
        self.paths.home.join(self.shell.rc_file_name())
    }
}

fn home_dir() -> Result<PathBuf, EnvError> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(EnvError::HomeDirectoryUnavailable)
}

/// `<root>/bin/ccg` -> `<root>`.
fn executable_package_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.parent()?.to_path_buf())
}

pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
    {
        return home.join(rest);
    }
    PathBuf::from(trimmed)
}
