use std::path::{Path, PathBuf};

pub const CLAUDE_DIR: &str = ".claude";
pub const CONFIG_ROOT_DIR: &str = ".ccg";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const COMMANDS_NAMESPACE: &str = "ccg";
pub const EXTERNAL_TOOL_CONFIG_FILE_NAME: &str = ".claude.json";

/// Every on-disk location the installer touches, derived from the user's
/// home and the chosen install directory. Nothing below the CLI resolves
/// paths on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    pub home: PathBuf,
    pub install_dir: PathBuf,
}

impl InstallPaths {
    pub fn new(home: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            install_dir: install_dir.into(),
        }
    }

    pub fn with_default_install_dir(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let install_dir = default_install_dir(&home);
        Self { home, install_dir }
    }

    pub fn root(&self) -> PathBuf {
        self.install_dir.join(CONFIG_ROOT_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root().join(CONFIG_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root().join("logs")
    }

    pub fn install_log_path(&self) -> PathBuf {
        self.logs_dir().join("install.log")
    }

    pub fn required_directories(&self) -> Vec<PathBuf> {
        vec![self.root(), self.logs_dir()]
    }

    pub fn commands_dir(&self) -> PathBuf {
        self.install_dir.join("commands").join(COMMANDS_NAMESPACE)
    }

    pub fn command_path(&self, workflow_id: &str) -> PathBuf {
        self.commands_dir().join(format!("{workflow_id}.md"))
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.root().join("prompts")
    }

    pub fn prompt_path(&self, model: &str, role: &str) -> PathBuf {
        self.prompts_dir().join(model).join(format!("{role}.md"))
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.install_dir.join("bin")
    }

    pub fn external_tool_config_path(&self) -> PathBuf {
        self.home.join(EXTERNAL_TOOL_CONFIG_FILE_NAME)
    }

    /// Pre-1.4 config root, kept directly under the home directory.
    pub fn legacy_root(&self) -> PathBuf {
        self.home.join(CONFIG_ROOT_DIR)
    }

    /// Pre-1.4 prompt directory, kept beside the installed commands.
    pub fn legacy_prompts_dir(&self) -> PathBuf {
        self.install_dir.join("prompts").join(COMMANDS_NAMESPACE)
    }
}

pub fn default_install_dir(home: &Path) -> PathBuf {
    home.join(CLAUDE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_nests_config_root_under_install_dir() {
        let paths = InstallPaths::with_default_install_dir("/home/u");
        assert_eq!(paths.install_dir, PathBuf::from("/home/u/.claude"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/home/u/.claude/.ccg/config.json")
        );
        assert_eq!(
            paths.prompt_path("codex", "reviewer"),
            PathBuf::from("/home/u/.claude/.ccg/prompts/codex/reviewer.md")
        );
        assert_eq!(
            paths.command_path("dev"),
            PathBuf::from("/home/u/.claude/commands/ccg/dev.md")
        );
        assert_eq!(paths.legacy_root(), PathBuf::from("/home/u/.ccg"));
        assert_eq!(
            paths.legacy_prompts_dir(),
            PathBuf::from("/home/u/.claude/prompts/ccg")
        );
    }
}
