pub mod env;
pub mod intent;
pub mod path_config;
pub mod run;

pub use env::{EnvError, InstallEnv, OsKind, Platform, ShellKind};
pub use intent::{InstallIntent, McpIntent};
pub use path_config::{ensure_path_configured, PathConfigResult, PathConfigStatus};
pub use run::{run_install, InstallReport, McpStep, PathStep, SetupError};
