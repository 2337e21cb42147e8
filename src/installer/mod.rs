pub mod binary;
pub mod catalog;
pub mod mcp;
pub mod workflows;

pub use mcp::{install_ace_tool, install_auggie, AceToolOptions, McpInstallResult};
pub use workflows::{install_workflows, InstallOptions, InstallResult};
