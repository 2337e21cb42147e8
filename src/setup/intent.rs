use crate::config::{ConfigOverrides, McpProvider, ModelRouting, SupportedLang};
use crate::installer::catalog;
use crate::shared::ids::WorkflowId;

/// MCP integration the user picked, with whatever credentials they supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McpIntent {
    pub provider: McpProvider,
    pub base_url: String,
    pub token: String,
}

impl McpIntent {
    pub fn skip() -> Self {
        Self {
            provider: McpProvider::Skip,
            ..Self::default()
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

/// Fully resolved install request. The orchestrator takes nothing else: no
/// prompting, no environment lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallIntent {
    pub language: SupportedLang,
    pub routing: ModelRouting,
    pub workflows: Vec<WorkflowId>,
    pub mcp: McpIntent,
    pub force: bool,
    /// Append the companion bin dir to the shell rc instead of only printing
    /// the export line.
    pub configure_path: bool,
}

impl Default for InstallIntent {
    fn default() -> Self {
        Self {
            language: SupportedLang::ZhCn,
            routing: ModelRouting::default(),
            workflows: catalog::all_workflow_ids(),
            mcp: McpIntent::default(),
            force: false,
            configure_path: false,
        }
    }
}

impl InstallIntent {
    /// Ids outside the catalog are left out of the persisted config; the
    /// workflow installer reports them as errors instead.
    pub fn config_overrides(&self) -> ConfigOverrides {
        let known = self
            .workflows
            .iter()
            .filter(|id| catalog::find(id.as_str()).is_some())
            .cloned()
            .collect();
        ConfigOverrides {
            language: Some(self.language),
            routing: Some(self.routing.clone()),
            installed_workflows: Some(known),
            mcp_provider: Some(self.mcp.provider),
        }
    }
}
