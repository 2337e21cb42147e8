use super::ConfigError;
use crate::installer::catalog;
use crate::shared::ids::WorkflowId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Schema version written into every config. Anything older is handled by
/// the migration engine before a new config is persisted.
pub const CONFIG_SCHEMA_VERSION: &str = "1.4.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SupportedLang {
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en")]
    En,
}

impl SupportedLang {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::En => "en",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Ok(Self::ZhCn),
            "en" | "en-us" => Ok(Self::En),
            _ => Err("language must be one of: zh-CN, en".to_string()),
        }
    }
}

impl std::fmt::Display for SupportedLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Codex,
    Gemini,
    Claude,
}

impl ModelType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Codex => "codex",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Codex => "Codex",
            Self::Gemini => "Gemini",
            Self::Claude => "Claude",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "codex" => Ok(Self::Codex),
            "gemini" => Ok(Self::Gemini),
            "claude" => Ok(Self::Claude),
            _ => Err("model must be one of: codex, gemini, claude".to_string()),
        }
    }

    pub fn parse_list(raw: &str) -> Result<Vec<Self>, String> {
        let mut models = Vec::new();
        for part in raw.split(',').filter(|part| !part.trim().is_empty()) {
            let model = Self::parse(part)?;
            if !models.contains(&model) {
                models.push(model);
            }
        }
        if models.is_empty() {
            return Err("model list must be non-empty".to_string());
        }
        Ok(models)
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingStrategy {
    Fallback,
    Parallel,
    RoundRobin,
}

impl RoutingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fallback => "fallback",
            Self::Parallel => "parallel",
            Self::RoundRobin => "round-robin",
        }
    }
}

impl std::fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationMode {
    Parallel,
    #[default]
    Smart,
    Sequential,
}

impl CollaborationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Smart => "smart",
            Self::Sequential => "sequential",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "parallel" => Ok(Self::Parallel),
            "smart" => Ok(Self::Smart),
            "sequential" => Ok(Self::Sequential),
            _ => Err("mode must be one of: parallel, smart, sequential".to_string()),
        }
    }
}

impl std::fmt::Display for CollaborationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum McpProvider {
    #[default]
    #[serde(rename = "ace-tool")]
    AceTool,
    #[serde(rename = "auggie")]
    Auggie,
    #[serde(rename = "skip")]
    Skip,
}

impl McpProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AceTool => "ace-tool",
            Self::Auggie => "auggie",
            Self::Skip => "skip",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ace-tool" | "ace" => Ok(Self::AceTool),
            "auggie" => Ok(Self::Auggie),
            "skip" | "none" => Ok(Self::Skip),
            _ => Err("mcp provider must be one of: ace-tool, auggie, skip".to_string()),
        }
    }
}

impl std::fmt::Display for McpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The routing table sections a prompt can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoutingLane {
    Frontend,
    Backend,
    Review,
}

impl RoutingLane {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Review => "review",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaneRouting {
    pub models: Vec<ModelType>,
    pub primary: ModelType,
    pub strategy: RoutingStrategy,
}

impl LaneRouting {
    pub fn single(model: ModelType) -> Self {
        Self {
            models: vec![model],
            primary: model,
            strategy: RoutingStrategy::Fallback,
        }
    }

    /// Routes to `models`, making the first one primary.
    pub fn from_models(models: Vec<ModelType>) -> Result<Self, String> {
        let primary = *models
            .first()
            .ok_or_else(|| "model list must be non-empty".to_string())?;
        Ok(Self {
            models,
            primary,
            strategy: RoutingStrategy::Fallback,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewRouting {
    pub models: Vec<ModelType>,
    pub strategy: RoutingStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelRouting {
    pub frontend: LaneRouting,
    pub backend: LaneRouting,
    pub review: ReviewRouting,
    #[serde(default)]
    pub mode: CollaborationMode,
}

impl Default for ModelRouting {
    fn default() -> Self {
        Self {
            frontend: LaneRouting::single(ModelType::Gemini),
            backend: LaneRouting::single(ModelType::Codex),
            review: ReviewRouting {
                models: vec![ModelType::Codex, ModelType::Gemini],
                strategy: RoutingStrategy::Parallel,
            },
            mode: CollaborationMode::Smart,
        }
    }
}

impl ModelRouting {
    pub fn lane_models(&self, lane: RoutingLane) -> &[ModelType] {
        match lane {
            RoutingLane::Frontend => &self.frontend.models,
            RoutingLane::Backend => &self.backend.models,
            RoutingLane::Review => &self.review.models,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (lane, routing) in [
            (RoutingLane::Frontend, &self.frontend),
            (RoutingLane::Backend, &self.backend),
        ] {
            if routing.models.is_empty() {
                return Err(format!("routing.{}.models must be non-empty", lane.as_str()));
            }
            if !routing.models.contains(&routing.primary) {
                return Err(format!(
                    "routing.{}.primary `{}` must be listed in routing.{}.models",
                    lane.as_str(),
                    routing.primary,
                    lane.as_str()
                ));
            }
        }
        if self.review.models.is_empty() {
            return Err("routing.review.models must be non-empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub version: String,
    pub language: SupportedLang,
    pub routing: ModelRouting,
    #[serde(default)]
    pub installed_workflows: Vec<WorkflowId>,
    #[serde(default)]
    pub mcp_provider: McpProvider,
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_SCHEMA_VERSION {
            return Err(ConfigError::Invalid(format!(
                "version `{}` does not match supported schema {CONFIG_SCHEMA_VERSION}",
                self.version
            )));
        }
        self.routing.validate().map_err(ConfigError::Invalid)?;
        for id in &self.installed_workflows {
            if catalog::find(id.as_str()).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "installedWorkflows contains unknown workflow `{id}`"
                )));
            }
        }
        Ok(())
    }
}

/// Caller-supplied values layered over the built-in defaults. Keys that are
/// not part of this shape (including `version`) are ignored on parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub language: Option<SupportedLang>,
    pub routing: Option<ModelRouting>,
    pub installed_workflows: Option<Vec<WorkflowId>>,
    pub mcp_provider: Option<McpProvider>,
}

impl ConfigOverrides {
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

pub fn create_default_config(overrides: ConfigOverrides) -> Config {
    Config {
        version: CONFIG_SCHEMA_VERSION.to_string(),
        language: overrides.language.unwrap_or(SupportedLang::ZhCn),
        routing: overrides.routing.unwrap_or_default(),
        installed_workflows: overrides
            .installed_workflows
            .unwrap_or_else(catalog::all_workflow_ids),
        mcp_provider: overrides.mcp_provider.unwrap_or_default(),
    }
}

fn parse_version_numbers(raw: &str) -> Option<Vec<u64>> {
    let trimmed = raw.trim().trim_start_matches('v');
    let core = trimmed
        .split_once('-')
        .map(|(left, _)| left)
        .unwrap_or(trimmed);
    if core.is_empty() {
        return None;
    }

    let mut out = Vec::new();
    for part in core.split('.') {
        if part.is_empty() {
            return None;
        }
        out.push(part.parse::<u64>().ok()?);
    }
    Some(out)
}

/// True when `found` names a schema older than [`CONFIG_SCHEMA_VERSION`].
/// Unparseable versions count as older.
pub fn is_older_schema_version(found: &str) -> bool {
    let Some(mut found_parts) = parse_version_numbers(found) else {
        return true;
    };
    let Some(mut current_parts) = parse_version_numbers(CONFIG_SCHEMA_VERSION) else {
        return false;
    };
    let max_len = found_parts.len().max(current_parts.len());
    found_parts.resize(max_len, 0);
    current_parts.resize(max_len, 0);
    found_parts < current_parts
}
