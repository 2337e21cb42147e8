use crate::setup::env::InstallEnv;
use crate::shared::fs_atomic::atomic_write_file;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const ACE_TOOL_SERVER_NAME: &str = "ace-tool";
pub const AUGGIE_SERVER_NAME: &str = "auggie-mcp";
pub const DEFAULT_ACE_BASE_URL: &str = "https://api.augmentcode.com";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpInstallResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl McpInstallResult {
    fn installed(config_path: PathBuf) -> Self {
        Self {
            success: true,
            config_path: Some(config_path),
            message: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            config_path: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AceToolOptions {
    /// Empty selects [`DEFAULT_ACE_BASE_URL`].
    pub base_url: String,
    pub token: String,
}

/// One stdio server entry under `mcpServers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct StdioServerEntry {
    #[serde(rename = "type")]
    kind: &'static str,
    command: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    args: Vec<&'static str>,
    env: BTreeMap<&'static str, String>,
}

/// The shared tool config file, kept as one ordered object so a merge only
/// touches the entry it sets. Only `mcpServers` is interpreted.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
struct ExternalToolConfig {
    entries: Map<String, Value>,
}

impl ExternalToolConfig {
    fn load_or_default(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&raw).map_err(|e| {
            format!(
                "failed to parse {}: {e}; fix the file and rerun `ccg config mcp`",
                path.display()
            )
        })
    }

    fn mcp_servers(&self, path: &Path) -> Result<Option<&Map<String, Value>>, String> {
        match self.entries.get("mcpServers") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(servers)) => Ok(Some(servers)),
            Some(_) => Err(format!(
                "`mcpServers` in {} is not an object",
                path.display()
            )),
        }
    }

    fn insert_server(&mut self, path: &Path, name: &str, entry: Value) -> Result<(), String> {
        match self.entries.get_mut("mcpServers") {
            Some(Value::Object(servers)) => {
                servers.insert(name.to_string(), entry);
            }
            None | Some(Value::Null) => {
                let mut servers = Map::new();
                servers.insert(name.to_string(), entry);
                self.entries
                    .insert("mcpServers".to_string(), Value::Object(servers));
            }
            Some(_) => {
                return Err(format!(
                    "`mcpServers` in {} is not an object",
                    path.display()
                ))
            }
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<(), String> {
        let mut body = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to encode {}: {e}", path.display()))?;
        body.push('\n');
        atomic_write_file(path, body.as_bytes())
            .map_err(|e| format!("failed to write {}: {e}", path.display()))
    }
}

fn upsert_server(env: &InstallEnv, name: &str, entry: &StdioServerEntry) -> McpInstallResult {
    let path = env.paths.external_tool_config_path();
    let mut config = match ExternalToolConfig::load_or_default(&path) {
        Ok(config) => config,
        Err(err) => return McpInstallResult::failed(err),
    };
    let value = match serde_json::to_value(entry) {
        Ok(value) => value,
        Err(err) => return McpInstallResult::failed(format!("failed to encode `{name}`: {err}")),
    };
    if let Err(err) = config.insert_server(&path, name, value) {
        return McpInstallResult::failed(err);
    }
    match config.save(&path) {
        Ok(()) => McpInstallResult::installed(path),
        Err(err) => McpInstallResult::failed(err),
    }
}

/// Registers the ace-tool MCP server in the shared tool config, replacing a
/// previous ace-tool entry and keeping every other server and setting.
pub fn install_ace_tool(env: &InstallEnv, options: &AceToolOptions) -> McpInstallResult {
    let token = options.token.trim();
    if token.is_empty() {
        return McpInstallResult::failed("ace-tool token is required");
    }
    let base_url = match options.base_url.trim() {
        "" => DEFAULT_ACE_BASE_URL,
        url => url,
    };
    let entry = StdioServerEntry {
        kind: "stdio",
        command: "npx",
        args: vec!["-y", "ace-tool@latest"],
        env: BTreeMap::from([
            ("ACE_BASE_URL", base_url.to_string()),
            ("ACE_TOKEN", token.to_string()),
        ]),
    };
    upsert_server(env, ACE_TOOL_SERVER_NAME, &entry)
}

pub fn install_auggie(env: &InstallEnv, token: &str) -> McpInstallResult {
    let token = token.trim();
    if token.is_empty() {
        return McpInstallResult::failed("auggie API key is required");
    }
    let entry = StdioServerEntry {
        kind: "stdio",
        command: "auggie",
        args: Vec::new(),
        env: BTreeMap::from([("AUGMENT_API_KEY", token.to_string())]),
    };
    upsert_server(env, AUGGIE_SERVER_NAME, &entry)
}

/// Names of every MCP server currently registered, sorted.
pub fn configured_mcp_servers(env: &InstallEnv) -> Result<Vec<String>, String> {
    let path = env.paths.external_tool_config_path();
    let config = ExternalToolConfig::load_or_default(&path)?;
    let mut names: Vec<String> = config
        .mcp_servers(&path)?
        .map(|servers| servers.keys().cloned().collect())
        .unwrap_or_default();
    names.sort();
    Ok(names)
}
