use crate::app::command_support::{flag_value, resolve_env};
use crate::config::{read_config, write_config, McpProvider};
use crate::installer::mcp::{install_ace_tool, install_auggie, AceToolOptions};
use crate::shared::logging::{append_install_log, LogLevel};

const USAGE: &str =
    "config mcp [--provider ace-tool|auggie] --token <token> [--base-url <url>] [--install-dir <path>]";

pub fn cmd_config(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("mcp") => cmd_config_mcp(&args[1..]),
        _ => Err(format!("usage: {USAGE}")),
    }
}

fn cmd_config_mcp(args: &[String]) -> Result<String, String> {
    let mut provider = McpProvider::AceTool;
    let mut token = String::new();
    let mut base_url = String::new();
    let mut install_dir = None;

    let mut index = 0usize;
    while index < args.len() {
        let flag = args[index].as_str();
        let value = flag_value(args, index, flag);
        match flag {
            "--provider" => provider = McpProvider::parse(value?)?,
            "--token" => token = value?.to_string(),
            "--base-url" => base_url = value?.to_string(),
            "--install-dir" => install_dir = Some(value?.to_string()),
            other => return Err(format!("unexpected argument `{other}`\nusage: {USAGE}")),
        }
        index += 2;
    }

    let env = resolve_env(install_dir.as_deref())?;
    let result = match provider {
        McpProvider::AceTool => install_ace_tool(&env, &AceToolOptions { base_url, token }),
        McpProvider::Auggie => install_auggie(&env, &token),
        McpProvider::Skip => return Err("provider `skip` registers nothing".to_string()),
    };
    if !result.success {
        let message = result.message.unwrap_or_else(|| "unknown failure".to_string());
        append_install_log(
            &env.paths.install_log_path(),
            LogLevel::Warn,
            "mcp.failed",
            &message,
        );
        return Err(format!("mcp registration failed: {message}"));
    }
    append_install_log(
        &env.paths.install_log_path(),
        LogLevel::Info,
        "mcp.installed",
        provider.as_str(),
    );

    let mut lines = vec![
        format!("mcp={provider}"),
        "status=installed".to_string(),
    ];
    if let Some(path) = &result.config_path {
        lines.push(format!("config_path={}", path.display()));
    }
    if let Ok(mut config) = read_config(&env.paths) {
        if config.mcp_provider != provider {
            config.mcp_provider = provider;
            if write_config(&env.paths, &config).is_ok() {
                lines.push(format!("config.mcpProvider={provider}"));
            }
        }
    }
    Ok(lines.join("\n"))
}
