use crate::app::command_support::{flag_value, resolve_env};
use crate::config::{
    CollaborationMode, LaneRouting, McpProvider, ModelRouting, ModelType, SupportedLang,
};
use crate::installer::catalog;
use crate::setup::intent::{InstallIntent, McpIntent};
use crate::setup::path_config::PathConfigStatus;
use crate::setup::run::{run_install, InstallReport, McpStep, PathStep};
use crate::shared::ids::parse_workflow_id_list;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitArgs {
    pub install_dir: Option<String>,
    pub intent: InstallIntent,
}

pub fn parse_init_args(args: &[String]) -> Result<InitArgs, String> {
    let mut install_dir = None;
    let mut intent = InstallIntent::default();
    let mut routing = ModelRouting::default();
    let mut ace_base_url = String::new();
    let mut ace_token = String::new();
    let mut auggie_token = String::new();

    let mut index = 0usize;
    while index < args.len() {
        let flag = args[index].as_str();
        match flag {
            "--force" | "-f" => intent.force = true,
            "--skip-prompt" | "-y" => {}
            "--skip-mcp" => intent.mcp.provider = McpProvider::Skip,
            "--configure-path" => intent.configure_path = true,
            "--lang" | "-l" => {
                intent.language = SupportedLang::parse(flag_value(args, index, flag)?)?;
                index += 1;
            }
            "--frontend" => {
                let models = ModelType::parse_list(flag_value(args, index, flag)?)?;
                routing.frontend = LaneRouting::from_models(models)?;
                index += 1;
            }
            "--backend" => {
                let models = ModelType::parse_list(flag_value(args, index, flag)?)?;
                routing.backend = LaneRouting::from_models(models)?;
                index += 1;
            }
            "--mode" => {
                routing.mode = CollaborationMode::parse(flag_value(args, index, flag)?)?;
                index += 1;
            }
            "--workflows" => {
                let raw = flag_value(args, index, flag)?;
                intent.workflows = if raw.trim() == "all" {
                    catalog::all_workflow_ids()
                } else {
                    parse_workflow_id_list(raw)?
                };
                index += 1;
            }
            "--install-dir" | "-d" => {
                install_dir = Some(flag_value(args, index, flag)?.to_string());
                index += 1;
            }
            "--mcp" => {
                intent.mcp.provider = McpProvider::parse(flag_value(args, index, flag)?)?;
                index += 1;
            }
            "--ace-base-url" => {
                ace_base_url = flag_value(args, index, flag)?.to_string();
                index += 1;
            }
            "--ace-token" => {
                ace_token = flag_value(args, index, flag)?.to_string();
                index += 1;
            }
            "--auggie-token" => {
                auggie_token = flag_value(args, index, flag)?.to_string();
                index += 1;
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown init flag `{other}`"));
            }
            other => return Err(format!("unexpected init argument `{other}`")),
        }
        index += 1;
    }

    if intent.workflows.is_empty() {
        return Err("--workflows must name at least one workflow".to_string());
    }
    intent.routing = routing;
    intent.mcp = match intent.mcp.provider {
        McpProvider::AceTool => McpIntent {
            provider: McpProvider::AceTool,
            base_url: ace_base_url,
            token: ace_token,
        },
        McpProvider::Auggie => McpIntent {
            provider: McpProvider::Auggie,
            base_url: String::new(),
            token: auggie_token,
        },
        McpProvider::Skip => McpIntent::skip(),
    };

    Ok(InitArgs {
        install_dir,
        intent,
    })
}

pub fn cmd_init(args: &[String]) -> Result<String, String> {
    let parsed = parse_init_args(args)?;
    let env = resolve_env(parsed.install_dir.as_deref())?;
    let report = run_install(&env, &parsed.intent).map_err(|e| e.to_string())?;
    Ok(render_install_report(&report))
}

pub fn render_install_report(report: &InstallReport) -> String {
    let mut lines = vec![
        "install complete".to_string(),
        format!("config={}", report.config_path.display()),
    ];

    if let Some(migration) = &report.migration {
        lines.push(format!(
            "migration.migrated={}",
            migration.migrated_files.len()
        ));
        lines.push(format!("migration.skipped={}", migration.skipped.len()));
        lines.push(format!("migration.errors={}", migration.errors.len()));
        for file in &migration.migrated_files {
            lines.push(format!("migration.migrated_file={file}"));
        }
        for file in &migration.skipped {
            lines.push(format!("migration.skipped_file={file}"));
        }
        for err in &migration.errors {
            lines.push(format!("migration.error={err}"));
        }
    }

    let install = &report.install;
    lines.push(format!(
        "commands_installed={}",
        install.installed_commands.len()
    ));
    lines.push(format!("commands={}", install.installed_commands.join(",")));
    lines.push(format!("prompts_installed={}", install.installed_prompts.len()));
    for err in &install.errors {
        lines.push(format!("install.error={err}"));
    }
    lines.push(format!("bin_installed={}", install.bin_installed));
    if let Some(bin_path) = &install.bin_path {
        lines.push(format!("bin_path={}", bin_path.display()));
    }
    if let Some(err) = &install.bin_error {
        lines.push(format!("bin_error={err}"));
    }

    match &report.mcp {
        McpStep::NotRequested => lines.push("mcp=skipped".to_string()),
        McpStep::MissingToken { provider } => {
            lines.push("mcp=pending".to_string());
            lines.push(format!(
                "mcp.remediation=run `ccg config mcp --token <token>` to register {provider}"
            ));
        }
        McpStep::Installed(result) if result.success => {
            lines.push("mcp=installed".to_string());
            if let Some(path) = &result.config_path {
                lines.push(format!("mcp.config={}", path.display()));
            }
        }
        McpStep::Installed(result) => {
            lines.push("mcp=failed".to_string());
            if let Some(message) = &result.message {
                lines.push(format!("mcp.error={message}"));
            }
        }
    }

    match &report.path {
        PathStep::NotNeeded => lines.push("path=not_needed".to_string()),
        PathStep::Manual { rc_file, command } => {
            lines.push("path=manual".to_string());
            lines.push(format!("path.rc_file={}", rc_file.display()));
            lines.push(format!("path.command={command}"));
        }
        PathStep::Unsupported { instructions } => {
            lines.push("path=manual".to_string());
            for line in instructions.lines() {
                lines.push(format!("path.powershell={line}"));
            }
        }
        PathStep::Attempted(result) => {
            lines.push(format!("path={}", result.status));
            lines.push(format!("path.rc_file={}", result.rc_file.display()));
            if result.status == PathConfigStatus::Failed {
                lines.push(format!("path.command={}", result.manual_command));
                if let Some(err) = &result.error {
                    lines.push(format!("path.error={err}"));
                }
            }
        }
    }

    lines.push(format!("warnings={}", report.has_warnings()));
    lines.join("\n")
}
