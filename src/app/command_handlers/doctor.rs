use crate::app::command_support::{parse_install_dir_only, resolve_env};
use crate::config::{read_config, Config, McpProvider};
use crate::installer::binary::installed_binary_path;
use crate::installer::catalog;
use crate::installer::mcp::{configured_mcp_servers, ACE_TOOL_SERVER_NAME, AUGGIE_SERVER_NAME};
use crate::migration::{migration_state, MigrationState};
use crate::setup::env::InstallEnv;
use crate::setup::path_config::{export_command, rc_references_bin};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
struct DoctorFinding {
    id: String,
    ok: bool,
    detail: String,
    remediation: String,
}

fn doctor_finding(
    id: impl Into<String>,
    ok: bool,
    detail: impl Into<String>,
    remediation: impl Into<String>,
) -> DoctorFinding {
    DoctorFinding {
        id: id.into(),
        ok,
        detail: detail.into(),
        remediation: remediation.into(),
    }
}

fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

fn can_write_directory(path: &Path) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("missing directory {}", path.display()));
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let probe = path.join(format!(".ccg-doctor-{nanos}"));
    fs::write(&probe, b"ok").map_err(|e| format!("failed to write {}: {e}", probe.display()))?;
    fs::remove_file(&probe).map_err(|e| format!("failed to remove {}: {e}", probe.display()))
}

fn workflow_findings(env: &InstallEnv, config: &Config, findings: &mut Vec<DoctorFinding>) {
    let missing: Vec<&str> = config
        .installed_workflows
        .iter()
        .map(|id| id.as_str())
        .filter(|id| !env.paths.command_path(id).is_file())
        .collect();
    findings.push(doctor_finding(
        "workflows.commands",
        missing.is_empty(),
        if missing.is_empty() {
            format!(
                "installed={} dir={}",
                config.installed_workflows.len(),
                env.paths.commands_dir().display()
            )
        } else {
            format!("missing={}", missing.join(","))
        },
        "run `ccg init --force` to reinstall command files",
    ));

    let mut missing_prompts = Vec::new();
    for id in &config.installed_workflows {
        let Some(def) = catalog::find(id.as_str()) else {
            continue;
        };
        for binding in def.prompts {
            for model in config.routing.lane_models(binding.lane) {
                let key = format!("{model}/{}", binding.role.as_str());
                if !env
                    .paths
                    .prompt_path(model.as_str(), binding.role.as_str())
                    .is_file()
                    && !missing_prompts.contains(&key)
                {
                    missing_prompts.push(key);
                }
            }
        }
    }
    findings.push(doctor_finding(
        "workflows.prompts",
        missing_prompts.is_empty(),
        if missing_prompts.is_empty() {
            format!("dir={}", env.paths.prompts_dir().display())
        } else {
            format!("missing={}", missing_prompts.join(","))
        },
        "run `ccg init --force` to reinstall role prompts",
    ));
}

fn mcp_finding(env: &InstallEnv, provider: McpProvider) -> Option<DoctorFinding> {
    let server = match provider {
        McpProvider::AceTool => ACE_TOOL_SERVER_NAME,
        McpProvider::Auggie => AUGGIE_SERVER_NAME,
        McpProvider::Skip => return None,
    };
    let config_path = env.paths.external_tool_config_path();
    Some(match configured_mcp_servers(env) {
        Ok(servers) => doctor_finding(
            format!("mcp.{server}"),
            servers.iter().any(|name| name == server),
            format!("source={} servers={}", config_path.display(), servers.join(",")),
            format!("run `ccg config mcp --provider {provider} --token <token>`"),
        ),
        Err(err) => doctor_finding(
            format!("mcp.{server}"),
            false,
            err,
            format!("fix {} and retry `ccg doctor`", config_path.display()),
        ),
    })
}

pub fn cmd_doctor(args: &[String]) -> Result<String, String> {
    let install_dir = parse_install_dir_only(args, "doctor [--install-dir <path>]")?;
    let env = resolve_env(install_dir.as_deref())?;
    Ok(render_findings(doctor_findings(&env)))
}

fn doctor_findings(env: &InstallEnv) -> Vec<DoctorFinding> {
    let paths = &env.paths;
    let mut findings = Vec::new();

    let config_path = paths.config_file();
    findings.push(doctor_finding(
        "config.path",
        config_path.is_file(),
        format!("config={}", config_path.display()),
        "run `ccg init` to create the default config",
    ));

    let config = match read_config(paths).and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => {
            findings.push(doctor_finding(
                "config.parse",
                true,
                format!("version={}", config.version),
                "none",
            ));
            Some(config)
        }
        Err(err) => {
            findings.push(doctor_finding(
                "config.parse",
                false,
                format!("config load failed: {err}"),
                "run `ccg migrate` then `ccg init` to rewrite the config",
            ));
            None
        }
    };

    let state = migration_state(paths);
    findings.push(doctor_finding(
        "migration.state",
        state == MigrationState::NotNeeded,
        format!("state={state}"),
        "run `ccg migrate`",
    ));

    findings.push(match can_write_directory(&paths.root()) {
        Ok(()) => doctor_finding(
            "config.root",
            true,
            format!("writable={}", paths.root().display()),
            "none",
        ),
        Err(err) => doctor_finding(
            "config.root",
            false,
            err,
            format!("grant write permission to {}", paths.root().display()),
        ),
    });

    if let Some(config) = config.as_ref() {
        workflow_findings(env, config, &mut findings);
        findings.extend(mcp_finding(env, config.mcp_provider));
    }

    let binary = installed_binary_path(env);
    let binary_ok = is_executable_file(&binary);
    findings.push(doctor_finding(
        "binary.companion",
        binary_ok,
        format!("binary={}", binary.display()),
        "reinstall with `ccg init --force` from a package that ships prebuilt binaries",
    ));

    if binary_ok && env.platform.supports_rc_editing() {
        let bin_dir = paths.bin_dir();
        let rc_file = env.shell_rc_path();
        let content = fs::read_to_string(&rc_file).unwrap_or_default();
        findings.push(doctor_finding(
            "path.shell_rc",
            rc_references_bin(&content, &bin_dir),
            format!("rc_file={}", rc_file.display()),
            format!(
                "run `ccg init --configure-path` or add `{}` to {}",
                export_command(&bin_dir),
                env.shell.rc_display()
            ),
        ));
    }

    findings
}

fn render_findings(findings: Vec<DoctorFinding>) -> String {
    let failed = findings.iter().filter(|f| !f.ok).count();
    let summary = if failed == 0 { "healthy" } else { "unhealthy" };
    let mut lines = vec![
        format!("summary={summary}"),
        format!("checks_total={}", findings.len()),
        format!("checks_failed={failed}"),
    ];
    for finding in findings {
        lines.push(format!(
            "check:{}={}",
            finding.id,
            if finding.ok { "ok" } else { "fail" }
        ));
        lines.push(format!("check:{}.detail={}", finding.id, finding.detail));
        if !finding.ok {
            lines.push(format!(
                "check:{}.remediation={}",
                finding.id, finding.remediation
            ));
        }
    }
    lines.join("\n")
}
