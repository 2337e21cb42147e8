use ccg::config::{read_config, InstallPaths, McpProvider, CONFIG_SCHEMA_VERSION};
use ccg::migration::needs_migration;
use ccg::setup::env::{InstallEnv, OsKind, Platform, ShellKind};
use ccg::setup::intent::{InstallIntent, McpIntent};
use ccg::setup::path_config::PathConfigStatus;
use ccg::setup::run::{run_install, McpStep, PathStep, SetupError};
use ccg::shared::ids::WorkflowId;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn env_with_binary(home: &Path) -> InstallEnv {
    let package_root = home.join("pkg");
    let source = package_root.join("bin/codeagent-wrapper-linux-amd64");
    fs::create_dir_all(source.parent().expect("parent")).expect("mkdir");
    fs::write(&source, b"#!/bin/sh\nexit 0\n").expect("seed binary");
    InstallEnv::new(InstallPaths::with_default_install_dir(home), package_root)
        .with_platform(Platform::new(OsKind::Linux, "x86_64"))
        .with_shell(ShellKind::Zsh)
}

#[test]
fn fresh_environment_installs_without_errors() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    );
    assert!(!needs_migration(&env.paths));

    let intent = InstallIntent {
        mcp: McpIntent::skip(),
        ..InstallIntent::default()
    };
    let report = run_install(&env, &intent).expect("install");

    assert!(report.migration.is_none());
    assert!(report.install.errors.is_empty(), "{:?}", report.install.errors);
    assert_eq!(report.config_path, env.paths.config_file());
    let config = read_config(&env.paths).expect("config");
    assert_eq!(config.version, CONFIG_SCHEMA_VERSION);
    assert_eq!(config.mcp_provider, McpProvider::Skip);
    assert_eq!(config.installed_workflows, intent.workflows);
}

#[test]
fn legacy_home_is_migrated_then_fully_installed() {
    let temp = tempdir().expect("tempdir");
    let env = env_with_binary(temp.path());
    fs::create_dir_all(env.paths.legacy_root()).expect("legacy root");
    fs::write(env.paths.legacy_root().join("config.toml"), "lang = 'zh'").expect("seed");

    let intent = InstallIntent {
        mcp: McpIntent {
            provider: McpProvider::AceTool,
            base_url: String::new(),
            token: "abc".to_string(),
        },
        configure_path: true,
        ..InstallIntent::default()
    };
    let report = run_install(&env, &intent).expect("install");

    let migration = report.migration.as_ref().expect("migration ran");
    assert_eq!(migration.migrated_files, vec!["~/.ccg/config.toml"]);
    assert!(env.paths.root().join("config.toml").is_file());

    assert!(report.install.bin_installed);
    assert!(matches!(&report.mcp, McpStep::Installed(r) if r.success));
    match &report.path {
        PathStep::Attempted(result) => {
            assert_eq!(result.status, PathConfigStatus::Configured);
            assert_eq!(result.rc_file, temp.path().join(".zshrc"));
        }
        other => panic!("unexpected path step {other:?}"),
    }
    assert!(!report.has_warnings());

    let rerun = run_install(&env, &intent).expect("rerun");
    assert!(rerun.migration.is_none());
    assert_eq!(rerun.install.installed_commands, report.install.installed_commands);
    match &rerun.path {
        PathStep::Attempted(result) => {
            assert_eq!(result.status, PathConfigStatus::AlreadyConfigured)
        }
        other => panic!("unexpected path step {other:?}"),
    }
}

#[test]
fn path_is_only_described_without_opt_in() {
    let temp = tempdir().expect("tempdir");
    let env = env_with_binary(temp.path());
    let intent = InstallIntent {
        mcp: McpIntent::skip(),
        ..InstallIntent::default()
    };

    let report = run_install(&env, &intent).expect("install");
    match &report.path {
        PathStep::Manual { rc_file, command } => {
            assert_eq!(rc_file, &temp.path().join(".zshrc"));
            assert!(command.starts_with("export PATH=\""));
        }
        other => panic!("unexpected path step {other:?}"),
    }
    assert!(!temp.path().join(".zshrc").exists());
}

#[test]
fn windows_gets_powershell_instructions() {
    let temp = tempdir().expect("tempdir");
    let package_root = temp.path().join("pkg");
    fs::create_dir_all(package_root.join("bin")).expect("mkdir");
    fs::write(
        package_root.join("bin/codeagent-wrapper-windows-amd64.exe"),
        b"MZ",
    )
    .expect("seed");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        package_root,
    )
    .with_platform(Platform::new(OsKind::Windows, "x86_64"));
    let intent = InstallIntent {
        mcp: McpIntent::skip(),
        configure_path: true,
        ..InstallIntent::default()
    };

    let report = run_install(&env, &intent).expect("install");
    assert!(env.paths.bin_dir().join("codeagent-wrapper.exe").is_file());
    assert!(matches!(report.path, PathStep::Unsupported { .. }));
}

#[test]
fn config_survives_workflow_failures() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    );
    fs::create_dir_all(env.paths.install_dir.join("commands")).expect("mkdir");
    fs::write(env.paths.commands_dir(), "not a dir").expect("block commands dir");

    let intent = InstallIntent {
        workflows: vec![
            WorkflowId::parse("review").expect("id"),
            WorkflowId::parse("deploy").expect("id"),
        ],
        mcp: McpIntent::skip(),
        ..InstallIntent::default()
    };
    let report = run_install(&env, &intent).expect("partial success is still success");

    assert!(report.install.installed_commands.is_empty());
    assert_eq!(report.install.errors.len(), 2, "{:?}", report.install.errors);
    assert!(report.has_warnings());
    let config = read_config(&env.paths).expect("config persisted");
    let ids: Vec<&str> = config
        .installed_workflows
        .iter()
        .map(WorkflowId::as_str)
        .collect();
    assert_eq!(ids, vec!["review"]);
}

#[test]
fn blocked_config_root_aborts_the_run() {
    let temp = tempdir().expect("tempdir");
    let install_dir = temp.path().join(".claude");
    fs::create_dir_all(&install_dir).expect("mkdir");
    fs::write(install_dir.join(".ccg"), "file in the way").expect("block root");
    let env = InstallEnv::new(
        InstallPaths::new(temp.path(), &install_dir),
        temp.path().join("pkg"),
    );

    let err = run_install(&env, &InstallIntent::default()).expect_err("catastrophic");
    assert!(matches!(err, SetupError::RootDir { .. }));
    assert!(err.to_string().contains("failed to prepare config root"));
    assert!(!env.paths.commands_dir().exists());
}
