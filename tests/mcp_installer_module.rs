use ccg::config::InstallPaths;
use ccg::installer::mcp::{install_ace_tool, AceToolOptions, DEFAULT_ACE_BASE_URL};
use ccg::setup::env::InstallEnv;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json")
}

#[test]
fn empty_base_url_uses_official_endpoint() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    );

    let result = install_ace_tool(
        &env,
        &AceToolOptions {
            base_url: String::new(),
            token: "abc".to_string(),
        },
    );
    assert!(result.success, "{:?}", result.message);
    let config_path = result.config_path.expect("config path");
    assert_eq!(config_path, temp.path().join(".claude.json"));

    let value = read_json(&config_path);
    let entry = &value["mcpServers"]["ace-tool"];
    assert_eq!(entry["env"]["ACE_TOKEN"], "abc");
    assert_eq!(entry["env"]["ACE_BASE_URL"], DEFAULT_ACE_BASE_URL);
    assert_eq!(entry["args"], json!(["-y", "ace-tool@latest"]));
}

#[test]
fn reinstall_updates_only_the_ace_tool_entry() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    );
    let path = env.paths.external_tool_config_path();
    fs::write(
        &path,
        json!({
            "projects": {"/work": {"allowedTools": []}},
            "mcpServers": {"filesystem": {"command": "fs-mcp"}}
        })
        .to_string(),
    )
    .expect("seed");

    for token in ["first", "second"] {
        let result = install_ace_tool(
            &env,
            &AceToolOptions {
                base_url: String::new(),
                token: token.to_string(),
            },
        );
        assert!(result.success);
    }

    let value = read_json(&path);
    assert_eq!(value["projects"]["/work"]["allowedTools"], json!([]));
    assert_eq!(value["mcpServers"]["filesystem"]["command"], "fs-mcp");
    assert_eq!(value["mcpServers"]["ace-tool"]["env"]["ACE_TOKEN"], "second");
    assert_eq!(value["mcpServers"].as_object().expect("servers").len(), 2);
}

#[test]
fn non_object_config_is_rejected() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    );
    let path = env.paths.external_tool_config_path();
    fs::write(&path, "[1, 2]").expect("seed");

    let result = install_ace_tool(
        &env,
        &AceToolOptions {
            base_url: String::new(),
            token: "abc".to_string(),
        },
    );
    assert!(!result.success);
    assert!(result.config_path.is_none());
    assert_eq!(fs::read_to_string(&path).expect("read"), "[1, 2]");
}

#[test]
fn merge_keeps_the_existing_key_order() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    );
    let path = env.paths.external_tool_config_path();
    fs::write(
        &path,
        r#"{"zeta": 1, "mcpServers": {"github": {"command": "gh"}}, "alpha": 2}"#,
    )
    .expect("seed");

    let result = install_ace_tool(
        &env,
        &AceToolOptions {
            base_url: String::new(),
            token: "abc".to_string(),
        },
    );
    assert!(result.success, "{:?}", result.message);

    let raw = fs::read_to_string(&path).expect("read");
    let position = |needle: &str| raw.find(needle).expect(needle);
    assert!(position("\"zeta\"") < position("\"mcpServers\""));
    assert!(position("\"mcpServers\"") < position("\"alpha\""));
    assert!(position("\"github\"") < position("\"ace-tool\""));
}

#[test]
fn non_object_mcp_servers_leaves_the_file_untouched() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    );
    let path = env.paths.external_tool_config_path();
    fs::write(&path, r#"{"mcpServers": []}"#).expect("seed");

    let result = install_ace_tool(
        &env,
        &AceToolOptions {
            base_url: String::new(),
            token: "abc".to_string(),
        },
    );
    assert!(!result.success);
    assert_eq!(fs::read_to_string(&path).expect("read"), r#"{"mcpServers": []}"#);
}
