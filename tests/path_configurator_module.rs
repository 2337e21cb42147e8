use ccg::config::InstallPaths;
use ccg::setup::env::{InstallEnv, ShellKind};
use ccg::setup::path_config::{ensure_path_configured, PathConfigStatus};
use std::fs;
use tempfile::tempdir;

#[test]
fn rc_already_referencing_bin_is_left_byte_identical() {
    let temp = tempdir().expect("tempdir");
    let env = InstallEnv::new(
        InstallPaths::with_default_install_dir(temp.path()),
        temp.path().join("pkg"),
    )
    .with_shell(ShellKind::Zsh);
    let bin = env.paths.bin_dir();
    let rc = temp.path().join(".zshrc");
    let original = format!("export EDITOR=vim\nexport PATH=\"{}:$PATH\"\n", bin.display());
    fs::write(&rc, &original).expect("seed rc");
    let size_before = fs::metadata(&rc).expect("meta").len();

    let result = ensure_path_configured(&env, &bin);
    assert_eq!(result.status, PathConfigStatus::AlreadyConfigured);
    assert_eq!(result.rc_file, rc);
    assert_eq!(fs::read_to_string(&rc).expect("read"), original);
    assert_eq!(fs::metadata(&rc).expect("meta").len(), size_before);
}

#[test]
fn custom_install_dir_is_appended_once() {
    let temp = tempdir().expect("tempdir");
    let install_dir = temp.path().join("tools/claude");
    let env = InstallEnv::new(
        InstallPaths::new(temp.path(), &install_dir),
        temp.path().join("pkg"),
    )
    .with_shell(ShellKind::Bash);
    let bin = env.paths.bin_dir();

    assert_eq!(
        ensure_path_configured(&env, &bin).status,
        PathConfigStatus::Configured
    );
    assert_eq!(
        ensure_path_configured(&env, &bin).status,
        PathConfigStatus::AlreadyConfigured
    );
    let content = fs::read_to_string(temp.path().join(".bashrc")).expect("read");
    assert_eq!(content.matches("export PATH=").count(), 1);
    assert!(content.contains(&format!("export PATH=\"{}:$PATH\"", bin.display())));
}
