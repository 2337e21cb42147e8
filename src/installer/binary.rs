use crate::setup::env::{InstallEnv, Platform};
use crate::shared::fs_atomic::atomic_write_file;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const COMPANION_BINARY_NAME: &str = "codeagent-wrapper";

pub fn installed_binary_name(platform: &Platform) -> String {
    if platform.is_windows() {
        format!("{COMPANION_BINARY_NAME}.exe")
    } else {
        COMPANION_BINARY_NAME.to_string()
    }
}

pub fn prebuilt_binary_name(platform: &Platform) -> Option<String> {
    let os = platform.release_os()?;
    let suffix = if platform.is_windows() { ".exe" } else { "" };
    Some(format!(
        "{COMPANION_BINARY_NAME}-{os}-{}{suffix}",
        platform.release_arch()
    ))
}

pub fn prebuilt_binary_path(env: &InstallEnv) -> Option<PathBuf> {
    let name = prebuilt_binary_name(&env.platform)?;
    let path = env.package_root.join("bin").join(name);
    path.is_file().then_some(path)
}

pub fn installed_binary_path(env: &InstallEnv) -> PathBuf {
    env.paths
        .bin_dir()
        .join(installed_binary_name(&env.platform))
}

fn same_content(path: &Path, bytes: &[u8]) -> bool {
    let Ok(existing) = fs::read(path) else {
        return false;
    };
    Sha256::digest(&existing) == Sha256::digest(bytes)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    if perms.mode() & 0o777 != 0o755 {
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Places the prebuilt companion binary under `<install_dir>/bin` and
/// returns that directory. An identical binary already in place is left
/// untouched.
pub fn install_companion_binary(env: &InstallEnv) -> Result<PathBuf, String> {
    let source = prebuilt_binary_path(env).ok_or_else(|| {
        format!(
            "no prebuilt {COMPANION_BINARY_NAME} for {}-{} under {}",
            env.platform.release_os().unwrap_or("unknown"),
            env.platform.release_arch(),
            env.package_root.join("bin").display()
        )
    })?;
    let bytes =
        fs::read(&source).map_err(|e| format!("failed to read {}: {e}", source.display()))?;

    let bin_dir = env.paths.bin_dir();
    let dest = installed_binary_path(env);
    if !same_content(&dest, &bytes) {
        fs::create_dir_all(&bin_dir)
            .map_err(|e| format!("failed to create {}: {e}", bin_dir.display()))?;
        atomic_write_file(&dest, &bytes)
            .map_err(|e| format!("failed to write {}: {e}", dest.display()))?;
    }
    mark_executable(&dest)
        .map_err(|e| format!("failed to mark {} executable: {e}", dest.display()))?;
    Ok(bin_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstallPaths;
    use crate::setup::env::OsKind;
    use tempfile::tempdir;

    fn linux_env(home: &Path, package_root: &Path) -> InstallEnv {
        InstallEnv::new(InstallPaths::with_default_install_dir(home), package_root)
            .with_platform(Platform::new(OsKind::Linux, "x86_64"))
    }

    #[test]
    fn prebuilt_names_follow_release_asset_convention() {
        let linux = Platform::new(OsKind::Linux, "x86_64");
        let windows = Platform::new(OsKind::Windows, "aarch64");
        assert_eq!(
            prebuilt_binary_name(&linux).as_deref(),
            Some("codeagent-wrapper-linux-amd64")
        );
        assert_eq!(
            prebuilt_binary_name(&windows).as_deref(),
            Some("codeagent-wrapper-windows-arm64.exe")
        );
        assert_eq!(installed_binary_name(&windows), "codeagent-wrapper.exe");
        assert!(prebuilt_binary_name(&Platform::new(OsKind::Other, "x86_64")).is_none());
    }

    #[test]
    fn missing_prebuilt_binary_is_reported() {
        let temp = tempdir().expect("tempdir");
        let env = linux_env(temp.path(), &temp.path().join("pkg"));

        let err = install_companion_binary(&env).expect_err("no source");
        assert!(err.contains("linux-amd64"), "{err}");
        assert!(!env.paths.bin_dir().exists());
    }

    #[test]
    fn companion_binary_is_copied_once() {
        let temp = tempdir().expect("tempdir");
        let package_root = temp.path().join("pkg");
        fs::create_dir_all(package_root.join("bin")).expect("mkdir");
        fs::write(
            package_root.join("bin/codeagent-wrapper-linux-amd64"),
            b"#!/bin/sh\n",
        )
        .expect("seed binary");
        let env = linux_env(temp.path(), &package_root);

        let bin_dir = install_companion_binary(&env).expect("install");
        assert_eq!(bin_dir, env.paths.bin_dir());
        let dest = installed_binary_path(&env);
        assert_eq!(fs::read(&dest).expect("read"), b"#!/bin/sh\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&dest).expect("meta").permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }

        install_companion_binary(&env).expect("reinstall");
        assert_eq!(fs::read(&dest).expect("read"), b"#!/bin/sh\n");
    }
}
