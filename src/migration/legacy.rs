use crate::config::InstallPaths;
use std::fs;
use std::path::{Path, PathBuf};

/// A file found in a pre-1.4 location together with where it belongs now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyCandidate {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Home-relative source path used in reports, e.g. `~/.ccg/config.json`.
    pub label: String,
}

/// Legacy directories paired with the canonical directory their contents
/// move into. A pair is dropped when either side contains the other, e.g.
/// an install dir of `~/.ccg` puts the live root inside the legacy root.
pub fn legacy_areas(paths: &InstallPaths) -> Vec<(PathBuf, PathBuf)> {
    [
        (paths.legacy_root(), paths.root()),
        (paths.legacy_prompts_dir(), paths.prompts_dir()),
    ]
    .into_iter()
    .filter(|(legacy, canonical)| {
        !canonical.starts_with(legacy) && !legacy.starts_with(canonical)
    })
    .collect()
}

pub fn has_legacy_layout(paths: &InstallPaths) -> bool {
    legacy_areas(paths)
        .iter()
        .any(|(legacy, _)| legacy.is_dir())
}

/// Lists every legacy file in a stable order. Directories that cannot be
/// read are reported in the returned error list and their contents skipped.
pub fn legacy_candidates(paths: &InstallPaths) -> (Vec<LegacyCandidate>, Vec<String>) {
    let mut candidates = Vec::new();
    let mut errors = Vec::new();

    for (legacy, canonical) in legacy_areas(paths) {
        if !legacy.is_dir() {
            continue;
        }
        let mut files = Vec::new();
        collect_files(&legacy, &mut files, &mut errors);
        for source in files {
            let Ok(relative) = source.strip_prefix(&legacy) else {
                continue;
            };
            candidates.push(LegacyCandidate {
                destination: canonical.join(relative),
                label: display_path(&paths.home, &source),
                source,
            });
        }
    }

    (candidates, errors)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>, errors: &mut Vec<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            errors.push(format!("failed to read {}: {err}", dir.display()));
            return;
        }
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        let Ok(file_type) = fs::symlink_metadata(&path).map(|m| m.file_type()) else {
            continue;
        };
        if file_type.is_dir() {
            collect_files(&path, files, errors);
        } else {
            files.push(path);
        }
    }
}

/// Removes `dir` and any subdirectories left empty. Non-empty directories
/// stay in place.
pub fn prune_empty_dirs(dir: &Path) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                prune_empty_dirs(&path);
            }
        }
    }
    let _ = fs::remove_dir(dir);
}

pub fn display_path(home: &Path, path: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(relative) => format!("~/{}", relative.display()),
        Err(_) => path.display().to_string(),
    }
}
