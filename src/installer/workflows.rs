use super::binary::install_companion_binary;
use super::catalog;
use crate::config::ModelRouting;
use crate::setup::env::InstallEnv;
use crate::shared::fs_atomic::atomic_write_file;
use crate::shared::ids::WorkflowId;
use crate::templates::{render_command, render_prompt};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallResult {
    pub installed_commands: Vec<String>,
    /// `<model>/<role>` keys, sorted and unique.
    pub installed_prompts: Vec<String>,
    pub errors: Vec<String>,
    pub bin_installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_path: Option<PathBuf>,
    /// Why the companion binary was not placed. Never counted in `errors`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct InstallOptions<'a> {
    pub routing: &'a ModelRouting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteOutcome {
    Written,
    KeptExisting,
}

fn write_artifact(path: &Path, body: &str, force: bool) -> Result<WriteOutcome, String> {
    if path.exists() && !path.is_file() {
        return Err(format!("{} exists and is not a file", path.display()));
    }
    if path.is_file() && !force {
        return Ok(WriteOutcome::KeptExisting);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    atomic_write_file(path, body.as_bytes())
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    Ok(WriteOutcome::Written)
}

/// Installs the command file and role prompts for every requested workflow,
/// then places the companion binary. Every file is attempted on its own;
/// failures are collected in `errors` and never stop the batch.
///
/// With `force == false` an existing file is left as-is and still reported
/// as installed, so reruns converge on the same result.
pub fn install_workflows(
    env: &InstallEnv,
    workflow_ids: &[WorkflowId],
    force: bool,
    options: InstallOptions<'_>,
) -> InstallResult {
    let paths = &env.paths;
    let prompts_dir = paths.prompts_dir();
    let mut result = InstallResult::default();
    let mut prompts = BTreeSet::new();
    let mut attempted_prompts = BTreeSet::new();

    for id in workflow_ids {
        let Some(def) = catalog::find(id.as_str()) else {
            result
                .errors
                .push(format!("unknown workflow `{id}`; run `ccg list` for the catalog"));
            continue;
        };

        let command_path = paths.command_path(def.id);
        let command = render_command(def, options.routing, &prompts_dir)
            .and_then(|body| write_artifact(&command_path, &body, force));
        match command {
            Ok(_) => result.installed_commands.push(def.id.to_string()),
            Err(err) => result.errors.push(format!("command `{}`: {err}", def.id)),
        }

        for binding in def.prompts {
            for model in options.routing.lane_models(binding.lane) {
                let key = format!("{}/{}", model.as_str(), binding.role.as_str());
                if !attempted_prompts.insert(key.clone()) {
                    continue;
                }
                let prompt_path = paths.prompt_path(model.as_str(), binding.role.as_str());
                let written = render_prompt(*model, binding.role)
                    .and_then(|body| write_artifact(&prompt_path, &body, force));
                match written {
                    Ok(_) => {
                        prompts.insert(key);
                    }
                    Err(err) => result.errors.push(format!("prompt `{key}`: {err}")),
                }
            }
        }
    }
    result.installed_prompts = prompts.into_iter().collect();

    match install_companion_binary(env) {
        Ok(bin_dir) => {
            result.bin_installed = true;
            result.bin_path = Some(bin_dir);
        }
        Err(err) => result.bin_error = Some(err),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstallPaths;
    use tempfile::tempdir;

    fn ids(raw: &[&str]) -> Vec<WorkflowId> {
        raw.iter()
            .map(|id| WorkflowId::parse(id).expect("id"))
            .collect()
    }

    #[test]
    fn review_installs_one_prompt_per_review_model() {
        let temp = tempdir().expect("tempdir");
        let env = InstallEnv::new(
            InstallPaths::with_default_install_dir(temp.path()),
            temp.path().join("pkg"),
        );
        let routing = ModelRouting::default();

        let result = install_workflows(
            &env,
            &ids(&["review"]),
            false,
            InstallOptions { routing: &routing },
        );

        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(result.installed_commands, vec!["review"]);
        assert_eq!(
            result.installed_prompts,
            vec!["codex/reviewer", "gemini/reviewer"]
        );
        assert!(env.paths.command_path("review").is_file());
        assert!(env.paths.prompt_path("gemini", "reviewer").is_file());
    }

    #[test]
    fn shared_prompts_are_written_once_per_run() {
        let temp = tempdir().expect("tempdir");
        let env = InstallEnv::new(
            InstallPaths::with_default_install_dir(temp.path()),
            temp.path().join("pkg"),
        );
        let routing = ModelRouting::default();

        let result = install_workflows(
            &env,
            &ids(&["debug", "bugfix"]),
            true,
            InstallOptions { routing: &routing },
        );

        assert!(result.errors.is_empty(), "{:?}", result.errors);
        let debugger_entries = result
            .installed_prompts
            .iter()
            .filter(|key| key.as_str() == "codex/debugger")
            .count();
        assert_eq!(debugger_entries, 1);
    }

    #[test]
    fn unknown_ids_are_reported_without_stopping_the_batch() {
        let temp = tempdir().expect("tempdir");
        let env = InstallEnv::new(
            InstallPaths::with_default_install_dir(temp.path()),
            temp.path().join("pkg"),
        );
        let routing = ModelRouting::default();

        let result = install_workflows(
            &env,
            &ids(&["deploy", "commit"]),
            false,
            InstallOptions { routing: &routing },
        );

        assert_eq!(result.installed_commands, vec!["commit"]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("deploy"));
    }

    #[test]
    fn missing_companion_binary_is_not_an_install_error() {
        let temp = tempdir().expect("tempdir");
        let env = InstallEnv::new(
            InstallPaths::with_default_install_dir(temp.path()),
            temp.path().join("pkg"),
        );
        let routing = ModelRouting::default();

        let result = install_workflows(
            &env,
            &ids(&["init"]),
            false,
            InstallOptions { routing: &routing },
        );

        assert!(result.errors.is_empty());
        assert!(!result.bin_installed);
        assert!(result.bin_path.is_none());
        assert!(result.bin_error.is_some());
    }
}
