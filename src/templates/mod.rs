use crate::config::{ModelRouting, ModelType};
use crate::installer::catalog::{CommandDef, PromptRole};
use serde::Serialize;
use std::path::Path;

const COMMAND_TEMPLATE: &str = include_str!("assets/command.md");
const PROMPT_TEMPLATE: &str = include_str!("assets/prompt.md");

#[derive(Debug, Serialize)]
struct CommandFrontMatter<'a> {
    description: &'a str,
    #[serde(rename = "argument-hint")]
    argument_hint: &'a str,
    routing: &'a ModelRouting,
}

pub fn render_template_with_placeholders<F>(
    template: &str,
    mut resolve: F,
) -> Result<String, String>
where
    F: FnMut(&str) -> Result<String, String>,
{
    let mut rendered = String::new();
    let mut cursor = template;

    while let Some(start) = cursor.find("{{") {
        rendered.push_str(&cursor[..start]);
        let after_open = &cursor[start + 2..];
        let Some(close_offset) = after_open.find("}}") else {
            return Err("unclosed placeholder in template".to_string());
        };
        let token = after_open[..close_offset].trim();
        if token.is_empty() {
            return Err("empty placeholder in template".to_string());
        }
        rendered.push_str(&resolve(token)?);
        cursor = &after_open[close_offset + 2..];
    }

    rendered.push_str(cursor);
    Ok(rendered)
}

fn join_models(models: &[ModelType]) -> String {
    models
        .iter()
        .map(|model| model.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn prompt_listing(def: &CommandDef, routing: &ModelRouting, prompts_dir: &Path) -> String {
    if def.prompts.is_empty() {
        return "This command does not use role prompts.".to_string();
    }
    let mut lines = Vec::new();
    for binding in def.prompts {
        for model in routing.lane_models(binding.lane) {
            let path = prompts_dir
                .join(model.as_str())
                .join(format!("{}.md", binding.role.as_str()));
            lines.push(format!(
                "- {} ({} lane, {}): `{}`",
                binding.role.as_str(),
                binding.lane.as_str(),
                model.as_str(),
                path.display()
            ));
        }
    }
    lines.join("\n")
}

/// Renders the command file for `def`. The routing table is embedded both
/// as YAML front matter and as the human-readable table in the body.
pub fn render_command(
    def: &CommandDef,
    routing: &ModelRouting,
    prompts_dir: &Path,
) -> Result<String, String> {
    let front_matter = serde_yaml::to_string(&CommandFrontMatter {
        description: def.description,
        argument_hint: "<task description>",
        routing,
    })
    .map_err(|err| format!("failed to encode front matter for `{}`: {err}", def.id))?;

    render_template_with_placeholders(COMMAND_TEMPLATE, |token| match token {
        "front_matter" => Ok(front_matter.trim_end().to_string()),
        "command.id" => Ok(def.id.to_string()),
        "command.description" => Ok(def.description.to_string()),
        "command.objective" => Ok(def.objective.to_string()),
        "command.prompts" => Ok(prompt_listing(def, routing, prompts_dir)),
        "routing.mode" => Ok(routing.mode.to_string()),
        "routing.frontend.models" => Ok(join_models(&routing.frontend.models)),
        "routing.frontend.primary" => Ok(routing.frontend.primary.to_string()),
        "routing.frontend.strategy" => Ok(routing.frontend.strategy.to_string()),
        "routing.backend.models" => Ok(join_models(&routing.backend.models)),
        "routing.backend.primary" => Ok(routing.backend.primary.to_string()),
        "routing.backend.strategy" => Ok(routing.backend.strategy.to_string()),
        "routing.review.models" => Ok(join_models(&routing.review.models)),
        "routing.review.strategy" => Ok(routing.review.strategy.to_string()),
        other => Err(format!("unsupported command placeholder `{{{{{other}}}}}`")),
    })
}

pub fn render_prompt(model: ModelType, role: PromptRole) -> Result<String, String> {
    render_template_with_placeholders(PROMPT_TEMPLATE, |token| match token {
        "model.name" => Ok(model.display_name().to_string()),
        "role.id" => Ok(role.as_str().to_string()),
        "role.title" => Ok(role.title().to_string()),
        "role.focus" => Ok(role.focus().to_string()),
        other => Err(format!("unsupported prompt placeholder `{{{{{other}}}}}`")),
    })
}
