use crate::installer::catalog::COMMANDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Init,
    Migrate,
    List,
    Doctor,
    Config,
    Help,
    Version,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "init" | "i" => CliVerb::Init,
        "migrate" => CliVerb::Migrate,
        "list" => CliVerb::List,
        "doctor" => CliVerb::Doctor,
        "config" => CliVerb::Config,
        "help" | "--help" | "-h" => CliVerb::Help,
        "version" | "--version" | "-V" => CliVerb::Version,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: ccg <command> [flags]".to_string(),
        String::new(),
        "Commands:".to_string(),
        "  init                                 Migrate, write config and install workflows"
            .to_string(),
        "  migrate                              Move a pre-1.4 layout into the current one"
            .to_string(),
        "  list                                 Show the workflow catalog".to_string(),
        "  doctor                               Check the installation".to_string(),
        "  config mcp --token <t>               Register the ace-tool MCP server".to_string(),
        "  version                              Print the ccg version".to_string(),
        String::new(),
        "init flags:".to_string(),
        "  --lang zh-CN|en                      Interface language (default zh-CN)".to_string(),
        "  --frontend <m1,m2>                   Frontend models; first is primary".to_string(),
        "  --backend <m1,m2>                    Backend models; first is primary".to_string(),
        "  --mode parallel|smart|sequential     Collaboration mode (default smart)".to_string(),
        "  --workflows <id1,id2>|all            Workflows to install (default all)".to_string(),
        "  --install-dir <path>                 Install directory (default ~/.claude)".to_string(),
        "  --force                              Overwrite files that already exist".to_string(),
        "  --skip-prompt                        Accepted for compatibility; ccg never prompts"
            .to_string(),
        "  --mcp ace-tool|auggie|skip           MCP integration (default ace-tool)".to_string(),
        "  --skip-mcp                           Same as --mcp skip".to_string(),
        "  --ace-base-url <url>                 ace-tool endpoint (default official)".to_string(),
        "  --ace-token <token>                  ace-tool token".to_string(),
        "  --auggie-token <token>               auggie API key".to_string(),
        "  --configure-path                     Append the bin dir to the shell rc".to_string(),
    ]
}

pub fn catalog_lines() -> Vec<String> {
    COMMANDS
        .iter()
        .map(|def| {
            format!(
                "  {0:16} {1:12} {2}",
                def.id,
                def.category.as_str(),
                def.description
            )
        })
        .collect()
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Workflows:".to_string());
    lines.extend(catalog_lines());
    lines.join("\n")
}
