use crate::app::cli::catalog_lines;
use crate::installer::catalog::COMMANDS;

pub fn cmd_list(args: &[String]) -> Result<String, String> {
    if !args.is_empty() {
        return Err("usage: list".to_string());
    }
    let mut lines = vec![format!("workflows={}", COMMANDS.len())];
    lines.extend(catalog_lines());
    Ok(lines.join("\n"))
}
