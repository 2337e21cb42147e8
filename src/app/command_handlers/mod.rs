use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod doctor;
pub mod init;
pub mod list;
pub mod mcp;
pub mod migrate;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Init => init::cmd_init(&args[1..]),
        CliVerb::Migrate => migrate::cmd_migrate(&args[1..]),
        CliVerb::List => list::cmd_list(&args[1..]),
        CliVerb::Doctor => doctor::cmd_doctor(&args[1..]),
        CliVerb::Config => mcp::cmd_config(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Version => Ok(format!("ccg {}", env!("CARGO_PKG_VERSION"))),
        CliVerb::Unknown => Err(format!(
            "unknown command `{}`; run `ccg help` for usage",
            args[0]
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_prints_help() {
        let help = run_cli(Vec::new()).expect("help");
        assert!(help.contains("Commands:"));
    }

    #[test]
    fn unknown_verbs_are_errors() {
        let err = run_cli(vec!["deploy".to_string()]).expect_err("unknown");
        assert!(err.contains("unknown command `deploy`"));
    }
}
