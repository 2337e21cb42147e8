use crate::setup::env::InstallEnv;

pub fn resolve_env(install_dir: Option<&str>) -> Result<InstallEnv, String> {
    InstallEnv::from_process(install_dir).map_err(|e| e.to_string())
}

/// Value following the flag at `index`, or a usage error naming the flag.
pub fn flag_value<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str, String> {
    args.get(index + 1)
        .map(String::as_str)
        .filter(|value| !value.starts_with("--"))
        .ok_or_else(|| format!("{flag} requires a value"))
}

/// Parses argument lists that accept nothing but `--install-dir <path>`.
pub fn parse_install_dir_only(args: &[String], usage: &str) -> Result<Option<String>, String> {
    let mut install_dir = None;
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--install-dir" => {
                install_dir = Some(flag_value(args, index, "--install-dir")?.to_string());
                index += 1;
            }
            other => return Err(format!("unexpected argument `{other}`\nusage: {usage}")),
        }
        index += 1;
    }
    Ok(install_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn flag_value_rejects_missing_and_flag_like_values() {
        let list = args(&["--install-dir", "--force"]);
        assert!(flag_value(&list, 0, "--install-dir").is_err());
        assert!(flag_value(&args(&["--install-dir"]), 0, "--install-dir").is_err());
        assert_eq!(
            flag_value(&args(&["--install-dir", "/x"]), 0, "--install-dir"),
            Ok("/x")
        );
    }

    #[test]
    fn install_dir_only_rejects_other_arguments() {
        assert_eq!(
            parse_install_dir_only(&args(&["--install-dir", "/opt/c"]), "migrate"),
            Ok(Some("/opt/c".to_string()))
        );
        assert_eq!(parse_install_dir_only(&[], "migrate"), Ok(None));
        let err = parse_install_dir_only(&args(&["--force"]), "migrate").expect_err("unknown");
        assert!(err.contains("usage: migrate"));
    }
}
