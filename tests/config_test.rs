use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::Write;
use tempfile::NamedTempFile;
use univkbd::config::KeyboardConfig;
use univkbd::layouts::DEFAULT_LAYOUT;
use univkbd::reference::REFERENCE_COUNTRY;
use univkbd::KbdError;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    settings: KeyboardConfig,
}

fn parse(args: &[&str]) -> (KeyboardConfig, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("univkbd").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.settings, matches)
}

#[test]
fn test_cli_defaults_match_default_impl() {
    let (settings, _) = parse(&[]);
    assert_eq!(settings, KeyboardConfig::default());
    assert_eq!(settings.reference_country, REFERENCE_COUNTRY);
    assert_eq!(settings.default_layout, DEFAULT_LAYOUT.to_string());
}

#[test]
fn test_load_partial_json_fills_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "keyboards_dir": "/tmp/kbds", "shift_altgr": false }}"#).unwrap();

    let config = KeyboardConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.keyboards_dir, "/tmp/kbds");
    assert!(!config.shift_altgr);
    assert_eq!(config.reference_country, "French");
    assert_eq!(config.default_layout, "qwerty");
}

#[test]
fn test_load_missing_or_broken_file_is_config_error() {
    assert!(matches!(
        KeyboardConfig::load_from_file("/definitely/not/here.json"),
        Err(KbdError::Config(_))
    ));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{ not json").unwrap();
    assert!(matches!(
        KeyboardConfig::load_from_file(file.path()),
        Err(KbdError::Config(_))
    ));
}

#[test]
fn test_explicit_flags_override_file_values() {
    let mut file_config = KeyboardConfig {
        keyboards_dir: "from_file".to_string(),
        default_country: "German".to_string(),
        ..Default::default()
    };

    let (cli, matches) = parse(&["--default-layout", "dvorak", "--shift-altgr", "false"]);
    file_config.merge_from_cli(&cli, &matches);

    assert_eq!(file_config.keyboards_dir, "from_file");
    assert_eq!(file_config.default_country, "German");
    assert_eq!(file_config.default_layout, "dvorak");
    assert!(!file_config.shift_altgr);
}
