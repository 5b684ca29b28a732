use acr_dump::config::{Config, ConfigError};
use acr_nema::{ByteOrder, ErrorPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(toml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(toml.as_bytes()).expect("write config");
    file.flush().expect("flush");
    file
}

#[test]
fn test_load_without_path_gives_defaults() {
    let config = Config::load(None).expect("defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
        [logging]
        log_level = "info"

        [decode]
        byte_order = "little"
        policy = "tolerant"
        max_group = 16
        "#,
    );

    let config = Config::load(Some(file.path())).expect("config should load");
    assert_eq!(config.logging.log_level, "info");
    assert_eq!(config.decode.byte_order, Some(ByteOrder::Little));
    assert_eq!(config.decode.policy, ErrorPolicy::Tolerant);
    assert_eq!(config.decode.max_group, 16);
}

#[test]
fn test_missing_file_is_reported() {
    let result = Config::load(Some(std::path::Path::new("/nonexistent/acr-dump.toml")));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_log_file_requires_path() {
    let file = config_file(
        r#"
        [logging]
        log_to_file = true
        log_file_path = ""
        "#,
    );
    assert!(matches!(
        Config::load(Some(file.path())),
        Err(ConfigError::MissingLogFile)
    ));
}

#[test]
fn test_invalid_dump_options_rejected() {
    let file = config_file(
        r#"
        [dump]
        max_values = 0
        "#,
    );
    assert!(matches!(
        Config::load(Some(file.path())),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_malformed_toml_rejected() {
    let file = config_file("[decode\nmax_group = ");
    assert!(matches!(
        Config::load(Some(file.path())),
        Err(ConfigError::Parse(_))
    ));
}
