//! Integration tests for the instance catalog loader.

use std::io::Write;

use tempfile::NamedTempFile;
use timebridge_infra::config;

#[test]
fn loads_catalog_from_toml_file() {
    let toml_content = r#"
[instances.acme-a]
base_url = "https://acme-a.example.com/api/v1"
api_key = "key-a"

[instances.acme-b]
base_url = "https://acme-b.example.com/api/v1"
api_key = "key-b"
"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("Failed to load config from TOML file");

    assert_eq!(config.instances.len(), 2);

    let acme_a = config.instance("acme-a").expect("acme-a missing");
    assert_eq!(acme_a.base_url, "https://acme-a.example.com/api/v1");
    assert_eq!(acme_a.api_key, "key-a");

    assert!(config.instance("unknown").is_none());
}

#[test]
fn missing_file_is_a_config_error() {
    let result = config::load_from_file(Some("/definitely/not/here.toml".into()));
    assert!(result.is_err());
}

#[test]
fn invalid_toml_is_a_config_error() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(b"instances = 3").expect("Failed to write to temp file");

    let result = config::load_from_file(Some(temp_file.path().to_path_buf()));
    assert!(result.is_err());
}

#[test]
fn api_key_env_override_wins() {
    let toml_content = r#"
[instances.override-me]
base_url = "https://override.example.com/api/v1"
api_key = "from-file"
"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    std::env::set_var("TIMEBRIDGE_API_KEY_OVERRIDE_ME", "from-env");
    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("Failed to load config");
    std::env::remove_var("TIMEBRIDGE_API_KEY_OVERRIDE_ME");

    assert_eq!(config.instance("override-me").map(|i| i.api_key.as_str()), Some("from-env"));
}
