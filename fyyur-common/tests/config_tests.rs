//! Configuration resolution priority tests
//!
//! These touch process environment variables, so they run serially.

use fyyur_common::config::{resolve_config, ConfigOverrides, ENV_CONFIG, ENV_DATABASE, ENV_PORT};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    std::env::remove_var(ENV_CONFIG);
    std::env::remove_var(ENV_DATABASE);
    std::env::remove_var(ENV_PORT);
    std::env::remove_var(fyyur_common::config::ENV_HOST);
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_toml_values_used_when_no_overrides() {
    clear_env();
    let file = config_file(
        r#"
        database_path = "/tmp/fyyur-from-toml.db"
        port = 6100
        request_timeout_ms = 1500
        "#,
    );

    let config = resolve_config(&ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(config.database_path, PathBuf::from("/tmp/fyyur-from-toml.db"));
    assert_eq!(config.port, 6100);
    assert_eq!(config.request_timeout.as_millis(), 1500);
    assert_eq!(config.bind_address(), "127.0.0.1:6100");
}

#[test]
#[serial]
fn test_environment_overrides_toml() {
    clear_env();
    let file = config_file("database_path = \"/tmp/fyyur-from-toml.db\"\nport = 6100\n");
    std::env::set_var(ENV_DATABASE, "/tmp/fyyur-from-env.db");
    std::env::set_var(ENV_PORT, "6200");

    let config = resolve_config(&ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    })
    .unwrap();
    clear_env();

    assert_eq!(config.database_path, PathBuf::from("/tmp/fyyur-from-env.db"));
    assert_eq!(config.port, 6200);
}

#[test]
#[serial]
fn test_cli_overrides_environment() {
    clear_env();
    std::env::set_var(ENV_DATABASE, "/tmp/fyyur-from-env.db");
    std::env::set_var(ENV_PORT, "6200");

    let config = resolve_config(&ConfigOverrides {
        database_path: Some(PathBuf::from("/tmp/fyyur-from-cli.db")),
        port: Some(6300),
        host: Some("0.0.0.0".to_string()),
        ..Default::default()
    })
    .unwrap();
    clear_env();

    assert_eq!(config.database_path, PathBuf::from("/tmp/fyyur-from-cli.db"));
    assert_eq!(config.port, 6300);
    assert_eq!(config.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_missing_explicit_config_file_is_an_error() {
    clear_env();
    let result = resolve_config(&ConfigOverrides {
        config_file: Some(PathBuf::from("/nonexistent/fyyur/config.toml")),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_port_in_environment_is_an_error() {
    clear_env();
    std::env::set_var(ENV_PORT, "not-a-port");
    let result = resolve_config(&ConfigOverrides {
        database_path: Some(PathBuf::from("/tmp/fyyur.db")),
        ..Default::default()
    });
    clear_env();
    assert!(result.is_err());
}
