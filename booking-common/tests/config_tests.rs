//! Tests for bootstrap configuration resolution
//!
//! Uses serial_test: tests that resolve through the platform default config
//! file location must not race with each other.

use std::io::Write;
use std::path::PathBuf;

use booking_common::config::{load_toml_config, BootstrapConfig, CompiledDefaults, Overrides};
use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_compiled_defaults_for_current_platform() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(defaults.database_path.ends_with("booking.db"));
    assert_eq!(defaults.host, "127.0.0.1");
    assert_eq!(defaults.port, 5000);
    assert_eq!(defaults.log_level, "info");
}

#[test]
fn test_load_full_toml() {
    let file = config_file(
        r#"
database_path = "/srv/booking/listings.db"
host = "0.0.0.0"
port = 8000

[logging]
level = "debug"
"#,
    );

    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config.database_path, Some(PathBuf::from("/srv/booking/listings.db")));
    assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(config.port, Some(8000));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_load_partial_toml_defaults_logging() {
    let file = config_file("port = 6000\n");

    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config.port, Some(6000));
    assert!(config.database_path.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_malformed_toml_is_error() {
    let file = config_file("port = \"not a number\"\n");
    assert!(load_toml_config(file.path()).is_err());
}

#[test]
#[serial]
fn test_resolve_uses_config_file_values() {
    let file = config_file("host = \"0.0.0.0\"\nport = 7000\n");

    let config = BootstrapConfig::resolve(&Overrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    });

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 7000);
    assert_eq!(config.database_path, CompiledDefaults::for_current_platform().database_path);
}

#[test]
#[serial]
fn test_overrides_beat_config_file() {
    let file = config_file("port = 7000\ndatabase_path = \"/tmp/from-toml.db\"\n");

    let config = BootstrapConfig::resolve(&Overrides {
        port: Some(9100),
        database_path: Some(PathBuf::from("/tmp/from-cli.db")),
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    });

    assert_eq!(config.port, 9100);
    assert_eq!(config.database_path, PathBuf::from("/tmp/from-cli.db"));
}

#[test]
#[serial]
fn test_missing_config_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();

    let config = BootstrapConfig::resolve(&Overrides {
        config_file: Some(dir.path().join("absent.toml")),
        ..Default::default()
    });

    let defaults = CompiledDefaults::for_current_platform();
    assert_eq!(config.host, defaults.host);
    assert_eq!(config.port, defaults.port);
}

#[test]
#[serial]
fn test_malformed_config_file_falls_back_to_defaults() {
    let file = config_file("this is = = not toml");

    let config = BootstrapConfig::resolve(&Overrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    });

    assert_eq!(config.port, CompiledDefaults::PORT);
}
