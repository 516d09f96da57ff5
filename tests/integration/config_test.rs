//! Configuration loading from the real process environment
//!
//! These tests mutate environment variables, so they run serially.

use pretty_assertions::assert_eq;
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;

use lanshare::backend::server::config::{load_config, CONFIG_PATH_VAR};

const VARS: &[&str] = &[
    CONFIG_PATH_VAR,
    "LANSHARE_PORT",
    "LANSHARE_BIND",
    "LANSHARE_DATA_FILE",
    "LANSHARE_MAX_UPLOAD_MB",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = 8000\nbind_address = \"127.0.0.1\"").unwrap();

    std::env::set_var(CONFIG_PATH_VAR, file.path());
    std::env::set_var("LANSHARE_PORT", "8100");
    std::env::set_var("LANSHARE_DATA_FILE", "/tmp/lanshare-notes.json");
    std::env::set_var("LANSHARE_MAX_UPLOAD_MB", "2");

    let config = load_config();
    clear_env();
    let config = config.unwrap();

    assert_eq!(config.port, 8100);
    assert_eq!(config.bind_address, "127.0.0.1");
    assert_eq!(config.data_file, PathBuf::from("/tmp/lanshare-notes.json"));
    assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
}

#[test]
#[serial]
fn test_invalid_bind_address_fails_validation() {
    clear_env();
    let file = tempfile::NamedTempFile::new().unwrap();
    std::env::set_var(CONFIG_PATH_VAR, file.path());
    std::env::set_var("LANSHARE_BIND", "not-an-address");

    let result = load_config();
    clear_env();

    assert!(result.is_err());
}
