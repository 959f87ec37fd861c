//! Env File Loading Tests
//!
//! `AppConfig::load` against real dotenv files on disk. The process
//! environment is shared by every test in this binary, so each test only
//! asserts on variables it can be sure nobody exported beforehand.

use std::io::Write;

use sinaxario::config::{AppConfig, ConfigError, StoreSettings, DB_URL, HTTP_PORT, LOG_FORMAT};
use sinaxario::logging::LogFormat;
use tempfile::NamedTempFile;

fn env_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn preset(names: &[&str]) -> bool {
    names.iter().any(|name| std::env::var(name).is_ok())
}

/// Variables from the file reach the configuration.
#[test]
fn test_load_reads_env_file() {
    if preset(&[DB_URL, HTTP_PORT, LOG_FORMAT]) {
        return;
    }

    let file = env_file(
        "DB_URL=mongodb://127.0.0.1:27017\n\
         HTTP_PORT=9191\n\
         LOG_FORMAT=json\n",
    );

    let config = AppConfig::load(Some(file.path()), false).unwrap();

    match &config.store {
        StoreSettings::Mongo(mongo) => assert_eq!(mongo.uri, "mongodb://127.0.0.1:27017"),
        other => panic!("expected mongo settings, got {:?}", other),
    }
    assert_eq!(config.http.port, 9191);
    assert_eq!(config.log_format, LogFormat::Json);
}

/// An explicitly named file must exist.
#[test]
fn test_missing_explicit_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.env");

    let err = AppConfig::load(Some(&missing), true).unwrap_err();
    assert!(matches!(err, ConfigError::EnvFile(_)));
    assert!(err.to_string().contains("absent.env"));
}
