//! Config file loading and validation.
//!
//! One JSON5 file, read from an explicit path or the default user location.
//! A missing default file means defaults; a present but malformed or invalid
//! file is an error.

use crate::{CasefileConfig, ConfigError};
use directories::UserDirs;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename.
const DEFAULT_CONFIG_FILE: &str = "casefile.json5";
/// Default config directory under the user's home.
const DEFAULT_CONFIG_DIR: &str = ".casefile";

/// Load config from the default user location, falling back to defaults when
/// no file exists.
pub fn load_default() -> Result<CasefileConfig, ConfigError> {
    match default_config_path() {
        Some(path) if path.exists() => load_file(&path),
        _ => {
            debug!("no config file found, using defaults");
            Ok(CasefileConfig::default())
        }
    }
}

/// Load and validate config from an explicit file.
pub fn load_file(path: &Path) -> Result<CasefileConfig, ConfigError> {
    debug!("loading config (path={})", path.display());
    let contents = fs::read_to_string(path)?;
    let value: Value = json5::from_str(&contents)?;
    let config: CasefileConfig = serde_json::from_value(value)?;
    validate(&config)?;
    Ok(config)
}

/// Validate a config regardless of where it came from.
pub fn validate(config: &CasefileConfig) -> Result<(), ConfigError> {
    let file = &config.storage.database_file;
    if file.is_empty() {
        return Err(ConfigError::InvalidField {
            path: "storage.database_file".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if file.contains('/') || file.contains('\\') {
        return Err(ConfigError::InvalidField {
            path: "storage.database_file".to_string(),
            message: "must be a bare file name".to_string(),
        });
    }
    Ok(())
}

/// Default config path under the home directory.
fn default_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("casefile.json5");
        let mut file = fs::File::create(&path).expect("create config");
        file.write_all(contents.as_bytes()).expect("write config");
        path
    }

    #[test]
    fn loads_a_json5_file_with_comments() {
        let dir = tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            r#"{
                // storage locations
                storage: {
                    data_dir: "/srv/casefile",
                    database_file: "cases.sqlite3",
                },
            }"#,
        );

        let config = load_file(&path).expect("load");
        assert_eq!(config.storage.data_dir.as_deref(), Some("/srv/casefile"));
        assert_eq!(config.storage.database_file, "cases.sqlite3");
        assert_eq!(config.storage.photo_dir, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = write_config(&dir, "{}");
        let config = load_file(&path).expect("load");
        assert_eq!(config, CasefileConfig::default());
    }

    #[test]
    fn rejects_a_database_file_with_separators() {
        let dir = tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            r#"{ storage: { database_file: "../elsewhere.sqlite3" } }"#,
        );
        assert!(matches!(
            load_file(&path),
            Err(ConfigError::InvalidField { path, .. }) if path == "storage.database_file"
        ));
    }

    #[test]
    fn rejects_an_empty_database_file() {
        let config = CasefileConfig::builder().database_file("").build();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn malformed_json5_is_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = write_config(&dir, "{ storage: ");
        assert!(matches!(load_file(&path), Err(ConfigError::ParseFailed(_))));
    }
}
