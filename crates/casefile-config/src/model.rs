//! Configuration schema for Casefile.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default database file name inside the data directory.
const DEFAULT_DATABASE_FILE: &str = "casefile.sqlite3";
/// Default data directory name under the user's home.
const DEFAULT_DATA_DIR: &str = ".casefile";
/// Photo directory name inside the data directory when not overridden.
const DEFAULT_PHOTO_DIR: &str = "photos";

/// Root config for a Casefile process.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CasefileConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the record database and photo files live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the database and, by default, the photos. Defaults
    /// to `~/.casefile`.
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Database file name inside the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,
    /// Photo directory override. Defaults to `<data_dir>/photos`.
    #[serde(default)]
    pub photo_dir: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: default_database_file(),
            photo_dir: None,
        }
    }
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

impl CasefileConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> CasefileConfigBuilder {
        CasefileConfigBuilder::new()
    }

    /// Effective data directory, configured or defaulted.
    pub fn data_dir(&self) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        }
    }

    /// Absolute-by-configuration path of the record database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.database_file)
    }

    /// Effective photo directory, configured or `<data_dir>/photos`.
    pub fn photo_dir(&self) -> PathBuf {
        match &self.storage.photo_dir {
            Some(dir) => PathBuf::from(dir),
            None => self.data_dir().join(DEFAULT_PHOTO_DIR),
        }
    }
}

fn default_data_dir() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        return dirs.home_dir().join(DEFAULT_DATA_DIR);
    }
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Builder for assembling a `CasefileConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct CasefileConfigBuilder {
    config: CasefileConfig,
}

impl CasefileConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: CasefileConfig::default(),
        }
    }

    /// Set the data directory.
    pub fn data_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.storage.data_dir = Some(dir.into());
        self
    }

    /// Set the database file name.
    pub fn database_file(mut self, file: impl Into<String>) -> Self {
        self.config.storage.database_file = file.into();
        self
    }

    /// Set the photo directory.
    pub fn photo_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.storage.photo_dir = Some(dir.into());
        self
    }

    /// Finish building the config.
    pub fn build(self) -> CasefileConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paths_resolve_under_the_configured_data_dir() {
        let config = CasefileConfig::builder()
            .data_dir("/srv/casefile")
            .database_file("records.sqlite3")
            .build();
        assert_eq!(
            config.database_path(),
            PathBuf::from("/srv/casefile/records.sqlite3")
        );
        assert_eq!(config.photo_dir(), PathBuf::from("/srv/casefile/photos"));
    }

    #[test]
    fn photo_dir_override_wins() {
        let config = CasefileConfig::builder()
            .data_dir("/srv/casefile")
            .photo_dir("/mnt/photos")
            .build();
        assert_eq!(config.photo_dir(), PathBuf::from("/mnt/photos"));
    }

    #[test]
    fn default_database_file_name_is_applied() {
        let config = CasefileConfig::default();
        assert_eq!(config.storage.database_file, "casefile.sqlite3");
    }
}
