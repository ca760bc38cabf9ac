//! Local region store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Path value that selects an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database file path. Empty means `<data_dir>/regio/regions.db`;
    /// `:memory:` keeps the cache for the lifetime of the process only.
    #[serde(default)]
    pub path: String,
}

impl StoreConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// The path to open, with the platform default filled in.
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.path.is_empty() {
            return Ok(PathBuf::from(&self.path));
        }
        dirs::data_dir()
            .map(|dir| dir.join("regio").join("regions.db"))
            .ok_or(ConfigError::NoDataDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = StoreConfig {
            path: "/tmp/regions.db".into(),
        };
        assert_eq!(
            config.resolved_path().unwrap(),
            PathBuf::from("/tmp/regions.db")
        );
        assert!(!config.is_in_memory());
    }

    #[test]
    fn memory_path_is_passed_through() {
        let config = StoreConfig {
            path: IN_MEMORY.into(),
        };
        assert!(config.is_in_memory());
        assert_eq!(config.resolved_path().unwrap(), PathBuf::from(":memory:"));
    }

    #[test]
    fn empty_path_defaults_under_data_dir() {
        let config = StoreConfig::default();
        if let Ok(path) = config.resolved_path() {
            assert!(path.ends_with("regio/regions.db"));
        }
    }
}
