//! # regio-config
//!
//! Layered configuration loading for regio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REGIO_*` prefix, `__` as separator)
//! 2. Project-level `.regio/config.toml`
//! 3. User-level `~/.config/regio/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REGIO_REMOTE__BASE_URL` -> `remote.base_url`,
//! `REGIO_STORE__PATH` -> `store.path`, and so on.
//!
//! # Usage
//!
//! ```no_run
//! use regio_config::RegioConfig;
//!
//! let config = RegioConfig::load().expect("config");
//! println!("fetching from {}", config.remote.base_url);
//! ```

mod error;
mod general;
mod remote;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use remote::RemoteConfig;
pub use store::{IN_MEMORY, StoreConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegioConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RegioConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// `.env` files are not read here; the binary loads them before calling this.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".regio/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("REGIO_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.remote.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("regio").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RegioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.root_title, "China");
        assert!(config.store.path.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: RegioConfig = RegioConfig::figment().extract()?;
            assert_eq!(config.remote.timeout_secs, 10);
            Ok(())
        });
    }
}
