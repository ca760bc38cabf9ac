//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_root_title() -> String {
    "China".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Title shown above the province list.
    #[serde(default = "default_root_title")]
    pub root_title: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            root_title: default_root_title(),
        }
    }
}
