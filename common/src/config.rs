use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// ShopChat configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopChatConfig {
    /// Base URL of the support backend (without the `/chat` suffix)
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// Where tracing output goes; the terminal belongs to the TUI
    pub log_path: Option<PathBuf>,
}

impl Default for ShopChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            log_path: None,
        }
    }
}

impl ShopChatConfig {
    /// Directory holding config.json and the default log file
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))?
            .join("shopchat");
        Ok(dir)
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load configuration from the user config directory, then apply
    /// `SHOPCHAT_ENDPOINT` / `SHOPCHAT_LOG_PATH`.
    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path).await?;
        config.apply_overrides(
            std::env::var("SHOPCHAT_ENDPOINT").ok(),
            std::env::var("SHOPCHAT_LOG_PATH").ok().map(PathBuf::from),
        );
        Ok(config)
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when it does not exist.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: ShopChatConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, endpoint: Option<String>, log_path: Option<PathBuf>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().trim_end_matches('/').to_string();
        }
        if let Some(path) = log_path.filter(|p| !p.as_os_str().is_empty()) {
            self.log_path = Some(path);
        }
    }

    /// Configured log path, or `shopchat.log` next to the config file
    pub fn resolved_log_path(&self) -> Result<PathBuf> {
        match &self.log_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("shopchat.log")),
        }
    }
}
