use crate::error::{Result, VillaAdminError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use villa_admin_common::Hydration;

/// Environment variable that overrides the configured server
pub const BASE_URL_ENV: &str = "VILLA_ADMIN_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// `None` waits as long as the server needs (PDF extraction can take 90s)
    pub timeout_seconds: Option<u64>,
    pub hydration: Hydration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: None,
            hydration: Hydration::Deferred,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VillaAdminError::Config("répertoire personnel introuvable".into()))?;
        Ok(home.join(".config").join("villa-admin").join("config.json"))
    }

    /// Server to talk to: command line, then environment, then file
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> Result<String> {
        let env_value = std::env::var(BASE_URL_ENV).ok();
        let raw = cli_override
            .map(str::to_string)
            .or(env_value.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| self.base_url.clone());
        validate_base_url(&raw)
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        self.base_url = validate_base_url(url)?;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(VillaAdminError::Config(format!(
            "URL invalide: {} (attendu http:// ou https://)",
            raw
        )))
    }
}
