//! Application configuration management.
//!
//! Holds the remote store endpoint and key, the lead webhook, the admin
//! credentials and the advisor API key. Stored at
//! `~/.config/thaitrip/config.json`; any field can be overridden from the
//! environment (after `.env` is loaded by the binary).

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AdminCredentials;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "thaitrip";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const ENV_STORE_URL: &str = "THAITRIP_STORE_URL";
pub const ENV_STORE_KEY: &str = "THAITRIP_STORE_KEY";
pub const ENV_WEBHOOK_URL: &str = "THAITRIP_WEBHOOK_URL";
pub const ENV_ADMIN_USER: &str = "THAITRIP_ADMIN_USER";
pub const ENV_ADMIN_PASS: &str = "THAITRIP_ADMIN_PASS";
pub const ENV_API_KEY: &str = "THAITRIP_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    pub webhook_url: Option<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub advisor_api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config")
        } else {
            Ok(Self::default())
        }
    }

    /// Whether a config file has been written yet
    pub fn exists() -> bool {
        Self::config_path().map(|p| p.exists()).unwrap_or(false)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Override fields from a variable lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut Option<String>); 6] = [
            (ENV_STORE_URL, &mut self.store_url),
            (ENV_STORE_KEY, &mut self.store_key),
            (ENV_WEBHOOK_URL, &mut self.webhook_url),
            (ENV_ADMIN_USER, &mut self.admin_username),
            (ENV_ADMIN_PASS, &mut self.admin_password),
            (ENV_API_KEY, &mut self.advisor_api_key),
        ];
        for (name, field) in fields {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                debug!(var = name, "Config overridden from environment");
                *field = Some(value.trim().to_string());
            }
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Store url and key, when both are configured
    pub fn store_endpoint(&self) -> Option<(&str, &str)> {
        match (non_blank(&self.store_url), non_blank(&self.store_key)) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }

    pub fn has_remote_store(&self) -> bool {
        self.store_endpoint().is_some()
    }

    pub fn webhook(&self) -> Option<&str> {
        non_blank(&self.webhook_url)
    }

    pub fn advisor_key(&self) -> Option<&str> {
        non_blank(&self.advisor_api_key)
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        let defaults = AdminCredentials::default();
        AdminCredentials {
            username: non_blank(&self.admin_username)
                .map(str::to_string)
                .unwrap_or(defaults.username),
            password: non_blank(&self.admin_password)
                .map(str::to_string)
                .unwrap_or(defaults.password),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides_fill_and_replace() {
        let vars: HashMap<&str, &str> = [
            (ENV_STORE_URL, "https://demo.supabase.co"),
            (ENV_STORE_KEY, "anon"),
            (ENV_ADMIN_PASS, "   "),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            admin_password: Some("secret".into()),
            ..Default::default()
        };
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.store_endpoint(), Some(("https://demo.supabase.co", "anon")));
        assert_eq!(config.admin_password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_missing_store_key_means_demo_mode() {
        let config = Config {
            store_url: Some("https://demo.supabase.co".into()),
            store_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_remote_store());
        assert_eq!(config.webhook(), None);
        assert_eq!(config.advisor_key(), None);
    }

    #[test]
    fn test_admin_credentials_default() {
        let config = Config {
            admin_username: Some("owner".into()),
            ..Default::default()
        };
        let creds = config.admin_credentials();
        assert_eq!(creds.username, "owner");
        assert_eq!(creds.password, "admin123");
    }

    #[test]
    fn test_partial_config_file_parses() {
        let config: Config = serde_json::from_str(r#"{"webhook_url":"https://hook"}"#).unwrap();
        assert_eq!(config.webhook(), Some("https://hook"));
        assert!(config.store_url.is_none());
    }
}
