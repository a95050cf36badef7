use crate::api::constants::limits;
use crate::api::{CredentialSet, MonitoringConfig};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub credentials: Option<CredentialSet>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_write_batch_size")]
    pub write_batch_size: usize,
    #[serde(default = "default_share_publicly")]
    pub share_publicly: bool,
    #[serde(default = "default_export_title_prefix")]
    pub export_title_prefix: String,
    /// Pause between subscribe calls during an import
    #[serde(default)]
    pub subscribe_interval_ms: u64,
}

fn default_page_size() -> u32 {
    limits::PAGE_SIZE
}

fn default_max_pages() -> usize {
    limits::MAX_PAGES
}

fn default_write_batch_size() -> usize {
    limits::WRITE_BATCH_SIZE
}

fn default_share_publicly() -> bool {
    true
}

fn default_export_title_prefix() -> String {
    "YouTube Subscriptions".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            write_batch_size: default_write_batch_size(),
            share_publicly: default_share_publicly(),
            export_title_prefix: default_export_title_prefix(),
            subscribe_interval_ms: 0,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("subsheets")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".subsheets")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        Self::from_toml(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        debug!(
            "Loaded config (credentials stored: {})",
            config.credentials.is_some()
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn set_credentials(&mut self, credentials: CredentialSet) -> Result<()> {
        info!("Storing credentials in config");
        self.credentials = Some(credentials);
        self.save()
    }

    pub fn clear_credentials(&mut self) -> Result<()> {
        if self.credentials.take().is_none() {
            warn!("No stored credentials to clear");
            anyhow::bail!("No credentials stored");
        }

        info!("Cleared stored credentials");
        self.save()
    }
}
