use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_FEED_URL: &str = "https://interview.switcheo.com/prices.json";
pub const DEFAULT_ICON_TEMPLATE: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/{currency}.svg";
pub const DEFAULT_DELAY_MS: u64 = 1500;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
    #[serde(default = "default_icon_template")]
    pub icon_template: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            url: default_feed_url(),
            icon_template: default_icon_template(),
        }
    }
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_icon_template() -> String {
    DEFAULT_ICON_TEMPLATE.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SwapConfig {
    /// Simulated processing time before a quote is shown.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        SwapConfig {
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl SwapConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub swap: SwapConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "tokswap", "tokswap")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
