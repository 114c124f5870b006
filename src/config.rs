//! Configuration management for jiraboard
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{CONFIG_GENERATED, DEFAULT_PAGE_SIZE, PAGE_SIZES};
use crate::entities::View;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `api.base_url`
pub const BASE_URL_ENV: &str = "JIRABOARD_BASE_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the integration backend, without the `/api` suffix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// View opened on startup
    /// Options: "dashboard", "projects", "issues", "audit"
    pub default_view: String,
    /// Initial page size for every table
    pub default_page_size: usize,
    /// Enable mouse support
    pub mouse_enabled: bool,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported spreadsheets are written to.
    /// Empty means the user's download directory, falling back to the current directory.
    pub directory: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to a file
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_view: "dashboard".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            mouse_enabled: true,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ExportConfig {
    /// Resolve the directory exports are written to
    pub fn resolve_directory(&self) -> PathBuf {
        if !self.directory.trim().is_empty() {
            return PathBuf::from(self.directory.trim());
        }
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Config {
    /// Load configuration from file or return defaults, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.apply_base_url_override(&base_url)?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Replace the base URL (deploy-time override) and re-validate
    pub fn apply_base_url_override(&mut self, base_url: &str) -> Result<()> {
        self.api.base_url = base_url.trim().to_string();
        self.validate()
            .with_context(|| format!("Invalid {} value", BASE_URL_ENV))
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("jiraboard.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("jiraboard").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("api.base_url must start with http:// or https://, got '{}'", base_url);
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > 300 {
            anyhow::bail!(
                "api.timeout_secs must be between 1 and 300 seconds, got {}",
                self.api.timeout_secs
            );
        }

        if !PAGE_SIZES.contains(&self.ui.default_page_size) {
            anyhow::bail!(
                "ui.default_page_size must be one of {:?}, got {}",
                PAGE_SIZES,
                self.ui.default_page_size
            );
        }

        if View::parse(&self.ui.default_view).is_none() {
            anyhow::bail!(
                "ui.default_view must be one of dashboard, projects, issues, audit, got '{}'",
                self.ui.default_view
            );
        }

        Ok(())
    }

    /// The view to open on startup
    pub fn default_view(&self) -> View {
        View::parse(&self.ui.default_view).unwrap_or_default()
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# jiraboard Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::ISO_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("jiraboard"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
