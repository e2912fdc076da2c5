use crate::statics;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User settings, stored as JSON in the platform config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides the record file location.
    pub data_file: Option<PathBuf>,
    /// A TTF/OTF font with Arabic glyphs, registered as a fallback.
    pub ui_font: Option<PathBuf>,
    pub dark_theme: bool,
    pub notify_on_status_change: bool,
    /// `tracing` filter directives, used when RUST_LOG is unset.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            ui_font: None,
            dark_theme: true,
            notify_on_status_change: true,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(statics::APP_DIR_NAME)
            .join(statics::CONFIG_FILE_NAME)
    }

    /// Load from the default location. The app must start even with a broken
    /// config file, so a problem comes back next to the defaults instead of
    /// failing; the caller logs it once logging is up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        Self::load_or_default(&Self::path())
    }

    pub fn load_or_default(path: &Path) -> (Self, Option<anyhow::Error>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Record file location: `JOBTRACK_DATA`, then `data_file`, then the
    /// platform data directory.
    pub fn data_path(&self) -> PathBuf {
        self.data_path_with_env(std::env::var_os(statics::ENV_DATA_FILE).map(PathBuf::from))
    }

    fn data_path_with_env(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(crate::store::Slot::default_path)
    }
}
