use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{flog_debug, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Theme applied before the first command runs.
    pub theme: Option<String>,
    /// Fixed seed for fortunes and meltdown noise. Random when unset.
    pub seed: Option<u64>,
    /// Ignore the "has booted" flag and always play the full boot log.
    #[serde(default)]
    pub always_full_boot: bool,
    /// Portfolio TOML used instead of the embedded one.
    pub content: Option<String>,
}

impl Config {
    pub fn folio_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".folio"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::folio_dir()?.join("folio.toml"))
    }

    /// Where exported résumés are written.
    pub fn export_dir() -> Result<PathBuf> {
        Ok(Self::folio_dir()?.join("export"))
    }

    pub fn content_path(&self) -> Option<PathBuf> {
        self.content.as_deref().map(expand_tilde)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        flog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            flog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        flog_debug!(
            "Config loaded: theme={:?}, seed={:?}, always_full_boot={}, content={:?}",
            config.theme,
            config.seed,
            config.always_full_boot,
            config.content
        );
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                flog_debug!("Creating config directory {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        flog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
