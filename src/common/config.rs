use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use super::paths;

/// Environment variable that overrides the configured store path
pub const STORE_ENV: &str = "USERMODE_STORE";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Location of the user store. Falls back to the data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
    /// Also create the home directory when adding a user
    #[serde(default)]
    pub create_home: bool,
}

impl Config {
    /// Load the config from disk. If the config file does not exist,
    /// create a default config file and return the default.
    pub fn load() -> Result<Config> {
        let cfg_path = paths::config_file_path()?;
        Self::load_from(&cfg_path)
    }

    pub fn load_from(cfg_path: &Path) -> Result<Config> {
        if !cfg_path.exists() {
            let default = Config::default();
            default.save_to(cfg_path)?;
            return Ok(default);
        }
        let s = fs::read_to_string(cfg_path)
            .with_context(|| format!("reading config {}", cfg_path.display()))?;
        let c: Config = toml::from_str(&s)
            .with_context(|| format!("parsing config {}", cfg_path.display()))?;
        Ok(c)
    }

    pub fn save_to(&self, cfg_path: &Path) -> Result<()> {
        if let Some(parent) = cfg_path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }
        let toml = toml::to_string_pretty(self).context("serializing config to toml")?;
        fs::write(cfg_path, toml)
            .with_context(|| format!("writing config to {}", cfg_path.display()))?;
        Ok(())
    }

    /// Pick the store path: explicit flag, then environment, then config, then default
    pub fn resolve_store_path(&self, flag: Option<&Path>, env: Option<&str>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        if let Some(env) = env.filter(|v| !v.trim().is_empty()) {
            return PathBuf::from(env);
        }
        self.store_path
            .clone()
            .unwrap_or_else(paths::default_store_path)
    }
}
