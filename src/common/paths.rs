use anyhow::{Context, Result};
use std::path::PathBuf;

/// Name of the directory used under the platform config and data dirs
const APP_DIR: &str = "usermode";

/// Get the usermode config directory
pub fn usermode_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join(APP_DIR);

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("creating config directory at {}", config_dir.display()))?;

    Ok(config_dir)
}

/// Get the usermode data directory
pub fn usermode_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
            home.join(".local/share")
        })
        .join(APP_DIR)
}

/// Default location of the user store when nothing else is configured
pub fn default_store_path() -> PathBuf {
    usermode_data_dir().join("users.json")
}

/// Path of the TOML config file
pub fn config_file_path() -> Result<PathBuf> {
    Ok(usermode_config_dir()?.join("usermode.toml"))
}
