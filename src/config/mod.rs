pub mod schema;

pub use schema::{KarenConfig, IMGFLIP_DEMO_ACCOUNT};

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Default karen home directory (~/.karen).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".karen"))
        .unwrap_or_else(|| PathBuf::from(".karen"))
}

/// Default config file path (~/.karen/karen.toml).
pub fn default_config_path() -> PathBuf {
    default_home_dir().join("karen.toml")
}

/// Expand a leading `~` in a user-supplied path.
pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<KarenConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read karen config file")?;
        let config: KarenConfig =
            toml::from_str(&contents).context("Failed to parse karen config (TOML)")?;
        Ok(config)
    } else {
        Ok(KarenConfig::default())
    }
}

/// Load config from `path` and overlay the process environment. Called once at startup.
pub fn load_effective_config(path: &Path) -> Result<KarenConfig> {
    let mut config = load_config(path)?;
    config
        .apply_env_with(|key| std::env::var(key).ok())
        .map_err(|e| anyhow!(e))
        .context("Invalid environment configuration")?;
    Ok(config)
}
