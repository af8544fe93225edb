use crate::models::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured API base URL.
pub const API_URL_ENV: &str = "PROPRESENTER_API_URL";

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let app_dir = config_dir.join(".timer-dashboard");
    std::fs::create_dir_all(&app_dir)?;

    Ok(app_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// Load the config from `path`, or the default location when `None`.
/// A missing file is created with defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    if config_path.exists() {
        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse config file: {}. Please check the file format.",
                e
            )
        })?;

        config.validate()?;
        Ok(config)
    } else {
        let default_config = Config::default();
        save_config(&default_config, Some(&config_path))?;
        Ok(default_config)
    }
}

pub fn save_config(config: &Config, path: Option<&Path>) -> Result<()> {
    config.validate()?;

    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&config_path, contents.trim_end().to_string() + "\n")
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(())
}

/// Apply the `--api-url` flag and the environment override on top of the
/// file. The flag wins over the environment.
pub fn apply_overrides(mut config: Config, flag: Option<&str>, env: Option<&str>) -> Result<Config> {
    if let Some(url) = flag.or(env).filter(|url| !url.trim().is_empty()) {
        config.api_url = crate::utils::validation::validate_api_url(url)?;
    }
    Ok(config)
}
