use serde::{Deserialize, Serialize};

use crate::utils::validation::ValidationError;

pub const DEFAULT_KNOWN_TIMERS: [&str; 4] = ["Countdown Ibadah", "PAW", "Khotbah", "Ministry Time"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Invalid theme: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub poll_interval_ms: u64,
    pub known_timers: Vec<String>,
    pub log_level: String,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:1025".to_string(),
            poll_interval_ms: 500,
            known_timers: DEFAULT_KNOWN_TIMERS.iter().map(|s| s.to_string()).collect(),
            log_level: "info".to_string(),
            theme: Theme::Light,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        crate::utils::validation::validate_api_url(&self.api_url)?;

        if self.poll_interval_ms == 0 {
            return Err(ValidationError::InvalidSetting {
                field: "poll_interval_ms".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if let Some(blank) = self.known_timers.iter().find(|name| name.trim().is_empty()) {
            return Err(ValidationError::InvalidSetting {
                field: "known_timers".to_string(),
                reason: format!("timer names cannot be blank (got {:?})", blank),
            }
            .into());
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "Log level must be one of: {}",
                valid_levels.join(", ")
            ));
        }

        Ok(())
    }

    /// Update one setting from its string form, as used by `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "api_url" => self.api_url = value.trim_end_matches('/').to_string(),
            "poll_interval_ms" => {
                self.poll_interval_ms = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("poll_interval_ms must be a whole number of milliseconds"))?;
            }
            "known_timers" => {
                self.known_timers = value
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect();
            }
            "log_level" => self.log_level = value.to_lowercase(),
            "theme" => self.theme = value.parse()?,
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.known_timers.len(), 4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api_url = "localhost:1025".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.known_timers.push("  ".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();
        config.set("api_url", "http://10.0.0.5:50001/").unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:50001");

        config.set("known_timers", "Intro, Sermon ,").unwrap();
        assert_eq!(config.known_timers, vec!["Intro", "Sermon"]);

        config.set("theme", "dark").unwrap();
        assert_eq!(config.theme, Theme::Dark);

        assert!(config.set("poll_interval_ms", "fast").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("api_url = \"http://192.168.1.20:1025\"\n").unwrap();
        assert_eq!(config.api_url, "http://192.168.1.20:1025");
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.theme, Theme::Light);
    }
}
