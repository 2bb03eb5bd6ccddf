//! Configuration loading and management.
//!
//! Loads configuration from embedded config.toml with environment variable overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::page::RenderFormat;
use crate::widgets::format;

/// Embedded configuration file content.
const CONFIG_TOML: &str = include_str!("../config.toml");

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub page: PageConfig,
    pub clock: ClockConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
}

/// Element ids and marker class the widgets act on.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub sidebar_id: String,
    pub marker_class: String,
    pub clock_id: String,
    /// When false the markup has no sidebar element.
    #[serde(default = "default_true")]
    pub render_sidebar: bool,
    /// When false the markup has no clock element.
    #[serde(default = "default_true")]
    pub render_clock: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    pub locale: String,
    /// strftime pattern that replaces the locale rendering when set.
    #[serde(default)]
    pub pattern: Option<String>,
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub format: RenderFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: String,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from embedded config.toml with environment variable overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_toml(CONFIG_TOML).context("Failed to parse embedded config.toml")?;

        config
            .apply_overrides(|key| env::var(key).ok())
            .context("Invalid environment override")?;

        config.validate()?;

        Ok(config)
    }

    /// Parse a configuration document without applying overrides.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup("NEXPANEL_LOCALE") {
            self.clock.locale = locale;
        }

        if let Some(pattern) = lookup("NEXPANEL_TIME_PATTERN") {
            self.clock.pattern = Some(pattern);
        }

        if let Some(interval) = lookup("NEXPANEL_INTERVAL_MS") {
            self.clock.interval_ms = interval.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "NEXPANEL_INTERVAL_MS",
                reason: format!("'{}' is not a whole number of milliseconds", interval),
            })?;
        }

        if let Some(render) = lookup("NEXPANEL_RENDER") {
            self.render.format = render.parse()?;
        }

        if let Some(log_level) = lookup("RUST_LOG") {
            self.logging.level = log_level;
        }

        Ok(())
    }

    /// Validate ids, interval, and locale.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_token("page.sidebar_id", &self.page.sidebar_id)?;
        check_token("page.marker_class", &self.page.marker_class)?;
        check_token("page.clock_id", &self.page.clock_id)?;

        if self.clock.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "clock.interval_ms",
                reason: "must be greater than zero".into(),
            });
        }

        format::from_config(&self.clock)?;

        Ok(())
    }
}

impl ClockConfig {
    /// Tick interval of the clock.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn check_token(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid {
            key,
            reason: "must not be empty".into(),
        });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("'{}' contains whitespace", value),
        });
    }
    Ok(())
}
