//! Time formatting policies for the clock.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveTime;
use std::fmt::{self, Write};
use std::sync::Arc;

use crate::config::ClockConfig;
use crate::error::ConfigError;

/// Turns a wall-clock time into the text shown on the page.
pub trait TimeFormat: Send + Sync + fmt::Debug {
    fn format(&self, time: NaiveTime) -> String;
}

/// Built-in locale conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleTimeFormat {
    /// Spanish (Colombia): two-digit hour and minute, 24-hour clock.
    EsCo,
}

impl LocaleTimeFormat {
    /// Look up a locale by its tag, ignoring case.
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "es-co" | "es_co" => Ok(Self::EsCo),
            _ => Err(ConfigError::UnknownLocale(tag.to_string())),
        }
    }

    #[allow(dead_code)]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::EsCo => "es-CO",
        }
    }
}

impl TimeFormat for LocaleTimeFormat {
    fn format(&self, time: NaiveTime) -> String {
        match self {
            Self::EsCo => time.format("%H:%M").to_string(),
        }
    }
}

/// Renders with a strftime pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTimeFormat {
    pattern: String,
}

impl PatternTimeFormat {
    /// Create a pattern format. The pattern must only use time fields.
    pub fn new(pattern: impl Into<String>) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        let invalid = |reason: String| ConfigError::Invalid {
            key: "clock.pattern",
            reason,
        };

        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(invalid(format!("'{}' is not a valid strftime pattern", pattern)));
        }

        // Date fields cannot be rendered from a bare time.
        let mut probe = String::new();
        if write!(probe, "{}", NaiveTime::default().format(&pattern)).is_err() {
            return Err(invalid(format!("'{}' uses fields other than time", pattern)));
        }

        Ok(Self { pattern })
    }
}

impl TimeFormat for PatternTimeFormat {
    fn format(&self, time: NaiveTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", time.format(&self.pattern)).is_err() {
            out.clear();
        }
        out
    }
}

/// Select the formatting policy for a clock configuration.
///
/// The locale is checked even when a pattern takes precedence.
pub fn from_config(config: &ClockConfig) -> Result<Arc<dyn TimeFormat>, ConfigError> {
    let locale = LocaleTimeFormat::from_tag(&config.locale)?;
    match &config.pattern {
        Some(pattern) => Ok(Arc::new(PatternTimeFormat::new(pattern.as_str())?)),
        None => Ok(Arc::new(locale)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_es_co_is_24_hour_without_seconds() {
        let format = LocaleTimeFormat::EsCo;
        assert_eq!(format.format(at(14, 5, 0)), "14:05");
        assert_eq!(format.format(at(9, 59, 59)), "09:59");
        assert_eq!(format.format(at(0, 0, 0)), "00:00");
        assert_eq!(format.format(at(23, 59, 59)), "23:59");
    }

    #[test]
    fn test_locale_tags() {
        assert_eq!(LocaleTimeFormat::from_tag("es-CO").unwrap(), LocaleTimeFormat::EsCo);
        assert_eq!(LocaleTimeFormat::from_tag("ES-co").unwrap().tag(), "es-CO");
        assert!(matches!(
            LocaleTimeFormat::from_tag("en-US"),
            Err(ConfigError::UnknownLocale(tag)) if tag == "en-US"
        ));
    }

    #[test]
    fn test_pattern_format() {
        let format = PatternTimeFormat::new("%H:%M:%S").unwrap();
        assert_eq!(format.format(at(14, 5, 9)), "14:05:09");

        assert!(PatternTimeFormat::new("%Q").is_err());
        assert!(PatternTimeFormat::new("%Y-%m-%d").is_err());
    }

    #[test]
    fn test_from_config() {
        let mut config = ClockConfig {
            locale: "es-CO".into(),
            pattern: None,
            interval_ms: 1000,
        };
        assert_eq!(from_config(&config).unwrap().format(at(14, 5, 0)), "14:05");

        config.pattern = Some("%H.%M".into());
        assert_eq!(from_config(&config).unwrap().format(at(14, 5, 0)), "14.05");

        config.locale = "fr-FR".into();
        assert!(from_config(&config).is_err());
    }
}
