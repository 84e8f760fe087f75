//! User settings for LedgerPulse
//!
//! Manages the preferences that shape period resolution and output: the
//! first day of the week, the default reporting period, and formatting.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::EngineError;
use crate::models::ReportingPeriod;

/// User settings for LedgerPulse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// First day of weekly periods
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,

    /// Reporting period used when none is given
    #[serde(default)]
    pub default_period: ReportingPeriod,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            week_start: default_week_start(),
            default_period: ReportingPeriod::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Setting names accepted by [`Settings::set`]
    pub const KEYS: [&'static str; 4] =
        ["week_start", "default_period", "currency_symbol", "date_format"];

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, EngineError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EngineError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EngineError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            validate_date_format(&settings.date_format)?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), EngineError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            EngineError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EngineError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Look up a setting by name, rendered as text
    pub fn get(&self, key: &str) -> Result<String, EngineError> {
        match key {
            "week_start" => Ok(self.week_start.to_string()),
            "default_period" => Ok(self.default_period.to_string()),
            "currency_symbol" => Ok(self.currency_symbol.clone()),
            "date_format" => Ok(self.date_format.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a setting by name from text
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        match key {
            "week_start" => {
                self.week_start = value.trim().parse().map_err(|_| {
                    EngineError::Config(format!("'{}' is not a day of the week", value))
                })?;
            }
            "default_period" => {
                self.default_period = value.parse()?;
            }
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                validate_date_format(value)?;
                self.date_format = value.to_string();
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// Check that `format` is a strftime pattern that can render a calendar date.
///
/// Unknown specifiers and time-of-day fields both fail when a `NaiveDate`
/// is formatted, so they are rejected here.
pub fn validate_date_format(format: &str) -> Result<(), EngineError> {
    let invalid = || EngineError::Config(format!("'{}' is not a usable date format", format));

    if format.trim().is_empty() {
        return Err(EngineError::Config("date format cannot be empty".into()));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let sample = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or_else(invalid)?;
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).map_err(|_| invalid())?;

    Ok(())
}

fn unknown_key(key: &str) -> EngineError {
    EngineError::Config(format!(
        "unknown setting '{}' (expected one of: {})",
        key,
        Settings::KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.week_start(), Weekday::Mon);
        assert_eq!(settings.default_period, ReportingPeriod::Monthly);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());

        let mut settings = Settings::default();
        settings.set("week_start", "sunday").unwrap();
        settings.set("default_period", "Weekly").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.week_start(), Weekday::Sun);
        assert_eq!(loaded.default_period, ReportingPeriod::Weekly);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.week_start(), Weekday::Mon);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("week_start", "someday"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            settings.set("default_period", "hourly"),
            Err(EngineError::UnknownPeriod(_))
        ));
        assert!(matches!(settings.set("colour", "red"), Err(EngineError::Config(_))));
        assert_eq!(settings.get("week_start").unwrap(), "Mon");
    }

    #[test]
    fn test_set_rejects_unusable_date_formats() {
        let mut settings = Settings::default();
        for bad in ["%Q", "%H:%M", "   ", "%"] {
            assert!(
                matches!(settings.set("date_format", bad), Err(EngineError::Config(_))),
                "accepted {bad:?}"
            );
        }
        assert_eq!(settings.date_format, "%Y-%m-%d");

        settings.set("date_format", "%d/%m/%Y").unwrap();
        let sample = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(sample.format(&settings.date_format).to_string(), "05/03/2024");
    }

    #[test]
    fn test_bad_date_format_on_disk_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(EngineError::Config(_))
        ));
    }
}
