//! Layered settings: built-in defaults, an optional TOML file, then
//! `WEATHER_ANOMALY_*` environment variables (`__` separates nested keys,
//! e.g. `WEATHER_ANOMALY_THRESHOLDS__HUMIDITY=30`).

use chrono::NaiveTime;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{ForecastError, Result};
use crate::models::analysis::parse_time;
use crate::utils::constants::*;

/// Deviation limits used by the anomaly detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnomalyThresholds {
    /// |forecast - average| above this flags a temperature anomaly (°C)
    #[validate(range(min = 0.0))]
    pub temperature: f64,

    /// |forecast - average| above this makes it High severity (°C)
    #[validate(range(min = 0.0))]
    pub temperature_high: f64,

    /// |forecast - average| above this flags a humidity anomaly (%)
    #[validate(range(min = 0.0))]
    pub humidity: f64,

    /// |forecast - average| above this flags a wind anomaly (km/h)
    #[validate(range(min = 0.0))]
    pub wind_speed: f64,

    /// Forecast exceeding the average by more than this is High severity (km/h)
    #[validate(range(min = 0.0))]
    pub wind_speed_high: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            temperature: TEMP_ANOMALY_THRESHOLD_C,
            temperature_high: TEMP_HIGH_SEVERITY_THRESHOLD_C,
            humidity: HUMIDITY_ANOMALY_THRESHOLD_PCT,
            wind_speed: WIND_ANOMALY_THRESHOLD_KMH,
            wind_speed_high: WIND_HIGH_SEVERITY_EXCESS_KMH,
        }
    }
}

impl AnomalyThresholds {
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.temperature_high < self.temperature {
            return Err(ForecastError::Config(format!(
                "thresholds.temperature_high ({}) must not be below thresholds.temperature ({})",
                self.temperature_high, self.temperature
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub default_location: String,

    /// `HH:MM`
    pub default_time: String,

    #[validate(nested)]
    pub thresholds: AnomalyThresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            default_time: DEFAULT_TIME.to_string(),
            thresholds: AnomalyThresholds::default(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = AnomalyThresholds::default();

        let mut builder = Config::builder()
            .set_default("default_location", DEFAULT_LOCATION)?
            .set_default("default_time", DEFAULT_TIME)?
            .set_default("thresholds.temperature", defaults.temperature)?
            .set_default("thresholds.temperature_high", defaults.temperature_high)?
            .set_default("thresholds.humidity", defaults.humidity)?
            .set_default("thresholds.wind_speed", defaults.wind_speed)?
            .set_default("thresholds.wind_speed_high", defaults.wind_speed_high)?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(ForecastError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        self.thresholds.check()?;
        self.time()?;
        Ok(())
    }

    pub fn time(&self) -> Result<NaiveTime> {
        parse_time(&self.default_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert!(settings.check().is_ok());
        assert_eq!(settings.thresholds.temperature, 10.0);
        assert_eq!(settings.thresholds.temperature_high, 15.0);
        assert_eq!(settings.thresholds.humidity, 25.0);
        assert_eq!(settings.thresholds.wind_speed, 10.0);
        assert_eq!(settings.thresholds.wind_speed_high, 15.0);
        assert_eq!(settings.time().unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            "default_location = \"Leipzig\"\n\
            default_time = \"08:30\"\n\
            [thresholds]\n\
            humidity = 30.0\n",
        );

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.default_location, "Leipzig");
        assert_eq!(settings.time().unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(settings.thresholds.humidity, 30.0);
        assert_eq!(settings.thresholds.temperature, 10.0);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let file = toml_file("[thresholds]\ntemperature = 20.0\ntemperature_high = 12.0\n");
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ForecastError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let thresholds = AnomalyThresholds {
            humidity: -1.0,
            ..AnomalyThresholds::default()
        };
        assert!(matches!(thresholds.check(), Err(ForecastError::Validation(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(Settings::load(Some(Path::new("/nonexistent/weather.toml"))).is_err());
    }
}
