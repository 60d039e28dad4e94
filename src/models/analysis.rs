use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::analyzers::{AggregateStats, ConditionFrequency};
use crate::error::{ForecastError, Result};
use crate::models::{Anomaly, ForecastObservation, HistoricalRecord, Severity};
use crate::utils::constants::{DATE_FORMAT, HISTORY_YEARS, TIME_FORMAT};

/// Inputs of one analysis. Only the date drives the simulation; time and
/// location are carried through for labelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,

    #[validate(length(min = 1))]
    pub location: String,
}

impl AnalysisRequest {
    pub fn new(date: NaiveDate, time: NaiveTime, location: impl Into<String>) -> Self {
        Self {
            date,
            time,
            location: location.into(),
        }
    }

    /// Builds a request from raw text fields. A blank or absent date yields
    /// `MissingDate`; anything unparseable yields `InvalidInput`.
    pub fn parse(date: Option<&str>, time: &str, location: &str) -> Result<Self> {
        let date = match date.map(str::trim) {
            None | Some("") => return Err(ForecastError::MissingDate),
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
                ForecastError::invalid_input(format!("Date '{}' is not YYYY-MM-DD: {}", raw, e))
            })?,
        };

        let time = parse_time(time)?;

        let request = Self::new(date, time, location.trim());
        request.validate()?;
        Ok(request)
    }
}

/// Accepts `HH:MM` as well as `HH:MM:SS`.
pub fn parse_time(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| ForecastError::invalid_input(format!("Time '{}' is not HH:MM: {}", raw, e)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub current: ForecastObservation,
    pub history: HistoricalRecord,
    pub statistics: AggregateStats,
    pub condition_frequencies: Vec<ConditionFrequency>,
    pub anomalies: Vec<Anomaly>,
}

impl AnalysisResult {
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.anomalies.iter().map(|a| a.severity).max()
    }

    /// How often the forecast condition appeared in the historical record.
    pub fn insight(&self) -> String {
        let condition = self.current.observation.condition;
        format!(
            "It's forecasted {}, but historically this date has been {} {}/{} times over the last decade in {}.",
            condition,
            condition,
            self.history.condition_count(condition),
            HISTORY_YEARS,
            self.location
        )
    }

    /// One line per result, used by batch output.
    pub fn headline(&self) -> String {
        let current = &self.current.observation;
        let anomalies = match (self.anomalies.len(), self.highest_severity()) {
            (0, _) | (_, None) => "no anomalies".to_string(),
            (1, Some(severity)) => format!("1 anomaly ({})", severity),
            (n, Some(severity)) => format!("{} anomalies (max {})", n, severity),
        };

        format!(
            "{}: {} {}°C, {}% humidity, {} km/h wind - {}",
            self.location, current.condition, current.temperature, current.humidity,
            current.wind_speed, anomalies
        )
    }

    pub fn summary(&self) -> String {
        let current = &self.current;
        let mut out = format!(
            "Current Forecast - {} ({} {})\n\
            - Condition: {}\n\
            - Temperature: {}°C\n\
            - Humidity: {}%\n\
            - Wind Speed: {} km/h\n\
            - Pressure: {} hPa\n\
            - Visibility: {} km\n\
            - Confidence: {}%\n\n\
            Historical Pattern Analysis ({}-{})\n\
            {}\n\n\
            Weather Condition Probability:\n",
            self.location,
            self.date,
            self.time.format(TIME_FORMAT),
            current.observation.condition,
            current.observation.temperature,
            current.observation.humidity,
            current.observation.wind_speed,
            current.pressure,
            current.visibility,
            current.confidence,
            self.history.iter().map(|o| o.year).min().unwrap_or_default(),
            self.history.iter().map(|o| o.year).max().unwrap_or_default(),
            self.statistics.summary(),
        );

        for frequency in &self.condition_frequencies {
            out.push_str(&format!("- {}\n", frequency.summary()));
        }

        out.push_str(&format!("\nStatistical Insight:\n{}\n\n", self.insight()));

        if self.anomalies.is_empty() {
            out.push_str(
                "Pattern Analysis:\nNo significant anomalies detected. The forecasted conditions \
                align well with historical patterns for this date and location.",
            );
        } else {
            out.push_str("Detected Anomalies:");
            for anomaly in &self.anomalies {
                out.push_str(&format!("\n- {}", anomaly));
            }
        }

        out
    }
}
