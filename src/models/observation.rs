use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Condition;

/// Measurements shared by every synthesized sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub condition: Condition,

    /// Degrees Celsius
    pub temperature: f64,

    /// Relative humidity, percent
    #[validate(range(max = 100))]
    pub humidity: u8,

    /// km/h
    #[validate(range(min = 0.0))]
    pub wind_speed: f64,
}

impl Observation {
    pub fn new(condition: Condition, temperature: f64, humidity: u8, wind_speed: f64) -> Self {
        Self {
            condition,
            temperature,
            humidity,
            wind_speed,
        }
    }
}

/// The forecast for the target date: the shared measurements plus the
/// forecast-only fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForecastObservation {
    #[serde(flatten)]
    #[validate(nested)]
    pub observation: Observation,

    /// hPa
    pub pressure: f64,

    /// km
    #[validate(range(min = 0.0))]
    pub visibility: f64,

    /// Percent
    #[validate(range(min = 0.0, max = 100.0))]
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalObservation {
    pub year: i32,
    pub date: NaiveDate,

    #[serde(flatten)]
    #[validate(nested)]
    pub observation: Observation,
}

/// Synthesized observations for the same month/day, one per year of the
/// historical window, in ascending year order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalRecord {
    observations: Vec<HistoricalObservation>,
}

impl HistoricalRecord {
    pub fn new(observations: Vec<HistoricalObservation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[HistoricalObservation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoricalObservation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.observations.iter().map(|o| o.year).collect()
    }

    /// True when the record holds exactly one observation per year of
    /// `first..=last`, in ascending order.
    pub fn covers_window(&self, first: i32, last: i32) -> bool {
        self.observations.len() == (last - first + 1).max(0) as usize
            && self
                .observations
                .iter()
                .zip(first..=last)
                .all(|(obs, year)| obs.year == year)
    }

    pub fn condition_count(&self, condition: Condition) -> usize {
        self.observations
            .iter()
            .filter(|o| o.observation.condition == condition)
            .count()
    }
}

impl<'a> IntoIterator for &'a HistoricalRecord {
    type Item = &'a HistoricalObservation;
    type IntoIter = std::slice::Iter<'a, HistoricalObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
