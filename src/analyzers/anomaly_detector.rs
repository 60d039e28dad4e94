use tracing::debug;

use crate::analyzers::{AggregateStats, StatisticsAggregator};
use crate::config::AnomalyThresholds;
use crate::error::Result;
use crate::models::{Anomaly, AnomalyType, HistoricalRecord, Observation, Severity};

fn direction(value: f64, average: f64, above: &'static str, below: &'static str) -> &'static str {
    if value > average {
        above
    } else {
        below
    }
}

/// Flags forecast measurements that stray too far from the historical means.
pub struct AnomalyDetector {
    thresholds: AnomalyThresholds,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::with_thresholds(AnomalyThresholds::default())
    }

    pub fn with_thresholds(thresholds: AnomalyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AnomalyThresholds {
        &self.thresholds
    }

    /// Runs the temperature, humidity and wind checks in that order. Each
    /// check contributes at most one finding.
    pub fn detect(&self, current: &Observation, stats: &AggregateStats) -> Vec<Anomaly> {
        let anomalies: Vec<Anomaly> = [
            self.check_temperature(current, stats),
            self.check_humidity(current, stats),
            self.check_wind_speed(current, stats),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(count = anomalies.len(), "Anomaly checks complete");
        anomalies
    }

    /// Aggregates the record first, then runs `detect`.
    pub fn detect_against(
        &self,
        current: &Observation,
        record: &HistoricalRecord,
    ) -> Result<Vec<Anomaly>> {
        let stats = StatisticsAggregator::new().aggregate(record)?;
        Ok(self.detect(current, &stats))
    }

    fn check_temperature(&self, current: &Observation, stats: &AggregateStats) -> Option<Anomaly> {
        let deviation = (current.temperature - stats.avg_temperature).abs();
        if deviation <= self.thresholds.temperature {
            return None;
        }

        let severity = if deviation > self.thresholds.temperature_high {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(Anomaly::new(
            AnomalyType::TemperatureAnomaly,
            severity,
            format!(
                "Temperature {}°C is {:.1}°C {} historical average ({:.1}°C)",
                current.temperature,
                deviation,
                direction(current.temperature, stats.avg_temperature, "above", "below"),
                stats.avg_temperature
            ),
        ))
    }

    fn check_humidity(&self, current: &Observation, stats: &AggregateStats) -> Option<Anomaly> {
        let humidity = f64::from(current.humidity);
        let deviation = (humidity - stats.avg_humidity).abs();
        if deviation <= self.thresholds.humidity {
            return None;
        }

        Some(Anomaly::new(
            AnomalyType::HumidityAnomaly,
            Severity::Medium,
            format!(
                "Humidity {}% differs significantly from historical average ({:.1}%): {:.1}% {}",
                current.humidity,
                stats.avg_humidity,
                deviation,
                direction(humidity, stats.avg_humidity, "above", "below")
            ),
        ))
    }

    fn check_wind_speed(&self, current: &Observation, stats: &AggregateStats) -> Option<Anomaly> {
        let deviation = (current.wind_speed - stats.avg_wind_speed).abs();
        if deviation <= self.thresholds.wind_speed {
            return None;
        }

        // Only a surplus escalates; calm days stay Medium.
        let severity = if current.wind_speed > stats.avg_wind_speed + self.thresholds.wind_speed_high {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(Anomaly::new(
            AnomalyType::WindSpeedAnomaly,
            severity,
            format!(
                "Wind speed {} km/h is unusually {} for this date ({:.1} km/h from historical average of {:.1} km/h)",
                current.wind_speed,
                direction(current.wind_speed, stats.avg_wind_speed, "high", "low"),
                deviation,
                stats.avg_wind_speed
            ),
        ))
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}
