use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::models::{Condition, HistoricalRecord, Observation};
use crate::utils::constants::{HISTORY_FIRST_YEAR, HISTORY_LAST_YEAR};

/// Historical means the forecast is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
}

impl AggregateStats {
    pub fn summary(&self) -> String {
        format!(
            "Historical Averages:\n\
            - Average Temperature: {:.1}°C\n\
            - Average Humidity: {:.1}%\n\
            - Average Wind Speed: {:.1} km/h",
            self.avg_temperature, self.avg_humidity, self.avg_wind_speed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionFrequency {
    pub condition: Condition,
    pub count: usize,
    pub total: usize,
    pub percentage: f64,
}

impl ConditionFrequency {
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} years ({:.1}%)",
            self.condition, self.count, self.total, self.percentage
        )
    }
}

pub struct StatisticsAggregator;

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, record: &HistoricalRecord) -> Result<AggregateStats> {
        self.aggregate_observations(record.iter().map(|o| &o.observation))
    }

    /// Arithmetic means over any set of observations. Fails on an empty set.
    pub fn aggregate_observations<'a, I>(&self, observations: I) -> Result<AggregateStats>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut temp_sum = 0.0f64;
        let mut humidity_sum = 0.0f64;
        let mut wind_sum = 0.0f64;
        let mut count = 0usize;

        for obs in observations {
            temp_sum += obs.temperature;
            humidity_sum += f64::from(obs.humidity);
            wind_sum += obs.wind_speed;
            count += 1;
        }

        if count == 0 {
            return Err(ForecastError::EmptyHistoricalRecord {
                first: HISTORY_FIRST_YEAR,
                last: HISTORY_LAST_YEAR,
            });
        }

        let n = count as f64;
        Ok(AggregateStats {
            avg_temperature: temp_sum / n,
            avg_humidity: humidity_sum / n,
            avg_wind_speed: wind_sum / n,
        })
    }

    /// Occurrences of every condition, including ones never generated.
    pub fn condition_frequencies(&self, record: &HistoricalRecord) -> Vec<ConditionFrequency> {
        let total = record.len();

        Condition::ALL
            .iter()
            .map(|&condition| {
                let count = record.condition_count(condition);
                let percentage = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };

                ConditionFrequency {
                    condition,
                    count,
                    total,
                    percentage,
                }
            })
            .collect()
    }
}

impl Default for StatisticsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoricalObservation;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(values: &[(f64, u8, f64, Condition)]) -> HistoricalRecord {
        HistoricalRecord::new(
            values
                .iter()
                .zip(2014..)
                .map(|(&(t, h, w, c), year)| HistoricalObservation {
                    year,
                    date: NaiveDate::from_ymd_opt(year, 5, 20).unwrap(),
                    observation: Observation::new(c, t, h, w),
                })
                .collect(),
        )
    }

    #[test]
    fn test_exact_means_over_ten_years() {
        let record = record(&[
            (10.0, 50, 0.0, Condition::Sunny),
            (12.0, 55, 5.0, Condition::Sunny),
            (14.0, 60, 10.0, Condition::Cloudy),
            (16.0, 65, 15.0, Condition::Cloudy),
            (18.0, 70, 20.0, Condition::Rainy),
            (20.0, 75, 25.0, Condition::Rainy),
            (22.0, 80, 3.0, Condition::Rainy),
            (-4.0, 85, 7.0, Condition::Snowy),
            (6.0, 90, 12.0, Condition::Cloudy),
            (8.0, 52, 4.0, Condition::Sunny),
        ]);

        let stats = StatisticsAggregator::new().aggregate(&record).unwrap();

        assert_eq!(
            stats,
            AggregateStats {
                avg_temperature: 12.2,
                avg_humidity: 68.2,
                avg_wind_speed: 10.1,
            }
        );
    }

    #[test]
    fn test_empty_record_is_a_defect() {
        let err = StatisticsAggregator::new()
            .aggregate(&HistoricalRecord::new(Vec::new()))
            .unwrap_err();
        assert!(err.is_defect());
    }

    #[test]
    fn test_condition_frequencies() {
        let record = record(&[
            (10.0, 50, 0.0, Condition::Sunny),
            (10.0, 50, 0.0, Condition::Sunny),
            (10.0, 50, 0.0, Condition::Sunny),
            (10.0, 50, 0.0, Condition::Rainy),
        ]);

        let frequencies = StatisticsAggregator::new().condition_frequencies(&record);
        assert_eq!(frequencies.len(), 6);

        let sunny = frequencies
            .iter()
            .find(|f| f.condition == Condition::Sunny)
            .unwrap();
        assert_eq!(sunny.count, 3);
        assert_eq!(sunny.percentage, 75.0);
        assert_eq!(sunny.summary(), "sunny: 3/4 years (75.0%)");

        let stormy = frequencies
            .iter()
            .find(|f| f.condition == Condition::Stormy)
            .unwrap();
        assert_eq!(stormy.count, 0);
    }
}
