use chrono::{NaiveDate, NaiveTime};
use rand::rngs::ThreadRng;
use tracing::{debug, info};
use validator::Validate;

use crate::analyzers::{AnomalyDetector, StatisticsAggregator};
use crate::config::AnomalyThresholds;
use crate::error::{ForecastError, Result};
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::simulation::{ObservationGenerator, UniformSource};
use crate::utils::constants::{HISTORY_FIRST_YEAR, HISTORY_LAST_YEAR};

/// Generates history and forecast for a date, aggregates the history and
/// checks the forecast against it.
pub struct AnalysisPipeline<S> {
    generator: ObservationGenerator<S>,
    aggregator: StatisticsAggregator,
    detector: AnomalyDetector,
}

impl AnalysisPipeline<ThreadRng> {
    pub fn from_entropy() -> Self {
        Self::new(rand::rng())
    }
}

impl<S: UniformSource> AnalysisPipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            generator: ObservationGenerator::new(source),
            aggregator: StatisticsAggregator::new(),
            detector: AnomalyDetector::new(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: AnomalyThresholds) -> Self {
        self.detector = AnomalyDetector::with_thresholds(thresholds);
        self
    }

    pub fn run(&mut self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        request.validate()?;

        let history = self.generator.generate_historical(request.date);
        if !history.covers_window(HISTORY_FIRST_YEAR, HISTORY_LAST_YEAR) {
            return Err(ForecastError::EmptyHistoricalRecord {
                first: HISTORY_FIRST_YEAR,
                last: HISTORY_LAST_YEAR,
            });
        }

        let current = self.generator.generate_current(request.date);
        let statistics = self.aggregator.aggregate(&history)?;
        let condition_frequencies = self.aggregator.condition_frequencies(&history);
        let anomalies = self.detector.detect(&current.observation, &statistics);

        debug!(
            avg_temperature = statistics.avg_temperature,
            avg_humidity = statistics.avg_humidity,
            avg_wind_speed = statistics.avg_wind_speed,
            "Historical averages"
        );
        info!(
            date = %request.date,
            location = %request.location,
            condition = %current.observation.condition,
            anomalies = anomalies.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            date: request.date,
            time: request.time,
            location: request.location.clone(),
            current,
            history,
            statistics,
            condition_frequencies,
            anomalies,
        })
    }

    /// Refuses to run without a date.
    pub fn run_for(
        &mut self,
        date: Option<NaiveDate>,
        time: NaiveTime,
        location: &str,
    ) -> Result<AnalysisResult> {
        let date = date.ok_or(ForecastError::MissingDate)?;
        self.run(&AnalysisRequest::new(date, time, location))
    }
}

/// One-shot analysis with the given random source.
pub fn run_analysis<S: UniformSource>(
    date: Option<NaiveDate>,
    time: NaiveTime,
    location: &str,
    source: S,
) -> Result<AnalysisResult> {
    AnalysisPipeline::new(source).run_for(date, time, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, Severity};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FixedDraw(f64);

    impl UniformSource for FixedDraw {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_date_refuses_to_run() {
        let err = run_analysis(None, noon(), "Berlin", StdRng::seed_from_u64(1)).unwrap_err();
        assert!(err.is_missing_input());
        assert!(!err.is_defect());
    }

    #[test]
    fn test_time_and_location_do_not_affect_numbers() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15);

        let berlin = run_analysis(date, noon(), "Berlin", StdRng::seed_from_u64(5)).unwrap();
        let munich = run_analysis(
            date,
            NaiveTime::from_hms_opt(23, 45, 0).unwrap(),
            "Munich",
            StdRng::seed_from_u64(5),
        )
        .unwrap();

        assert_eq!(berlin.current, munich.current);
        assert_eq!(berlin.history, munich.history);
        assert_eq!(berlin.anomalies, munich.anomalies);
        assert_eq!(munich.location, "Munich");
    }

    #[test]
    fn test_result_shape() {
        let mut pipeline = AnalysisPipeline::new(StdRng::seed_from_u64(11));
        let request = AnalysisRequest::new(
            NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            noon(),
            "Dresden",
        );
        let result = pipeline.run(&request).unwrap();

        assert_eq!(result.history.len(), 10);
        assert_eq!(result.condition_frequencies.len(), 6);
        assert_eq!(
            result.condition_frequencies.iter().map(|f| f.count).sum::<usize>(),
            10
        );
        assert!(result.anomalies.len() <= 3);
    }

    #[test]
    fn test_constant_draws_produce_no_anomalies() {
        // Every draw at 0.5 keeps history and forecast on the seasonal mean.
        let result = run_analysis(
            NaiveDate::from_ymd_opt(2024, 7, 15),
            noon(),
            "Berlin",
            FixedDraw(0.5),
        )
        .unwrap();

        assert_eq!(result.current.observation.condition, Condition::Cloudy);
        assert!(result.anomalies.is_empty());
        assert!(result.summary().contains("No significant anomalies detected."));
    }

    #[test]
    fn test_tight_thresholds_flag_everything() {
        let mut pipeline = AnalysisPipeline::new(FixedDraw(0.99)).with_thresholds(AnomalyThresholds {
            temperature: 0.0,
            temperature_high: 0.0,
            humidity: 0.0,
            wind_speed: 0.0,
            wind_speed_high: 0.0,
        });

        let result = pipeline
            .run_for(NaiveDate::from_ymd_opt(2024, 1, 20), noon(), "Bremen")
            .unwrap();

        // History draws 0.99 for humidity (50 + 39.6) while the forecast tops
        // out lower (50 + 34.65), and likewise for wind and temperature.
        assert_eq!(result.anomalies.len(), 3);
        assert_eq!(result.highest_severity(), Some(Severity::High));
    }

    #[test]
    fn test_invalid_location_rejected() {
        let mut pipeline = AnalysisPipeline::new(StdRng::seed_from_u64(3));
        let err = pipeline
            .run_for(NaiveDate::from_ymd_opt(2024, 5, 1), noon(), "")
            .unwrap_err();
        assert!(matches!(err, ForecastError::Validation(_)));
    }
}
