pub mod anomaly_detector;
pub mod statistics;

pub use anomaly_detector::AnomalyDetector;
pub use statistics::{AggregateStats, ConditionFrequency, StatisticsAggregator};
