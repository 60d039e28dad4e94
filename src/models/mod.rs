pub mod analysis;
pub mod anomaly;
pub mod condition;
pub mod observation;

pub use analysis::{AnalysisRequest, AnalysisResult};
pub use anomaly::{Anomaly, AnomalyType, Severity};
pub use condition::Condition;
pub use observation::{ForecastObservation, HistoricalObservation, HistoricalRecord, Observation};
