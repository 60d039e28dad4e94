pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod simulation;
pub mod utils;

pub use error::{ForecastError, Result};
pub use models::{AnalysisRequest, AnalysisResult};
pub use processors::{run_analysis, AnalysisPipeline};
