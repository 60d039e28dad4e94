pub mod batch;
pub mod pipeline;

pub use batch::BatchAnalyzer;
pub use pipeline::{run_analysis, AnalysisPipeline};
