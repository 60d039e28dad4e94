use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("No analysis date supplied")]
    MissingDate,

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Historical record is empty; the {first}-{last} window produced no observations")]
    EmptyHistoricalRecord { first: i32, last: i32 },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ForecastError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ForecastError::InvalidInput {
            message: message.into(),
        }
    }

    /// True when the error signals a broken internal invariant rather than bad
    /// or absent caller input.
    pub fn is_defect(&self) -> bool {
        matches!(self, ForecastError::EmptyHistoricalRecord { .. })
    }

    /// True when the caller simply did not supply a date; nothing ran.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ForecastError::MissingDate)
    }
}

impl From<config::ConfigError> for ForecastError {
    fn from(err: config::ConfigError) -> Self {
        ForecastError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(ForecastError::MissingDate.is_missing_input());
        assert!(!ForecastError::MissingDate.is_defect());

        let defect = ForecastError::EmptyHistoricalRecord {
            first: 2014,
            last: 2023,
        };
        assert!(defect.is_defect());
        assert!(!defect.is_missing_input());

        let invalid = ForecastError::invalid_input("bad date");
        assert!(!invalid.is_defect());
        assert!(!invalid.is_missing_input());
        assert_eq!(invalid.to_string(), "Invalid input: bad date");
    }
}
