use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ForecastError, Result};

/// Sky condition of a single observation.
///
/// `Stormy` and `Foggy` are part of the vocabulary but the generation rules
/// never produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Foggy,
    Snowy,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Condition::Sunny,
        Condition::Cloudy,
        Condition::Rainy,
        Condition::Stormy,
        Condition::Foggy,
        Condition::Snowy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::Cloudy => "cloudy",
            Condition::Rainy => "rainy",
            Condition::Stormy => "stormy",
            Condition::Foggy => "foggy",
            Condition::Snowy => "snowy",
        }
    }

    /// Whether the current rule set can ever emit this condition.
    pub fn is_generated(&self) -> bool {
        !matches!(self, Condition::Stormy | Condition::Foggy)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Condition::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ForecastError::invalid_input(format!("Unknown condition: {}", s)))
    }
}
