//! Seasonal signal derived from the calendar position of a date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::models::Condition;
use crate::utils::constants::{DAYS_PER_SEASONAL_CYCLE, SEASONAL_REFERENCE_YEAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// June to September
    Summer,
    /// December to March
    Winter,
    /// April, May, October, November
    Transition,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=9 => Season::Summer,
            12 | 1..=3 => Season::Winter,
            _ => Season::Transition,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Conditions picked above the upper band, between the bands, and below
    /// the lower band.
    pub fn band_conditions(&self) -> [Condition; 3] {
        match self {
            Season::Summer => [Condition::Sunny, Condition::Cloudy, Condition::Rainy],
            Season::Winter => [Condition::Cloudy, Condition::Rainy, Condition::Snowy],
            Season::Transition => [Condition::Cloudy, Condition::Rainy, Condition::Sunny],
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Winter => "Winter",
            Season::Transition => "Spring/Fall",
        }
    }
}

/// 1-based ordinal of the date's month/day. Computed in a leap reference year
/// so the result does not depend on the date's own year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    NaiveDate::from_ymd_opt(SEASONAL_REFERENCE_YEAR, date.month(), date.day())
        .map(|d| d.ordinal())
        .unwrap_or_else(|| date.ordinal())
}

/// `sin(2π · dayOfYear / 365)`, in [-1, 1].
pub fn seasonal_bias(date: NaiveDate) -> f64 {
    (2.0 * PI * f64::from(day_of_year(date)) / DAYS_PER_SEASONAL_CYCLE).sin()
}
