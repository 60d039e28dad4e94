use chrono::{Datelike, NaiveDate};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{
    Condition, ForecastObservation, HistoricalObservation, HistoricalRecord, Observation,
};
use crate::simulation::seasonal::{seasonal_bias, Season};
use crate::utils::constants::*;

/// Source of uniform samples in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Seeded source when a seed is given, otherwise one seeded from the thread
/// generator. `stream` separates sources that share a seed.
pub fn source_for(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Which generation rules apply to a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationKind {
    Historical,
    Current,
}

impl ObservationKind {
    pub fn bias_weight(&self) -> f64 {
        match self {
            ObservationKind::Historical => HISTORICAL_CONDITION_BIAS_WEIGHT,
            ObservationKind::Current => CURRENT_CONDITION_BIAS_WEIGHT,
        }
    }

    pub fn bands(&self, season: Season) -> (f64, f64) {
        match (self, season) {
            (ObservationKind::Historical, Season::Summer) => HISTORICAL_SUMMER_BANDS,
            (ObservationKind::Historical, Season::Winter) => HISTORICAL_WINTER_BANDS,
            (ObservationKind::Historical, Season::Transition) => HISTORICAL_TRANSITION_BANDS,
            (ObservationKind::Current, Season::Summer) => CURRENT_SUMMER_BANDS,
            (ObservationKind::Current, Season::Winter) => CURRENT_WINTER_BANDS,
            (ObservationKind::Current, Season::Transition) => CURRENT_TRANSITION_BANDS,
        }
    }

    fn temperature_noise(&self) -> f64 {
        match self {
            ObservationKind::Historical => HISTORICAL_TEMPERATURE_NOISE_C,
            ObservationKind::Current => CURRENT_TEMPERATURE_NOISE_C,
        }
    }

    fn humidity_spread(&self) -> f64 {
        match self {
            ObservationKind::Historical => HISTORICAL_HUMIDITY_SPREAD_PCT,
            ObservationKind::Current => CURRENT_HUMIDITY_SPREAD_PCT,
        }
    }

    fn max_wind(&self) -> f64 {
        match self {
            ObservationKind::Historical => HISTORICAL_MAX_WIND_KMH,
            ObservationKind::Current => CURRENT_MAX_WIND_KMH,
        }
    }
}

/// Picks the condition for a biased draw. Comparisons are strict: a draw
/// sitting exactly on a band edge falls to the lower band.
pub fn select_condition(season: Season, kind: ObservationKind, combined: f64) -> Condition {
    let (upper, lower) = kind.bands(season);
    let [high, mid, low] = season.band_conditions();

    if combined > upper {
        high
    } else if combined > lower {
        mid
    } else {
        low
    }
}

/// Rounds halves towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// The target month/day in `year`. Feb 29 rolls over to Mar 1 in non-leap
/// years.
pub fn project_onto_year(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

pub struct ObservationGenerator<S> {
    source: S,
}

impl ObservationGenerator<ThreadRng> {
    pub fn from_entropy() -> Self {
        Self::new(rand::rng())
    }
}

impl ObservationGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<S: UniformSource> ObservationGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// One observation per year of the fixed historical window, ascending.
    pub fn generate_historical(&mut self, target: NaiveDate) -> HistoricalRecord {
        let bias = seasonal_bias(target);
        let season = Season::of(target);

        let observations = (HISTORY_FIRST_YEAR..=HISTORY_LAST_YEAR)
            .map(|year| HistoricalObservation {
                year,
                date: project_onto_year(target, year),
                observation: self.sample(ObservationKind::Historical, season, bias),
            })
            .collect::<Vec<_>>();

        debug!(
            %target,
            season = season.display_name(),
            bias,
            count = observations.len(),
            "Generated historical record"
        );

        HistoricalRecord::new(observations)
    }

    /// The synthetic forecast for the target date.
    pub fn generate_current(&mut self, target: NaiveDate) -> ForecastObservation {
        let bias = seasonal_bias(target);
        let season = Season::of(target);

        let observation = self.sample(ObservationKind::Current, season, bias);
        let pressure = round_half_up(BASE_PRESSURE_HPA + (self.draw() - 0.5) * PRESSURE_SPREAD_HPA);
        let visibility = round_half_up(BASE_VISIBILITY_KM + self.draw() * VISIBILITY_SPREAD_KM);
        let confidence = round_half_up(BASE_CONFIDENCE_PCT + self.draw() * CONFIDENCE_SPREAD_PCT)
            .clamp(0.0, 100.0);

        debug!(%target, condition = %observation.condition, "Generated current forecast");

        ForecastObservation {
            observation,
            pressure,
            visibility,
            confidence,
        }
    }

    fn sample(&mut self, kind: ObservationKind, season: Season, bias: f64) -> Observation {
        let combined = self.draw() + bias * kind.bias_weight();
        let condition = select_condition(season, kind, combined);

        let temperature = round_half_up(
            BASE_TEMPERATURE_C
                + bias * SEASONAL_TEMPERATURE_SWING_C
                + (self.draw() - 0.5) * kind.temperature_noise(),
        );
        let humidity =
            round_half_up(BASE_HUMIDITY_PCT + self.draw() * kind.humidity_spread()).clamp(0.0, 100.0)
                as u8;
        let wind_speed = round_half_up(self.draw() * kind.max_wind()).max(0.0);

        Observation::new(condition, temperature, humidity, wind_speed)
    }

    fn draw(&mut self) -> f64 {
        self.source.next_unit()
    }
}
