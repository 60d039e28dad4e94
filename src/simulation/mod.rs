pub mod generator;
pub mod seasonal;

pub use generator::{source_for, ObservationGenerator, ObservationKind, UniformSource};
pub use seasonal::{day_of_year, seasonal_bias, Season};
