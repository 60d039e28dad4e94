pub mod constants;
pub mod locations;
pub mod progress;

pub use constants::*;
pub use locations::{is_known_location, GERMAN_CITIES};
pub use progress::ProgressReporter;
