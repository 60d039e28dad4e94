/// Historical window (inclusive), fixed regardless of the analysed year
pub const HISTORY_FIRST_YEAR: i32 = 2014;
pub const HISTORY_LAST_YEAR: i32 = 2023;
pub const HISTORY_YEARS: usize = 10;

/// Seasonal cycle
pub const DAYS_PER_SEASONAL_CYCLE: f64 = 365.0;
/// Leap year used to give every month/day a single ordinal
pub const SEASONAL_REFERENCE_YEAR: i32 = 2000;

/// Weight of the seasonal bias on the condition draw
pub const HISTORICAL_CONDITION_BIAS_WEIGHT: f64 = 0.3;
pub const CURRENT_CONDITION_BIAS_WEIGHT: f64 = 0.2;

/// Condition bands as (upper, lower) cut-offs on the biased condition draw
pub const HISTORICAL_SUMMER_BANDS: (f64, f64) = (0.7, 0.4);
pub const HISTORICAL_WINTER_BANDS: (f64, f64) = (0.6, 0.3);
pub const HISTORICAL_TRANSITION_BANDS: (f64, f64) = (0.5, 0.3);
pub const CURRENT_SUMMER_BANDS: (f64, f64) = (0.6, 0.3);
pub const CURRENT_WINTER_BANDS: (f64, f64) = (0.5, 0.2);
pub const CURRENT_TRANSITION_BANDS: (f64, f64) = (0.4, 0.2);

/// Temperature model (°C)
pub const BASE_TEMPERATURE_C: f64 = 15.0;
pub const SEASONAL_TEMPERATURE_SWING_C: f64 = 10.0;
pub const HISTORICAL_TEMPERATURE_NOISE_C: f64 = 20.0;
pub const CURRENT_TEMPERATURE_NOISE_C: f64 = 15.0;

/// Humidity model (%)
pub const BASE_HUMIDITY_PCT: f64 = 50.0;
pub const HISTORICAL_HUMIDITY_SPREAD_PCT: f64 = 40.0;
pub const CURRENT_HUMIDITY_SPREAD_PCT: f64 = 35.0;

/// Wind model (km/h)
pub const HISTORICAL_MAX_WIND_KMH: f64 = 25.0;
pub const CURRENT_MAX_WIND_KMH: f64 = 20.0;

/// Forecast-only measurements
pub const BASE_PRESSURE_HPA: f64 = 1013.0;
pub const PRESSURE_SPREAD_HPA: f64 = 40.0;
pub const BASE_VISIBILITY_KM: f64 = 8.0;
pub const VISIBILITY_SPREAD_KM: f64 = 7.0;
pub const BASE_CONFIDENCE_PCT: f64 = 75.0;
pub const CONFIDENCE_SPREAD_PCT: f64 = 20.0;

/// Anomaly thresholds
pub const TEMP_ANOMALY_THRESHOLD_C: f64 = 10.0;
pub const TEMP_HIGH_SEVERITY_THRESHOLD_C: f64 = 15.0;
pub const HUMIDITY_ANOMALY_THRESHOLD_PCT: f64 = 25.0;
pub const WIND_ANOMALY_THRESHOLD_KMH: f64 = 10.0;
pub const WIND_HIGH_SEVERITY_EXCESS_KMH: f64 = 15.0;

/// Input defaults
pub const DEFAULT_LOCATION: &str = "Berlin";
pub const DEFAULT_TIME: &str = "12:00";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "WEATHER_ANOMALY";
