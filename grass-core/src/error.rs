use thiserror::Error;

/// Errors raised by the evaluation core.
///
/// Transport and config failures are reported through `anyhow` by the
/// providers; these variants cover bad user input and payloads whose shape
/// the evaluator cannot work with.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("{axis} must be between {min} and {max}, got {value}")]
    InvalidCoordinate {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid timestamp in forecast data: '{0}'")]
    InvalidTimestamp(String),

    #[error("Hourly series '{series}' has {found} entries, expected {expected}")]
    MismatchedSeries {
        series: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Unknown factor '{0}'. Known factors: temperature, uv_index, rain, air_quality.")]
    UnknownFactor(String),
}
