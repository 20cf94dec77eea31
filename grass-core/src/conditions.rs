//! Classification of current conditions against the comfort thresholds.

use serde::Serialize;
use std::fmt;

use crate::{
    error::CoreError,
    model::{CurrentAirQuality, CurrentWeather, Reading},
};

/// The factors that decide whether it is pleasant outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Temperature,
    UvIndex,
    Rain,
    AirQuality,
}

impl Factor {
    /// Evaluation order, which is also the display order.
    pub const ALL: [Factor; 4] = [
        Factor::Temperature,
        Factor::UvIndex,
        Factor::Rain,
        Factor::AirQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Temperature => "temperature",
            Factor::UvIndex => "uv_index",
            Factor::Rain => "rain",
            Factor::AirQuality => "air_quality",
        }
    }

    /// Human label used at the start of reasons.
    pub fn label(&self) -> &'static str {
        match self {
            Factor::Temperature => "Temperature",
            Factor::UvIndex => "UV index",
            Factor::Rain => "Rain",
            Factor::AirQuality => "Air quality",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Factor {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Factor::ALL
            .into_iter()
            .find(|factor| factor.as_str() == value)
            .ok_or_else(|| CoreError::UnknownFactor(value.to_string()))
    }
}

/// Fixed comfort limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// °C, inclusive.
    pub temp_min: f64,
    /// °C, inclusive.
    pub temp_max: f64,
    /// Unsafe at or above.
    pub uv_max: f64,
    /// EU AQI, unsafe at or above.
    pub aqi_max: f64,
    /// mm, unsafe above.
    pub rain_max: f64,
}

impl Thresholds {
    pub const DEFAULT: Thresholds = Thresholds {
        temp_min: -5.0,
        temp_max: 35.0,
        uv_max: 4.0,
        aqi_max: 50.0,
        rain_max: 0.0,
    };

    pub fn temperature_ok(&self, celsius: f64) -> bool {
        (self.temp_min..=self.temp_max).contains(&celsius)
    }

    pub fn uv_ok(&self, uv_index: f64) -> bool {
        uv_index < self.uv_max
    }

    pub fn rain_ok(&self, millimetres: f64) -> bool {
        millimetres <= self.rain_max
    }

    pub fn aqi_ok(&self, european_aqi: f64) -> bool {
        european_aqi < self.aqi_max
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of classifying one factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionCheck {
    pub factor: Factor,
    pub value: Reading,
    pub safe: bool,
    pub reason: String,
}

impl ConditionCheck {
    pub fn new(factor: Factor, value: Reading) -> Self {
        let (safe, reason) = classify(value, factor);
        Self {
            factor,
            value,
            safe,
            reason,
        }
    }
}

/// Verdict for the current conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub safe: bool,
    pub checks: Vec<ConditionCheck>,
}

/// Classify a single reading. Absent readings are always safe.
pub fn classify(value: Reading, factor: Factor) -> (bool, String) {
    let Some(value) = value else {
        return (true, format!("{}: no data available", factor.label()));
    };

    let limits = &Thresholds::DEFAULT;

    match factor {
        Factor::Temperature => {
            if value < limits.temp_min {
                (false, format!("Temperature too cold ({value}°C)"))
            } else if value > limits.temp_max {
                (false, format!("Temperature too hot ({value}°C)"))
            } else {
                (true, format!("Temperature is {value}°C"))
            }
        }
        Factor::UvIndex => {
            if limits.uv_ok(value) {
                (true, format!("UV index is {value}"))
            } else {
                (false, format!("UV index too high ({value})"))
            }
        }
        Factor::Rain => {
            if limits.rain_ok(value) {
                (true, "No rain".to_string())
            } else {
                (false, format!("It's raining ({value} mm)"))
            }
        }
        Factor::AirQuality => {
            if limits.aqi_ok(value) {
                (true, format!("Air quality good (EU AQI: {value})"))
            } else {
                (false, format!("Air quality poor (EU AQI: {value})"))
            }
        }
    }
}

/// Classify by factor name. Unknown names are treated as safe with an empty reason.
pub fn classify_named(value: Reading, name: &str) -> (bool, String) {
    match Factor::try_from(name) {
        Ok(factor) => classify(value, factor),
        Err(_) if value.is_none() => (true, format!("{name}: no data available")),
        Err(_) => (true, String::new()),
    }
}

/// Evaluate the current sample: one check per factor, safe only if all are.
pub fn evaluate(weather: &CurrentWeather, air_quality: &CurrentAirQuality) -> Evaluation {
    let checks: Vec<ConditionCheck> = Factor::ALL
        .into_iter()
        .map(|factor| {
            let value = match factor {
                Factor::Temperature => weather.temperature,
                Factor::UvIndex => weather.uv_index,
                Factor::Rain => weather.rain,
                Factor::AirQuality => air_quality.european_aqi,
            };
            ConditionCheck::new(factor, value)
        })
        .collect();

    let safe = checks.iter().all(|check| check.safe);

    Evaluation { safe, checks }
}
