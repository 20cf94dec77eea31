//! Core library for the `touch-grass` CLI.
//!
//! This crate defines:
//! - Comfort thresholds and per-factor classification of current conditions
//! - The hourly forecast scan for the next safe window
//! - Shared data models (weather, air quality, locations)
//! - Configuration handling and the Open-Meteo / ipinfo.io providers
//!
//! Evaluation is pure: it only consumes already-fetched data.

pub mod conditions;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;

pub use conditions::{
    ConditionCheck, Evaluation, Factor, Thresholds, classify, classify_named, evaluate,
};
pub use config::{Config, Endpoints, SavedLocation};
pub use error::CoreError;
pub use forecast::{find_next_safe_window, format_clock_time, hour_is_safe, next_safe_hour};
pub use model::{
    AirQualityData, Coordinates, CurrentAirQuality, CurrentWeather, HourlyAirQuality,
    HourlyWeather, Location, Reading, WeatherData,
};
pub use provider::{ConditionsSource, Geolocator, fetch_conditions};
