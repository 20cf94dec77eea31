//! Scanning the hourly forecast for the next safe hour.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

use crate::{
    conditions::Thresholds,
    error::CoreError,
    model::{HourlyAirQuality, HourlyWeather},
};

/// Timestamp layouts used by Open-Meteo and by ISO-8601 local times.
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a naive local timestamp such as `2026-02-15T13:00`.
pub fn parse_local_time(raw: &str) -> Result<NaiveDateTime, CoreError> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| CoreError::InvalidTimestamp(raw.to_string()))
}

/// 12-hour clock without a leading zero, e.g. "4:00 PM".
pub fn format_clock_time(time: NaiveDateTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Whether every available reading for the hour is within limits.
///
/// A missing AQI entry, or one without a value, does not count against the hour.
pub fn hour_is_safe(hour: &HourlyWeather, air_quality: Option<&HourlyAirQuality>) -> bool {
    let limits = &Thresholds::DEFAULT;

    let weather_ok = hour.temperature.is_none_or(|t| limits.temperature_ok(t))
        && hour.uv_index.is_none_or(|uv| limits.uv_ok(uv))
        && hour.rain.is_none_or(|mm| limits.rain_ok(mm));

    let aqi_ok = air_quality
        .and_then(|aq| aq.european_aqi)
        .is_none_or(|aqi| limits.aqi_ok(aqi));

    weather_ok && aqi_ok
}

/// First hour strictly after `now` at which all factors are safe.
pub fn next_safe_hour(
    weather: &[HourlyWeather],
    air_quality: &[HourlyAirQuality],
    now: NaiveDateTime,
) -> Result<Option<NaiveDateTime>, CoreError> {
    let aqi_by_time: HashMap<&str, &HourlyAirQuality> = air_quality
        .iter()
        .map(|hour| (hour.time.as_str(), hour))
        .collect();

    for hour in weather {
        let time = parse_local_time(&hour.time)?;
        if time <= now {
            continue;
        }

        if hour_is_safe(hour, aqi_by_time.get(hour.time.as_str()).copied()) {
            debug!(time = %hour.time, "found safe window");
            return Ok(Some(time));
        }
    }

    debug!(hours = weather.len(), "no safe window in forecast");
    Ok(None)
}

/// Like [`next_safe_hour`], formatted for display.
pub fn find_next_safe_window(
    weather: &[HourlyWeather],
    air_quality: &[HourlyAirQuality],
    now: NaiveDateTime,
) -> Result<Option<String>, CoreError> {
    Ok(next_safe_hour(weather, air_quality, now)?.map(format_clock_time))
}
