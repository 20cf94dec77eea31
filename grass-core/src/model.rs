use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single reading. `None` means the provider had no data for it.
pub type Reading = Option<f64>;

/// Current weather readings at the queried location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Reading,
    pub rain: Reading,
    pub uv_index: Reading,
}

/// One hour of forecast weather. `time` is naive local time, e.g. `2026-02-15T13:00`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeather {
    pub time: String,
    pub temperature: Reading,
    pub rain: Reading,
    pub uv_index: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyWeather>,
    pub timezone: String,
    /// Offset of the location's local time from UTC.
    pub utc_offset_seconds: i32,
}

impl WeatherData {
    /// Wall-clock time at the forecast location for the given instant.
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match FixedOffset::east_opt(self.utc_offset_seconds) {
            Some(offset) => instant.with_timezone(&offset).naive_local(),
            None => instant.naive_utc(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentAirQuality {
    pub european_aqi: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyAirQuality {
    pub time: String,
    pub european_aqi: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityData {
    pub current: CurrentAirQuality,
    pub hourly: Vec<HourlyAirQuality>,
}

/// Validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        check_range("Latitude", latitude, 90.0)?;
        check_range("Longitude", longitude, 180.0)?;

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn check_range(axis: &'static str, value: f64, limit: f64) -> Result<(), CoreError> {
    // NaN fails the contains check as well.
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidCoordinate {
            axis,
            value,
            min: -limit,
            max: limit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub city: String,
    pub region: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl Location {
    /// Location built from coordinates the user typed in.
    pub fn custom(coordinates: Coordinates) -> Self {
        Self::labelled("Custom", coordinates)
    }

    pub fn labelled(label: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            city: label.into(),
            region: String::new(),
            country: String::new(),
            coordinates,
        }
    }

    /// "City, Region, Country" with empty parts left out.
    pub fn display_name(&self) -> String {
        [&self.city, &self.region, &self.country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_range_edges() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn coordinates_reject_out_of_range_latitude() {
        let err = Coordinates::new(90.5, 0.0).unwrap_err();
        assert!(err.to_string().contains("Latitude must be between -90 and 90"));
    }

    #[test]
    fn coordinates_reject_out_of_range_longitude() {
        let err = Coordinates::new(0.0, -180.1).unwrap_err();
        assert!(err.to_string().contains("Longitude must be between -180 and 180"));
    }

    #[test]
    fn coordinates_reject_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn local_time_applies_utc_offset() {
        let weather = WeatherData {
            current: CurrentWeather::default(),
            hourly: Vec::new(),
            timezone: "America/Los_Angeles".into(),
            utc_offset_seconds: -8 * 3600,
        };
        let instant = DateTime::parse_from_rfc3339("2026-02-15T20:30:00Z")
            .expect("valid instant")
            .with_timezone(&Utc);

        assert_eq!(
            weather.local_time(instant).format("%Y-%m-%dT%H:%M").to_string(),
            "2026-02-15T12:30"
        );
    }

    #[test]
    fn display_name_skips_empty_parts() {
        let coords = Coordinates::new(45.52, -122.68).expect("valid coordinates");

        let full = Location {
            city: "Portland".into(),
            region: "Oregon".into(),
            country: "US".into(),
            coordinates: coords,
        };
        assert_eq!(full.display_name(), "Portland, Oregon, US");

        assert_eq!(Location::custom(coords).display_name(), "Custom");
    }
}
