use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    error::CoreError,
    model::{
        AirQualityData, Coordinates, CurrentAirQuality, CurrentWeather, HourlyAirQuality,
        HourlyWeather, Reading, WeatherData,
    },
    provider::{http_client, truncate_body},
};

use super::ConditionsSource;

const WEATHER_FIELDS: &str = "temperature_2m,rain,uv_index";
const AIR_QUALITY_FIELDS: &str = "european_aqi";

/// Open-Meteo forecast and air-quality APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    forecast_url: String,
    air_quality_url: String,
    http: Client,
}

impl OpenMeteoSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            forecast_url: config.endpoints.forecast_url.clone(),
            air_quality_url: config.endpoints.air_quality_url.clone(),
            http: http_client(config)?,
        })
    }

    async fn get(&self, url: &str, fields: &str, coords: Coordinates, what: &str) -> Result<String> {
        let latitude = coords.latitude().to_string();
        let longitude = coords.longitude().to_string();

        debug!(url, what, "requesting Open-Meteo");

        let res = self
            .http
            .get(url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", fields),
                ("hourly", fields),
                ("forecast_days", "1"),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl ConditionsSource for OpenMeteoSource {
    async fn weather(&self, coords: Coordinates) -> Result<WeatherData> {
        let body = self
            .get(&self.forecast_url, WEATHER_FIELDS, coords, "forecast")
            .await?;
        parse_forecast(&body)
    }

    async fn air_quality(&self, coords: Coordinates) -> Result<AirQualityData> {
        let body = self
            .get(&self.air_quality_url, AIR_QUALITY_FIELDS, coords, "air quality")
            .await?;
        parse_air_quality(&body)
    }
}

// Keys are required; only an explicit `null` means no data.
#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    #[serde(deserialize_with = "Option::deserialize")]
    temperature_2m: Reading,
    #[serde(deserialize_with = "Option::deserialize")]
    rain: Reading,
    #[serde(deserialize_with = "Option::deserialize")]
    uv_index: Reading,
}

#[derive(Debug, Deserialize)]
struct OmHourlyWeather {
    time: Vec<String>,
    temperature_2m: Vec<Reading>,
    rain: Vec<Reading>,
    uv_index: Vec<Reading>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrentWeather,
    hourly: OmHourlyWeather,
    timezone: Option<String>,
    #[serde(default)]
    utc_offset_seconds: i32,
}

#[derive(Debug, Deserialize)]
struct OmCurrentAirQuality {
    #[serde(deserialize_with = "Option::deserialize")]
    european_aqi: Reading,
}

#[derive(Debug, Deserialize)]
struct OmHourlyAirQuality {
    time: Vec<String>,
    european_aqi: Vec<Reading>,
}

#[derive(Debug, Deserialize)]
struct OmAirQualityResponse {
    current: OmCurrentAirQuality,
    hourly: OmHourlyAirQuality,
}

fn ensure_len(series: &'static str, expected: usize, values: &[Reading]) -> Result<(), CoreError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(CoreError::MismatchedSeries {
            series,
            expected,
            found: values.len(),
        })
    }
}

/// Parse an Open-Meteo forecast body, zipping the hourly columns into rows.
pub fn parse_forecast(body: &str) -> Result<WeatherData> {
    let parsed: OmForecastResponse =
        serde_json::from_str(body).context("Failed to parse Open-Meteo forecast JSON")?;

    let hourly = parsed.hourly;
    let len = hourly.time.len();
    ensure_len("temperature_2m", len, &hourly.temperature_2m)?;
    ensure_len("rain", len, &hourly.rain)?;
    ensure_len("uv_index", len, &hourly.uv_index)?;

    let rows = hourly
        .time
        .into_iter()
        .zip(hourly.temperature_2m)
        .zip(hourly.rain)
        .zip(hourly.uv_index)
        .map(|(((time, temperature), rain), uv_index)| HourlyWeather {
            time,
            temperature,
            rain,
            uv_index,
        })
        .collect();

    Ok(WeatherData {
        current: CurrentWeather {
            temperature: parsed.current.temperature_2m,
            rain: parsed.current.rain,
            uv_index: parsed.current.uv_index,
        },
        hourly: rows,
        timezone: parsed.timezone.unwrap_or_else(|| "UTC".to_string()),
        utc_offset_seconds: parsed.utc_offset_seconds,
    })
}

/// Parse an Open-Meteo air-quality body.
pub fn parse_air_quality(body: &str) -> Result<AirQualityData> {
    let parsed: OmAirQualityResponse =
        serde_json::from_str(body).context("Failed to parse Open-Meteo air quality JSON")?;

    let hourly = parsed.hourly;
    ensure_len("european_aqi", hourly.time.len(), &hourly.european_aqi)?;

    let rows = hourly
        .time
        .into_iter()
        .zip(hourly.european_aqi)
        .map(|(time, european_aqi)| HourlyAirQuality { time, european_aqi })
        .collect();

    Ok(AirQualityData {
        current: CurrentAirQuality {
            european_aqi: parsed.current.european_aqi,
        },
        hourly: rows,
    })
}
