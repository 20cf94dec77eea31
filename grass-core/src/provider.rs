use crate::{
    AirQualityData, Config, Coordinates, Location, WeatherData,
    provider::{ipinfo::IpInfoLocator, open_meteo::OpenMeteoSource},
};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

pub mod ipinfo;
pub mod open_meteo;

/// Source of current and hourly weather and air-quality data.
#[async_trait]
pub trait ConditionsSource: Send + Sync + Debug {
    async fn weather(&self, coords: Coordinates) -> anyhow::Result<WeatherData>;

    async fn air_quality(&self, coords: Coordinates) -> anyhow::Result<AirQualityData>;
}

/// Resolves the caller's approximate location.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> anyhow::Result<Location>;
}

/// Fetch weather and air quality for `coords` concurrently.
pub async fn fetch_conditions(
    source: &dyn ConditionsSource,
    coords: Coordinates,
) -> anyhow::Result<(WeatherData, AirQualityData)> {
    debug!(
        latitude = coords.latitude(),
        longitude = coords.longitude(),
        "fetching conditions"
    );

    tokio::try_join!(source.weather(coords), source.air_quality(coords))
}

/// True if the error was caused by the HTTP transport rather than bad data.
pub fn is_network_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<reqwest::Error>())
}

pub(crate) fn http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Construct the Open-Meteo source from config.
pub fn conditions_source_from_config(config: &Config) -> anyhow::Result<Box<dyn ConditionsSource>> {
    Ok(Box::new(OpenMeteoSource::from_config(config)?))
}

/// Construct the IP geolocator from config.
pub fn geolocator_from_config(config: &Config) -> anyhow::Result<Box<dyn Geolocator>> {
    Ok(Box::new(IpInfoLocator::from_config(config)?))
}
