use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    model::{Coordinates, Location},
    provider::{http_client, truncate_body},
};

use super::Geolocator;

/// IP-based geolocation through ipinfo.io.
#[derive(Debug, Clone)]
pub struct IpInfoLocator {
    url: String,
    http: Client,
}

impl IpInfoLocator {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            url: config.endpoints.geolocation_url.clone(),
            http: http_client(config)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    loc: String,
}

#[async_trait]
impl Geolocator for IpInfoLocator {
    async fn locate(&self) -> Result<Location> {
        debug!(url = %self.url, "looking up location by IP");

        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Failed to send request to ipinfo.io")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read ipinfo.io response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "ipinfo.io request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_location(&body)
    }
}

/// Parse an ipinfo.io body. `loc` holds "lat,lon".
pub fn parse_location(body: &str) -> Result<Location> {
    let parsed: IpInfoResponse =
        serde_json::from_str(body).context("Failed to parse ipinfo.io JSON")?;

    let (lat, lon) = parsed
        .loc
        .split_once(',')
        .ok_or_else(|| anyhow!("Unexpected ipinfo.io loc value '{}'", parsed.loc))?;

    let latitude: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude in ipinfo.io loc '{}'", parsed.loc))?;
    let longitude: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude in ipinfo.io loc '{}'", parsed.loc))?;

    Ok(Location {
        city: parsed.city.unwrap_or_else(|| "Unknown".to_string()),
        region: parsed.region.unwrap_or_default(),
        country: parsed.country.unwrap_or_default(),
        coordinates: Coordinates::new(latitude, longitude)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ipinfo_response() {
        let body = r#"{
            "ip": "203.0.113.7",
            "city": "San Francisco",
            "region": "California",
            "country": "US",
            "loc": "37.7749,-122.4194",
            "timezone": "America/Los_Angeles"
        }"#;

        let location = parse_location(body).expect("valid response");

        assert_eq!(location.city, "San Francisco");
        assert_eq!(location.region, "California");
        assert_eq!(location.country, "US");
        assert_eq!(location.coordinates.latitude(), 37.7749);
        assert_eq!(location.coordinates.longitude(), -122.4194);
        assert_eq!(location.display_name(), "San Francisco, California, US");
    }

    #[test]
    fn missing_city_defaults_to_unknown() {
        let location = parse_location(r#"{ "loc": "1.5,2.5" }"#).expect("valid response");

        assert_eq!(location.city, "Unknown");
        assert_eq!(location.display_name(), "Unknown");
    }

    #[test]
    fn malformed_loc_is_rejected() {
        let err = parse_location(r#"{ "loc": "somewhere" }"#).unwrap_err();
        assert!(err.to_string().contains("Unexpected ipinfo.io loc value"));

        let err = parse_location(r#"{ "loc": "north,-122.4" }"#).unwrap_err();
        assert!(err.to_string().contains("Invalid latitude"));
    }

    #[test]
    fn missing_loc_is_a_parse_error() {
        let err = parse_location(r#"{ "city": "Oslo" }"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse ipinfo.io JSON"));
    }
}
