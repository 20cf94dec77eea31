use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

use crate::model::{Coordinates, Location};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A location the user saved with `touch-grass configure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl SavedLocation {
    /// Validate the stored coordinates and turn them into a [`Location`].
    pub fn to_location(&self) -> Result<Location> {
        let coords = Coordinates::new(self.latitude, self.longitude)
            .context("Saved location in config file is invalid")?;

        Ok(Location::labelled(self.label.clone(), coords))
    }
}

/// Service endpoints, overridable for mirrors or self-hosted Open-Meteo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast_url: String,
    pub air_quality_url: String,
    pub geolocation_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP timeout in seconds for every request.
    pub timeout_secs: Option<u64>,

    /// Example TOML:
    /// [location]
    /// label = "Home"
    /// latitude = 45.52
    /// longitude = -122.68
    pub location: Option<SavedLocation>,

    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Replace the saved default location.
    pub fn set_location(&mut self, label: String, coords: Coordinates) {
        self.location = Some(SavedLocation {
            label,
            latitude: coords.latitude(),
            longitude: coords.longitude(),
        });
    }

    pub fn clear_location(&mut self) {
        self.location = None;
    }

    /// Saved location, validated. `Ok(None)` when nothing is configured.
    pub fn default_location(&self) -> Result<Option<Location>> {
        self.location.as_ref().map(SavedLocation::to_location).transpose()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "touch-grass", "touch-grass")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
