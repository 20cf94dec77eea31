use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use grass_core::{
    Config, ConditionsSource, Coordinates, Evaluation, Location, fetch_conditions,
    find_next_safe_window, evaluate,
    provider::{conditions_source_from_config, geolocator_from_config},
};
use inquire::{CustomType, Text};
use tracing::{debug, info};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "touch-grass",
    version,
    about = "Check if it's safe to go outside and touch grass",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Latitude (skips IP geolocation)
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude (skips IP geolocation)
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a default location so IP geolocation is skipped.
    Configure {
        /// Remove the saved location instead of setting one.
        #[arg(long)]
        clear: bool,
    },
}

/// What to tell the user after looking outside.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    GoOutside,
    KeepCoding { next_window: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub location: Location,
    pub evaluation: Evaluation,
    pub verdict: Verdict,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure { clear }) => configure(clear),
            None => {
                let explicit = explicit_location(self.lat, self.lon)?;
                check(explicit).await
            }
        }
    }
}

/// Location from `--lat`/`--lon`, validated. clap guarantees both or neither.
fn explicit_location(lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<Option<Location>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(Location::custom(Coordinates::new(lat, lon)?))),
        _ => Ok(None),
    }
}

async fn check(explicit: Option<Location>) -> anyhow::Result<()> {
    let config = Config::load()?;

    let location = match explicit {
        Some(location) => location,
        None => match config.default_location()? {
            Some(saved) => saved,
            None => {
                info!("no location given, falling back to IP geolocation");
                geolocator_from_config(&config)?.locate().await?
            }
        },
    };

    let source = conditions_source_from_config(&config)?;
    let report = check_conditions(source.as_ref(), location, Utc::now()).await?;

    print!("{}", render::report(&report, render::pick_nudge()));
    Ok(())
}

/// Fetch, evaluate, and scan the forecast when it isn't nice out right now.
pub async fn check_conditions(
    source: &dyn ConditionsSource,
    location: Location,
    now: DateTime<Utc>,
) -> anyhow::Result<Report> {
    let (weather, air_quality) = fetch_conditions(source, location.coordinates).await?;

    let evaluation = evaluate(&weather.current, &air_quality.current);
    debug!(safe = evaluation.safe, location = %location.display_name(), "evaluated conditions");

    let verdict = if evaluation.safe {
        Verdict::GoOutside
    } else {
        let local_now = weather.local_time(now);
        let next_window = find_next_safe_window(&weather.hourly, &air_quality.hourly, local_now)
            .context("Failed to scan hourly forecast")?;
        Verdict::KeepCoding { next_window }
    };

    Ok(Report {
        location,
        evaluation,
        verdict,
    })
}

fn configure(clear: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if clear {
        config.clear_location();
        config.save()?;
        println!("Saved location cleared. IP geolocation will be used.");
        return Ok(());
    }

    let current = config.location.clone();

    let label = Text::new("Location name:")
        .with_default(current.as_ref().map_or("Home", |loc| loc.label.as_str()))
        .prompt()?;

    let mut latitude_prompt = CustomType::<f64>::new("Latitude (-90 to 90):");
    if let Some(loc) = &current {
        latitude_prompt = latitude_prompt.with_default(loc.latitude);
    }
    let latitude = latitude_prompt.prompt()?;

    let mut longitude_prompt = CustomType::<f64>::new("Longitude (-180 to 180):");
    if let Some(loc) = &current {
        longitude_prompt = longitude_prompt.with_default(loc.longitude);
    }
    let longitude = longitude_prompt.prompt()?;

    let coords = Coordinates::new(latitude, longitude)?;
    config.set_location(label, coords);
    config.save()?;

    println!(
        "Saved default location to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
