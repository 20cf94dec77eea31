//! Terminal output for reports and errors.

use crossterm::style::Stylize;
use grass_core::provider::is_network_error;
use rand::seq::SliceRandom;

use crate::cli::{Report, Verdict};

const NUDGES: [&str; 5] = [
    "The mass of grass is calling your name.",
    "Your IDE will still be here when you get back.",
    "Even Linus Torvalds goes outside sometimes.",
    "Fresh air is the best debugger.",
    "Touch grass. Commit later.",
];

pub fn pick_nudge() -> &'static str {
    NUDGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(NUDGES[0])
}

fn status_dot(safe: bool) -> String {
    if safe {
        "●".green().to_string()
    } else {
        "●".red().to_string()
    }
}

/// Full report: location, one line per factor, then the verdict.
pub fn report(report: &Report, nudge: &str) -> String {
    let mut lines = vec![
        String::new(),
        format!("📍 {}", report.location.display_name()).bold().to_string(),
        String::new(),
    ];

    lines.extend(
        report
            .evaluation
            .checks
            .iter()
            .map(|check| format!(" {} {}", status_dot(check.safe), check.reason)),
    );
    lines.push(String::new());

    match &report.verdict {
        Verdict::GoOutside => {
            lines.push("Go touch grass!".bold().green().to_string());
            lines.push(nudge.dim().to_string());
        }
        Verdict::KeepCoding { next_window } => {
            lines.push("Keep coding...".bold().red().to_string());
            let hint = match next_window {
                Some(time) => format!("Try again at {time}"),
                None => "No safe window left today. Try tomorrow!".to_string(),
            };
            lines.push(hint.dim().to_string());
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One-line error message; transport failures are called out as such.
pub fn error(err: &anyhow::Error) -> String {
    let message = if is_network_error(err) {
        format!("Network error: {err:#}")
    } else {
        format!("Error: {err:#}")
    };

    message.red().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grass_core::{Coordinates, CurrentAirQuality, CurrentWeather, Location, evaluate};

    fn report_for(temp: f64, verdict: Verdict) -> Report {
        let weather = CurrentWeather {
            temperature: Some(temp),
            rain: Some(0.0),
            uv_index: Some(2.0),
        };
        let air = CurrentAirQuality {
            european_aqi: Some(20.0),
        };

        Report {
            location: Location::custom(Coordinates::new(45.52, -122.68).unwrap()),
            evaluation: evaluate(&weather, &air),
            verdict,
        }
    }

    #[test]
    fn safe_report_says_go_touch_grass() {
        let out = report(&report_for(22.0, Verdict::GoOutside), NUDGES[3]);

        assert!(out.contains("📍 Custom"));
        assert!(out.contains("Temperature is 22°C"));
        assert!(out.contains("Air quality good (EU AQI: 20)"));
        assert!(out.contains("Go touch grass!"));
        assert!(out.contains("Fresh air is the best debugger."));
    }

    #[test]
    fn unsafe_report_with_window() {
        let verdict = Verdict::KeepCoding {
            next_window: Some("4:00 PM".into()),
        };
        let out = report(&report_for(40.0, verdict), NUDGES[0]);

        assert!(out.contains("Temperature too hot (40°C)"));
        assert!(out.contains("Keep coding..."));
        assert!(out.contains("Try again at 4:00 PM"));
        assert!(!out.contains("Go touch grass!"));
    }

    #[test]
    fn unsafe_report_without_window() {
        let verdict = Verdict::KeepCoding { next_window: None };
        let out = report(&report_for(40.0, verdict), NUDGES[0]);

        assert!(out.contains("No safe window left today. Try tomorrow!"));
    }

    #[test]
    fn report_layout_is_line_per_item() {
        let out = report(&report_for(22.0, Verdict::GoOutside), NUDGES[0]);
        let lines: Vec<&str> = out.lines().collect();

        // blank, location, blank, four factors, blank, verdict, nudge
        assert_eq!(lines.len(), 10);
        assert!(lines[1].contains("📍 Custom"));
        assert!(lines[3].contains("Temperature is 22°C"));
        assert!(lines[6].contains("Air quality good (EU AQI: 20)"));
        assert!(lines[8].contains("Go touch grass!"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn one_line_per_factor() {
        let out = report(&report_for(22.0, Verdict::GoOutside), NUDGES[0]);
        assert_eq!(out.matches('●').count(), 4);
    }

    #[test]
    fn nudge_comes_from_the_list() {
        assert!(NUDGES.contains(&pick_nudge()));
    }

    #[test]
    fn data_errors_are_not_network_errors() {
        let err = anyhow::anyhow!("missing field `current`").context("Failed to parse JSON");
        let line = error(&err);

        assert!(line.contains("Error: Failed to parse JSON: missing field `current`"));
        assert!(!line.contains("Network error"));
    }
}
