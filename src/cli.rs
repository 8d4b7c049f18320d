//! Command-line interface.

use clap::Parser;
use stayboard_core::{FilterSet, RatingRange};
use std::path::PathBuf;

/// Lowest and highest rating a listing can carry.
const RATING_SCALE: (f64, f64) = (0.0, 5.0);

#[derive(Debug, Parser)]
#[command(name = "stayboard", about = "Hotel listing normalizer and dashboard")]
pub struct Cli {
    /// Dataset to load (JSON array, column-oriented JSON, or JSON Lines).
    /// Defaults to `data.path` from the config file.
    pub path: Option<PathBuf>,

    /// Print the dashboard aggregates as JSON instead of starting the TUI.
    #[arg(long)]
    pub summary: bool,

    /// Write debug logs to /tmp/stayboard-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,

    /// Alternative config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep only these cities (repeatable).
    #[arg(long = "city", value_name = "NAME")]
    pub cities: Vec<String>,

    /// Lower end of the rating range.
    #[arg(long, value_name = "RATING", value_parser = finite_rating)]
    pub rating_min: Option<f64>,

    /// Upper end of the rating range.
    #[arg(long, value_name = "RATING", value_parser = finite_rating)]
    pub rating_max: Option<f64>,

    /// Keep only listings offering every one of these amenities (repeatable).
    #[arg(long = "amenity", value_name = "NAME")]
    pub amenities: Vec<String>,
}

impl Cli {
    /// Filters requested on the command line. A single rating bound leaves
    /// the other end open at the edge of the rating scale.
    pub fn filters(&self) -> FilterSet {
        let rating = match (self.rating_min, self.rating_max) {
            (None, None) => None,
            (lo, hi) => Some(RatingRange::new(
                lo.unwrap_or(RATING_SCALE.0),
                hi.unwrap_or(RATING_SCALE.1),
            )),
        };
        FilterSet {
            cities: self.cities.iter().cloned().collect(),
            rating,
            amenities: self.amenities.iter().cloned().collect(),
        }
    }
}

fn finite_rating(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("invalid rating: {s}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("rating must be a finite number, got {s}"))
    }
}
