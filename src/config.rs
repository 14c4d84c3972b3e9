//! Fixed mappings: city source files and the allowed month/day values.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::filters::City;

/// The value that disables a month or day filter.
pub const ALL: &str = "All";

/// Months covered by the trip files.
pub const ALLOWED_MONTHS: &[&str] = &["January", "February", "March", "April", "May", "June"];

pub const ALLOWED_DAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

static DEFAULT_SOURCES: &[(City, &str)] = &[
    (City::Chicago, "chicago.csv"),
    (City::NewYorkCity, "new_york_city.csv"),
    (City::Washington, "washington.csv"),
];

/// Maps each city to the CSV file holding its trips.
///
/// Defaults to the bundled file names; an override can be loaded from a
/// JSON object keyed by city name:
/// ```json
/// {
///   "chicago": "chicago_2017.csv",
///   "washington": "dc/washington.csv"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CityConfig {
    data_dir: PathBuf,
    sources: HashMap<City, String>,
}

impl CityConfig {
    /// Default file names resolved against `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            sources: DEFAULT_SOURCES
                .iter()
                .map(|(city, file)| (*city, file.to_string()))
                .collect(),
        }
    }

    /// Applies the overrides in the JSON file at `path` on top of the defaults.
    pub fn with_overrides(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read city config {}", path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse city config {}", path.display()))?;

        for (name, file) in entries {
            let city = City::parse(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown city in {}: {}", path.display(), name))?;
            debug!(city = %city, file = %file, "City source overridden");
            self.sources.insert(city, file);
        }
        Ok(self)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the trip file for `city`.
    pub fn source_path(&self, city: City) -> PathBuf {
        // Every city gets a default entry in `new`, overrides only replace.
        let file = self
            .sources
            .get(&city)
            .map(String::as_str)
            .unwrap_or_default();
        self.data_dir.join(file)
    }
}
