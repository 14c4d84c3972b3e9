//! Loads a city's trip file and applies the month and day filters.

use anyhow::{Context, Result};
use std::fs::File;
use tracing::info;

use crate::config::CityConfig;
use crate::filters::{DayFilter, FilterSelection, MonthFilter};
use crate::trips::TripTable;

/// Reads the trips for `selection.city` and keeps those matching the month and day filters.
///
/// # Errors
///
/// Returns an error if the city's file cannot be opened or a row fails to parse.
#[tracing::instrument(
    skip(config),
    fields(city = %selection.city, month = selection.month.name(), day = selection.day.name())
)]
pub fn load_data(config: &CityConfig, selection: &FilterSelection) -> Result<TripTable> {
    let path = config.source_path(selection.city);

    let file = File::open(&path)
        .with_context(|| format!("Failed to open trip data {}", path.display()))?;
    let table = TripTable::from_reader(file)
        .with_context(|| format!("Failed to read trip data {}", path.display()))?;

    let loaded = table.len();
    let table = filter_trips(table, selection.month, selection.day);

    info!(path = %path.display(), loaded, retained = table.len(), "Trip data loaded");
    Ok(table)
}

/// Keeps trips whose start time falls in `month`, then those on `day`. `All` skips a filter.
pub fn filter_trips(table: TripTable, month: MonthFilter, day: DayFilter) -> TripTable {
    let table = match month {
        MonthFilter::All => table,
        MonthFilter::Only(m) => table.filter(|t| t.start_month_name() == m.name()),
    };

    match day {
        DayFilter::All => table,
        DayFilter::Only(_) => {
            let name = day.name();
            table.filter(|t| t.start_day_name() == name)
        }
    }
}
