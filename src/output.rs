//! Report rendering and persistence.
//!
//! Writes the human-readable report sections, the JSON report and CSV exports
//! of a filtered trip table.

use anyhow::Result;
use csv::WriterBuilder;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::analyzers::TripReport;
use crate::analyzers::counts::Mode;
use crate::analyzers::duration::DurationStats;
use crate::analyzers::station::StationStats;
use crate::analyzers::time::TimeStats;
use crate::analyzers::user::UserStats;
use crate::analyzers::utility::format_interval;
use crate::trips::{Column, TIMESTAMP_FORMAT, TripTable};

pub const SEPARATOR_WIDTH: usize = 40;

pub const NO_TRIPS: &str = "No trips match the selected filters.";

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Writes the blank-line padded heading that opens a report section.
pub fn write_section_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}...\n", title)
}

/// Closes a report section with its elapsed time and the separator.
pub fn write_elapsed<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", separator())
}

fn write_mode<W: Write, T: Display>(out: &mut W, label: &str, mode: Option<&Mode<T>>) -> io::Result<()> {
    match mode {
        Some(m) => writeln!(out, "The most common {} is {}. Count: {}", label, m.value, m.count),
        None => writeln!(out, "The most common {}: {}", label, NO_TRIPS),
    }
}

fn write_counts<W: Write>(out: &mut W, heading: &str, counts: &[Mode<String>]) -> io::Result<()> {
    writeln!(out, "{}", heading)?;
    for m in counts {
        writeln!(out, "{}: {}", m.value, m.count)?;
    }
    Ok(())
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    write_mode(out, "month", stats.month.as_ref())?;
    write_mode(out, "day of week", stats.day_of_week.as_ref())?;
    write_mode(out, "start hour", stats.start_hour.as_ref())
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    write_mode(out, "start station", stats.start_station.as_ref())?;
    write_mode(out, "end station", stats.end_station.as_ref())?;
    match &stats.trip {
        Some(pair) => writeln!(
            out,
            "The most frequent combination of start and end station trip is {} to {}. Count: {}",
            pair.start_station, pair.end_station, pair.count
        ),
        None => writeln!(
            out,
            "The most frequent combination of start and end station trip: {}",
            NO_TRIPS
        ),
    }
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "Total travel time: {}", format_interval(stats.total))?;
    match stats.mean {
        Some(mean) => writeln!(out, "Average travel time: {}", format_interval(mean)),
        None => writeln!(out, "Average travel time: {}", NO_TRIPS),
    }
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    write_counts(out, "Counts of user types:", &stats.user_types)?;
    writeln!(out)?;

    if let Some(gender) = &stats.gender {
        write_counts(out, "Counts of gender:", gender)?;
        writeln!(out)?;
    }

    if let Some(years) = &stats.birth_year {
        match (years.earliest, years.most_recent, &years.most_common) {
            (Some(earliest), Some(most_recent), Some(common)) => {
                writeln!(out, "Earliest birth year: {}", earliest)?;
                writeln!(out, "Most recent birth year: {}", most_recent)?;
                writeln!(
                    out,
                    "Most common birth year is {}. Count: {}",
                    common.value, common.count
                )?;
            }
            _ => writeln!(out, "No birth year data available.")?,
        }
    }
    Ok(())
}

/// Writes the full report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &TripReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes the trips of `table` to a CSV file at `path`, replacing any existing file.
///
/// Only the columns the table carries are written; `Duration` is written in seconds.
pub fn export_trips(path: &Path, table: &TripTable) -> Result<()> {
    debug!(path = %path.display(), rows = table.len(), "Exporting trips");

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    let columns = table.columns();
    writer.write_record(columns.iter().map(Column::header))?;

    let durations = table.durations();
    for (i, trip) in table.trips().iter().enumerate() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| match column {
                Column::StartTime => trip.start_time.format(TIMESTAMP_FORMAT).to_string(),
                Column::EndTime => trip.end_time.format(TIMESTAMP_FORMAT).to_string(),
                Column::StartStation => trip.start_station.clone(),
                Column::EndStation => trip.end_station.clone(),
                Column::UserType => trip.user_type.clone().unwrap_or_default(),
                Column::Gender => trip.gender.clone().unwrap_or_default(),
                Column::BirthYear => trip
                    .birth_year
                    .map(|y| (y as i32).to_string())
                    .unwrap_or_default(),
                Column::Duration => durations
                    .and_then(|d| d.get(i))
                    .map(|d| d.num_seconds().to_string())
                    .unwrap_or_default(),
            })
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Trips exported");
    Ok(())
}
