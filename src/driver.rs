//! Runs the prompt → load → report cycle.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::debug;

use crate::analyzers::duration::duration_stats;
use crate::analyzers::station::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::user::user_stats;
use crate::config::CityConfig;
use crate::loader::load_data;
use crate::output::{
    write_duration_stats, write_elapsed, write_section_header, write_station_stats,
    write_time_stats, write_user_stats,
};
use crate::prompt::{ask_restart, get_filters};
use crate::trips::TripTable;

/// Runs report passes until the user declines to restart.
///
/// Every pass asks for a fresh filter selection and loads the city's trips
/// again; nothing carries over between passes.
///
/// # Errors
///
/// Returns an error if a trip file cannot be read, or the terminal fails.
pub fn run_session<R: BufRead, W: Write>(
    config: &CityConfig,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let mut pass = 0usize;
    loop {
        pass += 1;
        let selection = get_filters(input, output)?;
        debug!(pass, ?selection, "Filters selected");

        let mut table = load_data(config, &selection)?;
        write_report(output, &mut table)?;

        if !ask_restart(input, output)? {
            break;
        }
    }
    debug!(passes = pass, "Session finished");
    Ok(())
}

/// Writes the four report sections for `table`, each followed by its elapsed time.
///
/// Adds the `Duration` column to `table`.
pub fn write_report<W: Write>(output: &mut W, table: &mut TripTable) -> Result<()> {
    write_section_header(output, "Calculating The Most Frequent Times of Travel")?;
    let start = Instant::now();
    let times = time_stats(table);
    write_time_stats(output, &times)?;
    write_elapsed(output, start.elapsed())?;

    write_section_header(output, "Calculating The Most Popular Stations and Trip")?;
    let start = Instant::now();
    let stations = station_stats(table);
    write_station_stats(output, &stations)?;
    write_elapsed(output, start.elapsed())?;

    write_section_header(output, "Calculating Trip Duration")?;
    let start = Instant::now();
    let durations = duration_stats(table);
    write_duration_stats(output, &durations)?;
    write_elapsed(output, start.elapsed())?;

    write_section_header(output, "Calculating User Stats")?;
    let start = Instant::now();
    let users = user_stats(table);
    write_user_stats(output, &users)?;
    write_elapsed(output, start.elapsed())?;

    debug!(trips = table.len(), "Report written");
    Ok(())
}
