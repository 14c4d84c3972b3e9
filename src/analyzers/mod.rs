//! Trip statistics.
//!
//! Each aggregator reads a filtered [`TripTable`](crate::trips::TripTable)
//! and returns a serializable summary. Only [`duration::duration_stats`]
//! touches the table, adding the derived `Duration` column.

pub mod counts;
pub mod duration;
pub mod station;
pub mod time;
pub mod user;
pub mod utility;

use serde::Serialize;

use crate::filters::FilterSelection;
use crate::trips::TripTable;
use duration::{DurationStats, duration_stats};
use station::{StationStats, station_stats};
use time::{TimeStats, time_stats};
use user::{UserStats, user_stats};

/// All four summaries for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub city: String,
    pub month: String,
    pub day: String,
    pub trips: usize,
    pub times: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl TripReport {
    pub fn build(selection: &FilterSelection, table: &mut TripTable) -> Self {
        Self {
            city: selection.city.name().to_string(),
            month: selection.month.name().to_string(),
            day: selection.day.name().to_string(),
            trips: table.len(),
            times: time_stats(table),
            stations: station_stats(table),
            durations: duration_stats(table),
            users: user_stats(table),
        }
    }
}
