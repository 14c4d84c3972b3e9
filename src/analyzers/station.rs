use serde::Serialize;
use std::collections::HashMap;

use crate::analyzers::counts::{Mode, ValueCounts, most_common};
use crate::trips::TripTable;

/// The most frequent start/end station combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationPair {
    pub start_station: String,
    pub end_station: String,
    pub count: usize,
}

/// The most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Option<Mode<String>>,
    pub end_station: Option<Mode<String>>,
    pub trip: Option<StationPair>,
}

pub fn station_stats(table: &TripTable) -> StationStats {
    let trips = table.trips();

    let start_station = most_common(trips.iter().map(|t| t.start_station.as_str()));
    let end_station = most_common(trips.iter().map(|t| t.end_station.as_str()));

    StationStats {
        start_station: start_station.map(|m| Mode {
            value: m.value.to_string(),
            count: m.count,
        }),
        end_station: end_station.map(|m| Mode {
            value: m.value.to_string(),
            count: m.count,
        }),
        trip: most_common_pair(table),
    }
}

/// Groups trips by start station, counts end stations within each group and
/// returns the pair with the highest count overall.
///
/// Groups are visited in the order their start station first appears, so on
/// a tie the earliest group wins, then the earliest end station within it.
pub fn most_common_pair(table: &TripTable) -> Option<StationPair> {
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, ValueCounts<&str>)> = Vec::new();

    for trip in table.trips() {
        let start = trip.start_station.as_str();
        let i = *group_index.entry(start).or_insert_with(|| {
            groups.push((start, ValueCounts::new()));
            groups.len() - 1
        });
        groups[i].1.add(trip.end_station.as_str());
    }

    let mut best: Option<StationPair> = None;
    for (start, ends) in &groups {
        let Some(mode) = ends.most_common() else {
            continue;
        };
        if best.as_ref().is_none_or(|b| mode.count > b.count) {
            best = Some(StationPair {
                start_station: start.to_string(),
                end_station: mode.value.to_string(),
                count: mode.count,
            });
        }
    }
    best
}
