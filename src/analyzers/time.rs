use serde::Serialize;

use crate::analyzers::counts::{Mode, most_common};
use crate::trips::TripTable;

/// The most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Option<Mode<String>>,
    pub day_of_week: Option<Mode<String>>,
    /// Zero-padded hour of day, `"00"` to `"23"`.
    pub start_hour: Option<Mode<String>>,
}

/// Most common start month, weekday and hour. `None` fields mean the table is empty.
pub fn time_stats(table: &TripTable) -> TimeStats {
    let trips = table.trips();

    let month = most_common(trips.iter().map(|t| t.start_month_name()));
    let day_of_week = most_common(trips.iter().map(|t| t.start_day_name()));
    let start_hour = most_common(trips.iter().map(|t| t.start_hour()));

    TimeStats {
        month: month.map(owned),
        day_of_week: day_of_week.map(owned),
        start_hour: start_hour.map(|m| Mode {
            value: format!("{:02}", m.value),
            count: m.count,
        }),
    }
}

fn owned(mode: Mode<&str>) -> Mode<String> {
    Mode {
        value: mode.value.to_string(),
        count: mode.count,
    }
}
