use serde::Serialize;

use crate::analyzers::counts::{Mode, ValueCounts, most_common};
use crate::trips::{Column, TripTable};

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub most_recent: Option<i32>,
    pub most_common: Option<Mode<i32>>,
}

/// Statistics on bikeshare users.
///
/// `gender` and `birth_year` are `None` when the city does not record them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<Mode<String>>,
    pub gender: Option<Vec<Mode<String>>>,
    pub birth_year: Option<BirthYearStats>,
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let trips = table.trips();

    let user_types = breakdown(trips.iter().filter_map(|t| t.user_type.as_deref()));

    let gender = table
        .has_column(Column::Gender)
        .then(|| breakdown(trips.iter().filter_map(|t| t.gender.as_deref())));

    let birth_year = table.has_column(Column::BirthYear).then(|| {
        let years: Vec<i32> = trips
            .iter()
            .filter_map(|t| t.birth_year)
            .map(|y| y as i32)
            .collect();
        BirthYearStats {
            earliest: years.iter().copied().min(),
            most_recent: years.iter().copied().max(),
            most_common: most_common(years),
        }
    });

    UserStats {
        user_types,
        gender,
        birth_year,
    }
}

/// Per-value counts in descending order; missing cells are not counted.
fn breakdown<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Mode<String>> {
    let counts: ValueCounts<&str> = values.collect();
    counts
        .descending()
        .into_iter()
        .map(|m| Mode {
            value: m.value.to_string(),
            count: m.count,
        })
        .collect()
}
