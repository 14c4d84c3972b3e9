use chrono::TimeDelta;
use serde::{Serialize, Serializer};

use crate::analyzers::utility::{format_interval, mean_interval};
use crate::trips::TripTable;

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    #[serde(serialize_with = "serialize_interval")]
    pub total: TimeDelta,
    /// `None` when there are no trips to average.
    #[serde(serialize_with = "serialize_optional_interval")]
    pub mean: Option<TimeDelta>,
}

/// Adds the `Duration` column to `table` and summarizes it.
pub fn duration_stats(table: &mut TripTable) -> DurationStats {
    let durations = table.add_duration_column();

    DurationStats {
        trips: durations.len(),
        total: durations.iter().sum(),
        mean: mean_interval(durations),
    }
}

fn serialize_interval<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_interval(*value))
}

fn serialize_optional_interval<S: Serializer>(
    value: &Option<TimeDelta>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&format_interval(*v)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::Column;
    use crate::trips::tests::trip;

    #[test]
    fn test_duration_stats_sum_and_mean() {
        let mut table = TripTable::new(
            &Column::REQUIRED,
            vec![
                trip("2017-01-01 10:00:00", "2017-01-01 10:05:00", "A", "B"),
                trip("2017-01-01 10:00:00", "2017-01-01 10:15:00", "A", "B"),
            ],
        );

        let stats = duration_stats(&mut table);
        assert_eq!(stats.trips, 2);
        assert_eq!(stats.total, TimeDelta::minutes(20));
        assert_eq!(stats.mean, Some(TimeDelta::minutes(10)));
    }

    #[test]
    fn test_duration_stats_adds_column() {
        let mut table = TripTable::new(
            &Column::REQUIRED,
            vec![trip("2017-01-01 10:00:00", "2017-01-01 10:05:00", "A", "B")],
        );
        assert!(!table.has_column(Column::Duration));

        duration_stats(&mut table);
        assert!(table.has_column(Column::Duration));
        assert_eq!(table.durations(), Some(&[TimeDelta::minutes(5)][..]));
    }

    #[test]
    fn test_duration_stats_empty_table() {
        let stats = duration_stats(&mut TripTable::default());
        assert_eq!(stats.trips, 0);
        assert_eq!(stats.total, TimeDelta::zero());
        assert_eq!(stats.mean, None);
    }

    #[test]
    fn test_duration_stats_json() {
        let mut table = TripTable::new(
            &Column::REQUIRED,
            vec![trip("2017-01-01 10:00:00", "2017-01-01 10:05:00", "A", "B")],
        );
        let json = serde_json::to_value(duration_stats(&mut table)).unwrap();
        assert_eq!(json["total"], "0 days 00:05:00");
        assert_eq!(json["mean"], "0 days 00:05:00");
        assert_eq!(json["trips"], 1);
    }
}
