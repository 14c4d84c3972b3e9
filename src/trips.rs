//! Trip records and the in-memory trip table for one city.

use anyhow::{Result, bail};
use chrono::{Datelike, Month, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::filters::weekday_name;

/// Format used by the bikeshare exports, with optional fractional seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A column of the trip table. `Gender`, `BirthYear` and `Duration` may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StartTime,
    EndTime,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
    Duration,
}

impl Column {
    /// Columns every city file must provide.
    pub const REQUIRED: [Column; 5] = [
        Column::StartTime,
        Column::EndTime,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
    ];

    /// Columns a city file may provide.
    pub const OPTIONAL: [Column; 2] = [Column::Gender, Column::BirthYear];

    /// Header text as it appears in the CSV files.
    pub fn header(&self) -> &'static str {
        match self {
            Column::StartTime => "Start Time",
            Column::EndTime => "End Time",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
            Column::Duration => "Duration",
        }
    }
}

/// A single bicycle-share ride, deserialized from one CSV row.
///
/// Unknown columns (the unnamed index column, `Trip Duration`) are ignored.
/// Empty cells in the optional columns deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "Start Time", deserialize_with = "deserialize_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "End Time", deserialize_with = "deserialize_timestamp")]
    pub end_time: NaiveDateTime,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    // Stored as a decimal ("1989.0") in the source files.
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

impl TripRecord {
    /// Full month name of the start time, e.g. `"March"`.
    pub fn start_month_name(&self) -> &'static str {
        // `month()` is always 1..=12.
        Month::try_from(self.start_time.month() as u8)
            .map(|m| m.name())
            .unwrap_or_default()
    }

    /// Full weekday name of the start time, e.g. `"Tuesday"`.
    pub fn start_day_name(&self) -> &'static str {
        weekday_name(self.start_time.weekday())
    }

    /// Hour of day of the start time, `0..=23`.
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
}

/// The trips of one city, in file order.
///
/// Tracks which columns the source provided so aggregators can ask
/// [`TripTable::has_column`] instead of guessing from the row values.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    columns: Vec<Column>,
    trips: Vec<TripRecord>,
    durations: Option<Vec<TimeDelta>>,
}

impl TripTable {
    /// Builds a table directly from records. Used by tests and callers that
    /// already hold parsed rows.
    pub fn new(columns: &[Column], trips: Vec<TripRecord>) -> Self {
        Self {
            columns: columns.to_vec(),
            trips,
            durations: None,
        }
    }

    /// Reads a CSV with headers, failing if any required column is missing
    /// or a row does not parse.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();
        let present = |column: &Column| headers.iter().any(|h| h.trim() == column.header());

        let missing: Vec<&str> = Column::REQUIRED
            .iter()
            .filter(|c| !present(c))
            .map(|c| c.header())
            .collect();
        if !missing.is_empty() {
            bail!("Trip data is missing columns: {}", missing.join(", "));
        }

        let mut columns = Column::REQUIRED.to_vec();
        columns.extend(Column::OPTIONAL.iter().filter(|c| present(c)));

        let mut trips = Vec::new();
        for result in rdr.deserialize() {
            let record: TripRecord = result?;
            trips.push(record);
        }

        Ok(Self::new(&columns, trips))
    }

    /// Whether the source provided `column` (or, for `Duration`, whether it has been derived).
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Keeps only the trips matching `predicate`, preserving their order.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&TripRecord) -> bool,
    {
        let trips = self.trips.into_iter().filter(|t| predicate(t)).collect();
        // Any derived column no longer lines up with the rows.
        let columns = self
            .columns
            .into_iter()
            .filter(|c| *c != Column::Duration)
            .collect();
        Self {
            columns,
            trips,
            durations: None,
        }
    }

    /// Derives `Duration = End Time - Start Time` for every row and adds it as a column.
    pub fn add_duration_column(&mut self) -> &[TimeDelta] {
        if !self.has_column(Column::Duration) {
            self.columns.push(Column::Duration);
        }
        let trips = &self.trips;
        self.durations
            .get_or_insert_with(|| trips.iter().map(TripRecord::duration).collect())
    }

    /// The derived durations, if [`TripTable::add_duration_column`] has run.
    pub fn durations(&self) -> Option<&[TimeDelta]> {
        self.durations.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const FULL_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

    pub(crate) fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    pub(crate) fn trip(start: &str, end: &str, from: &str, to: &str) -> TripRecord {
        TripRecord {
            start_time: ts(start),
            end_time: ts(end),
            start_station: from.to_string(),
            end_station: to.to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    #[test]
    fn test_from_reader_with_optional_columns() {
        let csv = format!(
            "{}\n0,2017-01-01 00:07:57,2017-01-01 00:20:53,776,Canal St,Clark St,Subscriber,Male,1989.0\n1,2017-01-01 00:07:57,2017-01-01 00:20:53,776,Canal St,Clark St,Customer,,\n",
            FULL_HEADER
        );
        let table = TripTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.has_column(Column::Gender));
        assert!(table.has_column(Column::BirthYear));
        assert!(!table.has_column(Column::Duration));

        let first = &table.trips()[0];
        assert_eq!(first.start_time, ts("2017-01-01 00:07:57"));
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1989.0));

        let second = &table.trips()[1];
        assert_eq!(second.user_type.as_deref(), Some("Customer"));
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
    }

    #[test]
    fn test_from_reader_without_optional_columns() {
        let csv = "Start Time,End Time,Start Station,End Station,User Type\n\
                   2017-06-21 08:36:34,2017-06-21 08:44:43,A,B,Subscriber\n";
        let table = TripTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert!(!table.has_column(Column::Gender));
        assert!(!table.has_column(Column::BirthYear));
    }

    #[test]
    fn test_from_reader_missing_required_column() {
        let csv = "Start Time,End Time,Start Station\n2017-06-21 08:36:34,2017-06-21 08:44:43,A\n";
        let err = TripTable::from_reader(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("End Station"));
        assert!(msg.contains("User Type"));
    }

    #[test]
    fn test_from_reader_bad_timestamp() {
        let csv = "Start Time,End Time,Start Station,End Station,User Type\nyesterday,2017-06-21 08:44:43,A,B,Subscriber\n";
        assert!(TripTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_derived_calendar_fields() {
        let t = trip("2017-03-07 05:09:00", "2017-03-07 05:19:00", "A", "B");
        assert_eq!(t.start_month_name(), "March");
        assert_eq!(t.start_day_name(), "Tuesday");
        assert_eq!(t.start_hour(), 5);
        assert_eq!(t.duration(), TimeDelta::minutes(10));
    }

    #[test]
    fn test_start_month_name_every_month() {
        let names: Vec<&str> = (1..=12)
            .map(|m| {
                let start = format!("2017-{:02}-15 12:00:00", m);
                trip(&start, &start, "A", "B").start_month_name()
            })
            .collect();
        assert_eq!(names.first(), Some(&"January"));
        assert_eq!(names[5], "June");
        assert_eq!(names.last(), Some(&"December"));
        assert!(names.iter().all(|n| !n.is_empty()));
    }

    #[test]
    fn test_filter_preserves_order() {
        let table = TripTable::new(
            &Column::REQUIRED,
            vec![
                trip("2017-01-01 10:00:00", "2017-01-01 10:05:00", "A", "B"),
                trip("2017-02-01 10:00:00", "2017-02-01 10:05:00", "C", "D"),
                trip("2017-01-02 10:00:00", "2017-01-02 10:05:00", "E", "F"),
            ],
        );
        let filtered = table.filter(|t| t.start_month_name() == "January");
        let stations: Vec<&str> = filtered.trips().iter().map(|t| t.start_station.as_str()).collect();
        assert_eq!(stations, vec!["A", "E"]);
    }

    #[test]
    fn test_add_duration_column() {
        let mut table = TripTable::new(
            &Column::REQUIRED,
            vec![
                trip("2017-01-01 10:00:00", "2017-01-01 10:05:00", "A", "B"),
                trip("2017-01-01 10:00:00", "2017-01-01 10:15:00", "A", "B"),
            ],
        );
        assert!(table.durations().is_none());

        let durations = table.add_duration_column().to_vec();
        assert_eq!(durations, vec![TimeDelta::minutes(5), TimeDelta::minutes(15)]);
        assert!(table.has_column(Column::Duration));

        table.add_duration_column();
        let count = table.columns().iter().filter(|c| **c == Column::Duration).count();
        assert_eq!(count, 1);
    }
}
