//! Filter selection: which city, month and day of week to analyze.

use chrono::{Month, Weekday};
use serde::Serialize;
use std::fmt;

use crate::config::{ALLOWED_DAYS, ALLOWED_MONTHS, ALL};

/// One of the cities a trip file is provided for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name, as typed at the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Lowercases `input` and matches it against the known city names.
    pub fn parse(input: &str) -> Option<City> {
        let normalized = input.to_lowercase();
        City::ALL.into_iter().find(|c| c.name() == normalized)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Month restriction applied to the trip start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// Title-cases `input` and accepts it only if it is one of the allowed months or `All`.
    pub fn parse(input: &str) -> Option<MonthFilter> {
        let normalized = title_case(input);
        if normalized == ALL {
            return Some(MonthFilter::All);
        }
        if !ALLOWED_MONTHS.contains(&normalized.as_str()) {
            return None;
        }
        normalized.parse::<Month>().ok().map(MonthFilter::Only)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MonthFilter::All => ALL,
            MonthFilter::Only(m) => m.name(),
        }
    }
}

/// Day-of-week restriction applied to the trip start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Title-cases `input` and accepts it only if it is a weekday name or `All`.
    pub fn parse(input: &str) -> Option<DayFilter> {
        let normalized = title_case(input);
        if normalized == ALL {
            return Some(DayFilter::All);
        }
        if !ALLOWED_DAYS.contains(&normalized.as_str()) {
            return None;
        }
        normalized.parse::<Weekday>().ok().map(DayFilter::Only)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayFilter::All => ALL,
            DayFilter::Only(d) => weekday_name(*d),
        }
    }
}

/// Full English name of a weekday, matching `%A`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// The city/month/day triple chosen for one report pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    /// Builds a selection from command-line strings, failing on the first value
    /// outside its allowed set. Surrounding whitespace is ignored here, unlike at the prompts.
    pub fn from_args(city: &str, month: &str, day: &str) -> anyhow::Result<Self> {
        let (city, month, day) = (city.trim(), month.trim(), day.trim());
        let city = City::parse(city).ok_or_else(|| anyhow::anyhow!("Unknown city: {}", city))?;
        let month = MonthFilter::parse(month)
            .ok_or_else(|| anyhow::anyhow!("Month must be one of {:?} or All: {}", ALLOWED_MONTHS, month))?;
        let day = DayFilter::parse(day)
            .ok_or_else(|| anyhow::anyhow!("Day must be one of {:?} or All: {}", ALLOWED_DAYS, day))?;
        Ok(Self { city, month, day })
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
