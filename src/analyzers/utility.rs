use chrono::TimeDelta;

/// Arithmetic mean of a slice of intervals, to the microsecond. Returns `None` for empty input.
pub fn mean_interval(values: &[TimeDelta]) -> Option<TimeDelta> {
    if values.is_empty() {
        return None;
    }
    let total: TimeDelta = values.iter().sum();
    let micros = total.num_microseconds()?;
    Some(TimeDelta::microseconds(micros / values.len() as i64))
}

/// Formats an interval as `"<days> days HH:MM:SS"`, appending microseconds
/// only when there is a fractional second.
///
/// ```
/// use bikeshare_stats::analyzers::utility::format_interval;
/// use chrono::TimeDelta;
///
/// assert_eq!(format_interval(TimeDelta::minutes(20)), "0 days 00:20:00");
/// assert_eq!(format_interval(TimeDelta::seconds(90_061)), "1 days 01:01:01");
/// assert_eq!(format_interval(TimeDelta::milliseconds(1_500)), "0 days 00:00:01.500000");
/// ```
pub fn format_interval(value: TimeDelta) -> String {
    let sign = if value < TimeDelta::zero() { "-" } else { "" };
    let value = value.abs();

    let total_seconds = value.num_seconds();
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    let micros = value.subsec_nanos() / 1_000;

    if micros == 0 {
        format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    }
}
