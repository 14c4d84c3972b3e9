//! Interactive prompts that repeat until the answer is one of the allowed values.

use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use tracing::debug;

use crate::filters::{City, DayFilter, FilterSelection, MonthFilter};
use crate::output::separator;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const CITY_PROMPT: &str = "Choose a city: Chicago, New York City, or Washington: ";
pub const MONTH_PROMPT: &str =
    "Choose a month: January, February, March, April, May, June, or All: ";
pub const DAY_PROMPT: &str = "Choose a day of week: Monday, Tuesday, ..., Sunday, or All: ";
pub const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.";
pub const INVALID_INPUT: &str = "Sorry, I did not understand your input.";

/// Reads one line, without its line ending. `None` once the input is exhausted.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Asks `question` until `parse` accepts the answer.
fn ask<R, W, T, F>(input: &mut R, output: &mut W, question: &str, parse: F) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Option<T>,
{
    loop {
        write!(output, "{}", question)?;
        output.flush()?;

        let Some(answer) = read_line(input)? else {
            bail!("Input closed while waiting for an answer");
        };
        match parse(&answer) {
            Some(value) => return Ok(value),
            None => {
                debug!(answer = %answer, "Rejected prompt input");
                writeln!(output, "{}", INVALID_INPUT)?;
            }
        }
    }
}

/// Asks for city, month and day in turn.
///
/// Each answer is normalized (lowercase city, title-case month and day) and
/// re-asked until it is in the allowed set; there is no retry limit.
///
/// # Errors
///
/// Fails only if reading or writing the terminal fails, or the input ends.
pub fn get_filters<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<FilterSelection> {
    writeln!(output, "{}", GREETING)?;

    let city = ask(input, output, CITY_PROMPT, City::parse)?;
    let month = ask(input, output, MONTH_PROMPT, MonthFilter::parse)?;
    let day = ask(input, output, DAY_PROMPT, DayFilter::parse)?;

    writeln!(output, "{}", separator())?;
    Ok(FilterSelection { city, month, day })
}

/// Asks whether to run another pass. Only exactly `yes`, in any case, restarts;
/// padded answers and end of input do not.
pub fn ask_restart<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    writeln!(output, "{}", RESTART_PROMPT)?;
    output.flush()?;

    let answer = read_line(input)?;
    Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("yes")))
}
