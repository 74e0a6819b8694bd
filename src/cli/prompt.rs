//! Interactive prompting for schedule values not given on the command line

use crate::domain::{parse_date, ClassSchedule, MeetingDays};
use crate::error::{NotesError, Result};
use std::io::{BufRead, Write};

/// Ask for one value, returning the trimmed answer
pub fn prompt_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String> {
    write!(output, "{}: ", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(NotesError::InvalidSchedule(format!(
            "no value given for '{}'",
            label
        )));
    }
    Ok(line.trim().to_string())
}

/// Build a schedule from provided values, prompting for any that are missing
pub fn gather_schedule<R: BufRead, W: Write>(
    days: Option<String>,
    first: Option<String>,
    last: Option<String>,
    input: &mut R,
    output: &mut W,
) -> Result<ClassSchedule> {
    let days = match days {
        Some(days) => days,
        None => prompt_value(input, output, "Meeting days (e.g. MW, TTh, MWF)")?,
    };
    let days: MeetingDays = days.parse()?;

    let first = match first {
        Some(first) => first,
        None => prompt_value(input, output, "First day of class (YYYY-MM-DD)")?,
    };
    let last = match last {
        Some(last) => last,
        None => prompt_value(input, output, "Last day of class (YYYY-MM-DD)")?,
    };

    ClassSchedule::new(days, parse_date(&first)?, parse_date(&last)?)
}
