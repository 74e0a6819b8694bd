//! Class meeting schedule: which weekdays a class meets and its first/last day

use crate::error::{NotesError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| NotesError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", input)))
}

/// Set of weekdays on which a class meets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeetingDays {
    bits: u8,
}

impl MeetingDays {
    /// Build from a list of weekdays (duplicates are ignored)
    pub fn from_weekdays(days: &[Weekday]) -> Result<Self> {
        let bits = days
            .iter()
            .fold(0u8, |acc, day| acc | (1 << day.num_days_from_monday()));

        if bits == 0 {
            return Err(NotesError::InvalidSchedule(
                "at least one meeting day is required".to_string(),
            ));
        }

        Ok(MeetingDays { bits })
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.bits & (1 << day.num_days_from_monday()) != 0
    }

    /// Meeting weekdays, Monday first
    pub fn weekdays(&self) -> Vec<Weekday> {
        ALL_DAYS
            .iter()
            .copied()
            .filter(|day| self.contains(*day))
            .collect()
    }

    fn code(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "M",
            Weekday::Tue => "T",
            Weekday::Wed => "W",
            Weekday::Thu => "Th",
            Weekday::Fri => "F",
            Weekday::Sat => "Sa",
            Weekday::Sun => "Su",
        }
    }

    /// Parse compact codes such as "MW", "TTh", "MWF" or "TR"
    fn parse_codes(input: &str) -> Result<Vec<Weekday>> {
        let chars: Vec<char> = input
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let mut days = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let (day, width) = match (chars[i], chars.get(i + 1)) {
                ('t', Some('h')) => (Weekday::Thu, 2),
                ('s', Some('a')) => (Weekday::Sat, 2),
                ('s', Some('u')) => (Weekday::Sun, 2),
                ('m', _) => (Weekday::Mon, 1),
                ('t', _) => (Weekday::Tue, 1),
                ('w', _) => (Weekday::Wed, 1),
                ('r', _) => (Weekday::Thu, 1),
                ('f', _) => (Weekday::Fri, 1),
                _ => {
                    return Err(NotesError::InvalidSchedule(format!(
                        "unrecognized meeting days '{}'",
                        input
                    )))
                }
            };
            days.push(day);
            i += width;
        }

        Ok(days)
    }

    /// Parse comma-separated weekday names such as "mon,wed" or "tuesday, thursday"
    fn parse_names(input: &str) -> Result<Vec<Weekday>> {
        input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                Weekday::from_str(part).map_err(|_| {
                    NotesError::InvalidSchedule(format!("unrecognized weekday '{}'", part))
                })
            })
            .collect()
    }
}

impl FromStr for MeetingDays {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let days = if trimmed.contains(',') || Weekday::from_str(trimmed).is_ok() {
            Self::parse_names(trimmed)?
        } else {
            Self::parse_codes(trimmed)?
        };
        Self::from_weekdays(&days)
    }
}

impl fmt::Display for MeetingDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.weekdays() {
            f.write_str(Self::code(day))?;
        }
        Ok(())
    }
}

impl TryFrom<String> for MeetingDays {
    type Error = NotesError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MeetingDays> for String {
    fn from(days: MeetingDays) -> Self {
        days.to_string()
    }
}

/// Meeting pattern plus the first and last day of class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub days: MeetingDays,
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl ClassSchedule {
    pub fn new(days: MeetingDays, first: NaiveDate, last: NaiveDate) -> Result<Self> {
        let schedule = ClassSchedule { days, first, last };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check the first <= last invariant (the day set is non-empty by construction)
    pub fn validate(&self) -> Result<()> {
        if self.first > self.last {
            return Err(NotesError::InvalidSchedule(format!(
                "first day {} is after last day {}",
                self.first, self.last
            )));
        }
        Ok(())
    }

    /// Whether the class meets on this date
    pub fn admits(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last && self.days.contains(date.weekday())
    }

    /// Explain why a date is not a valid lecture date
    pub fn check_date(&self, date: NaiveDate) -> Result<()> {
        if date < self.first || date > self.last {
            return Err(NotesError::InvalidDate(format!(
                "{} is outside the class dates {} to {}",
                date, self.first, self.last
            )));
        }
        if !self.days.contains(date.weekday()) {
            return Err(NotesError::InvalidDate(format!(
                "{} is a {}, but the class meets on {}",
                date,
                date.format("%A"),
                self.days
            )));
        }
        Ok(())
    }

    /// Every meeting date in [first, last], ascending
    pub fn meeting_dates(&self) -> Vec<NaiveDate> {
        self.first
            .iter_days()
            .take_while(|date| *date <= self.last)
            .filter(|date| self.days.contains(date.weekday()))
            .collect()
    }
}
