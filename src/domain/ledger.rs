//! Lecture ledger: the lecture number <-> date <-> file mapping for one class
//!
//! The ledger itself is pure data. Edits return an [`EditOutcome`] describing
//! the new ledger together with the content-file moves needed to reach it, so
//! callers can plan every filesystem change before touching the disk.

use crate::domain::schedule::ClassSchedule;
use crate::error::{NotesError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Private ledger storage directory
pub const LEDGER_DIR: &str = ".notes";
/// Human-authored content directory
pub const CONTENT_DIR: &str = "notes";
/// Build output directory (filled by an external build step)
pub const OUTPUT_DIR: &str = "outputs";
/// Ledger record inside LEDGER_DIR
pub const LEDGER_FILE: &str = "lectures.json";
/// Aggregate document inside LEDGER_DIR
pub const AGGREGATE_FILE: &str = "notes.tex";
/// Removed authored content is kept here, inside LEDGER_DIR
pub const ARCHIVE_DIR: &str = "archive";

/// File stem shared by a lecture's content and wrapper files ("lec01")
pub fn lecture_stem(number: usize) -> String {
    format!("lec{:02}", number)
}

/// Relative path of the aggregate file
pub fn aggregate_path() -> PathBuf {
    PathBuf::from(LEDGER_DIR).join(AGGREGATE_FILE)
}

/// Relative path of the ledger record
pub fn ledger_record_path() -> PathBuf {
    PathBuf::from(LEDGER_DIR).join(LEDGER_FILE)
}

/// A single lecture view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lecture {
    pub number: usize,
    pub date: NaiveDate,
}

impl Lecture {
    pub fn new(number: usize, date: NaiveDate) -> Self {
        Lecture { number, date }
    }

    pub fn stem(&self) -> String {
        lecture_stem(self.number)
    }

    /// Content file, relative to the class root ("notes/lec01.tex")
    pub fn content_path(&self) -> PathBuf {
        content_path(self.number)
    }

    /// Generated wrapper file, relative to the class root (".notes/lec01.tex")
    pub fn wrapper_path(&self) -> PathBuf {
        wrapper_path(self.number)
    }
}

pub fn content_path(number: usize) -> PathBuf {
    PathBuf::from(CONTENT_DIR).join(format!("{}.tex", lecture_stem(number)))
}

pub fn wrapper_path(number: usize) -> PathBuf {
    PathBuf::from(LEDGER_DIR).join(format!("{}.tex", lecture_stem(number)))
}

/// An amendment to an existing ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEdit {
    /// Add a lecture on the given date
    Insert(NaiveDate),
    /// Drop a lecture by number, renumbering the ones after it
    Remove(usize),
    /// Move a lecture to another date without changing its number
    Redate(usize, NaiveDate),
}

/// Result of applying a [`LedgerEdit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub ledger: Ledger,
    /// Content renumbering as (from, to) pairs, ordered so no move targets a
    /// number that has not yet been vacated
    pub renames: Vec<(usize, usize)>,
    /// Number of a newly inserted lecture
    pub inserted: Option<Lecture>,
    /// The lecture dropped by a removal, with its pre-removal number
    pub removed: Option<Lecture>,
}

/// Ordered lecture dates for a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecord", into = "LedgerRecord")]
pub struct Ledger {
    schedule: ClassSchedule,
    dates: Vec<NaiveDate>,
}

impl Ledger {
    /// One lecture per meeting date of the schedule, numbered 1..N
    pub fn initialize(schedule: ClassSchedule) -> Self {
        Ledger {
            dates: schedule.meeting_dates(),
            schedule,
        }
    }

    pub fn schedule(&self) -> &ClassSchedule {
        &self.schedule
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn get(&self, number: usize) -> Option<Lecture> {
        if number == 0 {
            return None;
        }
        self.dates
            .get(number - 1)
            .map(|date| Lecture::new(number, *date))
    }

    /// Lectures in sequence order
    pub fn lectures(&self) -> Vec<Lecture> {
        self.dates
            .iter()
            .enumerate()
            .map(|(idx, date)| Lecture::new(idx + 1, *date))
            .collect()
    }

    /// Apply an edit, returning the amended ledger and the file moves it implies.
    /// `self` is left untouched.
    pub fn apply(&self, edit: LedgerEdit) -> Result<EditOutcome> {
        match edit {
            LedgerEdit::Insert(date) => self.insert(date),
            LedgerEdit::Remove(number) => self.remove(number),
            LedgerEdit::Redate(number, date) => self.redate(number, date),
        }
    }

    fn insert(&self, date: NaiveDate) -> Result<EditOutcome> {
        self.schedule.check_date(date)?;

        // Lands after any lecture already held on the same date
        let index = self.dates.partition_point(|existing| *existing <= date);
        let number = index + 1;

        let renames = (number..=self.len()).rev().map(|n| (n, n + 1)).collect();

        let mut dates = self.dates.clone();
        dates.insert(index, date);

        Ok(EditOutcome {
            ledger: Ledger {
                schedule: self.schedule,
                dates,
            },
            renames,
            inserted: Some(Lecture::new(number, date)),
            removed: None,
        })
    }

    fn remove(&self, number: usize) -> Result<EditOutcome> {
        let removed = self.get(number).ok_or(NotesError::NotFound(number))?;

        let renames = (number + 1..=self.len()).map(|n| (n, n - 1)).collect();

        let mut dates = self.dates.clone();
        dates.remove(number - 1);

        Ok(EditOutcome {
            ledger: Ledger {
                schedule: self.schedule,
                dates,
            },
            renames,
            inserted: None,
            removed: Some(removed),
        })
    }

    fn redate(&self, number: usize, date: NaiveDate) -> Result<EditOutcome> {
        self.get(number).ok_or(NotesError::NotFound(number))?;
        self.schedule.check_date(date)?;

        if let Some(previous) = self.get(number - 1) {
            if previous.date > date {
                return Err(NotesError::InvalidDate(format!(
                    "{} is before lecture {} ({}); remove and insert to reorder",
                    date, previous.number, previous.date
                )));
            }
        }
        if let Some(next) = self.get(number + 1) {
            if next.date < date {
                return Err(NotesError::InvalidDate(format!(
                    "{} is after lecture {} ({}); remove and insert to reorder",
                    date, next.number, next.date
                )));
            }
        }

        let mut dates = self.dates.clone();
        dates[number - 1] = date;

        Ok(EditOutcome {
            ledger: Ledger {
                schedule: self.schedule,
                dates,
            },
            renames: Vec::new(),
            inserted: None,
            removed: None,
        })
    }
}

/// On-disk shape of the ledger: schedule plus lecture number -> date
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerRecord {
    schedule: ClassSchedule,
    lectures: BTreeMap<usize, NaiveDate>,
}

impl From<Ledger> for LedgerRecord {
    fn from(ledger: Ledger) -> Self {
        let lectures = ledger
            .dates
            .iter()
            .enumerate()
            .map(|(idx, date)| (idx + 1, *date))
            .collect();

        LedgerRecord {
            schedule: ledger.schedule,
            lectures,
        }
    }
}

impl TryFrom<LedgerRecord> for Ledger {
    type Error = NotesError;

    fn try_from(record: LedgerRecord) -> Result<Self> {
        record
            .schedule
            .validate()
            .map_err(|e| NotesError::Ledger(e.to_string()))?;

        let mut dates = Vec::with_capacity(record.lectures.len());
        for (expected, (number, date)) in (1..).zip(record.lectures) {
            if number != expected {
                return Err(NotesError::Ledger(format!(
                    "lecture numbers must be contiguous from 1, found {} where {} was expected",
                    number, expected
                )));
            }
            if !record.schedule.admits(date) {
                return Err(NotesError::Ledger(format!(
                    "lecture {} is dated {}, which is not a meeting day of the class",
                    number, date
                )));
            }
            if dates.last().is_some_and(|last| *last > date) {
                return Err(NotesError::Ledger(format!(
                    "lecture {} ({}) is dated before the lecture preceding it",
                    number, date
                )));
            }
            dates.push(date);
        }

        Ok(Ledger {
            schedule: record.schedule,
            dates,
        })
    }
}
