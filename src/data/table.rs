//! Schedule Table Module
//! Course rows, the weekday vocabulary and the immutable table handle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Fixed weekday vocabulary of the schedule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Montag,
    Dienstag,
    Mittwoch,
    Donnerstag,
    Freitag,
    Samstag,
    Sonntag,
}

impl Weekday {
    /// All days in calendar order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Montag,
        Weekday::Dienstag,
        Weekday::Mittwoch,
        Weekday::Donnerstag,
        Weekday::Freitag,
        Weekday::Samstag,
        Weekday::Sonntag,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Montag => "Montag",
            Weekday::Dienstag => "Dienstag",
            Weekday::Mittwoch => "Mittwoch",
            Weekday::Donnerstag => "Donnerstag",
            Weekday::Freitag => "Freitag",
            Weekday::Samstag => "Samstag",
            Weekday::Sonntag => "Sonntag",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWeekday(pub String);

impl fmt::Display for UnknownWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown weekday '{}'", self.0)
    }
}

impl std::error::Error for UnknownWeekday {}

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    /// Exact match on the trimmed name, as the schedule file spells it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name() == trimmed)
            .ok_or_else(|| UnknownWeekday(trimmed.to_string()))
    }
}

/// One schedule row after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub day: String,
    pub time: String,
    pub course: String,
    pub location: String,
}

impl CourseEntry {
    pub fn new(
        day: impl Into<String>,
        time: impl Into<String>,
        course: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
            course: course.into(),
            location: location.into(),
        }
    }

    /// The row's day, if it is one of the seven known weekdays.
    pub fn weekday(&self) -> Option<Weekday> {
        self.day.parse().ok()
    }
}

/// Immutable, cheaply clonable handle to the normalized schedule.
///
/// Every filter and grouping operation borrows the table and produces a new
/// value; nothing mutates the rows after construction.
#[derive(Debug, Clone, Default)]
pub struct ScheduleTable {
    rows: Arc<[CourseEntry]>,
}

impl ScheduleTable {
    pub fn new(rows: Vec<CourseEntry>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn rows(&self) -> &[CourseEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted, de-duplicated studio names.
    pub fn locations(&self) -> Vec<String> {
        Self::sorted_unique(self.rows.iter().map(|r| r.location.as_str()))
    }

    /// Sorted, de-duplicated course names.
    pub fn courses(&self) -> Vec<String> {
        Self::sorted_unique(self.rows.iter().map(|r| r.course.as_str()))
    }

    fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        values
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<CourseEntry>> for ScheduleTable {
    fn from(rows: Vec<CourseEntry>) -> Self {
        Self::new(rows)
    }
}
