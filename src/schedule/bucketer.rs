//! Time Bucketer Module
//! Groups filtered rows by weekday and start hour for both timetable views.

use crate::data::{CourseEntry, Weekday};
use crate::schedule::time::{hour_of, parse_start_minutes};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A row with its parsed start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketedEntry {
    pub entry: CourseEntry,
    pub day: Weekday,
    pub start_minutes: u16,
    pub hour: u8,
}

/// Which hour rows a grid view lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HourRows {
    /// Every hour from the earliest to the latest bucket.
    #[default]
    Contiguous,
    /// Only hours holding at least one course.
    NonEmptyOnly,
}

/// Rows bucketed by `(weekday, hour)`, each bucket sorted by start time.
///
/// Only constructed from a non-empty set of parsable rows, so the hour
/// bounds always exist.
#[derive(Debug, Clone)]
pub struct HourGrid {
    buckets: BTreeMap<(Weekday, u8), Vec<BucketedEntry>>,
    hours: BTreeSet<u8>,
    min_hour: u8,
    max_hour: u8,
    len: usize,
}

impl HourGrid {
    /// Bucket `rows`, dropping those with an unparsable time or an unknown
    /// weekday. Returns `None` when nothing is left.
    pub fn build(rows: &[CourseEntry]) -> Option<Self> {
        let mut bucketed: Vec<BucketedEntry> = rows
            .iter()
            .filter_map(|entry| {
                let day = entry.weekday()?;
                let start_minutes = parse_start_minutes(&entry.time)?;
                Some(BucketedEntry {
                    entry: entry.clone(),
                    day,
                    start_minutes,
                    hour: hour_of(start_minutes),
                })
            })
            .collect();

        // Stable: equal start times keep table order.
        bucketed.sort_by_key(|b| b.start_minutes);

        let hours: BTreeSet<u8> = bucketed.iter().map(|b| b.hour).collect();
        let min_hour = *hours.first()?;
        let max_hour = *hours.last()?;
        let len = bucketed.len();

        let mut buckets: BTreeMap<(Weekday, u8), Vec<BucketedEntry>> = BTreeMap::new();
        for b in bucketed {
            buckets.entry((b.day, b.hour)).or_default().push(b);
        }

        debug!(
            input = rows.len(),
            bucketed = len,
            min_hour,
            max_hour,
            "built hour grid"
        );

        Some(Self {
            buckets,
            hours,
            min_hour,
            max_hour,
            len,
        })
    }

    pub fn min_hour(&self) -> u8 {
        self.min_hour
    }

    pub fn max_hour(&self) -> u8 {
        self.max_hour
    }

    /// Number of bucketed rows.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hour rows to draw, ascending.
    pub fn hours(&self, mode: HourRows) -> Vec<u8> {
        match mode {
            HourRows::Contiguous => (self.min_hour..=self.max_hour).collect(),
            HourRows::NonEmptyOnly => self.hours.iter().copied().collect(),
        }
    }

    /// Courses on `day` starting within `hour`, earliest first.
    pub fn group(&self, day: Weekday, hour: u8) -> &[BucketedEntry] {
        self.buckets
            .get(&(day, hour))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Non-empty hour groups of `day`, in hour order.
    pub fn day_groups(&self, day: Weekday) -> impl Iterator<Item = (u8, &[BucketedEntry])> + '_ {
        self.buckets
            .range((day, 0)..=(day, u8::MAX))
            .map(|(&(_, hour), entries)| (hour, entries.as_slice()))
    }

    /// Weekdays holding at least one course, Monday first.
    pub fn days_present(&self) -> Vec<Weekday> {
        self.buckets
            .keys()
            .map(|&(day, _)| day)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, time: &str, course: &str) -> CourseEntry {
        CourseEntry::new(day, time, course, "Altona")
    }

    fn times(entries: &[BucketedEntry]) -> Vec<&str> {
        entries.iter().map(|b| b.entry.time.as_str()).collect()
    }

    #[test]
    fn groups_sort_by_start_time() {
        let grid = HourGrid::build(&[
            entry("Montag", "09:10", "B"),
            entry("Montag", "09:00", "A"),
            entry("Montag", "09:45", "C"),
        ])
        .unwrap();
        assert_eq!(times(grid.group(Weekday::Montag, 9)), vec!["09:00", "09:10", "09:45"]);
    }

    #[test]
    fn ties_keep_table_order() {
        let grid = HourGrid::build(&[
            entry("Montag", "09:30", "first"),
            entry("Montag", "09:00", "early"),
            entry("Montag", "9:30", "second"),
        ])
        .unwrap();
        let courses: Vec<&str> = grid
            .group(Weekday::Montag, 9)
            .iter()
            .map(|b| b.entry.course.as_str())
            .collect();
        assert_eq!(courses, vec!["early", "first", "second"]);
    }

    #[test]
    fn hour_bounds_ignore_unparsable_rows() {
        let grid = HourGrid::build(&[
            entry("Montag", "07:30", "A"),
            entry("Dienstag", "abc", "B"),
            entry("Mittwoch", "19:15", "C"),
            entry("Donnerstag", "9:5", "D"),
            entry("Freitag", "", "E"),
        ])
        .unwrap();
        assert_eq!((grid.min_hour(), grid.max_hour()), (7, 19));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn nothing_parsable_builds_nothing() {
        assert!(HourGrid::build(&[]).is_none());
        assert!(HourGrid::build(&[entry("Montag", "abc", "A")]).is_none());
    }

    #[test]
    fn hour_rows_modes() {
        let grid = HourGrid::build(&[entry("Montag", "08:00", "A"), entry("Montag", "11:59", "B")]).unwrap();
        assert_eq!(grid.hours(HourRows::Contiguous), vec![8, 9, 10, 11]);
        assert_eq!(grid.hours(HourRows::NonEmptyOnly), vec![8, 11]);
    }

    #[test]
    fn day_groups_and_present_days() {
        let grid = HourGrid::build(&[
            entry("Sonntag", "10:00", "A"),
            entry("Montag", "18:00", "B"),
            entry("Montag", "08:15", "C"),
        ])
        .unwrap();
        assert_eq!(grid.days_present(), vec![Weekday::Montag, Weekday::Sonntag]);
        let hours: Vec<u8> = grid.day_groups(Weekday::Montag).map(|(h, _)| h).collect();
        assert_eq!(hours, vec![8, 18]);
        assert!(grid.group(Weekday::Dienstag, 8).is_empty());
    }
}
