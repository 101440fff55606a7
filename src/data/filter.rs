//! Filter Engine Module
//! Applies the user's selections to the schedule as one conjunction.

use crate::config::TimeWindow;
use crate::data::table::{CourseEntry, ScheduleTable, Weekday};
use crate::schedule::parse_start_minutes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Inclusive start-time bounds in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: u16,
    pub end: u16,
}

impl TimeRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, minutes: u16) -> bool {
        (self.start..=self.end).contains(&minutes)
    }
}

impl From<TimeWindow> for TimeRange {
    fn from(window: TimeWindow) -> Self {
        Self::new(window.min, window.max)
    }
}

/// Everything the user selected. Empty sets select nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub days: BTreeSet<Weekday>,
    pub locations: BTreeSet<String>,
    pub courses: BTreeSet<String>,
    pub time_range: TimeRange,
    pub search_text: String,
}

impl FilterSpec {
    /// Every day, studio and course of `table` over the whole window.
    pub fn all(table: &ScheduleTable, window: TimeWindow) -> Self {
        Self {
            days: Weekday::ALL.into_iter().collect(),
            locations: table.locations().into_iter().collect(),
            courses: table.courses().into_iter().collect(),
            time_range: window.into(),
            search_text: String::new(),
        }
    }

    pub fn select_all_days(&mut self) {
        self.days = Weekday::ALL.into_iter().collect();
    }

    pub fn select_all_locations(&mut self, table: &ScheduleTable) {
        self.locations = table.locations().into_iter().collect();
    }

    pub fn select_all_courses(&mut self, table: &ScheduleTable) {
        self.courses = table.courses().into_iter().collect();
    }

    /// Search terms split on whitespace, commas and semicolons.
    /// Punctuation-only input yields no terms.
    pub fn search_terms(&self) -> Vec<String> {
        split_search_terms(&self.search_text)
    }

    /// Whether `entry` passes every predicate.
    pub fn matches(&self, entry: &CourseEntry) -> bool {
        self.matches_with_terms(entry, &self.search_terms())
    }

    fn matches_with_terms(&self, entry: &CourseEntry, terms: &[String]) -> bool {
        entry.weekday().is_some_and(|day| self.days.contains(&day))
            && self.locations.contains(&entry.location)
            && self.courses.contains(&entry.course)
            && parse_start_minutes(&entry.time).is_some_and(|m| self.time_range.contains(m))
            && matches_any_term(&entry.course, terms)
    }
}

pub fn split_search_terms(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Literal, case-insensitive OR match. No terms means no text filter.
fn matches_any_term(course: &str, lowered_terms: &[String]) -> bool {
    if lowered_terms.is_empty() {
        return true;
    }
    let course = course.to_lowercase();
    lowered_terms.iter().any(|term| course.contains(term.as_str()))
}

/// Result of a filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Nothing matched; callers skip bucketing entirely.
    Empty,
    /// Matching rows in table order. Never empty.
    Matches(Vec<CourseEntry>),
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterOutcome::Empty)
    }

    pub fn rows(&self) -> &[CourseEntry] {
        match self {
            FilterOutcome::Empty => &[],
            FilterOutcome::Matches(rows) => rows,
        }
    }

    pub fn into_rows(self) -> Vec<CourseEntry> {
        match self {
            FilterOutcome::Empty => Vec::new(),
            FilterOutcome::Matches(rows) => rows,
        }
    }
}

/// Select the rows of `table` matching `spec`, keeping table order.
pub fn apply(table: &ScheduleTable, spec: &FilterSpec) -> FilterOutcome {
    let terms = spec.search_terms();
    let rows: Vec<CourseEntry> = table
        .rows()
        .iter()
        .filter(|entry| spec.matches_with_terms(entry, &terms))
        .cloned()
        .collect();

    debug!(total = table.len(), matched = rows.len(), terms = terms.len(), "filtered schedule");

    if rows.is_empty() {
        FilterOutcome::Empty
    } else {
        FilterOutcome::Matches(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn table() -> ScheduleTable {
        ScheduleTable::new(vec![
            CourseEntry::new("Montag", "09:00", "Hatha Yoga Flow", "Altona"),
            CourseEntry::new("Montag", "18:30", "Pilates Basic", "St. Georg"),
            CourseEntry::new("Dienstag", "07:00", "Spinning", "Altona"),
            CourseEntry::new("Mittwoch", "abc", "Yoga (a+b)", "Altona"),
            CourseEntry::new("Freitag", "23:00", "Late Yoga", "Eimsbüttel"),
        ])
    }

    fn spec(table: &ScheduleTable) -> FilterSpec {
        FilterSpec::all(table, TimeWindow { min: 0, max: 1439, step: 30 })
    }

    fn courses(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.rows().iter().map(|r| r.course.as_str()).collect()
    }

    #[test]
    fn select_all_keeps_parsable_rows_in_order() {
        let table = table();
        let outcome = apply(&table, &spec(&table));
        assert_eq!(
            courses(&outcome),
            vec!["Hatha Yoga Flow", "Pilates Basic", "Spinning", "Late Yoga"]
        );
    }

    #[test]
    fn empty_sets_select_nothing() {
        let table = table();
        let clears: [fn(&mut FilterSpec); 3] = [
            |s| s.days.clear(),
            |s| s.locations.clear(),
            |s| s.courses.clear(),
        ];
        for clear in clears {
            let mut spec = spec(&table);
            clear(&mut spec);
            assert_eq!(apply(&table, &spec), FilterOutcome::Empty);
        }
    }

    #[test]
    fn time_range_is_inclusive() {
        let table = table();
        let mut spec = spec(&table);
        spec.time_range = TimeRange::new(7 * 60, 18 * 60 + 30);
        assert_eq!(
            courses(&apply(&table, &spec)),
            vec!["Hatha Yoga Flow", "Pilates Basic", "Spinning"]
        );
    }

    #[test]
    fn search_is_or_over_terms() {
        let table = table();
        let mut spec = spec(&table);
        spec.search_text = "yoga,pilates".to_string();
        assert_eq!(
            courses(&apply(&table, &spec)),
            vec!["Hatha Yoga Flow", "Pilates Basic", "Late Yoga"]
        );
    }

    #[test]
    fn search_terms_are_literal() {
        let table = ScheduleTable::new(vec![
            CourseEntry::new("Montag", "10:00", "Yoga (a+b)", "Altona"),
            CourseEntry::new("Montag", "11:00", "Yoga ab", "Altona"),
        ]);
        let mut spec = spec(&table);
        spec.search_text = "(a+b)".to_string();
        assert_eq!(courses(&apply(&table, &spec)), vec!["Yoga (a+b)"]);
    }

    #[test]
    fn blank_or_punctuation_search_applies_no_filter() {
        let table = table();
        let all = apply(&table, &spec(&table));
        for text in ["", "   ", ",;", " ; , "] {
            let mut spec = spec(&table);
            spec.search_text = text.to_string();
            assert_eq!(apply(&table, &spec), all, "search {text:?}");
        }
    }

    #[test]
    fn splits_on_mixed_separators() {
        assert_eq!(split_search_terms("  Yoga;;PILATES ,\tbox "), vec!["yoga", "pilates", "box"]);
        assert!(split_search_terms(",;").is_empty());
    }

    #[test]
    fn unknown_weekdays_never_match() {
        let table = ScheduleTable::new(vec![CourseEntry::new("Monday", "10:00", "Yoga", "Altona")]);
        assert!(apply(&table, &spec(&table)).is_empty());
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(
            day_mask in proptest::collection::vec(any::<bool>(), 7),
            start in 0u16..1440,
            len in 0u16..1440,
            search in "[a-z ,;]{0,10}",
        ) {
            let table = table();
            let mut spec = spec(&table);
            spec.days = Weekday::ALL
                .into_iter()
                .zip(day_mask)
                .filter_map(|(day, keep)| keep.then_some(day))
                .collect();
            spec.time_range = TimeRange::new(start, start.saturating_add(len).min(1439));
            spec.search_text = search;

            let once = apply(&table, &spec);
            let twice = apply(&ScheduleTable::new(once.rows().to_vec()), &spec);
            prop_assert_eq!(&once, &apply(&table, &spec));
            prop_assert_eq!(once, twice);
        }
    }
}
