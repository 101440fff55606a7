//! Wellpass Timetable - course schedule filtering and weekly timetable views
//!
//! Loads a course schedule CSV, cleans it, filters it by the user's
//! selections and groups the result by weekday and hour.

pub mod config;
pub mod data;
pub mod pipeline;
pub mod render;
pub mod schedule;

pub use config::DashboardConfig;
pub use data::{CourseEntry, DataLoadError, FilterOutcome, FilterSpec, ScheduleTable, TableSource, Weekday};
pub use pipeline::{run, PipelineOutcome};
pub use schedule::{HourGrid, HourRows};
