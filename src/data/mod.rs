//! Data module - CSV loading, cleaning and filtering

pub mod filter;
mod loader;
mod normalizer;
mod source;
mod table;

pub use filter::{apply, FilterOutcome, FilterSpec, TimeRange};
pub use loader::{load_schedule, DataLoadError, RawRecord};
pub use normalizer::{canonical_location, normalize, ST_GEORG};
pub use source::{load_table, TableSource};
pub use table::{CourseEntry, ScheduleTable, UnknownWeekday, Weekday};
