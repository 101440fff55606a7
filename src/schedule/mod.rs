//! Schedule module - start time parsing and hour bucketing

mod bucketer;
mod time;

pub use bucketer::{BucketedEntry, HourGrid, HourRows};
pub use time::{format_minutes, hour_of, parse_start_minutes};
