//! Filter + bucket pipeline, recomputed from scratch on every selection change.

use crate::data::{apply, CourseEntry, FilterOutcome, FilterSpec, ScheduleTable};
use crate::schedule::HourGrid;

/// Everything the views need for one filter state.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// No course matched, or none of the matches has a usable start time.
    Empty,
    Ready {
        /// Matching rows in table order.
        rows: Vec<CourseEntry>,
        grid: HourGrid,
    },
}

impl PipelineOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, PipelineOutcome::Empty)
    }

    pub fn grid(&self) -> Option<&HourGrid> {
        match self {
            PipelineOutcome::Empty => None,
            PipelineOutcome::Ready { grid, .. } => Some(grid),
        }
    }

    pub fn rows(&self) -> &[CourseEntry] {
        match self {
            PipelineOutcome::Empty => &[],
            PipelineOutcome::Ready { rows, .. } => rows,
        }
    }
}

pub fn run(table: &ScheduleTable, spec: &FilterSpec) -> PipelineOutcome {
    let rows = match apply(table, spec) {
        FilterOutcome::Empty => return PipelineOutcome::Empty,
        FilterOutcome::Matches(rows) => rows,
    };
    match HourGrid::build(&rows) {
        Some(grid) => PipelineOutcome::Ready { rows, grid },
        None => PipelineOutcome::Empty,
    }
}
