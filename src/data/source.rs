//! Table Source Module
//! Holds the loaded table for the process and notices when the file is replaced.

use crate::config::ColumnNames;
use crate::data::loader::{load_schedule, DataLoadError};
use crate::data::normalizer::normalize;
use crate::data::table::ScheduleTable;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::info;

/// Load and normalize the schedule at `path`.
pub fn load_table(path: &Path, columns: &ColumnNames) -> Result<ScheduleTable, DataLoadError> {
    let raw = load_schedule(path, columns)?;
    let table = ScheduleTable::new(normalize(raw));
    info!(
        path = %path.display(),
        rows = table.len(),
        studios = table.locations().len(),
        courses = table.courses().len(),
        "schedule ready"
    );
    Ok(table)
}

/// The process-wide table together with the file it came from.
pub struct TableSource {
    path: PathBuf,
    columns: ColumnNames,
    modified: Option<SystemTime>,
    table: ScheduleTable,
}

impl TableSource {
    pub fn open(path: impl Into<PathBuf>, columns: ColumnNames) -> Result<Self, DataLoadError> {
        let path = path.into();
        let modified = modified_time(&path);
        let table = load_table(&path, &columns)?;
        Ok(Self {
            path,
            columns,
            modified,
            table,
        })
    }

    /// Wrap an already loaded table, e.g. one read on a worker thread.
    pub fn from_loaded(path: impl Into<PathBuf>, columns: ColumnNames, table: ScheduleTable) -> Self {
        let path = path.into();
        Self {
            modified: modified_time(&path),
            path,
            columns,
            table,
        }
    }

    pub fn table(&self) -> &ScheduleTable {
        &self.table
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Whether the file on disk differs from the one loaded.
    pub fn is_stale(&self) -> bool {
        modified_time(&self.path) != self.modified
    }

    /// Re-read the file. On failure the current table is kept.
    pub fn reload(&mut self) -> Result<&ScheduleTable, DataLoadError> {
        let modified = modified_time(&self.path);
        let table = load_table(&self.path, &self.columns)?;
        self.modified = modified;
        self.table = table;
        Ok(&self.table)
    }

    /// Reload only when the file changed. Returns whether a reload happened.
    pub fn refresh(&mut self) -> Result<bool, DataLoadError> {
        if !self.is_stale() {
            return Ok(false);
        }
        info!(path = %self.path.display(), "schedule file changed, reloading");
        self.reload()?;
        Ok(true)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
