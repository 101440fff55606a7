//! CSV Data Loader Module
//! Reads the schedule CSV with Polars, falling back from ',' to ';'.

use crate::config::ColumnNames;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Schedule file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to parse {path} with ',' ({comma}) or ';' ({semicolon})")]
    Unparsable {
        path: PathBuf,
        comma: String,
        semicolon: String,
    },
    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },
}

/// Why a single delimiter attempt was rejected.
#[derive(Error, Debug)]
enum AttemptError {
    #[error("{0}")]
    Csv(#[from] PolarsError),
    #[error("missing column '{0}'")]
    MissingColumn(String),
}

/// One CSV row before normalization. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub day: Option<String>,
    pub time: Option<String>,
    pub course: Option<String>,
    pub location: Option<String>,
}

impl RawRecord {
    pub fn is_blank(&self) -> bool {
        self.day.is_none() && self.time.is_none() && self.course.is_none() && self.location.is_none()
    }
}

/// Load the schedule rows from `path`.
///
/// Comma is tried first. A comma parse that succeeds but lacks one of the
/// required headers counts as a failure, since a semicolon file read with
/// commas yields a single fused column.
pub fn load_schedule(path: &Path, columns: &ColumnNames) -> Result<Vec<RawRecord>, DataLoadError> {
    if !path.is_file() {
        return Err(DataLoadError::NotFound(path.to_path_buf()));
    }

    let comma_err = match read_records(path, b',', columns) {
        Ok(records) => {
            info!(path = %path.display(), rows = records.len(), "loaded schedule (',' separated)");
            return Ok(records);
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "comma parse rejected, retrying with ';'");
            e
        }
    };

    match read_records(path, b';', columns) {
        Ok(records) => {
            info!(path = %path.display(), rows = records.len(), "loaded schedule (';' separated)");
            Ok(records)
        }
        // Both parses worked but the header is incomplete: the comma attempt
        // saw the real columns, so its missing name is the one to report.
        Err(AttemptError::MissingColumn(column)) => Err(DataLoadError::MissingColumn {
            path: path.to_path_buf(),
            column: match comma_err {
                AttemptError::MissingColumn(comma_column) => comma_column,
                AttemptError::Csv(_) => column,
            },
        }),
        Err(semicolon) => Err(DataLoadError::Unparsable {
            path: path.to_path_buf(),
            comma: comma_err.to_string(),
            semicolon: semicolon.to_string(),
        }),
    }
}

fn read_records(
    path: &Path,
    separator: u8,
    columns: &ColumnNames,
) -> Result<Vec<RawRecord>, AttemptError> {
    // Schema inference disabled: every column is read as a string.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let days = string_cells(&df, &columns.day)?;
    let times = string_cells(&df, &columns.time)?;
    let courses = string_cells(&df, &columns.course)?;
    let locations = string_cells(&df, &columns.location)?;

    let records: Vec<RawRecord> = days
        .into_iter()
        .zip(times)
        .zip(courses)
        .zip(locations)
        .map(|(((day, time), course), location)| RawRecord {
            day,
            time,
            course,
            location,
        })
        .filter(|record| !record.is_blank())
        .collect();

    debug!(
        separator = %(separator as char),
        total = df.height(),
        kept = records.len(),
        "dropped fully empty rows"
    );
    Ok(records)
}

/// Cells of the column whose trimmed header equals `wanted`.
fn string_cells(df: &DataFrame, wanted: &str) -> Result<Vec<Option<String>>, AttemptError> {
    let name = df
        .get_column_names()
        .into_iter()
        .find(|name| name.as_str().trim() == wanted.trim())
        .map(|name| name.to_string())
        .ok_or_else(|| AttemptError::MissingColumn(wanted.to_string()))?;

    let series = df.column(&name)?.as_materialized_series();
    let cells = series.str()?;
    Ok(cells
        .into_iter()
        .map(|cell| {
            cell.map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_comma_separated_file() {
        let file = write_csv("Tag,Uhrzeit,Kurs,Ort\nMontag,09:00,Yoga,Altona\n");
        let records = load_schedule(file.path(), &ColumnNames::default()).unwrap();
        assert_eq!(
            records,
            vec![RawRecord {
                day: Some("Montag".into()),
                time: Some("09:00".into()),
                course: Some("Yoga".into()),
                location: Some("Altona".into()),
            }]
        );
    }

    #[test]
    fn falls_back_to_semicolon() {
        let file = write_csv("Tag;Uhrzeit;Kurs;Ort\nDienstag;18:30;Pilates, Basic;St Georg\n");
        let records = load_schedule(file.path(), &ColumnNames::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course.as_deref(), Some("Pilates, Basic"));
        assert_eq!(records[0].location.as_deref(), Some("St Georg"));
    }

    #[test]
    fn trims_headers_and_keeps_time_text() {
        let file = write_csv(" Tag , Uhrzeit ,Kurs , Ort\nMontag,09:05,Yoga,Altona\n");
        let records = load_schedule(file.path(), &ColumnNames::default()).unwrap();
        assert_eq!(records[0].time.as_deref(), Some("09:05"));
    }

    #[test]
    fn drops_fully_empty_rows() {
        let file = write_csv("Tag,Uhrzeit,Kurs,Ort\nMontag,09:00,Yoga,Altona\n,,,\nFreitag,,Boxen,\n");
        let records = load_schedule(file.path(), &ColumnNames::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].location, None);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_schedule(&dir.path().join("nope.csv"), &ColumnNames::default());
        assert!(matches!(result, Err(DataLoadError::NotFound(_))));
    }

    #[test]
    fn missing_column_under_both_delimiters() {
        let file = write_csv("Tag,Uhrzeit,Kurs\nMontag,09:00,Yoga\n");
        let result = load_schedule(file.path(), &ColumnNames::default());
        assert!(matches!(
            result,
            Err(DataLoadError::MissingColumn { ref column, .. }) if column == "Ort"
        ));
    }
}
