//! HTML Renderer
//! Builds the hour grid and the weekly agenda as a standalone HTML page.
//!
//! Layout:
//! 1. Hour grid: one row per hour, one column per weekday, course blocks in cells
//! 2. Agenda: one column per weekday with courses, grouped into hour blocks

use crate::data::Weekday;
use crate::pipeline::PipelineOutcome;
use crate::render::palette::StudioPalette;
use crate::schedule::{BucketedEntry, HourGrid, HourRows};
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const EMPTY_MESSAGE: &str = "Keine Kurse für die aktuelle Auswahl gefunden.";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Toggles of the hour grid view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridOptions {
    pub hours: HourRows,
    pub compact: bool,
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn course_block(out: &mut String, bucketed: &BucketedEntry, palette: &StudioPalette) {
    let entry = &bucketed.entry;
    let _ = write!(
        out,
        r#"<div class="course-block" style="background:{};"><span class="time">{}</span><span class="coursename">{}</span><span class="studio">{}</span></div>"#,
        palette.color_of(&entry.location).css(),
        escape(&entry.time),
        escape(&entry.course),
        escape(&entry.location),
    );
}

fn grid_css(compact: bool) -> String {
    let (cell_min_height, font_size, padding) = if compact {
        ("40px", "0.8rem", "3px")
    } else {
        ("60px", "0.9rem", "6px")
    };
    format!(
        r#"<style>
.timetable {{ display: grid; grid-template-columns: 80px repeat(7, 1fr); width: 100%; }}
.time-cell {{ background: #f1f3f5; font-weight: 600; font-size: 0.85rem; text-align: right; padding-right: 6px; border-bottom: 1px solid #dee2e6; }}
.timetable .day-header {{ text-align: center; background: #dee2e6; font-weight: 700; padding: 8px 0; border-bottom: 2px solid #adb5bd; }}
.cell {{ border-bottom: 1px solid #dee2e6; padding: {padding}; background: #fff; min-height: {cell_min_height}; }}
.timetable .course-block {{ padding: {padding}; margin-bottom: 4px; font-size: {font_size}; }}
</style>"#
    )
}

const SHARED_CSS: &str = r#"<style>
body { font-family: sans-serif; margin: 16px; }
.course-block { border-radius: 10px; color: white; padding: 6px 8px; margin-bottom: 6px; line-height: 1.25; font-size: 0.9rem; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.time { font-weight: 600; display: block; }
.coursename { font-weight: 500; display: block; margin-top: 2px; }
.studio { font-style: italic; font-size: 0.85rem; opacity: 0.9; }
.week-container { display: flex; gap: 12px; overflow-x: auto; padding: 20px 10px; }
.day-column { flex: 1; min-width: 200px; background: #f8f9fa; border-radius: 10px; padding: 6px; }
.week-container .day-header { text-align: center; font-weight: 700; background: #dee2e6; border-radius: 6px; padding: 6px; margin-bottom: 10px; }
.hour-block { background: #e9ecef; border-radius: 6px; padding: 6px; margin-bottom: 8px; }
.hour-label { font-weight: 600; font-size: 0.85rem; margin-bottom: 4px; color: #495057; }
</style>"#;

/// Hour-by-weekday matrix. Every weekday gets a column.
pub fn hour_grid_html(grid: &HourGrid, palette: &StudioPalette, options: GridOptions) -> String {
    let mut out = grid_css(options.compact);
    out.push_str("\n<div class=\"timetable\">\n<div></div>\n");
    for day in Weekday::ALL {
        let _ = writeln!(out, "<div class=\"day-header\">{day}</div>");
    }
    for hour in grid.hours(options.hours) {
        let _ = writeln!(
            out,
            "<div class=\"time-cell\">{:02}:00<br>{:02}:00</div>",
            hour,
            u16::from(hour) + 1
        );
        for day in Weekday::ALL {
            out.push_str("<div class=\"cell\">");
            for bucketed in grid.group(day, hour) {
                course_block(&mut out, bucketed, palette);
            }
            out.push_str("</div>\n");
        }
    }
    out.push_str("</div>\n");
    out
}

/// Per-day agenda. Days and hours without courses are left out.
pub fn agenda_html(grid: &HourGrid, palette: &StudioPalette) -> String {
    let mut out = String::from("<div class=\"week-container\">\n");
    for day in grid.days_present() {
        let _ = writeln!(
            out,
            "<div class=\"day-column\"><div class=\"day-header\">{day}</div>"
        );
        for (hour, entries) in grid.day_groups(day) {
            let _ = write!(
                out,
                "<div class=\"hour-block\"><div class=\"hour-label\">{:02}:00 – {:02}:00</div>",
                hour,
                u16::from(hour) + 1
            );
            for bucketed in entries {
                course_block(&mut out, bucketed, palette);
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
    out
}

/// Complete document with both views, or the empty-result notice.
pub fn export_page(
    title: &str,
    outcome: &PipelineOutcome,
    palette: &StudioPalette,
    options: GridOptions,
) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    out.push_str(SHARED_CSS);
    out.push_str("\n</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape(title));

    match outcome.grid() {
        None => {
            let _ = writeln!(out, "<p class=\"empty\">{EMPTY_MESSAGE}</p>");
        }
        Some(grid) => {
            out.push_str("<h2>Stundenraster</h2>\n");
            out.push_str(&hour_grid_html(grid, palette, options));
            out.push_str("<h2>Stundenplan</h2>\n");
            out.push_str(&agenda_html(grid, palette));
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

pub fn write_export(path: &Path, page: &str) -> Result<(), ExportError> {
    std::fs::write(path, page).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = page.len(), "exported timetable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CourseEntry;

    fn grid(rows: &[CourseEntry]) -> HourGrid {
        HourGrid::build(rows).unwrap()
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<b>Yoga & "Flow" 'x'</b>"#),
            "&lt;b&gt;Yoga &amp; &quot;Flow&quot; &#x27;x&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn grid_lists_every_hour_row() {
        let grid = grid(&[
            CourseEntry::new("Montag", "07:30", "Yoga", "Altona"),
            CourseEntry::new("Freitag", "09:00", "Boxen <Pro>", "Altona"),
        ]);
        let palette = StudioPalette::new(["Altona"]);
        let html = hour_grid_html(&grid, &palette, GridOptions::default());
        assert!(html.contains("07:00<br>08:00"));
        assert!(html.contains("08:00<br>09:00"));
        assert!(html.contains("09:00<br>10:00"));
        assert!(html.contains("Boxen &lt;Pro&gt;"));
        assert_eq!(html.matches("class=\"cell\"").count(), 3 * 7);

        let busy = hour_grid_html(
            &grid,
            &palette,
            GridOptions {
                hours: HourRows::NonEmptyOnly,
                compact: true,
            },
        );
        assert!(!busy.contains("08:00<br>09:00"));
        assert!(busy.contains("min-height: 40px"));
    }

    #[test]
    fn agenda_skips_empty_days_and_hours() {
        let grid = grid(&[
            CourseEntry::new("Dienstag", "18:30", "Pilates", "St. Georg"),
            CourseEntry::new("Dienstag", "07:00", "Spinning", "St. Georg"),
        ]);
        let html = agenda_html(&grid, &StudioPalette::new(["St. Georg"]));
        assert!(html.contains("Dienstag"));
        assert!(!html.contains("Montag"));
        assert_eq!(html.matches("class=\"hour-block\"").count(), 2);
        let early = html.find("Spinning").unwrap();
        let late = html.find("Pilates").unwrap();
        assert!(early < late);
    }

    #[test]
    fn empty_outcome_renders_notice() {
        let page = export_page("Kurse", &PipelineOutcome::Empty, &StudioPalette::default(), GridOptions::default());
        assert!(page.contains(EMPTY_MESSAGE));
        assert!(!page.contains("timetable"));
    }
}
