//! Render module - studio colours and HTML export

mod html;
mod palette;

pub use html::{
    agenda_html, escape, export_page, hour_grid_html, write_export, ExportError, GridOptions,
    EMPTY_MESSAGE,
};
pub use palette::{StudioColor, StudioPalette};
