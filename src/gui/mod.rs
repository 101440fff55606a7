//! GUI module - User interface components

mod app;
mod filter_panel;
mod timetable_view;

pub use app::DashboardApp;
pub use filter_panel::{FilterPanel, FilterPanelAction};
pub use timetable_view::TimetableView;
