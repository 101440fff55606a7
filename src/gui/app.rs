//! Wellpass Dashboard Main Application
//! Main window with filter panel and timetable views.

use crate::gui::{FilterPanel, FilterPanelAction, TimetableView};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use wellpass_timetable::config::{ColumnNames, DashboardConfig, TimeWindow};
use wellpass_timetable::data::{load_table, ScheduleTable, TableSource};
use wellpass_timetable::pipeline::{self, PipelineOutcome};
use wellpass_timetable::render::{export_page, write_export, StudioPalette};

/// How often the schedule file is checked for replacement.
const STALE_CHECK_INTERVAL: Duration = Duration::from_secs(2);

const PAGE_TITLE: &str = "Wellpass Hamburg Kursübersicht";

/// CSV loading result from background thread
enum LoadResult {
    Complete { path: PathBuf, table: ScheduleTable },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    source: TableSource,
    filter_panel: FilterPanel,
    timetable_view: TimetableView,
    palette: StudioPalette,
    outcome: PipelineOutcome,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    last_stale_check: Instant,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: &DashboardConfig,
        source: TableSource,
        window: TimeWindow,
    ) -> Self {
        let table = source.table().clone();
        let filter_panel = FilterPanel::new(&table, window, source.path());
        let mut app = Self {
            palette: StudioPalette::new(table.locations()),
            source,
            filter_panel,
            timetable_view: TimetableView::new(config.view.hide_empty_hours, config.view.compact),
            outcome: PipelineOutcome::Empty,
            load_rx: None,
            is_loading: false,
            last_stale_check: Instant::now(),
        };
        app.recompute();
        app
    }

    /// Re-run the pipeline for the current selections.
    fn recompute(&mut self) {
        self.outcome = pipeline::run(self.source.table(), &self.filter_panel.spec);
        debug!(rows = self.outcome.rows().len(), "recomputed timetable");
    }

    fn install_table(&mut self) {
        let table = self.source.table().clone();
        self.palette = StudioPalette::new(table.locations());
        self.filter_panel.set_table(&table, self.source.path());
        self.recompute();
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.filter_panel.set_status("Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);
            let columns: ColumnNames = self.source.columns().clone();

            // Load CSV in background thread
            thread::spawn(move || {
                let result = match load_table(&path, &columns) {
                    Ok(table) => LoadResult::Complete { path, table },
                    Err(e) => LoadResult::Error(e.to_string()),
                };
                let _ = tx.send(result);
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { path, table }) => {
                info!(path = %path.display(), rows = table.len(), "switched schedule file");
                let columns = self.source.columns().clone();
                self.source = TableSource::from_loaded(path, columns, table);
                self.install_table();
                self.is_loading = false;
            }
            Ok(LoadResult::Error(e)) => {
                error!(error = %e, "failed to load schedule");
                self.filter_panel.set_error(&e);
                self.is_loading = false;
            }
            Err(_) => {
                // Put receiver back if still needed
                self.load_rx = Some(rx);
            }
        }
    }

    fn handle_reload(&mut self) {
        match self.source.reload() {
            Ok(_) => self.install_table(),
            Err(e) => {
                error!(error = %e, "reload failed");
                self.filter_panel.set_error(&e.to_string());
            }
        }
    }

    /// Reload when the schedule file was replaced on disk.
    fn poll_source_changes(&mut self) {
        if self.is_loading || self.last_stale_check.elapsed() < STALE_CHECK_INTERVAL {
            return;
        }
        self.last_stale_check = Instant::now();

        match self.source.refresh() {
            Ok(true) => self.install_table(),
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, "schedule file changed but could not be reloaded");
                self.filter_panel.set_error(&e.to_string());
            }
        }
    }

    /// Handle HTML export - write both views and open the page
    fn handle_export_html(&mut self) {
        let output_path = match rfd::FileDialog::new()
            .add_filter("HTML", &["html"])
            .set_file_name("kursuebersicht.html")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let page = export_page(
            PAGE_TITLE,
            &self.outcome,
            &self.palette,
            self.timetable_view.grid_options(),
        );
        match write_export(&output_path, &page) {
            Ok(()) => {
                self.filter_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    error!(error = %e, "could not open exported page");
                }
            }
            Err(e) => self.filter_panel.set_error(&e.to_string()),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        self.poll_source_changes();

        if self.is_loading {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(STALE_CHECK_INTERVAL);
        }

        // Left panel - Filter Panel
        SidePanel::left("filter_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.filter_panel.show(ui, !self.outcome.is_empty());

                    match action {
                        FilterPanelAction::BrowseCsv => self.handle_browse_csv(),
                        FilterPanelAction::Reload => self.handle_reload(),
                        FilterPanelAction::FiltersChanged => self.recompute(),
                        FilterPanelAction::ExportHtml => self.handle_export_html(),
                        FilterPanelAction::None => {}
                    }
                });
            });

        // Central panel - Timetable Views
        egui::CentralPanel::default().show(ctx, |ui| {
            self.timetable_view.show(ui, &self.outcome, &self.palette);
        });
    }
}
