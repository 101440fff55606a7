//! Filter Panel Widget
//! Left side panel with the data source, all filter controls and export.

use wellpass_timetable::config::TimeWindow;
use wellpass_timetable::data::{FilterSpec, ScheduleTable, Weekday};
use wellpass_timetable::schedule::format_minutes;
use egui::{Color32, RichText, ScrollArea};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Left side panel holding the session's filter selections.
pub struct FilterPanel {
    pub spec: FilterSpec,
    pub csv_path: Option<PathBuf>,
    locations: Vec<String>,
    courses: Vec<String>,
    window: TimeWindow,
    status: String,
    is_error: bool,
}

impl FilterPanel {
    pub fn new(table: &ScheduleTable, window: TimeWindow, csv_path: &Path) -> Self {
        Self {
            spec: FilterSpec::all(table, window),
            csv_path: Some(csv_path.to_path_buf()),
            locations: table.locations(),
            courses: table.courses(),
            window,
            status: format!("Loaded {} courses", table.len()),
            is_error: false,
        }
    }

    /// Swap in a newly loaded table. Day, time and search selections survive;
    /// studio and course selections reset to everything.
    pub fn set_table(&mut self, table: &ScheduleTable, csv_path: &Path) {
        self.locations = table.locations();
        self.courses = table.courses();
        self.spec.select_all_locations(table);
        self.spec.select_all_courses(table);
        self.csv_path = Some(csv_path.to_path_buf());
        self.set_status(&format!("Loaded {} courses", table.len()));
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("Error: {error}");
        self.is_error = true;
    }

    /// Draw the filter panel
    pub fn show(&mut self, ui: &mut egui::Ui, can_export: bool) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;
        let mut changed = false;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💪 Wellpass Hamburg")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Kursübersicht").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Data Source =====
        ui.label(RichText::new("📁 Kursdaten").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());
                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = FilterPanelAction::BrowseCsv;
                        }
                        if ui.button("⟳").on_hover_text("Reload file").clicked() {
                            action = FilterPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(10.0);
        ui.separator();

        // ===== Weekdays =====
        ui.label(RichText::new("🗓️ Wochentage").size(14.0).strong());
        ui.horizontal(|ui| {
            if ui.small_button("Alle Tage").clicked() {
                self.spec.select_all_days();
                changed = true;
            }
            if ui.small_button("Keine Tage").clicked() {
                self.spec.days.clear();
                changed = true;
            }
        });
        ui.horizontal_wrapped(|ui| {
            for day in Weekday::ALL {
                changed |= toggle(ui, &mut self.spec.days, day, day.name());
            }
        });

        ui.add_space(10.0);
        ui.separator();

        // ===== Studios =====
        ui.label(RichText::new("📍 Studios").size(14.0).strong());
        changed |= Self::selection_list(
            ui,
            "locations",
            ("Alle Orte", "Keine Orte"),
            &self.locations,
            &mut self.spec.locations,
        );

        ui.add_space(10.0);
        ui.separator();

        // ===== Courses =====
        ui.label(RichText::new("🏋️ Kurse").size(14.0).strong());
        changed |= Self::selection_list(
            ui,
            "courses",
            ("Alle Kurse", "Keine Kurse"),
            &self.courses,
            &mut self.spec.courses,
        );

        ui.add_space(10.0);
        ui.separator();

        // ===== Time Range =====
        ui.label(RichText::new("⏰ Uhrzeit").size(14.0).strong());
        changed |= self.time_sliders(ui);

        ui.add_space(10.0);
        ui.separator();

        // ===== Search =====
        ui.label(RichText::new("🔎 Nach Kurs suchen").size(14.0).strong());
        changed |= ui
            .add(egui::TextEdit::singleline(&mut self.spec.search_text).hint_text("yoga, pilates"))
            .changed();

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(can_export, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export HTML").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = FilterPanelAction::ExportHtml;
                }
            });
        });

        ui.add_space(10.0);
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if changed && action == FilterPanelAction::None {
            action = FilterPanelAction::FiltersChanged;
        }
        action
    }

    fn selection_list(
        ui: &mut egui::Ui,
        id: &str,
        (all_label, none_label): (&str, &str),
        options: &[String],
        selected: &mut BTreeSet<String>,
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            if ui.small_button(all_label).clicked() {
                *selected = options.iter().cloned().collect();
                changed = true;
            }
            if ui.small_button(none_label).clicked() {
                selected.clear();
                changed = true;
            }
            ui.label(
                RichText::new(format!("{}/{}", selected.len(), options.len()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(140.0)
                    .show(ui, |ui| {
                        for option in options {
                            changed |= toggle(ui, selected, option.clone(), option);
                        }
                    });
            });
        changed
    }

    fn time_sliders(&mut self, ui: &mut egui::Ui) -> bool {
        let window = self.window;
        let range = &mut self.spec.time_range;
        let formatter = |value: f64, _: RangeInclusive<usize>| format_minutes(value as u16);

        let start_changed = ui
            .add(
                egui::Slider::new(&mut range.start, window.min..=window.max)
                    .step_by(f64::from(window.step))
                    .custom_formatter(formatter)
                    .text("von"),
            )
            .changed();
        let end_changed = ui
            .add(
                egui::Slider::new(&mut range.end, window.min..=window.max)
                    .step_by(f64::from(window.step))
                    .custom_formatter(formatter)
                    .text("bis"),
            )
            .changed();

        // Keep the range ordered; the handle being dragged wins.
        if start_changed && range.start > range.end {
            range.end = range.start;
        } else if end_changed && range.end < range.start {
            range.start = range.end;
        }
        start_changed || end_changed
    }
}

/// Checkbox bound to set membership. Returns whether it was toggled.
fn toggle<T: Ord>(ui: &mut egui::Ui, set: &mut BTreeSet<T>, value: T, label: &str) -> bool {
    let mut on = set.contains(&value);
    if !ui.checkbox(&mut on, label).changed() {
        return false;
    }
    if on {
        set.insert(value);
    } else {
        set.remove(&value);
    }
    true
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    BrowseCsv,
    Reload,
    FiltersChanged,
    ExportHtml,
}
