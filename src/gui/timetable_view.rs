//! Timetable Viewer Widget
//! Central panel with the two views of the filtered schedule:
//! the hour grid ("Stundenraster") and the weekly agenda ("Stundenplan").

use wellpass_timetable::data::Weekday;
use wellpass_timetable::pipeline::PipelineOutcome;
use wellpass_timetable::render::{GridOptions, StudioPalette, EMPTY_MESSAGE};
use wellpass_timetable::schedule::{BucketedEntry, HourGrid, HourRows};
use egui::{Color32, RichText, ScrollArea};

const HOUR_COLUMN_WIDTH: f32 = 80.0;
const DAY_COLUMN_MIN_WIDTH: f32 = 150.0;
const AGENDA_COLUMN_WIDTH: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTab {
    HourGrid,
    Agenda,
}

pub struct TimetableView {
    pub tab: ViewTab,
    pub hide_empty_hours: bool,
    pub compact: bool,
}

impl TimetableView {
    pub fn new(hide_empty_hours: bool, compact: bool) -> Self {
        Self {
            tab: ViewTab::HourGrid,
            hide_empty_hours,
            compact,
        }
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            hours: if self.hide_empty_hours {
                HourRows::NonEmptyOnly
            } else {
                HourRows::Contiguous
            },
            compact: self.compact,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, outcome: &PipelineOutcome, palette: &StudioPalette) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, ViewTab::HourGrid, RichText::new("🕓 Stundenraster").size(15.0));
            ui.selectable_value(&mut self.tab, ViewTab::Agenda, RichText::new("📅 Stundenplan-Ansicht").size(15.0));
        });
        ui.separator();

        let Some(grid) = outcome.grid() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(EMPTY_MESSAGE).size(18.0));
            });
            return;
        };

        match self.tab {
            ViewTab::HourGrid => {
                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.hide_empty_hours, "🔘 Nur Stunden mit Kursen anzeigen");
                    ui.checkbox(&mut self.compact, "📏 Kompakter Modus");
                    ui.label(
                        RichText::new(format!("{} Kurse", grid.len()))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                });
                ui.add_space(6.0);
                self.draw_hour_grid(ui, grid, palette);
            }
            ViewTab::Agenda => Self::draw_agenda(ui, grid, palette),
        }
    }

    fn draw_hour_grid(&self, ui: &mut egui::Ui, grid: &HourGrid, palette: &StudioPalette) {
        let options = self.grid_options();
        let hours = grid.hours(options.hours);

        ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("hour_grid")
                .striped(true)
                .min_col_width(DAY_COLUMN_MIN_WIDTH)
                .spacing([6.0, 6.0])
                .show(ui, |ui| {
                    ui.add_sized([HOUR_COLUMN_WIDTH, 24.0], egui::Label::new(""));
                    for day in Weekday::ALL {
                        ui.label(RichText::new(day.name()).strong().size(14.0));
                    }
                    ui.end_row();

                    for hour in hours {
                        ui.vertical(|ui| {
                            ui.set_width(HOUR_COLUMN_WIDTH);
                            ui.label(RichText::new(format!("{hour:02}:00")).strong());
                            ui.label(
                                RichText::new(format!("{:02}:00", u16::from(hour) + 1))
                                    .size(11.0)
                                    .color(Color32::GRAY),
                            );
                        });
                        for day in Weekday::ALL {
                            ui.vertical(|ui| {
                                ui.set_min_height(if options.compact { 40.0 } else { 60.0 });
                                for bucketed in grid.group(day, hour) {
                                    course_block(ui, bucketed, palette, options.compact);
                                }
                            });
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn draw_agenda(ui: &mut egui::Ui, grid: &HourGrid, palette: &StudioPalette) {
        ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            ui.horizontal_top(|ui| {
                for day in grid.days_present() {
                    egui::Frame::none()
                        .fill(ui.visuals().faint_bg_color)
                        .rounding(10.0)
                        .inner_margin(6.0)
                        .show(ui, |ui| {
                            ui.set_width(AGENDA_COLUMN_WIDTH);
                            ui.vertical(|ui| {
                                ui.vertical_centered(|ui| {
                                    ui.label(RichText::new(day.name()).strong().size(15.0));
                                });
                                ui.add_space(6.0);
                                for (hour, entries) in grid.day_groups(day) {
                                    egui::Frame::none()
                                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                                        .rounding(6.0)
                                        .inner_margin(6.0)
                                        .show(ui, |ui| {
                                            ui.set_width(AGENDA_COLUMN_WIDTH - 12.0);
                                            ui.label(
                                                RichText::new(format!(
                                                    "{:02}:00 – {:02}:00",
                                                    hour,
                                                    u16::from(hour) + 1
                                                ))
                                                .size(12.0)
                                                .strong(),
                                            );
                                            for bucketed in entries {
                                                course_block(ui, bucketed, palette, false);
                                            }
                                        });
                                    ui.add_space(8.0);
                                }
                            });
                        });
                    ui.add_space(12.0);
                }
            });
        });
    }
}

/// Coloured card with time, course and studio.
fn course_block(ui: &mut egui::Ui, bucketed: &BucketedEntry, palette: &StudioPalette, compact: bool) {
    let [r, g, b] = palette.color_of(&bucketed.entry.location).rgb();
    let (padding, size): (f32, f32) = if compact { (3.0, 11.0) } else { (6.0, 13.0) };

    egui::Frame::none()
        .fill(Color32::from_rgb(r, g, b))
        .rounding(10.0)
        .inner_margin(padding)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&bucketed.entry.time).strong().size(size).color(Color32::WHITE));
            ui.label(RichText::new(&bucketed.entry.course).size(size).color(Color32::WHITE));
            ui.label(
                RichText::new(&bucketed.entry.location)
                    .italics()
                    .size(size - 1.0)
                    .color(Color32::WHITE),
            );
        });
    ui.add_space(4.0);
}
