//! Wellpass Timetable - Course Schedule Filtering & Weekly Timetable Viewer
//!
//! Opens the interactive dashboard, or exports the filtered timetable as HTML.

mod gui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use wellpass_timetable::config::{DashboardConfig, TimeWindow};
use wellpass_timetable::data::{FilterSpec, TableSource, TimeRange, Weekday};
use wellpass_timetable::pipeline;
use wellpass_timetable::render::{export_page, write_export, GridOptions, StudioPalette};
use wellpass_timetable::schedule::{parse_start_minutes, HourRows};

#[derive(Parser)]
#[command(name = "wellpass", version, about = "Wellpass Hamburg course timetable")]
struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(long, default_value = "wellpass.json")]
    config: PathBuf,
    /// Schedule CSV, overrides the config
    #[arg(long)]
    csv: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the filtered hour grid and agenda to an HTML file
    Export(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    output: PathBuf,
    /// Weekday to include (repeatable, default all)
    #[arg(long = "day")]
    days: Vec<Weekday>,
    /// Studio to include (repeatable, default all)
    #[arg(long = "location")]
    locations: Vec<String>,
    /// Course to include (repeatable, default all)
    #[arg(long = "course")]
    courses: Vec<String>,
    /// Earliest start time, HH:MM
    #[arg(long, value_parser = parse_clock)]
    from: Option<u16>,
    /// Latest start time, HH:MM
    #[arg(long, value_parser = parse_clock)]
    to: Option<u16>,
    /// Course search terms, separated by spaces, commas or semicolons
    #[arg(long, default_value = "")]
    search: String,
    /// List only hours that have courses
    #[arg(long)]
    only_busy_hours: bool,
    #[arg(long)]
    compact: bool,
}

fn parse_clock(value: &str) -> Result<u16, String> {
    parse_start_minutes(value.trim()).ok_or_else(|| format!("'{value}' is not a HH:MM time"))
}

fn main() -> Result<()> {
    // ─── logging ─────────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let mut config = DashboardConfig::load_or_default(&cli.config)?;
    if let Some(csv) = cli.csv {
        config.csv_path = csv;
    }
    let window = config.time_window.resolve()?;

    // ─── load once for the process ───────────────────────────────────
    let source = match TableSource::open(&config.csv_path, config.columns.clone()) {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, "could not load schedule");
            return Err(e).context("Kursdaten konnten nicht geladen werden");
        }
    };

    match cli.command {
        Some(Command::Export(args)) => export(&source, window, args),
        None => run_dashboard(config, source, window),
    }
}

fn export(source: &TableSource, window: TimeWindow, args: ExportArgs) -> Result<()> {
    let table = source.table();
    let mut spec = FilterSpec::all(table, window);
    if !args.days.is_empty() {
        spec.days = args.days.into_iter().collect();
    }
    if !args.locations.is_empty() {
        spec.locations = args.locations.into_iter().collect();
    }
    if !args.courses.is_empty() {
        spec.courses = args.courses.into_iter().collect();
    }
    spec.time_range = TimeRange::new(
        args.from.unwrap_or(window.min),
        args.to.unwrap_or(window.max),
    );
    spec.search_text = args.search;

    let outcome = pipeline::run(table, &spec);
    info!(matched = outcome.rows().len(), "filtered schedule for export");

    let options = GridOptions {
        hours: if args.only_busy_hours {
            HourRows::NonEmptyOnly
        } else {
            HourRows::Contiguous
        },
        compact: args.compact,
    };
    let palette = StudioPalette::new(table.locations());
    let page = export_page("Wellpass Hamburg Kursübersicht", &outcome, &palette, options);
    write_export(&args.output, &page)?;
    Ok(())
}

fn run_dashboard(config: DashboardConfig, source: TableSource, window: TimeWindow) -> Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Wellpass Hamburg"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Wellpass Hamburg",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &config, source, window)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard failed: {e}"))
}
