use std::path::PathBuf;
use std::process;

use clap::Parser;

mod calendar;
mod config;
mod engine;
mod error;
mod models;
mod storage;
mod tui;

use calendar::CalendarWindow;
use error::MonthlineError;

#[derive(Parser)]
#[command(
    name = "mnl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drag-to-plan month timeline for projects, in the terminal"
)]
struct Cli {
    /// Define a custom data directory
    #[arg(long = "data-dir", value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Month to open initially, as YYYY-MM (defaults to the current month)
    #[arg(short = 'm', long, value_name = "YYYY-MM")]
    month: Option<String>,

    /// Open in read-only mode (no drag interactions)
    #[arg(short = 'r', long)]
    read_only: bool,
}

fn parse_month(value: &str) -> error::Result<CalendarWindow> {
    let invalid = || MonthlineError::InvalidDate(value.to_string());

    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    CalendarWindow::new(year, month).ok_or_else(invalid)
}

fn main() {
    let cli = Cli::parse();

    let window = match cli.month.as_deref().map(parse_month) {
        Some(Ok(window)) => Some(window),
        Some(Err(e)) => {
            eprintln!("{}", e);
            process::exit(1);
        }
        None => None,
    };

    if let Err(e) = tui::run(cli.data_dir.as_deref(), window, cli.read_only) {
        eprintln!("TUI error: {}", e);
        process::exit(1);
    }
}
