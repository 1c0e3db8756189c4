//! Runtime settings and command line flags.

use crate::data::DATA_FILE_NAME;
use crate::paths::{program_dir, RESULTS_DIR_NAME};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Climate & Public Health Observatory (2015-2025)
#[derive(Parser, Debug)]
#[command(name = "climate_observatory", version, about)]
pub struct Cli {
    /// CSV table to analyse [default: global_climate_2015_2025.csv next to the program]
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Where the report and charts are written [default: results/ next to the program]
    #[arg(long, value_name = "PATH")]
    pub results_dir: Option<PathBuf>,

    /// Write chart images without opening them in a viewer
    #[arg(long)]
    pub no_open: bool,

    /// Pause after each menu action, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub pause_ms: u64,
}

/// Settings owned by the session for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub results_dir: PathBuf,
    pub open_charts: bool,
    pub pause: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        let base = program_dir();
        Self {
            data_path: base.join(DATA_FILE_NAME),
            results_dir: base.join(RESULTS_DIR_NAME),
            open_charts: true,
            pause: Duration::from_secs(1),
        }
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        let defaults = Settings::default();
        Self {
            data_path: cli.data.unwrap_or(defaults.data_path),
            results_dir: cli.results_dir.unwrap_or(defaults.results_dir),
            open_charts: !cli.no_open,
            pause: Duration::from_millis(cli.pause_ms),
        }
    }
}
