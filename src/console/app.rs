//! Climate Observatory session
//! Menu loop owning the loaded dataset and the report for one run.

use super::io::Console;
use super::menu::{chart_from_choice, chart_menu, MenuAction, MAIN_MENU};
use crate::charts::{ChartError, ChartPlotter};
use crate::config::Settings;
use crate::data::{DataLoader, Dataset, LoadSummary, LoaderError, DATA_FILE_NAME};
use crate::paths::ResultsDir;
use crate::report::{self, Report, REPORT_FILE_NAME};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOAD_DATA_FIRST: &str = "Load the data first (option 1).";
pub const INVALID_OPTION: &str = "Invalid option! Choose a number from 1 to 7.";
pub const INVALID_CHART_OPTION: &str = "Invalid chart option.";
pub const COUNTRY_NOT_FOUND: &str = "Country not found.";
pub const NOTHING_TO_SAVE: &str =
    "No results available to save. Run an analysis first!";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Console error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Cannot create results directory {}: {source}", path.display())]
    ResultsDir { path: PathBuf, source: io::Error },
}

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One interactive run: dataset and report live exactly as long as this.
pub struct Session<R, W> {
    console: Console<R, W>,
    settings: Settings,
    results: ResultsDir,
    dataset: Option<Dataset>,
    report: Report,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, console: Console<R, W>) -> Self {
        let results = ResultsDir::new(settings.results_dir.clone());
        Self {
            console,
            settings,
            results,
            dataset: None,
            report: Report::new(),
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Run the menu until the user exits or the input is closed.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(SessionError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("input closed, ending session");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step(&mut self) -> Result<Flow, SessionError> {
        self.console.say("\n")?;
        self.console.say(MAIN_MENU)?;
        let choice = self.console.prompt("Choose an option: ")?;

        match MenuAction::from_choice(&choice) {
            Some(MenuAction::Exit) => {
                self.console.say("\nProgram finished!")?;
                return Ok(Flow::Exit);
            }
            Some(action) if action.needs_dataset() && self.dataset.is_none() => {
                self.console.say(LOAD_DATA_FIRST)?;
            }
            Some(action) => self.dispatch(action)?,
            None => self.console.say(INVALID_OPTION)?,
        }

        if !self.settings.pause.is_zero() {
            std::thread::sleep(self.settings.pause);
        }
        self.console.say("\n-------------------------------------------")?;
        self.confirm_return()?;
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<(), SessionError> {
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::LoadData => self.load_data(),
            MenuAction::ViewSample => {
                let lines = self.with_dataset(report::sample_table);
                self.emit(lines)
            }
            MenuAction::SearchCountry => self.search_countries(),
            MenuAction::Statistics => {
                let lines = self.with_dataset(report::statistics);
                self.emit(lines)
            }
            MenuAction::Charts => self.charts(),
            MenuAction::SaveReport => self.save_report(),
            MenuAction::Exit => Ok(()),
        }
    }

    fn with_dataset(&self, section: fn(&Dataset) -> Vec<String>) -> Vec<String> {
        self.dataset.as_ref().map(section).unwrap_or_default()
    }

    /// Print lines and keep them for the saved report.
    fn emit(&mut self, lines: Vec<String>) -> Result<(), SessionError> {
        for line in lines {
            self.console.say(&line)?;
            self.report.push(line);
        }
        Ok(())
    }

    /// Re-prompt until the user types `s`.
    fn confirm_return(&mut self) -> Result<(), SessionError> {
        loop {
            let answer = self
                .console
                .prompt("\nType 's' to return to the main menu: ")?;
            if answer.trim().eq_ignore_ascii_case("s") {
                return Ok(());
            }
            self.console
                .say("Invalid input! You must type 's' to continue.")?;
        }
    }

    fn load_data(&mut self) -> Result<(), SessionError> {
        let path = self.settings.data_path.clone();
        match DataLoader::load_csv(&path) {
            Ok(dataset) => {
                self.print_summary(dataset.summary())?;
                self.dataset = Some(dataset);
            }
            Err(LoaderError::NotFound(missing)) => {
                tracing::warn!(path = %missing.display(), "data file not found");
                self.dataset = None;
                self.console.say(&format!(
                    "ERROR: File not found at path:\n{}",
                    missing.display()
                ))?;
                self.console.say(&format!(
                    "TIP: Check that the file is named exactly '{}'",
                    DATA_FILE_NAME
                ))?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn print_summary(&mut self, summary: &LoadSummary) -> Result<(), SessionError> {
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "-".into());

        self.console.say("\nData loaded successfully!")?;
        self.console.say(&format!("Records: {}", summary.rows))?;
        self.console.say(&format!("Columns: {}", summary.columns))?;
        self.console
            .say(&format!("Countries available: {}", summary.countries))?;
        self.console.say(&format!(
            "Period: {} - {}",
            year(summary.first_year),
            year(summary.last_year)
        ))?;
        if summary.null_cells == 0 {
            self.console
                .say("Integrity verified: there are no null values in the dataset.")?;
        } else {
            self.console.say(&format!(
                "Warning: {} null values were found.",
                summary.null_cells
            ))?;
        }
        Ok(())
    }

    fn search_countries(&mut self) -> Result<(), SessionError> {
        loop {
            let query = self.console.prompt("\nEnter the country name: ")?;
            let lines = match self.dataset.as_ref() {
                Some(dataset) => report::country_summary(dataset, &query),
                None => Vec::new(),
            };
            self.emit(lines)?;

            let again = self
                .console
                .prompt("\nSearch another country? (y/n): ")?;
            if !again.trim().eq_ignore_ascii_case("y") {
                self.console.say("\nReturning to main menu...")?;
                return Ok(());
            }
        }
    }

    fn charts(&mut self) -> Result<(), SessionError> {
        self.console.say(&chart_menu())?;
        let choice = self.console.prompt("Choose: ")?;
        let Some(kind) = chart_from_choice(&choice) else {
            self.console.say(INVALID_CHART_OPTION)?;
            return Ok(());
        };

        let country = if kind.needs_country() {
            Some(self.pick_country()?)
        } else {
            None
        };

        let Some(dataset) = self.dataset.as_ref() else {
            return Ok(());
        };
        let chart = match ChartPlotter::build(kind, dataset, country.as_deref()) {
            Ok(chart) => chart,
            Err(ChartError::UnknownCountry(name)) => {
                tracing::debug!(country = %name, "chart requested for unknown country");
                self.console.say(COUNTRY_NOT_FOUND)?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        self.console
            .say(&format!("\nGenerating chart: {}...\n", kind.label()))?;
        let path = self.resolve(&kind.file_name(country.as_deref()))?;
        chart.render(&path)?;
        tracing::debug!(chart = chart.title(), path = %path.display(), "chart written");
        self.console
            .say(&format!("Chart saved to: {}", path.display()))?;
        self.present(&path)
    }

    /// List every country and ask for one, exactly as listed.
    fn pick_country(&mut self) -> Result<String, SessionError> {
        let mut countries: Vec<String> = self
            .dataset
            .as_ref()
            .map(|d| d.countries().into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        countries.sort();

        self.console.say("Available countries:")?;
        for country in &countries {
            self.console.say(&format!("- {}", country))?;
        }
        let answer = self
            .console
            .prompt("\nEnter the country name exactly as shown above: ")?;
        Ok(answer.trim().to_string())
    }

    /// Open a written chart in the system viewer, if enabled.
    fn present(&mut self, path: &Path) -> Result<(), SessionError> {
        if !self.settings.open_charts {
            return Ok(());
        }
        if let Err(err) = open::that(path) {
            tracing::warn!(path = %path.display(), error = %err, "cannot open chart viewer");
            self.console
                .say(&format!("Could not open the chart viewer: {}", err))?;
        }
        Ok(())
    }

    /// Path inside the results directory, announcing its creation. Failing
    /// to create the directory ends the session.
    fn resolve(&mut self, file_name: &str) -> Result<PathBuf, SessionError> {
        let resolved =
            self.results
                .resolve(file_name)
                .map_err(|source| SessionError::ResultsDir {
                    path: self.results.root().to_path_buf(),
                    source,
                })?;
        if resolved.created_dir {
            self.console.say(&format!(
                "'results' folder created at: {}",
                self.results.root().display()
            ))?;
        }
        Ok(resolved.path)
    }

    fn save_report(&mut self) -> Result<(), SessionError> {
        if self.report.is_empty() {
            self.console.say(NOTHING_TO_SAVE)?;
            return Ok(());
        }

        let path = self.resolve(REPORT_FILE_NAME)?;
        match self.report.save(&path) {
            Ok(()) => {
                tracing::debug!(lines = self.report.len(), path = %path.display(), "report saved");
                self.console.say(&format!(
                    "\nReport saved successfully to:\n{}",
                    path.display()
                ))?;
            }
            Err(err) => {
                tracing::warn!(error = %err, "report save failed");
                self.console.say(&format!("Error saving results: {}", err))?;
            }
        }
        Ok(())
    }
}
