#![allow(dead_code)]

use chrono::NaiveDate;
use climate_observatory::config::Settings;
use climate_observatory::console::{Console, Session};
use climate_observatory::data::{Dataset, Record, DATA_FILE_NAME};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

pub const HEADER: &str = "country_name,region,year,date,temperature_celsius,pm25_ugm3,\
air_quality_index,respiratory_disease_rate,cardio_mortality_rate,healthcare_access_index,\
heat_wave_days,gdp_per_capita_usd,mental_health_index,extreme_weather_events,\
food_security_index,income_level,population_millions,waterborne_disease_incidents";

/// Isolated data file and results directory for one test.
pub struct TestEnv {
    _tmp: TempDir,
    pub data_path: PathBuf,
    pub results_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let data_path = tmp.path().join(DATA_FILE_NAME);
        let results_dir = tmp.path().join("results");
        Self {
            _tmp: tmp,
            data_path,
            results_dir,
        }
    }

    /// Environment whose data file holds `rows` (CSV lines without header).
    pub fn with_rows(rows: &[String]) -> Self {
        let env = Self::new();
        write_csv(&env.data_path, rows);
        env
    }

    pub fn settings(&self) -> Settings {
        Settings {
            data_path: self.data_path.clone(),
            results_dir: self.results_dir.clone(),
            open_charts: false,
            pause: Duration::ZERO,
        }
    }

    /// Session over the scripted `input`, not started yet.
    pub fn session(&self, settings: Settings, input: &str) -> Session<Cursor<String>, Vec<u8>> {
        let console = Console::new(Cursor::new(input.to_string()), Vec::new());
        Session::new(settings, console)
    }

    /// Drive a session with the scripted `input` and return it after it ends.
    pub fn run(&self, input: &str) -> Session<Cursor<String>, Vec<u8>> {
        let mut session = self.session(self.settings(), input);
        session.run().expect("session runs to completion");
        session
    }

    pub fn results_files(&self) -> Vec<String> {
        match fs::read_dir(&self.results_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub fn output_of(session: &Session<Cursor<String>, Vec<u8>>) -> String {
    String::from_utf8(session.console().output().clone()).expect("utf-8 output")
}

pub fn write_csv(path: &Path, rows: &[String]) {
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(path, text).expect("write fixture csv");
}

/// One CSV line; fields not given are derived from the inputs.
pub fn csv_row(country: &str, region: &str, year: i32, temperature: f64, pm25: f64) -> String {
    format!(
        "{country},{region},{year},{year}-06-30,{temperature},{pm25},{aqi},12.5,30.25,70.0,\
         8,25000.5,65.0,3,80.0,High,10.5,4.0",
        aqi = pm25 * 2.0,
    )
}

/// In-memory record with the same derived fields as [`csv_row`].
pub fn record(country: &str, region: &str, year: i32, temperature: f64, pm25: f64) -> Record {
    Record {
        country: country.to_string(),
        region: region.to_string(),
        year,
        date: NaiveDate::from_ymd_opt(year, 6, 30).expect("valid date"),
        temperature_celsius: temperature,
        pm25_ugm3: pm25,
        air_quality_index: pm25 * 2.0,
        respiratory_disease_rate: 12.5,
        cardio_mortality_rate: 30.25,
        healthcare_access_index: 70.0,
        heat_wave_days: Some(8),
        gdp_per_capita_usd: 25000.5,
        mental_health_index: 65.0,
        extreme_weather_events: Some(3),
        food_security_index: 80.0,
        income_level: "High".to_string(),
        population_millions: 10.5,
        waterborne_disease_incidents: 4.0,
    }
}

/// Several countries over several years, in two regions.
pub fn sample_dataset() -> Dataset {
    let mut records = Vec::new();
    for (i, country) in ["Brazil", "Norway", "India", "Kenya", "Chile", "Japan", "Spain"]
        .iter()
        .enumerate()
    {
        let region = if i % 2 == 0 { "South" } else { "North" };
        for year in 2015..=2017 {
            let mut r = record(country, region, year, 10.0 + i as f64, 5.0 * (i % 4) as f64);
            r.cardio_mortality_rate = 20.0 + (i % 3) as f64;
            r.waterborne_disease_incidents = (7 - i) as f64;
            r.heat_wave_days = Some(year as u32 - 2010);
            records.push(r);
        }
    }
    Dataset::from_records(records)
}
