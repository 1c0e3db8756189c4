//! Record and Dataset types
//! One country-year observation per row, loaded once and read-only afterwards.

use chrono::NaiveDate;

/// A single country-year observation.
///
/// Float measures that were null in the source table hold `NaN`; integer
/// counts that were null hold `None`. Aggregations skip both.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub region: String,
    pub year: i32,
    pub date: NaiveDate,
    pub temperature_celsius: f64,
    pub pm25_ugm3: f64,
    pub air_quality_index: f64,
    pub respiratory_disease_rate: f64,
    pub cardio_mortality_rate: f64,
    pub healthcare_access_index: f64,
    pub heat_wave_days: Option<u32>,
    pub gdp_per_capita_usd: f64,
    pub mental_health_index: f64,
    pub extreme_weather_events: Option<u32>,
    pub food_security_index: f64,
    pub income_level: String,
    pub population_millions: f64,
    pub waterborne_disease_incidents: f64,
}

/// Diagnostics printed right after a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: usize,
    pub columns: usize,
    pub countries: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub null_cells: usize,
}

/// The loaded table, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    summary: LoadSummary,
}

impl Dataset {
    pub fn new(records: Vec<Record>, summary: LoadSummary) -> Self {
        Self { records, summary }
    }

    /// Build a dataset from records alone; column and null counts describe
    /// the fixed schema with no missing cells.
    pub fn from_records(records: Vec<Record>) -> Self {
        let summary = LoadSummary {
            rows: records.len(),
            columns: super::processor::COLUMNS.len(),
            countries: crate::stats::distinct(records.iter().map(|r| r.country.as_str())).len(),
            first_year: records.iter().map(|r| r.year).min(),
            last_year: records.iter().map(|r| r.year).max(),
            null_cells: 0,
        };
        Self { records, summary }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct country names in first-seen order.
    pub fn countries(&self) -> Vec<&str> {
        crate::stats::distinct(self.records.iter().map(|r| r.country.as_str()))
    }

    /// Distinct region names in first-seen order.
    pub fn regions(&self) -> Vec<&str> {
        crate::stats::distinct(self.records.iter().map(|r| r.region.as_str()))
    }

    pub fn has_country(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.country == name)
    }
}
