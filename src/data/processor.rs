//! Data Processor Module
//! Turns the loaded polars DataFrame into typed records and load diagnostics.

use super::record::{LoadSummary, Record};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use thiserror::Error;

/// Columns of the climate table, in file order.
pub const COLUMNS: [&str; 18] = [
    "country_name",
    "region",
    "year",
    "date",
    "temperature_celsius",
    "pm25_ugm3",
    "air_quality_index",
    "respiratory_disease_rate",
    "cardio_mortality_rate",
    "healthcare_access_index",
    "heat_wave_days",
    "gdp_per_capita_usd",
    "mental_health_index",
    "extreme_weather_events",
    "food_security_index",
    "income_level",
    "population_millions",
    "waterborne_disease_incidents",
];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{column}' is empty at row {row}")]
    MissingValue { column: &'static str, row: usize },
    #[error("Cannot parse date '{value}' at row {row}")]
    InvalidDate { row: usize, value: String },
}

/// Converts a climate DataFrame into records.
pub struct DataProcessor;

impl DataProcessor {
    /// Compute the diagnostics printed after a load.
    pub fn summarize(df: &DataFrame) -> Result<LoadSummary, ProcessorError> {
        let countries = df.column("country_name")?.unique()?.len();

        let years = df.column("year")?.cast(&DataType::Int64)?;
        let years = years.i64()?;

        let null_cells = df.get_columns().iter().map(|col| col.null_count()).sum();

        Ok(LoadSummary {
            rows: df.height(),
            columns: df.width(),
            countries,
            first_year: years.min().map(|y| y as i32),
            last_year: years.max().map(|y| y as i32),
            null_cells,
        })
    }

    /// Extract every row as a [`Record`], keeping file order.
    pub fn to_records(df: &DataFrame) -> Result<Vec<Record>, ProcessorError> {
        let country = Self::required_strings(df, "country_name")?;
        let region = Self::required_strings(df, "region")?;
        let year = Self::required_ints(df, "year")?;
        let date = Self::dates(df, "date")?;
        let temperature = Self::floats(df, "temperature_celsius")?;
        let pm25 = Self::floats(df, "pm25_ugm3")?;
        let aqi = Self::floats(df, "air_quality_index")?;
        let respiratory = Self::floats(df, "respiratory_disease_rate")?;
        let cardio = Self::floats(df, "cardio_mortality_rate")?;
        let healthcare = Self::floats(df, "healthcare_access_index")?;
        let heat_waves = Self::counts(df, "heat_wave_days")?;
        let gdp = Self::floats(df, "gdp_per_capita_usd")?;
        let mental = Self::floats(df, "mental_health_index")?;
        let extreme = Self::counts(df, "extreme_weather_events")?;
        let food = Self::floats(df, "food_security_index")?;
        let income = Self::optional_strings(df, "income_level")?;
        let population = Self::floats(df, "population_millions")?;
        let waterborne = Self::floats(df, "waterborne_disease_incidents")?;

        let records = (0..df.height())
            .map(|i| Record {
                country: country[i].clone(),
                region: region[i].clone(),
                year: year[i] as i32,
                date: date[i],
                temperature_celsius: temperature[i],
                pm25_ugm3: pm25[i],
                air_quality_index: aqi[i],
                respiratory_disease_rate: respiratory[i],
                cardio_mortality_rate: cardio[i],
                healthcare_access_index: healthcare[i],
                heat_wave_days: heat_waves[i],
                gdp_per_capita_usd: gdp[i],
                mental_health_index: mental[i],
                extreme_weather_events: extreme[i],
                food_security_index: food[i],
                income_level: income[i].clone(),
                population_millions: population[i],
                waterborne_disease_incidents: waterborne[i],
            })
            .collect();

        Ok(records)
    }

    fn floats(df: &DataFrame, name: &'static str) -> Result<Vec<f64>, ProcessorError> {
        let col = df.column(name)?.cast(&DataType::Float64)?;
        Ok(col
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }

    fn counts(df: &DataFrame, name: &'static str) -> Result<Vec<Option<u32>>, ProcessorError> {
        let col = df.column(name)?.cast(&DataType::Int64)?;
        Ok(col
            .i64()?
            .into_iter()
            .map(|v| v.and_then(|n| u32::try_from(n).ok()))
            .collect())
    }

    fn required_ints(df: &DataFrame, name: &'static str) -> Result<Vec<i64>, ProcessorError> {
        let col = df.column(name)?.cast(&DataType::Int64)?;
        col.i64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or(ProcessorError::MissingValue { column: name, row }))
            .collect()
    }

    fn required_strings(df: &DataFrame, name: &'static str) -> Result<Vec<String>, ProcessorError> {
        let col = df.column(name)?.cast(&DataType::String)?;
        col.str()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.map(str::to_string)
                    .ok_or(ProcessorError::MissingValue { column: name, row })
            })
            .collect()
    }

    fn optional_strings(df: &DataFrame, name: &'static str) -> Result<Vec<String>, ProcessorError> {
        let col = df.column(name)?.cast(&DataType::String)?;
        Ok(col
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    }

    fn dates(df: &DataFrame, name: &'static str) -> Result<Vec<NaiveDate>, ProcessorError> {
        let raw = Self::required_strings(df, name)?;
        raw.into_iter()
            .enumerate()
            .map(|(row, value)| {
                parse_date(&value).ok_or(ProcessorError::InvalidDate { row, value })
            })
            .collect()
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time of day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
