//! CSV Data Loader Module
//! Loads the climate table with Polars and converts it into a [`Dataset`].

use super::processor::{DataProcessor, ProcessorError};
use super::record::Dataset;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Expected name of the input table, next to the executable.
pub const DATA_FILE_NAME: &str = "global_climate_2015_2025.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    Processing(#[from] ProcessorError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load and type the climate table at `file_path`.
    ///
    /// A missing file is reported as [`LoaderError::NotFound`] so the caller
    /// can recover; every other failure is a real parse problem.
    pub fn load_csv(file_path: &Path) -> Result<Dataset, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let summary = DataProcessor::summarize(&df)?;
        let records = DataProcessor::to_records(&df)?;

        tracing::debug!(
            path = %file_path.display(),
            rows = summary.rows,
            columns = summary.columns,
            "climate table loaded"
        );

        Ok(Dataset::new(records, summary))
    }
}
