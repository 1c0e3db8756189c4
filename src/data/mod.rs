//! Data module - CSV loading and record extraction

mod loader;
mod processor;
mod record;

pub use loader::{DataLoader, LoaderError, DATA_FILE_NAME};
pub use processor::{parse_date, DataProcessor, ProcessorError, COLUMNS};
pub use record::{Dataset, LoadSummary, Record};
