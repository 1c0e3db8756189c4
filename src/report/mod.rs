//! Report module - text sections and the session report log

mod accumulator;
mod sections;

pub use accumulator::{Report, REPORT_FILE_NAME};
pub use sections::{
    country_summary, display_number, heat_wave_days_per_country, matching_records, round2,
    sample_records, sample_table, statistics, top_countries, HEAT_WAVE_COUNTRIES,
    NO_COUNTRY_FOUND, RANKING_SIZE, SAMPLE_SIZE,
};
