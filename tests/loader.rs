mod common;

use climate_observatory::data::{DataLoader, LoaderError};
use common::{csv_row, TestEnv};

#[test]
fn loading_twice_gives_the_same_summary() {
    let env = TestEnv::with_rows(&[
        csv_row("Brazil", "South America", 2015, 25.5, 12.0),
        csv_row("Brazil", "South America", 2016, 26.0, 14.0),
        csv_row("Norway", "Europe", 2020, 4.5, 6.0),
    ]);

    let first = DataLoader::load_csv(&env.data_path).unwrap();
    let second = DataLoader::load_csv(&env.data_path).unwrap();

    assert_eq!(first.summary(), second.summary());
    let summary = first.summary();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.columns, 18);
    assert_eq!(summary.countries, 2);
    assert_eq!(summary.first_year, Some(2015));
    assert_eq!(summary.last_year, Some(2020));
    assert_eq!(summary.null_cells, 0);
}

#[test]
fn records_keep_file_order_and_values() {
    let env = TestEnv::with_rows(&[
        csv_row("Norway", "Europe", 2020, 4.5, 6.0),
        csv_row("Brazil", "South America", 2015, 25.5, 12.0),
    ]);

    let dataset = DataLoader::load_csv(&env.data_path).unwrap();
    let records = dataset.records();

    assert_eq!(records[0].country, "Norway");
    assert_eq!(records[1].country, "Brazil");
    assert_eq!(records[1].year, 2015);
    assert_eq!(records[1].date.to_string(), "2015-06-30");
    assert_eq!(records[1].temperature_celsius, 25.5);
    assert_eq!(records[1].air_quality_index, 24.0);
    assert_eq!(records[1].heat_wave_days, Some(8));
    assert_eq!(records[1].income_level, "High");
    assert_eq!(dataset.countries(), vec!["Norway", "Brazil"]);
}

#[test]
fn missing_file_is_not_found() {
    let env = TestEnv::new();

    match DataLoader::load_csv(&env.data_path) {
        Err(LoaderError::NotFound(path)) => assert_eq!(path, env.data_path),
        other => panic!("expected NotFound, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn empty_measures_are_counted_and_skipped() {
    let full = csv_row("Chile", "South America", 2018, 21.5, 10.0);
    let blank_temperature = full.replacen(",21.5,", ",,", 1);
    assert_ne!(full, blank_temperature);

    let env = TestEnv::with_rows(&[
        csv_row("Chile", "South America", 2017, 18.0, 10.0),
        blank_temperature,
    ]);

    let dataset = DataLoader::load_csv(&env.data_path).unwrap();

    assert_eq!(dataset.summary().null_cells, 1);
    assert!(dataset.records()[1].temperature_celsius.is_nan());

    let lines = climate_observatory::report::country_summary(&dataset, "chile");
    assert!(lines.contains(&"Average temperature: 18.0 °C".to_string()));
}

#[test]
fn malformed_date_fails_the_load() {
    let row = csv_row("Peru", "South America", 2019, 19.0, 9.0).replace("2019-06-30", "June 2019");
    let env = TestEnv::with_rows(&[row]);

    assert!(matches!(
        DataLoader::load_csv(&env.data_path),
        Err(LoaderError::Processing(_))
    ));
}
