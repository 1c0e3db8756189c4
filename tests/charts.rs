mod common;

use climate_observatory::charts::{Chart, ChartError, ChartKind, ChartPlotter};
use climate_observatory::data::Dataset;
use common::{record, sample_dataset};
use std::fs;

#[test]
fn temperature_trend_is_yearly_mean_in_year_order() {
    let dataset = Dataset::from_records(vec![
        record("A", "North", 2017, 10.0, 1.0),
        record("B", "North", 2015, 4.0, 1.0),
        record("C", "South", 2015, 6.0, 1.0),
        record("D", "South", 2016, f64::NAN, 1.0),
        record("E", "South", 2016, 8.0, 1.0),
    ]);

    let Chart::Line(line) = ChartPlotter::temperature_trend(&dataset) else {
        panic!("expected a line chart");
    };
    assert_eq!(line.points, vec![(2015, 5.0), (2016, 8.0), (2017, 10.0)]);
    assert!(!line.markers);
}

#[test]
fn air_quality_needs_an_exact_known_country() {
    let dataset = sample_dataset();

    let err = ChartPlotter::build(ChartKind::AirQualityTrend, &dataset, Some("kenya")).unwrap_err();
    assert!(matches!(err, ChartError::UnknownCountry(name) if name == "kenya"));

    let err = ChartPlotter::build(ChartKind::AirQualityTrend, &dataset, None).unwrap_err();
    assert!(matches!(err, ChartError::MissingCountry));

    let chart = ChartPlotter::build(ChartKind::AirQualityTrend, &dataset, Some("Kenya")).unwrap();
    let Chart::Line(line) = chart else {
        panic!("expected a line chart");
    };
    assert_eq!(line.points, vec![(2015, 15.0), (2016, 15.0), (2017, 15.0)]);
    assert!(line.markers);
    assert!(line.text.title.ends_with("Kenya"));
}

#[test]
fn bar_charts_are_sorted_largest_first() {
    let dataset = sample_dataset();

    for kind in [
        ChartKind::RespiratoryDisease,
        ChartKind::ExtremeWeather,
        ChartKind::FoodSecurity,
    ] {
        let Chart::Bars(bars) = ChartPlotter::build(kind, &dataset, None).unwrap() else {
            panic!("expected a bar chart for {:?}", kind);
        };
        assert_eq!(bars.bars.len(), 7);
        assert!(bars.bars.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}

#[test]
fn extreme_weather_sums_events_per_country() {
    let mut quiet = record("Quiet", "R", 2015, 1.0, 1.0);
    quiet.extreme_weather_events = None;
    let dataset = Dataset::from_records(vec![
        record("Stormy", "R", 2015, 1.0, 1.0),
        record("Stormy", "R", 2016, 1.0, 1.0),
        quiet,
        record("Quiet", "R", 2016, 1.0, 1.0),
    ]);

    let Chart::Bars(chart) = ChartPlotter::extreme_weather(&dataset) else {
        panic!("expected a bar chart");
    };
    assert_eq!(
        chart.bars,
        vec![("Stormy".to_string(), 6.0), ("Quiet".to_string(), 3.0)]
    );
}

#[test]
fn heatmap_rows_are_regions_and_columns_are_years() {
    let dataset = sample_dataset();

    let Chart::Heatmap(heatmap) = ChartPlotter::temperature_heatmap(&dataset) else {
        panic!("expected a heatmap");
    };
    let table = heatmap.table;
    assert_eq!(table.rows, vec!["North".to_string(), "South".to_string()]);
    assert_eq!(table.columns, vec![2015, 2016, 2017]);
    // North holds Norway, Kenya and Japan: 11, 13 and 15 degrees.
    assert_eq!(table.get(0, 0), Some(13.0));
    // South holds Brazil, India, Chile and Spain: 10, 12, 14 and 16 degrees.
    assert_eq!(table.get(1, 2), Some(13.0));
}

#[test]
fn scatter_pairs_country_means() {
    let mut poor = record("Poor", "R", 2015, 1.0, 1.0);
    poor.gdp_per_capita_usd = 1000.0;
    poor.mental_health_index = 40.0;
    let mut rich = record("Rich", "R", 2015, 1.0, 1.0);
    rich.gdp_per_capita_usd = 50000.0;
    rich.mental_health_index = 80.0;
    let dataset = Dataset::from_records(vec![poor, rich]);

    let Chart::Scatter(scatter) = ChartPlotter::gdp_vs_mental_health(&dataset) else {
        panic!("expected a scatter chart");
    };
    assert_eq!(
        scatter.points,
        vec![
            ("Poor".to_string(), 1000.0, 40.0),
            ("Rich".to_string(), 50000.0, 80.0),
        ]
    );
}

#[test]
fn file_names_are_stable() {
    assert_eq!(
        ChartKind::TemperatureTrend.file_name(None),
        "grafico_temperatura_global.png"
    );
    assert_eq!(
        ChartKind::AirQualityTrend.file_name(Some("Bosnia/Herzegovina")),
        "evolucao_qualidade_do_ar_Bosnia_Herzegovina.png"
    );
    assert_eq!(
        ChartKind::TemperatureHeatmap.file_name(None),
        "heatmap_temperatura_por_regiao.png"
    );
    assert_eq!(
        ChartKind::RespiratoryDisease.file_name(None),
        "taxas_doencas_respiratórias.png"
    );
}

fn render_every_kind(dataset: &Dataset, country: &str) {
    let dir = tempfile::tempdir().unwrap();

    for kind in ChartKind::ALL {
        let country = kind.needs_country().then_some(country);
        let chart = ChartPlotter::build(kind, dataset, country).unwrap();
        let path = dir.path().join(kind.file_name(country));

        chart
            .render(&path)
            .unwrap_or_else(|err| panic!("{:?} failed to render: {}", kind, err));

        let written = fs::metadata(&path).unwrap();
        assert!(written.len() > 0, "{:?} wrote an empty image", kind);
    }
}

#[test]
fn every_chart_renders_a_png() {
    render_every_kind(&sample_dataset(), "Japan");
}

#[test]
fn single_country_single_year_still_renders() {
    let dataset = Dataset::from_records(vec![record("Testland", "Nowhere", 2020, 15.0, 8.0)]);
    render_every_kind(&dataset, "Testland");
}
