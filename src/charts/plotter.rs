//! Chart Plotter Module
//! Aggregates the dataset for each of the seven charts and hands the result
//! to the renderer.

use super::renderer::{
    BarChart, ChartText, Figure, Heatmap, LineChart, ScatterChart, StaticChartRenderer,
    BAR_GREEN, BAR_ORANGE, BAR_RED, LINE_BLUE, TEAL,
};
use crate::data::{Dataset, Record};
use crate::stats::StatsCalculator;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Country not found: {0}")]
    UnknownCountry(String),
    #[error("Country name required for this chart")]
    MissingCountry,
    #[error("Nothing to plot")]
    NoData,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// The seven charts offered by the chart menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    TemperatureTrend,
    AirQualityTrend,
    RespiratoryDisease,
    TemperatureHeatmap,
    GdpVsMentalHealth,
    ExtremeWeather,
    FoodSecurity,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::TemperatureTrend,
        ChartKind::AirQualityTrend,
        ChartKind::RespiratoryDisease,
        ChartKind::TemperatureHeatmap,
        ChartKind::GdpVsMentalHealth,
        ChartKind::ExtremeWeather,
        ChartKind::FoodSecurity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::TemperatureTrend => "Global yearly temperature",
            ChartKind::AirQualityTrend => "Air quality evolution by country",
            ChartKind::RespiratoryDisease => "Respiratory diseases by country",
            ChartKind::TemperatureHeatmap => "Temperature heatmap by region and year",
            ChartKind::GdpVsMentalHealth => "GDP per capita vs Mental Health Index",
            ChartKind::ExtremeWeather => "Extreme weather events by country",
            ChartKind::FoodSecurity => "Food Security Index by country",
        }
    }

    /// Whether the chart is drawn for a single, user-chosen country.
    pub fn needs_country(&self) -> bool {
        matches!(self, ChartKind::AirQualityTrend)
    }

    /// Image file name inside the results directory.
    pub fn file_name(&self, country: Option<&str>) -> String {
        match self {
            ChartKind::TemperatureTrend => "grafico_temperatura_global.png".to_string(),
            ChartKind::AirQualityTrend => {
                let country: String = country
                    .unwrap_or_default()
                    .chars()
                    .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
                    .collect();
                format!("evolucao_qualidade_do_ar_{}.png", country)
            }
            ChartKind::RespiratoryDisease => "taxas_doencas_respiratórias.png".to_string(),
            ChartKind::TemperatureHeatmap => "heatmap_temperatura_por_regiao.png".to_string(),
            ChartKind::GdpVsMentalHealth => "relacao_entre_pib_e_saude_mental.png".to_string(),
            ChartKind::ExtremeWeather => "eventos_extremos.png".to_string(),
            ChartKind::FoodSecurity => "seguranca_alimentar.png".to_string(),
        }
    }
}

/// A fully aggregated chart, ready to be drawn.
#[derive(Debug, Clone)]
pub enum Chart {
    Line(LineChart),
    Bars(BarChart),
    Heatmap(Heatmap),
    Scatter(ScatterChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Line(c) => &c.text.title,
            Chart::Bars(c) => &c.text.title,
            Chart::Heatmap(c) => &c.text.title,
            Chart::Scatter(c) => &c.text.title,
        }
    }

    /// Draw the chart into a PNG at `path`.
    pub fn render(&self, path: &Path) -> Result<(), ChartError> {
        match self {
            Chart::Line(c) => StaticChartRenderer::render_line(c, path),
            Chart::Bars(c) => StaticChartRenderer::render_bars(c, path),
            Chart::Heatmap(c) => StaticChartRenderer::render_heatmap(c, path),
            Chart::Scatter(c) => StaticChartRenderer::render_scatter(c, path),
        }
    }
}

fn text(title: &str, x_desc: &str, y_desc: &str, footnote: Option<&str>) -> ChartText {
    ChartText {
        title: title.to_string(),
        x_desc: x_desc.to_string(),
        y_desc: y_desc.to_string(),
        footnote: footnote.map(str::to_string),
    }
}

/// Builds the data behind each chart.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Aggregate the dataset for `kind`; `country` is only read by charts
    /// that [need one](ChartKind::needs_country).
    pub fn build(
        kind: ChartKind,
        dataset: &Dataset,
        country: Option<&str>,
    ) -> Result<Chart, ChartError> {
        let chart = match kind {
            ChartKind::TemperatureTrend => Self::temperature_trend(dataset),
            ChartKind::AirQualityTrend => {
                Self::air_quality_trend(dataset, country.ok_or(ChartError::MissingCountry)?)?
            }
            ChartKind::RespiratoryDisease => Self::respiratory_disease(dataset),
            ChartKind::TemperatureHeatmap => Self::temperature_heatmap(dataset),
            ChartKind::GdpVsMentalHealth => Self::gdp_vs_mental_health(dataset),
            ChartKind::ExtremeWeather => Self::extreme_weather(dataset),
            ChartKind::FoodSecurity => Self::food_security(dataset),
        };
        Ok(chart)
    }

    /// Mean of `value` per year, years ascending.
    fn yearly_mean<'a, I>(records: I, value: fn(&Record) -> f64) -> Vec<(i32, f64)>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&Record> = records.into_iter().collect();
        let mut points: Vec<(i32, f64)> =
            StatsCalculator::group_mean(&records, |r| r.year, |r| value(r))
                .into_iter()
                .map(|g| (g.key, g.value))
                .collect();
        points.sort_by_key(|p| p.0);
        points
    }

    /// Mean of `value` per country, largest first.
    fn country_ranking(dataset: &Dataset, value: fn(&Record) -> f64) -> Vec<(String, f64)> {
        let groups =
            StatsCalculator::group_mean(dataset.records(), |r| r.country.clone(), value);
        StatsCalculator::sort_descending(groups)
            .into_iter()
            .map(|g| (g.key, g.value))
            .collect()
    }

    pub fn temperature_trend(dataset: &Dataset) -> Chart {
        Chart::Line(LineChart {
            text: text(
                "Global Average Temperature by Year",
                "Year",
                "Temperature (°C)",
                None,
            ),
            figure: Figure::new(8.0, 5.0),
            points: Self::yearly_mean(dataset.records(), |r| r.temperature_celsius),
            markers: false,
            color: LINE_BLUE,
        })
    }

    /// PM2.5 per year for exactly `country`; unknown names are rejected.
    pub fn air_quality_trend(dataset: &Dataset, country: &str) -> Result<Chart, ChartError> {
        if !dataset.has_country(country) {
            return Err(ChartError::UnknownCountry(country.to_string()));
        }

        let points = Self::yearly_mean(
            dataset.records().iter().filter(|r| r.country == country),
            |r| r.pm25_ugm3,
        );

        Ok(Chart::Line(LineChart {
            text: text(
                &format!("Air Quality Evolution - {}", country),
                "Year",
                "Average PM2.5 (µg/m³)",
                None,
            ),
            figure: Figure::new(10.0, 5.0),
            points,
            markers: true,
            color: LINE_BLUE,
        }))
    }

    pub fn respiratory_disease(dataset: &Dataset) -> Chart {
        Chart::Bars(BarChart {
            text: text(
                "Average Respiratory Disease Rate by Country (2015-2025)",
                "Country",
                "Average respiratory disease rate",
                Some("Average respiratory disease rate per country from 2015 to 2025."),
            ),
            figure: Figure::new(12.0, 6.0),
            bars: Self::country_ranking(dataset, |r| r.respiratory_disease_rate),
            color: BAR_RED,
        })
    }

    pub fn temperature_heatmap(dataset: &Dataset) -> Chart {
        let table = StatsCalculator::pivot_mean(
            dataset.records(),
            |r| r.region.clone(),
            |r| r.year,
            |r| r.temperature_celsius,
        );

        Chart::Heatmap(Heatmap {
            text: text(
                "Heatmap - Average Temperature by Region (2015-2025)",
                "Year",
                "Region",
                None,
            ),
            figure: Figure::new(12.0, 6.0),
            table,
        })
    }

    pub fn gdp_vs_mental_health(dataset: &Dataset) -> Chart {
        let gdp = StatsCalculator::group_mean(
            dataset.records(),
            |r| r.country.clone(),
            |r| r.gdp_per_capita_usd,
        );
        let mental = StatsCalculator::group_mean(
            dataset.records(),
            |r| r.country.clone(),
            |r| r.mental_health_index,
        );
        let points = gdp
            .into_iter()
            .zip(mental)
            .map(|(g, m)| (g.key, g.value, m.value))
            .collect();

        Chart::Scatter(ScatterChart {
            text: text(
                "GDP per Capita vs Mental Health Index (mean per country)",
                "GDP per Capita (USD)",
                "Mental Health Index 0 to 100",
                None,
            ),
            figure: Figure::new(10.0, 6.0),
            points,
            label_offset: 100.0,
            color: TEAL,
        })
    }

    pub fn extreme_weather(dataset: &Dataset) -> Chart {
        let groups = StatsCalculator::group_sum(
            dataset.records(),
            |r| r.country.clone(),
            |r| r.extreme_weather_events.map(f64::from).unwrap_or(f64::NAN),
        );
        let bars = StatsCalculator::sort_descending(groups)
            .into_iter()
            .map(|g| (g.key, g.value))
            .collect();

        Chart::Bars(BarChart {
            text: text(
                "Extreme Weather Events by Country (2015-2025)",
                "Country",
                "Number of events",
                None,
            ),
            figure: Figure::new(12.0, 6.0),
            bars,
            color: BAR_ORANGE,
        })
    }

    pub fn food_security(dataset: &Dataset) -> Chart {
        Chart::Bars(BarChart {
            text: text(
                "Average Food Security Index by Country (2015-2025)",
                "Country",
                "Food Security Index",
                Some("Average food security index from 2015 to 2025 per country."),
            ),
            figure: Figure::new(12.0, 6.0),
            bars: Self::country_ranking(dataset, |r| r.food_security_index),
            color: BAR_GREEN,
        })
    }
}
