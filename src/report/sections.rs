//! Report sections
//! Sample table, country search summary and global statistics, rendered as
//! plain text lines. The session prints and accumulates whatever these return.

use crate::data::{Dataset, Record};
use crate::stats::StatsCalculator;

pub const NO_COUNTRY_FOUND: &str = "No country found!";

/// Maximum number of countries in the sample table.
pub const SAMPLE_SIZE: usize = 10;

/// Column widths of the sample table.
const SAMPLE_WIDTHS: [usize; 4] = [18, 15, 15, 18];
const SAMPLE_GUTTER: &str = "   ";

/// Heat-wave days are spread over this many countries in the statistics.
pub const HEAT_WAVE_COUNTRIES: f64 = 25.0;

/// Number of countries listed in each ranking.
pub const RANKING_SIZE: usize = 5;

/// Round to two decimals, ties to even (`0.125` becomes `0.12`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Shortest decimal form of a float, always with a fractional part
/// (`15.0`, `12.35`, `nan`).
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Two-decimal rounded value in its shortest form.
fn rounded(value: f64) -> String {
    display_number(round2(value))
}

/// First record of each country, at most [`SAMPLE_SIZE`] of them, in file order.
pub fn sample_records(dataset: &Dataset) -> Vec<&Record> {
    let mut seen = std::collections::HashSet::new();
    dataset
        .records()
        .iter()
        .filter(|r| seen.insert(r.country.as_str()))
        .take(SAMPLE_SIZE)
        .collect()
}

/// Fixed-width table of [`sample_records`].
pub fn sample_table(dataset: &Dataset) -> Vec<String> {
    let [w0, w1, w2, w3] = SAMPLE_WIDTHS;
    let header = format!(
        "{:<w0$}{:>w1$}{SAMPLE_GUTTER}{:>w2$}{:>w3$}",
        "Country", "Temp (°C)", "Income Level", "Population (M)",
    );
    let rule = "-".repeat(SAMPLE_WIDTHS.iter().sum::<usize>() + SAMPLE_GUTTER.len());

    let mut lines = vec![header, rule];
    lines.extend(sample_records(dataset).into_iter().map(|r| {
        format!(
            "{:<w0$}{:>w1$}{SAMPLE_GUTTER}{:>w2$}{:>w3$}",
            r.country,
            display_number(r.temperature_celsius),
            r.income_level,
            display_number(r.population_millions),
        )
    }));
    lines
}

/// Records whose country contains `query`, ignoring case and surrounding blanks.
pub fn matching_records<'a>(dataset: &'a Dataset, query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    dataset
        .records()
        .iter()
        .filter(|r| r.country.to_lowercase().contains(&needle))
        .collect()
}

/// Aggregate health and climate metrics for every country matching `query`.
pub fn country_summary(dataset: &Dataset, query: &str) -> Vec<String> {
    let matches = matching_records(dataset, query);
    if matches.is_empty() {
        return vec![NO_COUNTRY_FOUND.to_string()];
    }

    let mean = |f: fn(&Record) -> f64| rounded(StatsCalculator::mean(matches.iter().map(|r| f(r))));
    let first_year = matches.iter().map(|r| r.year).min().unwrap_or_default();
    let last_year = matches.iter().map(|r| r.year).max().unwrap_or_default();

    vec![
        format!("\n====== Results for {} =======", query.trim()),
        format!("Period: {} - {}", first_year, last_year),
        format!("Average temperature: {} °C", mean(|r| r.temperature_celsius)),
        format!(
            "Average PM2.5 (airborne particles): {} µg/m³",
            mean(|r| r.pm25_ugm3)
        ),
        format!(
            "Average AQI (air quality - 0 to 500): {}",
            mean(|r| r.air_quality_index)
        ),
        format!(
            "Respiratory diseases (average): {}%",
            mean(|r| r.respiratory_disease_rate)
        ),
        format!(
            "Cardiovascular mortality (average): {}%",
            mean(|r| r.cardio_mortality_rate)
        ),
        format!(
            "Healthcare access (average): {}%",
            mean(|r| r.healthcare_access_index)
        ),
    ]
}

/// Sum of heat-wave days over all records, spread over [`HEAT_WAVE_COUNTRIES`].
pub fn heat_wave_days_per_country(dataset: &Dataset) -> f64 {
    let total = StatsCalculator::sum(
        dataset
            .records()
            .iter()
            .filter_map(|r| r.heat_wave_days.map(f64::from)),
    );
    total / HEAT_WAVE_COUNTRIES
}

/// Countries with the highest per-country mean of `value`, largest first.
pub fn top_countries(
    dataset: &Dataset,
    value: fn(&Record) -> f64,
) -> Vec<crate::stats::GroupValue<String>> {
    let groups = StatsCalculator::group_mean(dataset.records(), |r| r.country.clone(), value);
    StatsCalculator::top_n(groups, RANKING_SIZE)
}

/// Geographic, climate, social and ranking sections of the global statistics.
pub fn statistics(dataset: &Dataset) -> Vec<String> {
    let records = dataset.records();
    let mean = |f: fn(&Record) -> f64| rounded(StatsCalculator::mean(records.iter().map(f)));

    let mut lines = vec![
        "\n================================== STATISTICS ================================== "
            .to_string(),
        "1. GEOGRAPHIC DATA".to_string(),
        format!("Number of countries: {}", dataset.countries().len()),
        format!("Regions represented: {}", dataset.regions().join(", ")),
        String::new(),
        "2. CLIMATE DATA".to_string(),
        format!(
            "Global average temperature: {} °C",
            mean(|r| r.temperature_celsius)
        ),
        format!(
            "Heat waves (average): {} days per country",
            rounded(heat_wave_days_per_country(dataset))
        ),
        format!(
            "Global average PM2.5 (airborne particles): {} µg/m³",
            mean(|r| r.pm25_ugm3)
        ),
        format!(
            "Global average AQI (air quality from 0 to 500): {}",
            mean(|r| r.air_quality_index)
        ),
        String::new(),
        "3. SOCIAL DATA".to_string(),
        format!(
            "Average respiratory disease deaths: {}",
            mean(|r| r.respiratory_disease_rate)
        ),
        format!(
            "Average cardiovascular mortality: {}",
            mean(|r| r.cardio_mortality_rate)
        ),
        format!(
            "Global average healthcare access: {}",
            mean(|r| r.healthcare_access_index)
        ),
        String::new(),
        "4. TOP FIVE COUNTRIES WITH THE HIGHEST:".to_string(),
    ];

    let rankings: [(&str, fn(&Record) -> f64); 3] = [
        ("  I. Airborne particles (PM2.5):", |r| r.pm25_ugm3),
        ("\n  II. Cardiovascular mortality (%):", |r| r.cardio_mortality_rate),
        ("\n  III. Waterborne disease incidence (%):", |r| r.waterborne_disease_incidents),
    ];

    for (title, value) in rankings {
        lines.push(title.to_string());
        lines.extend(
            top_countries(dataset, value)
                .into_iter()
                .map(|g| format!("{}: {:.2}", g.key, g.value)),
        );
    }

    lines
}
