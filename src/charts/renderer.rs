//! Static Chart Renderer
//! Draws line, bar, heatmap and scatter charts with plotters and writes them
//! as PNG images.
//!
//! Sizes are given in inches and converted at a fixed [`DPI`]; font sizes are
//! given in points, so every chart keeps the same proportions whatever its
//! pixel size.

use super::ChartError;
use crate::stats::PivotTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;

/// Resolution of every saved chart.
pub const DPI: u32 = 300;

const FONT: &str = "sans-serif";

// Colors
pub const LINE_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const BAR_RED: RGBColor = RGBColor(214, 39, 40);
pub const BAR_ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const BAR_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const TEAL: RGBColor = RGBColor(0, 128, 128);
const GRID: RGBColor = RGBColor(200, 200, 200);

// Diverging scale endpoints (cool - neutral - warm)
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width: f64,
    pub height: f64,
}

impl Figure {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self) -> (u32, u32) {
        (inches(self.width), inches(self.height))
    }
}

/// Inches to pixels.
fn inches(value: f64) -> u32 {
    (value * DPI as f64).round() as u32
}

/// Points to pixels.
fn pt(size: f64) -> f64 {
    size * DPI as f64 / 72.0
}

fn render_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

/// Common labels of a chart.
#[derive(Debug, Clone)]
pub struct ChartText {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// Centered note under the plot.
    pub footnote: Option<String>,
}

/// Values over years, joined by a line.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub text: ChartText,
    pub figure: Figure,
    pub points: Vec<(i32, f64)>,
    pub markers: bool,
    pub color: RGBColor,
}

/// One bar per category, in the given order.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub text: ChartText,
    pub figure: Figure,
    pub bars: Vec<(String, f64)>,
    pub color: RGBColor,
}

/// Annotated grid of values over rows and year columns.
#[derive(Debug, Clone)]
pub struct Heatmap {
    pub text: ChartText,
    pub figure: Figure,
    pub table: PivotTable<String, i32>,
}

/// Labeled points; labels sit `label_offset` to the right on the x axis.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub text: ChartText,
    pub figure: Figure,
    pub points: Vec<(String, f64, f64)>,
    pub label_offset: f64,
    pub color: RGBColor,
}

/// Value range with a margin on both sides, never empty.
fn padded_range<I: IntoIterator<Item = f64>>(values: I, include_zero: bool) -> Range<f64> {
    let (mut lo, mut hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
    (lo)..(hi + pad)
}

/// Last index of a segmented axis holding `count` categories.
fn segment_end(count: usize) -> u32 {
    (count as u32).saturating_sub(1).max(1)
}

fn segment_label(value: &SegmentValue<u32>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Position on a cool-to-warm diverging scale, `t` in `[0, 1]`.
pub fn diverging_color(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let (from, to, f) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn render_line(chart: &LineChart, path: &Path) -> Result<(), ChartError> {
        if chart.points.is_empty() {
            return Err(ChartError::NoData);
        }

        let root = BitMapBackend::new(path, chart.figure.pixels()).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let first = chart.points.iter().map(|p| p.0).min().unwrap_or_default();
        let last = chart.points.iter().map(|p| p.0).max().unwrap_or_default();
        let x_range = if first == last { first - 1..last + 1 } else { first..last };
        let y_range = padded_range(chart.points.iter().map(|p| p.1), false);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.text.title, (FONT, pt(14.0)))
            .margin(inches(0.2))
            .x_label_area_size(inches(0.6))
            .y_label_area_size(inches(0.9))
            .build_cartesian_2d(x_range.clone(), y_range)
            .map_err(render_err)?;

        ctx.configure_mesh()
            .x_desc(chart.text.x_desc.as_str())
            .y_desc(chart.text.y_desc.as_str())
            .x_labels((x_range.end - x_range.start + 1) as usize)
            .x_label_formatter(&|year| year.to_string())
            .y_label_formatter(&|v| format!("{:.2}", v))
            .label_style((FONT, pt(9.0)))
            .axis_desc_style((FONT, pt(11.0)))
            .bold_line_style(GRID.stroke_width(2))
            .light_line_style(WHITE)
            .draw()
            .map_err(render_err)?;

        let line = LineSeries::new(chart.points.iter().copied(), chart.color.stroke_width(4));
        let line = if chart.markers {
            line.point_size(inches(0.04))
        } else {
            line
        };
        ctx.draw_series(line).map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    pub fn render_bars(chart: &BarChart, path: &Path) -> Result<(), ChartError> {
        if chart.bars.is_empty() {
            return Err(ChartError::NoData);
        }

        let root = BitMapBackend::new(path, chart.figure.pixels()).into_drawing_area();
        Self::draw_bars(chart, root)
    }

    fn draw_bars<DB: DrawingBackend>(
        chart: &BarChart,
        root: DrawingArea<DB, Shift>,
    ) -> Result<(), ChartError> {
        root.fill(&WHITE).map_err(render_err)?;
        let root = Self::draw_footnote(root, &chart.text)?;

        let labels: Vec<String> = chart.bars.iter().map(|(name, _)| name.clone()).collect();
        let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1) as f64;
        let y_range = padded_range(chart.bars.iter().map(|b| b.1), true);
        let y_floor = y_range.start;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.text.title, (FONT, pt(14.0)))
            .margin(inches(0.2))
            .x_label_area_size(inches(0.5) + (pt(8.0) * 0.6 * longest) as u32)
            .y_label_area_size(inches(0.9))
            .build_cartesian_2d((0u32..segment_end(labels.len())).into_segmented(), y_range)
            .map_err(render_err)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.text.x_desc.as_str())
            .y_desc(chart.text.y_desc.as_str())
            .x_labels(labels.len())
            .label_style((FONT, pt(9.0)))
            .x_label_formatter(&|_| String::new())
            .y_label_formatter(&|v| format!("{:.1}", v))
            .axis_desc_style((FONT, pt(11.0)))
            .bold_line_style(GRID.mix(0.7).stroke_width(2))
            .light_line_style(WHITE)
            .draw()
            .map_err(render_err)?;

        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(chart.color.filled())
                .margin(inches(0.02))
                .data(
                    chart
                        .bars
                        .iter()
                        .enumerate()
                        .map(|(i, (_, value))| (i as u32, *value)),
                ),
        )
        .map_err(render_err)?;

        // Rotated labels hang below their tick, first character at the axis.
        let tick_style = TextStyle::from(
            (FONT, pt(8.0))
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .pos(Pos::new(HPos::Left, VPos::Center));
        for (i, label) in labels.iter().enumerate() {
            let (x, y) = ctx.backend_coord(&(SegmentValue::CenterOf(i as u32), y_floor));
            root.draw_text(label, &tick_style, (x, y + inches(0.08) as i32))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }

    pub fn render_heatmap(chart: &Heatmap, path: &Path) -> Result<(), ChartError> {
        let table = &chart.table;
        let Some((lo, hi)) = table.value_range() else {
            return Err(ChartError::NoData);
        };
        let span = if hi > lo { hi - lo } else { 1.0 };
        let scale = |v: f64| diverging_color((v - lo) / span);

        let (width, height) = chart.figure.pixels();
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let (plot, legend) = root.split_horizontally(width - inches(1.2));

        // First row on top
        let rows: Vec<String> = table.rows.iter().rev().cloned().collect();
        let columns: Vec<String> = table.columns.iter().map(|y| y.to_string()).collect();

        let mut ctx = ChartBuilder::on(&plot)
            .caption(&chart.text.title, (FONT, pt(14.0)))
            .margin(inches(0.2))
            .x_label_area_size(inches(0.6))
            .y_label_area_size(inches(1.6))
            .build_cartesian_2d(
                (0u32..segment_end(columns.len())).into_segmented(),
                (0u32..segment_end(rows.len())).into_segmented(),
            )
            .map_err(render_err)?;

        ctx.configure_mesh()
            .disable_mesh()
            .x_desc(chart.text.x_desc.as_str())
            .y_desc(chart.text.y_desc.as_str())
            .x_labels(columns.len())
            .y_labels(rows.len())
            .x_label_formatter(&|v| segment_label(v, &columns))
            .y_label_formatter(&|v| segment_label(v, &rows))
            .label_style((FONT, pt(9.0)))
            .axis_desc_style((FONT, pt(11.0)))
            .draw()
            .map_err(render_err)?;

        let cells: Vec<(u32, u32, f64)> = (0..rows.len())
            .flat_map(|r| (0..columns.len()).map(move |c| (r, c)))
            .filter_map(|(r, c)| {
                let y = (rows.len() - 1 - r) as u32;
                table.get(r, c).map(|v| (c as u32, y, v))
            })
            .collect();

        ctx.draw_series(cells.iter().map(|&(c, r, v)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(c), SegmentValue::Exact(r)),
                    (SegmentValue::Exact(c + 1), SegmentValue::Exact(r + 1)),
                ],
                scale(v).filled(),
            )
        }))
        .map_err(render_err)?;

        ctx.draw_series(cells.iter().map(|&(c, r, _)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(c), SegmentValue::Exact(r)),
                    (SegmentValue::Exact(c + 1), SegmentValue::Exact(r + 1)),
                ],
                WHITE.stroke_width(2),
            )
        }))
        .map_err(render_err)?;

        let annotation = TextStyle::from((FONT, pt(8.0)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        ctx.draw_series(cells.iter().map(|&(c, r, v)| {
            Text::new(
                format!("{:.1}", v),
                (SegmentValue::CenterOf(c), SegmentValue::CenterOf(r)),
                annotation.clone(),
            )
        }))
        .map_err(render_err)?;

        Self::draw_color_bar(&legend, lo, hi)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn draw_color_bar(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        lo: f64,
        hi: f64,
    ) -> Result<(), ChartError> {
        let (_, height) = area.dim_in_pixel();
        let top = inches(0.6) as i32;
        let bottom = height as i32 - inches(0.8) as i32;
        let left = inches(0.1) as i32;
        let right = left + inches(0.25) as i32;
        let steps = (bottom - top).max(1);

        for step in 0..steps {
            let y = bottom - step;
            let color = diverging_color(step as f64 / steps as f64);
            area.draw(&Rectangle::new([(left, y - 1), (right, y)], color.filled()))
                .map_err(render_err)?;
        }

        let style = TextStyle::from((FONT, pt(8.0)).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center));
        area.draw_text(&format!("{:.1}", hi), &style, (right + 8, top))
            .map_err(render_err)?;
        area.draw_text(&format!("{:.1}", (lo + hi) / 2.0), &style, (right + 8, (top + bottom) / 2))
            .map_err(render_err)?;
        area.draw_text(&format!("{:.1}", lo), &style, (right + 8, bottom))
            .map_err(render_err)?;
        Ok(())
    }

    pub fn render_scatter(chart: &ScatterChart, path: &Path) -> Result<(), ChartError> {
        if chart.points.is_empty() {
            return Err(ChartError::NoData);
        }

        let root = BitMapBackend::new(path, chart.figure.pixels()).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let x_range = padded_range(
            chart
                .points
                .iter()
                .flat_map(|p| [p.1, p.1 + chart.label_offset * 8.0]),
            false,
        );
        let y_range = padded_range(chart.points.iter().map(|p| p.2), false);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.text.title, (FONT, pt(13.0)))
            .margin(inches(0.2))
            .x_label_area_size(inches(0.6))
            .y_label_area_size(inches(0.9))
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        ctx.configure_mesh()
            .x_desc(chart.text.x_desc.as_str())
            .y_desc(chart.text.y_desc.as_str())
            .x_label_formatter(&|v| format!("{:.0}", v))
            .y_label_formatter(&|v| format!("{:.1}", v))
            .label_style((FONT, pt(9.0)))
            .axis_desc_style((FONT, pt(11.0)))
            .bold_line_style(GRID.stroke_width(2))
            .light_line_style(WHITE)
            .draw()
            .map_err(render_err)?;

        let radius = inches(0.04);
        ctx.draw_series(
            chart
                .points
                .iter()
                .map(|(_, x, y)| Circle::new((*x, *y), radius, chart.color.mix(0.7).filled())),
        )
        .map_err(render_err)?;
        ctx.draw_series(
            chart
                .points
                .iter()
                .map(|(_, x, y)| Circle::new((*x, *y), radius, BLACK.stroke_width(2))),
        )
        .map_err(render_err)?;

        let label = TextStyle::from((FONT, pt(8.0)).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center));
        ctx.draw_series(chart.points.iter().map(|(name, x, y)| {
            Text::new(name.clone(), (*x + chart.label_offset, *y), label.clone())
        }))
        .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    /// Draw the footnote into a strip at the bottom and return the area above it.
    fn draw_footnote<DB: DrawingBackend>(
        root: DrawingArea<DB, Shift>,
        text: &ChartText,
    ) -> Result<DrawingArea<DB, Shift>, ChartError> {
        let Some(note) = &text.footnote else {
            return Ok(root);
        };

        let (width, height) = root.dim_in_pixel();
        let (plot, footer) = root.split_vertically(height - inches(0.45));
        let style = TextStyle::from((FONT, pt(9.0)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        footer
            .draw_text(note, &style, (width as i32 / 2, inches(0.2) as i32))
            .map_err(render_err)?;
        Ok(plot)
    }
}
