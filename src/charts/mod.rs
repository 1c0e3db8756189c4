//! Charts module - aggregation and static PNG rendering

mod plotter;
mod renderer;

pub use plotter::{Chart, ChartError, ChartKind, ChartPlotter};
pub use renderer::{
    diverging_color, BarChart, ChartText, Figure, Heatmap, LineChart, ScatterChart,
    StaticChartRenderer, DPI,
};
