//! Stats module - aggregations over the loaded records

mod calculator;

pub use calculator::{distinct, GroupValue, PivotTable, StatsCalculator};
