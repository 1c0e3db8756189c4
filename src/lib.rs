//! Climate Observatory - Climate & Public Health Explorer (2015-2025)
//!
//! Loads a yearly per-country climate and health table, prints samples,
//! country summaries and global statistics, renders seven PNG charts and
//! exports the session transcript as a text report.

pub mod charts;
pub mod config;
pub mod console;
pub mod data;
pub mod paths;
pub mod report;
pub mod stats;
