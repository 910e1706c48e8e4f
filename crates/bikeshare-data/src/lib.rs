//! Data layer for the bikeshare explorer.
//!
//! Reads city trip-log CSVs into tables, applies the month/day filters, and
//! computes the time, station, trip-duration and user reports.

pub mod aggregator;
pub mod loader;
pub mod reader;
pub mod stats;

pub use bikeshare_core as core;
