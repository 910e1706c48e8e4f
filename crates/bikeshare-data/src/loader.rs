//! Dataset loading and month/day filtering.
//!
//! Filtering never removes rows. A row outside the selected month or day is
//! invalidated in place, so the table keeps the source row count and order
//! and the raw-data pager walks the same positions as the CSV.

use std::path::Path;

use bikeshare_core::error::Result;
use bikeshare_core::models::{Filter, TripTable};
use bikeshare_core::settings::city_path_in;
use tracing::info;

use crate::reader::read_city_csv;

/// Load the CSV for `filter.city` from `data_dir` and apply the month/day
/// restrictions of `filter`.
pub fn load_data(data_dir: &Path, filter: &Filter) -> Result<TripTable> {
    let path = city_path_in(data_dir, filter.city);
    let mut table = read_city_csv(&path)?;
    apply_filter(&mut table, filter);
    Ok(table)
}

/// Same as [`load_data`] but from raw prompt answers (`"all"` or a
/// vocabulary name for month and day).
pub fn load_selection(data_dir: &Path, city: &str, month: &str, day: &str) -> Result<TripTable> {
    let filter = Filter::from_selection(city, month, day)?;
    load_data(data_dir, &filter)
}

/// Invalidate every row of `table` whose derived month or weekday falls
/// outside `filter`. Returns the number of rows invalidated.
pub fn apply_filter(table: &mut TripTable, filter: &Filter) -> usize {
    if filter.month.is_none() && filter.day.is_none() {
        return 0;
    }

    let invalidated = table.invalidate_unless(|rec| filter.matches(rec.month, rec.day));

    info!(
        "Filter {}: {} of {} rows kept",
        filter,
        table.len() - invalidated,
        table.len()
    );

    invalidated
}

// ── Tests ─────────────────────────────────────────────────────────────────────
