//! Raw-row paging over a filtered table.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::models::{TripRecord, TripTable};
use bikeshare_ui::table_view::render_raw_rows;
use tracing::debug;

use crate::prompt::Console;

/// Rows per window unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

// ── RawDataPager ──────────────────────────────────────────────────────────────

/// Walks a table in fixed-size windows: `[0, n)`, `[n, 2n)`, ...
///
/// Windows follow source order and include invalidated rows. Past the end
/// the window is empty.
#[derive(Debug, Clone)]
pub struct RawDataPager {
    offset: usize,
    page_size: usize,
}

impl RawDataPager {
    /// `page_size` of zero is bumped to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Return the next window with its starting row, then advance.
    pub fn next_window<'t>(&mut self, table: &'t TripTable) -> (usize, &'t [Option<TripRecord>]) {
        let start = self.offset;
        let window = table.window(start, self.page_size);
        self.offset = self.offset.saturating_add(self.page_size);
        (start, window)
    }
}

impl Default for RawDataPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

// ── Interactive loop ──────────────────────────────────────────────────────────

/// Offer raw rows until the user answers anything but `yes`.
///
/// Returns the number of windows printed.
pub fn display_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
    page_size: usize,
) -> Result<usize> {
    let mut pager = RawDataPager::new(page_size);
    let question = format!(
        "\nWould you like to see {} rows of raw data? Enter yes or no.\n",
        pager.page_size()
    );

    let mut shown = 0;
    while console.confirm(&question)? {
        let (start, window) = pager.next_window(table);
        debug!("raw rows {}..{} of {}", start, start + window.len(), table.len());
        console.print(&render_raw_rows(table, start, window))?;
        shown += 1;
    }

    Ok(shown)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
