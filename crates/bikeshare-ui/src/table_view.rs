//! Plain-text table rendering for raw trip rows.
//!
//! Produces a width-aligned grid similar to a dataframe print: a header line,
//! then one line per row prefixed with its position in the source file.
//! Invalidated rows show `NaN` in every cell.

use unicode_width::UnicodeWidthStr;

use bikeshare_core::models::{TripRecord, TripTable};

/// Marker printed for missing cells.
pub const MISSING: &str = "NaN";

/// Gap between adjacent columns.
const COLUMN_GAP: &str = "  ";

/// Render `cells` as right-aligned columns under `headers`.
///
/// Rows shorter than `headers` are padded with empty cells. Column widths
/// are measured in terminal cells, so station names with non-ASCII
/// characters stay aligned.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.width());
            }
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(
            &mut out,
            (0..widths.len()).map(|i| row.get(i).map_or("", String::as_str)),
            &widths,
        );
    }
    out
}

/// Render the window of `table` starting at row `offset`.
///
/// Columns are the row position, every source column in header order, and
/// the derived `Month` and `Day` columns. An empty window renders a short
/// notice instead of a grid.
pub fn render_raw_rows(table: &TripTable, offset: usize, window: &[Option<TripRecord>]) -> String {
    if window.is_empty() {
        return format!(
            "No rows left to display ({} rows in total).\n",
            table.len()
        );
    }

    let mut headers: Vec<String> = Vec::with_capacity(table.headers().len() + 3);
    headers.push(String::new());
    headers.extend(table.headers().iter().cloned());
    headers.push("Month".to_string());
    headers.push("Day".to_string());

    let rows: Vec<Vec<String>> = window
        .iter()
        .enumerate()
        .map(|(i, row)| raw_row(offset + i, row.as_ref(), table.headers().len()))
        .collect();

    render_table(&headers, &rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn raw_row(position: usize, record: Option<&TripRecord>, columns: usize) -> Vec<String> {
    let mut cells = Vec::with_capacity(columns + 3);
    cells.push(position.to_string());

    match record {
        Some(rec) => {
            for i in 0..columns {
                let cell = rec.cells.get(i).map_or("", String::as_str);
                cells.push(if cell.is_empty() {
                    MISSING.to_string()
                } else {
                    cell.to_string()
                });
            }
            cells.push(rec.month.to_string());
            cells.push(rec.day.to_string());
        }
        None => {
            cells.extend(std::iter::repeat(MISSING.to_string()).take(columns + 2));
        }
    }

    cells
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let pad = widths[i].saturating_sub(cell.width());
        line.extend(std::iter::repeat(' ').take(pad));
        line.push_str(cell);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

// ── Tests ─────────────────────────────────────────────────────────────────────
