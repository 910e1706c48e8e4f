//! Text rendering for the four trip reports.
//!
//! Each `render_*` function turns a stats struct into report body lines;
//! [`render_report`] wraps a body with its heading, the elapsed-time notice
//! and the section separator.

use std::time::Duration;

use bikeshare_core::formatting::{format_elapsed, format_minutes, format_timedelta};
use bikeshare_data::stats::{StationStats, TimeStats, TripDurationStats, UserStats};
use unicode_width::UnicodeWidthStr;

/// Printed in place of any statistic that has no input values.
pub const NO_DATA: &str = "no data";

/// Width of the dashed separator between sections.
pub const SEPARATOR_WIDTH: usize = 40;

pub const TIME_STATS_TITLE: &str = "The Most Frequent Times of Travel";
pub const STATION_STATS_TITLE: &str = "The Most Popular Stations and Trip";
pub const TRIP_DURATION_TITLE: &str = "Trip Duration";
pub const USER_STATS_TITLE: &str = "User Stats";

/// The dashed line closing every section.
pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Wrap a report body with its heading and timing footer.
pub fn render_report(title: &str, body: &str, elapsed: Duration) -> String {
    format!(
        "\nCalculating {}...\n\n{}\nThis took {} seconds.\n{}\n",
        title,
        body,
        format_elapsed(elapsed),
        separator()
    )
}

pub fn render_time_stats(stats: &TimeStats) -> String {
    let hour = stats.hour.map(|h| h.to_string());
    let mut out = String::new();
    push_stat(&mut out, "most common month", stats.month_name());
    push_stat(&mut out, "most common day", stats.day_name());
    push_stat(&mut out, "most common hour", hour.as_deref());
    out
}

pub fn render_station_stats(stats: &StationStats) -> String {
    let trip = stats
        .trip
        .as_ref()
        .map(|(start, end)| format!("{} -> {}", start, end));
    let mut out = String::new();
    push_stat(&mut out, "most common start station", stats.start_station.as_deref());
    push_stat(&mut out, "most common end station", stats.end_station.as_deref());
    push_stat(&mut out, "most common trip", trip.as_deref());
    out
}

pub fn render_trip_duration_stats(stats: &TripDurationStats) -> String {
    let total = stats.total.map(format_timedelta);
    let mean = stats.mean_minutes.map(format_minutes);
    let mut out = String::new();
    push_stat(&mut out, "total travel time", total.as_deref());
    push_stat(&mut out, "mean travel time", mean.as_deref());
    out
}

/// User-type counts always; gender and birth-year sections only when the
/// city's table has those columns.
pub fn render_user_stats(stats: &UserStats) -> String {
    let mut out = String::new();

    out.push_str("User type counts\n");
    out.push_str(&render_breakdown(&stats.user_types));

    if let Some(genders) = &stats.genders {
        out.push_str("\nUser gender counts\n");
        out.push_str(&render_breakdown(genders));
    }

    if let Some(years) = &stats.birth_years {
        let fmt = |y: Option<i32>| y.map(|y| y.to_string());
        out.push('\n');
        push_stat(&mut out, "oldest user year", fmt(years.earliest).as_deref());
        push_stat(&mut out, "youngest user year", fmt(years.most_recent).as_deref());
        push_stat(
            &mut out,
            "most common user birth year",
            fmt(years.most_common).as_deref(),
        );
    }

    out
}

/// `value  count` lines with counts right-aligned in one column.
pub fn render_breakdown(counts: &[(String, usize)]) -> String {
    if counts.is_empty() {
        return format!("  {}\n", NO_DATA);
    }

    let label_width = counts.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|(_, n)| n.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, count) in counts {
        let pad = label_width - label.width();
        out.push_str(&format!(
            "  {}{}  {:>cw$}\n",
            label,
            " ".repeat(pad),
            count,
            cw = count_width
        ));
    }
    out
}

fn push_stat(out: &mut String, label: &str, value: Option<&str>) {
    out.push_str(&format!("{}: {}\n", label, value.unwrap_or(NO_DATA)));
}

// ── Tests ─────────────────────────────────────────────────────────────────────
