use chrono::Duration;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// Format a signed duration as `"<days> days HH:MM:SS"`.
///
/// Sub-second remainders are shown as six fractional digits. Negative
/// durations borrow a whole day and show the positive clock part with a `+`,
/// so `-1s` reads `"-1 days +23:59:59"`.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_timedelta;
/// use chrono::Duration;
///
/// assert_eq!(format_timedelta(Duration::seconds(93_784)), "1 days 02:03:04");
/// assert_eq!(format_timedelta(Duration::zero()), "0 days 00:00:00");
/// assert_eq!(format_timedelta(Duration::milliseconds(1_500)), "0 days 00:00:01.500000");
/// assert_eq!(format_timedelta(Duration::seconds(-1)), "-1 days +23:59:59");
/// ```
pub fn format_timedelta(delta: Duration) -> String {
    let total_micros = delta
        .num_microseconds()
        .unwrap_or_else(|| delta.num_seconds().saturating_mul(MICROS_PER_SECOND));

    let days = total_micros.div_euclid(MICROS_PER_DAY);
    let rem = total_micros.rem_euclid(MICROS_PER_DAY);

    let secs = rem / MICROS_PER_SECOND;
    let micros = rem % MICROS_PER_SECOND;
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    let clock = if micros == 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}.{:06}", hours, mins, secs, micros)
    };

    if days < 0 {
        format!("{} days +{}", days, clock)
    } else {
        format!("{} days {}", days, clock)
    }
}

/// Convert a duration to fractional minutes.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::duration_minutes;
/// use chrono::Duration;
///
/// assert!((duration_minutes(Duration::seconds(90)) - 1.5).abs() < 1e-9);
/// ```
pub fn duration_minutes(delta: Duration) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / (60.0 * MICROS_PER_SECOND as f64),
        None => delta.num_seconds() as f64 / 60.0,
    }
}

/// Format fractional minutes with two decimals and the unit.
///
/// ```
/// use bikeshare_core::formatting::format_minutes;
///
/// assert_eq!(format_minutes(15.80694), "15.81 minutes");
/// ```
pub fn format_minutes(minutes: f64) -> String {
    format!("{:.2} minutes", minutes)
}

/// Format a wall-clock measurement in seconds, as printed after each report.
pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    format!("{:.6}", elapsed.as_secs_f64())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
