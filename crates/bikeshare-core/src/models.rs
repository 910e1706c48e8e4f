use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::error::{BikeshareError, Result};

// ── Vocabularies ──────────────────────────────────────────────────────────────

/// Cities accepted at the city prompt.
pub const CITIES: [&str; 3] = ["chicago", "new york city", "washington"];

/// Month vocabulary. Index 1 is January; `"febuary"` is the accepted spelling.
pub const MONTHS: [&str; 13] = [
    "all",
    "january",
    "febuary",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Day vocabulary. `DAYS[d + 1]` names weekday `d` (0 = Monday).
pub const DAYS: [&str; 8] = [
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Answer that keeps the pager and the session loop going.
pub const AFFIRMATIVE: &str = "yes";

// ── Column names ──────────────────────────────────────────────────────────────

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [START_TIME, END_TIME, START_STATION, END_STATION, USER_TYPE];

// ── Vocabulary lookups ────────────────────────────────────────────────────────

/// Month number (1–12) for a month name, `None` for `"all"` or unknown names.
pub fn month_index(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .filter(|&i| i > 0)
        .map(|i| i as u32)
}

/// Month name for a month number (1–12).
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTHS[month as usize]),
        _ => None,
    }
}

/// Weekday number (0 = Monday) for a day name, `None` for `"all"` or unknown
/// names.
pub fn day_index(name: &str) -> Option<u32> {
    DAYS.iter()
        .position(|d| *d == name)
        .filter(|&i| i > 0)
        .map(|i| (i - 1) as u32)
}

/// Day name for a weekday number (0 = Monday).
pub fn day_name(day: u32) -> Option<&'static str> {
    match day {
        0..=6 => Some(DAYS[day as usize + 1]),
        _ => None,
    }
}

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the three cities with a trip-log dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => CITIES[0],
            City::NewYorkCity => CITIES[1],
            City::Washington => CITIES[2],
        }
    }

    /// CSV file backing this city, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| BikeshareError::InvalidSelection {
                kind: "city",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Filter ────────────────────────────────────────────────────────────────────

/// A validated (city, month, day) selection.
///
/// `month` is 1–12 and `day` is 0 (Monday) – 6 (Sunday); `None` means no
/// restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub city: City,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl Filter {
    /// Build a filter from prompt answers. `"all"` disables a restriction.
    pub fn from_selection(city: &str, month: &str, day: &str) -> Result<Self> {
        let city = city.parse::<City>()?;

        let month = match month.to_lowercase().as_str() {
            "all" => None,
            other => Some(month_index(other).ok_or_else(|| {
                BikeshareError::InvalidSelection {
                    kind: "month",
                    value: month.to_string(),
                }
            })?),
        };

        let day = match day.to_lowercase().as_str() {
            "all" => None,
            other => Some(day_index(other).ok_or_else(|| {
                BikeshareError::InvalidSelection {
                    kind: "day",
                    value: day.to_string(),
                }
            })?),
        };

        Ok(Self { city, month, day })
    }

    /// `true` when a record with the given derived month/day stays valid.
    pub fn matches(&self, month: u32, day: u32) -> bool {
        self.month.map_or(true, |m| m == month) && self.day.map_or(true, |d| d == day)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {}",
            self.city,
            self.month.and_then(month_name).unwrap_or("all"),
            self.day.and_then(day_name).unwrap_or("all"),
        )
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// A single parsed row of a city CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Month of `start_time` (1–12).
    pub month: u32,
    /// Weekday of `start_time` (0 = Monday).
    pub day: u32,
    /// Source cells in header order, kept for raw display.
    pub cells: Vec<String>,
}

impl TripRecord {
    /// Hour of day (0–23) the trip started.
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// `end_time - start_time`.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Fill the derived `month` / `day` fields from `start_time`.
    pub fn derive_calendar_fields(&mut self) {
        self.month = self.start_time.month();
        self.day = self.start_time.weekday().num_days_from_monday();
    }
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// All rows of one city CSV, in source order.
///
/// A `None` row has been invalidated by a filter: every field is missing but
/// the row keeps its position, so row count and order always match the
/// source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    headers: Vec<String>,
    rows: Vec<Option<TripRecord>>,
}

impl TripTable {
    pub fn new(headers: Vec<String>, rows: Vec<Option<TripRecord>>) -> Self {
        Self { headers, rows }
    }

    /// Source column names in header order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Structural check on the source header.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Total row count, invalidated rows included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Option<TripRecord>] {
        &self.rows
    }

    /// Rows that survived filtering.
    pub fn valid_rows(&self) -> impl Iterator<Item = &TripRecord> {
        self.rows.iter().flatten()
    }

    pub fn valid_count(&self) -> usize {
        self.valid_rows().count()
    }

    /// Rows `[offset, offset + len)`, clamped to the table bounds.
    pub fn window(&self, offset: usize, len: usize) -> &[Option<TripRecord>] {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Invalidate every row for which `keep` returns `false`.
    ///
    /// Returns the number of rows invalidated by this call.
    pub fn invalidate_unless(&mut self, keep: impl Fn(&TripRecord) -> bool) -> usize {
        let mut invalidated = 0;
        for row in &mut self.rows {
            if row.as_ref().is_some_and(|r| !keep(r)) {
                *row = None;
                invalidated += 1;
            }
        }
        invalidated
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(y: i32, m: u32, d: u32, h: u32) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap();
        let mut rec = TripRecord {
            start_time: start,
            end_time: start + Duration::minutes(12),
            start_station: Some("A".to_string()),
            end_station: Some("B".to_string()),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
            month: 0,
            day: 0,
            cells: Vec::new(),
        };
        rec.derive_calendar_fields();
        rec
    }

    // ── vocabularies ─────────────────────────────────────────────────────────

    #[test]
    fn test_month_index_uses_vocabulary_spelling() {
        assert_eq!(month_index("january"), Some(1));
        assert_eq!(month_index("febuary"), Some(2));
        assert_eq!(month_index("february"), None);
        assert_eq!(month_index("december"), Some(12));
        assert_eq!(month_index("all"), None);
    }

    #[test]
    fn test_month_name_round_trips_index() {
        for m in 1..=12 {
            assert_eq!(month_index(month_name(m).unwrap()), Some(m));
        }
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_day_index_monday_is_zero() {
        assert_eq!(day_index("monday"), Some(0));
        assert_eq!(day_index("sunday"), Some(6));
        assert_eq!(day_index("all"), None);
        assert_eq!(day_index("funday"), None);
    }

    #[test]
    fn test_day_name_excludes_all() {
        assert_eq!(day_name(0), Some("monday"));
        assert_eq!(day_name(6), Some("sunday"));
        assert_eq!(day_name(7), None);
    }

    // ── City ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_city_parse_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("NEW YORK CITY".parse::<City>().unwrap(), City::NewYorkCity);
        assert!("boston".parse::<City>().is_err());
    }

    #[test]
    fn test_city_file_names() {
        assert_eq!(City::Chicago.file_name(), "chicago.csv");
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert_eq!(City::Washington.file_name(), "washington.csv");
    }

    // ── Filter ───────────────────────────────────────────────────────────────

    #[test]
    fn test_filter_all_all_has_no_restrictions() {
        let f = Filter::from_selection("washington", "all", "all").unwrap();
        assert_eq!(f.city, City::Washington);
        assert_eq!(f.month, None);
        assert_eq!(f.day, None);
        assert!(f.matches(7, 3));
    }

    #[test]
    fn test_filter_month_and_day() {
        let f = Filter::from_selection("chicago", "march", "friday").unwrap();
        assert_eq!(f.month, Some(3));
        assert_eq!(f.day, Some(4));
        assert!(f.matches(3, 4));
        assert!(!f.matches(3, 5));
        assert!(!f.matches(4, 4));
    }

    #[test]
    fn test_filter_rejects_unknown_values() {
        assert!(Filter::from_selection("chicago", "february", "all").is_err());
        assert!(Filter::from_selection("chicago", "all", "someday").is_err());
    }

    #[test]
    fn test_filter_display() {
        let f = Filter::from_selection("new york city", "febuary", "all").unwrap();
        assert_eq!(f.to_string(), "new york city / febuary / all");
    }

    // ── TripRecord ───────────────────────────────────────────────────────────

    #[test]
    fn test_record_derived_fields() {
        // 2017-01-02 was a Monday.
        let rec = record(2017, 1, 2, 9);
        assert_eq!(rec.month, 1);
        assert_eq!(rec.day, 0);
        assert_eq!(rec.start_hour(), 9);
        assert_eq!(rec.duration(), Duration::minutes(12));
    }

    // ── TripTable ────────────────────────────────────────────────────────────

    #[test]
    fn test_table_invalidate_preserves_len() {
        let rows = vec![
            Some(record(2017, 1, 2, 9)),
            Some(record(2017, 2, 3, 10)),
            Some(record(2017, 1, 4, 11)),
        ];
        let mut table = TripTable::new(vec!["Start Time".to_string()], rows);

        let invalidated = table.invalidate_unless(|r| r.month == 1);

        assert_eq!(invalidated, 1);
        assert_eq!(table.len(), 3);
        assert_eq!(table.valid_count(), 2);
        assert!(table.rows()[1].is_none());
    }

    #[test]
    fn test_table_window_clamps() {
        let rows = (0..7).map(|i| Some(record(2017, 1, 2, i))).collect();
        let table = TripTable::new(Vec::new(), rows);

        assert_eq!(table.window(0, 5).len(), 5);
        assert_eq!(table.window(5, 5).len(), 2);
        assert!(table.window(10, 5).is_empty());
    }

    #[test]
    fn test_table_has_column() {
        let table = TripTable::new(vec!["Gender".to_string()], Vec::new());
        assert!(table.has_column(GENDER));
        assert!(!table.has_column(BIRTH_YEAR));
        assert!(table.is_empty());
    }
}
