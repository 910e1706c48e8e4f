//! The four descriptive reports computed over a filtered [`TripTable`].
//!
//! Every statistic is optional: a table whose rows were all invalidated (or
//! whose relevant cells are all empty) yields `None`, which the UI renders as
//! "no data".

use bikeshare_core::formatting::duration_minutes;
use bikeshare_core::models::{day_name, month_name, TripTable, BIRTH_YEAR, GENDER};
use chrono::Duration;

use crate::aggregator::ValueCounts;

// ── Time stats ────────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Most common month (1–12).
    pub month: Option<u32>,
    /// Most common weekday (0 = Monday).
    pub day: Option<u32>,
    /// Most common start hour, reported one higher than the clock hour
    /// (range 1–24).
    pub hour: Option<u32>,
}

impl TimeStats {
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.and_then(month_name)
    }

    pub fn day_name(&self) -> Option<&'static str> {
        self.day.and_then(day_name)
    }
}

pub fn time_stats(table: &TripTable) -> TimeStats {
    let months: ValueCounts<u32> = table.valid_rows().map(|r| r.month).collect();
    let days: ValueCounts<u32> = table.valid_rows().map(|r| r.day).collect();
    let hours: ValueCounts<u32> = table.valid_rows().map(|r| r.start_hour()).collect();

    TimeStats {
        month: months.most_common().map(|(m, _)| *m),
        day: days.most_common().map(|(d, _)| *d),
        // TODO: confirm whether the +1 on the start hour is intended; it turns
        // a 17:xx peak into "18".
        hour: hours.most_common().map(|(h, _)| h + 1),
    }
}

// ── Station stats ─────────────────────────────────────────────────────────────

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Most frequent `(start, end)` pair; rows missing either side are skipped.
    pub trip: Option<(String, String)>,
}

pub fn station_stats(table: &TripTable) -> StationStats {
    let starts: ValueCounts<&str> = table
        .valid_rows()
        .filter_map(|r| r.start_station.as_deref())
        .collect();
    let ends: ValueCounts<&str> = table
        .valid_rows()
        .filter_map(|r| r.end_station.as_deref())
        .collect();
    let trips: ValueCounts<(&str, &str)> = table
        .valid_rows()
        .filter_map(|r| Some((r.start_station.as_deref()?, r.end_station.as_deref()?)))
        .collect();

    StationStats {
        start_station: starts.most_common().map(|(s, _)| s.to_string()),
        end_station: ends.most_common().map(|(s, _)| s.to_string()),
        trip: trips
            .most_common()
            .map(|((s, e), _)| (s.to_string(), e.to_string())),
    }
}

// ── Trip duration stats ───────────────────────────────────────────────────────

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDurationStats {
    /// Number of trips contributing to the figures.
    pub trips: usize,
    pub total: Option<Duration>,
    pub mean_minutes: Option<f64>,
}

pub fn trip_duration_stats(table: &TripTable) -> TripDurationStats {
    let (trips, total) = table
        .valid_rows()
        .fold((0usize, Duration::zero()), |(n, acc), r| (n + 1, acc + r.duration()));

    if trips == 0 {
        return TripDurationStats {
            trips,
            total: None,
            mean_minutes: None,
        };
    }

    TripDurationStats {
        trips,
        total: Some(total),
        mean_minutes: Some(duration_minutes(total) / trips as f64),
    }
}

// ── User stats ────────────────────────────────────────────────────────────────

/// Birth-year figures, present only for cities whose CSV has the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    /// Earliest year, i.e. the oldest user.
    pub earliest: Option<i32>,
    /// Most recent year, i.e. the youngest user.
    pub most_recent: Option<i32>,
    pub most_common: Option<i32>,
}

/// Counts describing the riders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// `(user type, count)`, highest count first.
    pub user_types: Vec<(String, usize)>,
    /// `None` when the table has no Gender column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the table has no Birth Year column.
    pub birth_years: Option<BirthYearStats>,
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let user_types: ValueCounts<&str> = table
        .valid_rows()
        .filter_map(|r| r.user_type.as_deref())
        .collect();

    let genders = table.has_column(GENDER).then(|| {
        let counts: ValueCounts<&str> = table
            .valid_rows()
            .filter_map(|r| r.gender.as_deref())
            .collect();
        owned_breakdown(&counts)
    });

    let birth_years = table.has_column(BIRTH_YEAR).then(|| {
        let years: ValueCounts<i32> = table.valid_rows().filter_map(|r| r.birth_year).collect();
        BirthYearStats {
            earliest: table.valid_rows().filter_map(|r| r.birth_year).min(),
            most_recent: table.valid_rows().filter_map(|r| r.birth_year).max(),
            most_common: years.most_common().map(|(y, _)| *y),
        }
    });

    UserStats {
        user_types: owned_breakdown(&user_types),
        genders,
        birth_years,
    }
}

fn owned_breakdown(counts: &ValueCounts<&str>) -> Vec<(String, usize)> {
    counts
        .sorted()
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::apply_filter;
    use crate::reader::read_trips;
    use bikeshare_core::models::{Filter, DAYS, MONTHS};
    use std::path::Path;

    const CHICAGO: &str = "\
Start Time,End Time,Start Station,End Station,User Type,Gender,Birth Year
2017-01-02 08:15:00,2017-01-02 08:25:00,Clark St,State St,Subscriber,Male,1985.0
2017-01-02 08:45:00,2017-01-02 09:05:00,Clark St,Lake St,Subscriber,Female,1990.0
2017-01-09 17:00:00,2017-01-09 17:30:00,Lake St,Clark St,Customer,,
2017-02-07 08:00:00,2017-02-07 08:10:00,Clark St,State St,Subscriber,Male,1990.0
2017-03-03 23:00:00,2017-03-03 23:30:00,State St,,Customer,Female,1962.0
";

    const WASHINGTON: &str = "\
Start Time,End Time,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,14th & Belmont St NW,15th & K St NW,Subscriber
2017-06-22 07:00:00,2017-06-22 07:30:00,15th & K St NW,14th & Belmont St NW,Customer
";

    fn table(csv: &str) -> TripTable {
        read_trips(csv.as_bytes(), Path::new("test.csv")).unwrap()
    }

    fn filtered(csv: &str, month: &str, day: &str) -> TripTable {
        let mut t = table(csv);
        apply_filter(&mut t, &Filter::from_selection("chicago", month, day).unwrap());
        t
    }

    // ── time_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_time_stats_most_common_values() {
        let stats = time_stats(&table(CHICAGO));

        assert_eq!(stats.month, Some(1));
        assert_eq!(stats.month_name(), Some("january"));
        // Jan 2 and Jan 9 2017 were Mondays.
        assert_eq!(stats.day, Some(0));
        assert_eq!(stats.day_name(), Some("monday"));
        // Hour 8 is the mode; reported with the +1 offset.
        assert_eq!(stats.hour, Some(9));
    }

    #[test]
    fn test_time_stats_names_come_from_vocabularies() {
        let stats = time_stats(&table(CHICAGO));

        assert!(MONTHS[1..].contains(&stats.month_name().unwrap()));
        assert!(DAYS[1..].contains(&stats.day_name().unwrap()));
        assert!((1..=24).contains(&stats.hour.unwrap()));
    }

    #[test]
    fn test_time_stats_ignores_invalidated_rows() {
        let stats = time_stats(&filtered(CHICAGO, "march", "all"));

        assert_eq!(stats.month_name(), Some("march"));
        assert_eq!(stats.day_name(), Some("friday"));
        assert_eq!(stats.hour, Some(24));
    }

    #[test]
    fn test_time_stats_no_data() {
        let stats = time_stats(&filtered(CHICAGO, "december", "all"));
        assert_eq!(
            stats,
            TimeStats {
                month: None,
                day: None,
                hour: None
            }
        );
        assert_eq!(stats.month_name(), None);
    }

    // ── station_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_station_stats_most_common() {
        let stats = station_stats(&table(CHICAGO));

        assert_eq!(stats.start_station.as_deref(), Some("Clark St"));
        assert_eq!(stats.end_station.as_deref(), Some("State St"));
        assert_eq!(
            stats.trip,
            Some(("Clark St".to_string(), "State St".to_string()))
        );
    }

    #[test]
    fn test_station_stats_tie_goes_to_first_seen() {
        let stats = station_stats(&table(WASHINGTON));

        assert_eq!(stats.start_station.as_deref(), Some("14th & Belmont St NW"));
        assert_eq!(stats.end_station.as_deref(), Some("15th & K St NW"));
    }

    #[test]
    fn test_station_stats_pair_skips_missing_end() {
        // Only March row survives and its End Station is empty.
        let stats = station_stats(&filtered(CHICAGO, "march", "all"));

        assert_eq!(stats.start_station.as_deref(), Some("State St"));
        assert_eq!(stats.end_station, None);
        assert_eq!(stats.trip, None);
    }

    // ── trip_duration_stats ───────────────────────────────────────────────────

    #[test]
    fn test_trip_duration_totals() {
        let stats = trip_duration_stats(&table(CHICAGO));

        // 10 + 20 + 30 + 10 + 30 minutes.
        assert_eq!(stats.trips, 5);
        assert_eq!(stats.total, Some(Duration::minutes(100)));
        assert!((stats.mean_minutes.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_trip_duration_fractional_mean() {
        let stats = trip_duration_stats(&table(WASHINGTON));

        // 8m09s + 30m = 38m09s over two trips.
        assert_eq!(stats.total, Some(Duration::seconds(38 * 60 + 9)));
        assert!((stats.mean_minutes.unwrap() - 19.075).abs() < 1e-9);
    }

    #[test]
    fn test_trip_duration_no_data() {
        let stats = trip_duration_stats(&filtered(CHICAGO, "all", "sunday"));
        assert_eq!(stats.trips, 0);
        assert_eq!(stats.total, None);
        assert_eq!(stats.mean_minutes, None);
    }

    // ── user_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_user_stats_breakdowns() {
        let stats = user_stats(&table(CHICAGO));

        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 2)]
        );
        assert_eq!(
            stats.genders,
            Some(vec![("Male".to_string(), 2), ("Female".to_string(), 2)])
        );
    }

    #[test]
    fn test_user_stats_birth_years() {
        let stats = user_stats(&table(CHICAGO));

        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: Some(1962),
                most_recent: Some(1990),
                most_common: Some(1990),
            })
        );
    }

    #[test]
    fn test_user_stats_without_optional_columns() {
        let stats = user_stats(&table(WASHINGTON));

        assert_eq!(stats.user_types.len(), 2);
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn test_user_stats_no_data_keeps_sections() {
        let stats = user_stats(&filtered(CHICAGO, "june", "all"));

        assert!(stats.user_types.is_empty());
        assert_eq!(stats.genders, Some(Vec::new()));
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: None,
                most_recent: None,
                most_common: None,
            })
        );
    }

    // ── idempotence ───────────────────────────────────────────────────────────

    #[test]
    fn test_reports_are_repeatable() {
        let a = filtered(CHICAGO, "january", "all");
        let b = filtered(CHICAGO, "january", "all");

        assert_eq!(time_stats(&a), time_stats(&b));
        assert_eq!(station_stats(&a), station_stats(&b));
        assert_eq!(trip_duration_stats(&a), trip_duration_stats(&b));
        assert_eq!(user_stats(&a), user_stats(&b));
    }
}
