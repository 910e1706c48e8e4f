//! The interactive explore-and-restart loop.
//!
//! One iteration asks for a city, month and day, loads the filtered table,
//! prints the four reports, offers raw rows, and asks whether to restart.
//! The table lives only for its iteration.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use bikeshare_core::error::Result;
use bikeshare_core::models::{Filter, TripTable, CITIES, DAYS, MONTHS};
use bikeshare_core::settings::Settings;
use bikeshare_data::loader::load_data;
use bikeshare_data::stats::{station_stats, time_stats, trip_duration_stats, user_stats};
use bikeshare_ui::report_view::{
    render_report, render_station_stats, render_time_stats, render_trip_duration_stats,
    render_user_stats, separator, STATION_STATS_TITLE, TIME_STATS_TITLE, TRIP_DURATION_TITLE,
    USER_STATS_TITLE,
};
use tracing::{debug, info};

use crate::pager::{display_raw_data, DEFAULT_PAGE_SIZE};
use crate::prompt::Console;

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";

// ── Public types ──────────────────────────────────────────────────────────────

/// Where the session loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Another iteration will run.
    Running,
    /// The user declined to restart.
    Stopped,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Drives the prompt → load → report → page → restart cycle.
pub struct Session<R, W> {
    console: Console<R, W>,
    data_dir: PathBuf,
    page_size: usize,
    state: SessionState,
    iterations: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            console,
            data_dir: data_dir.into(),
            page_size: DEFAULT_PAGE_SIZE,
            state: SessionState::Running,
            iterations: 0,
        }
    }

    pub fn from_settings(console: Console<R, W>, settings: &Settings) -> Self {
        Self::new(console, settings.data_dir.clone()).with_page_size(settings.page_len())
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Completed iterations so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run iterations until the user declines to restart.
    ///
    /// A missing CSV, a malformed timestamp or closed input ends the loop
    /// with the error.
    pub fn run(&mut self) -> Result<()> {
        while self.state == SessionState::Running {
            self.run_iteration()?;
        }
        info!("Session stopped after {} iteration(s)", self.iterations);
        Ok(())
    }

    /// One full pass through the cycle, ending with the restart question.
    pub fn run_iteration(&mut self) -> Result<()> {
        let filter = self.get_filters()?;
        info!("Exploring {}", filter);

        let table = load_data(&self.data_dir, &filter)?;
        self.print_reports(&table)?;
        display_raw_data(&mut self.console, &table, self.page_size)?;

        self.iterations += 1;
        self.state = if self.console.confirm(RESTART_QUESTION)? {
            SessionState::Running
        } else {
            SessionState::Stopped
        };
        Ok(())
    }

    /// Greet, then ask for city, month and day.
    pub fn get_filters(&mut self) -> Result<Filter> {
        self.console.println(GREETING)?;
        let city = self.console.get_input("select city", &CITIES)?;
        let month = self.console.get_input("select month", &MONTHS)?;
        let day = self.console.get_input("select day", &DAYS)?;
        self.console.println(&separator())?;
        Filter::from_selection(&city, &month, &day)
    }

    /// Print the time, station, trip-duration and user reports in order.
    pub fn print_reports(&mut self, table: &TripTable) -> Result<()> {
        self.print_timed(TIME_STATS_TITLE, || render_time_stats(&time_stats(table)))?;
        self.print_timed(STATION_STATS_TITLE, || {
            render_station_stats(&station_stats(table))
        })?;
        self.print_timed(TRIP_DURATION_TITLE, || {
            let stats = trip_duration_stats(table);
            debug!("trip duration over {} trip(s)", stats.trips);
            render_trip_duration_stats(&stats)
        })?;
        self.print_timed(USER_STATS_TITLE, || render_user_stats(&user_stats(table)))
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn print_timed(&mut self, title: &str, body: impl FnOnce() -> String) -> Result<()> {
        let start = Instant::now();
        let body = body();
        let elapsed = start.elapsed();
        self.console.print(&render_report(title, &body, elapsed))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
