//! Interactive runtime for the bikeshare explorer.
//!
//! Owns the console prompts, the raw-data pager and the session loop that
//! ties the data and UI layers together.

pub mod pager;
pub mod prompt;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
