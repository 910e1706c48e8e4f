//! Shared building blocks for the bikeshare explorer.
//!
//! Holds the error type, the city/month/day vocabularies and trip models,
//! command-line settings, and the formatting and timestamp helpers used by
//! the data, UI and runtime crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
