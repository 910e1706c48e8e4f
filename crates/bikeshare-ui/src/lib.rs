//! Text presentation layer for the bikeshare explorer.
//!
//! Renders report sections and raw trip rows as plain, width-aligned text
//! ready to be written to the console.

pub mod report_view;
pub mod table_view;

pub use bikeshare_core as core;
