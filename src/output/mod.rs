//! Output module for the record table and run summary
//!
//! This module handles:
//! - Writing the accumulated records as a CSV table
//! - Computing and writing the aggregate run summary

mod summary;
mod table;

pub use summary::{summarize, write_summary, RunSummary, TOP_GENRES_LIMIT};
pub use table::{write_table, TABLE_COLUMNS};
