//! Output module
//!
//! CSV persistence for the scraped records and the run summary printed at
//! the end of a scrape.

mod csv_output;
mod stats;

pub use csv_output::write_csv;
pub use stats::{print_summary, RunSummary};
