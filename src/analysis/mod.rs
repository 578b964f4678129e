//! Corpus statistics.
//!
//! Aggregation of scanned documents into frequency tables and the sorted
//! views used by the reports.

pub mod aggregator;

pub use aggregator::*;
