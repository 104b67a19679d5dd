//! Flat-file backend for the recruitment tracker.
//!
//! One `<table>.csv` per table in a data directory, read and written whole
//! through [`recruit_csv`]. All file access goes through [`tokio::fs`].

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::CsvStore;

#[cfg(test)]
mod tests;
