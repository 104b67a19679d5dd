//! Comma-separated table codec for the recruitment tracker.
//!
//! Converts between CSV text and [`recruit_core::Row`]s. Pure synchronous; no
//! file or HTTP dependencies. Every cell is text; interpreting cells is the
//! job of [`recruit_core::record`].
//!
//! # Quick start
//!
//! ```
//! use recruit_core::Table;
//!
//! let rows = recruit_csv::parse("name,id\n\"Doe, Jane\",1\n").unwrap();
//! let text = recruit_csv::serialize(&rows, Table::Candidates.columns());
//! assert_eq!(text, "id,name\n1,\"Doe, Jane\"\n");
//! ```

pub mod error;
mod parse;
mod serialize;

use std::collections::BTreeSet;

pub use error::{Error, Result};
use recruit_core::Row;

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse `input` into rows keyed by its header line.
///
/// Empty input (or input of only blank lines) yields no rows, as does a
/// header with no data beneath it.
pub fn parse(input: &str) -> Result<Vec<Row>> {
  parse::to_rows(parse::records(input)?)
}

/// The header to write `rows` under.
///
/// Columns of `canonical` come first, in that order: all of them when there
/// are no rows, otherwise those present in at least one row. Any other
/// columns found in the rows follow, sorted by name.
pub fn columns_for(rows: &[Row], canonical: &[&str]) -> Vec<String> {
  if rows.is_empty() {
    return canonical.iter().map(|c| c.to_string()).collect();
  }

  let present: BTreeSet<&str> = rows.iter().flat_map(Row::columns).collect();
  let mut columns: Vec<String> = canonical
    .iter()
    .filter(|c| present.contains(*c))
    .map(|c| c.to_string())
    .collect();
  columns.extend(
    present
      .into_iter()
      .filter(|c| !canonical.contains(c))
      .map(str::to_owned),
  );
  columns
}

/// Render `rows` as CSV text with the header chosen by [`columns_for`].
pub fn serialize(rows: &[Row], canonical: &[&str]) -> String {
  serialize::serialize(rows, &columns_for(rows, canonical))
}

// ─── Round-trip test ─────────────────────────────────────────────────────────
