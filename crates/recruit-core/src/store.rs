//! The `TableStore` trait.
//!
//! Implemented by storage backends (`recruit-store-csv`,
//! `recruit-store-sqlite`). The workflow layer ([`crate::recruiter`]) and the
//! HTTP layer depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{row::Row, table::Table};

/// Whole-table record storage with per-table integer ids.
///
/// Every table is an ordered sequence of [`Row`]s. Reads return the full
/// table; writes replace it. Backends must serialise the read-modify-write
/// methods (`append`, `insert`, `insert_all`, `update_field`,
/// `update_fields`) so that two concurrent callers can never both compute the
/// same next id or lose each other's rows.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait TableStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every row of `table`, in stored order. A table that has never been
  /// written reads as empty.
  fn read(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  /// Replace the whole of `table` with `rows`.
  fn write(
    &self,
    table: Table,
    rows: Vec<Row>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Add `row` at the end of `table` exactly as given.
  fn append(
    &self,
    table: Table,
    row: Row,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// `1` for an empty or missing table (or one without ids), otherwise the
  /// largest id plus one. Not a reservation; use [`TableStore::insert`] to
  /// allocate. Fails once the table holds [`crate::row::MAX_ID`].
  fn next_id(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Assign the next id to `row` and append it, as one step. Returns the id.
  fn insert(
    &self,
    table: Table,
    row: Row,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Assign consecutive ids to `rows` and append them all in one write.
  /// Nothing is written if the block would run past [`crate::row::MAX_ID`].
  fn insert_all(
    &self,
    table: Table,
    rows: Vec<Row>,
  ) -> impl Future<Output = Result<Vec<u64>, Self::Error>> + Send + '_;

  /// Overwrite `field` on every row whose id is `id`. Returns how many rows
  /// matched; no other field or row is touched.
  fn update_field(
    &self,
    table: Table,
    id: u64,
    field: &'static str,
    value: String,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Like [`TableStore::update_field`] for several fields at once. Either
  /// every field is written or none is.
  fn update_fields(
    &self,
    table: Table,
    id: u64,
    fields: Vec<(&'static str, String)>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
