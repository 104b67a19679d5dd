//! Error types for `recruit-core`.

use thiserror::Error;

use crate::table::Table;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{table} record not found: {id}")]
  NotFound { table: Table, id: u64 },

  #[error("unknown table: {0:?}")]
  UnknownTable(String),

  #[error("{table} row is missing column {column:?}")]
  MissingColumn { table: Table, column: &'static str },

  #[error("invalid value {value:?} in column {column:?}")]
  InvalidValue { column: String, value: String },

  #[error("validation error: {0}")]
  Validation(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }

  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
