//! Error types for the recruit-csv codec.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("line {line}: quoted field is never closed")]
  UnterminatedQuote { line: usize },

  #[error("line {line}: unexpected character after closing quote")]
  TrailingAfterQuote { line: usize },

  #[error("line {line}: expected at most {expected} fields, found {found}")]
  RaggedRow {
    line:     usize,
    expected: usize,
    found:    usize,
  },

  #[error("header names column {0:?} more than once")]
  DuplicateColumn(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
