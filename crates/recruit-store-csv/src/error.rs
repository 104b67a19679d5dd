//! Error type for `recruit-store-csv`.

use std::path::PathBuf;

use recruit_core::Table;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed {table} table: {source}")]
  Csv {
    table:  Table,
    #[source]
    source: recruit_csv::Error,
  },

  #[error("{path} is not valid UTF-8")]
  Encoding { path: PathBuf },

  #[error("no ids left in the {table} table")]
  IdsExhausted { table: Table },
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
