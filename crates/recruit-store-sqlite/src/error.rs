//! Error type for `recruit-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("no ids left in the {table} table")]
  IdsExhausted { table: String },

  #[error("id {0} is too large to store")]
  IdOutOfRange(u64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
