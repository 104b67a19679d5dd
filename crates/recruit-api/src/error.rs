//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body is `{"error": "<notice>"}`, where the notice is a short
//! message meant for the person using the form.

use axum::{
  Json,
  extract::{multipart::MultipartRejection, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use recruit_core::Table;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{notice}: {source}")]
  Store {
    notice: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn store(notice: impl Into<String>, e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store {
      notice: notice.into(),
      source: Box::new(e),
    }
  }
}

fn not_found_notice(table: Table) -> String {
  match table {
    Table::Requisitions => "Requisition not found!".into(),
    Table::Candidates => "Candidate not found!".into(),
    Table::Offers => "Candidate or offer not found!".into(),
    other => format!("{other} record not found!"),
  }
}

impl From<recruit_core::Error> for ApiError {
  fn from(e: recruit_core::Error) -> Self {
    use recruit_core::Error as E;
    match e {
      E::NotFound { table, .. } => Self::NotFound(not_found_notice(table)),
      E::UnknownTable(name) => Self::NotFound(format!("Unknown table {name:?}!")),
      E::Validation(msg) => Self::BadRequest(msg),
      E::InvalidValue { .. } => Self::BadRequest(e.to_string()),
      E::MissingColumn { .. } | E::Storage(_) => Self::store("Internal error!", e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl From<MultipartRejection> for ApiError {
  fn from(r: MultipartRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store { notice, source } => {
        tracing::error!(error = %source, "{notice}");
        (StatusCode::INTERNAL_SERVER_ERROR, notice.clone())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// Attach the operation's failure notice to a workflow result.
///
/// Not-found and validation errors keep their own notices; anything else is
/// reported under `notice`.
pub trait OrNotice<T> {
  fn or_notice(self, notice: &str) -> Result<T, ApiError>;
}

impl<T> OrNotice<T> for Result<T, recruit_core::Error> {
  fn or_notice(self, notice: &str) -> Result<T, ApiError> {
    self.map_err(|e| match ApiError::from(e) {
      ApiError::Store { source, .. } => ApiError::Store {
        notice: notice.to_owned(),
        source,
      },
      other => other,
    })
  }
}
