//! Handlers for stored attachments and table downloads.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/files/{name}` | Stored upload by exact name; 404 if absent |
//! | `GET`  | `/download/{table}` | Whole table as CSV; 404 for unknown tables |

use axum::{
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use recruit_core::{Table, store::TableStore};

use crate::{
  AppState,
  attachments::content_type,
  error::{ApiError, OrNotice as _},
};

/// A file download response.
pub(crate) fn attachment_response(name: &str, content_type: &str, body: Vec<u8>) -> Response {
  (
    [
      (header::CONTENT_TYPE, content_type.to_owned()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{name}\""),
      ),
    ],
    body,
  )
    .into_response()
}

/// Load stored file `name`, answering 404 with `missing` if it is not there.
pub(crate) async fn stored_file<S>(
  state: &AppState<S>,
  name: &str,
  missing: &str,
) -> Result<Response, ApiError> {
  let bytes = state
    .attachments
    .read(name)
    .await
    .map_err(|e| ApiError::store("Error reading file!", e))?
    .ok_or_else(|| ApiError::NotFound(missing.to_owned()))?;
  Ok(attachment_response(name, content_type(name), bytes))
}

// ─── Attachments ─────────────────────────────────────────────────────────────

/// `GET /files/{name}`
pub async fn attachment<S>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Response, ApiError>
where
  S: TableStore,
{
  stored_file(&state, &name, "File not found!").await
}

// ─── Download ────────────────────────────────────────────────────────────────

/// `GET /download/{table}` — also accepts a trailing `.csv`.
pub async fn download<S>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Response, ApiError>
where
  S: TableStore,
{
  let name = name.strip_suffix(".csv").unwrap_or(&name);
  let table =
    Table::parse(name).map_err(|_| ApiError::NotFound("Invalid CSV file!".into()))?;

  let rows = state
    .recruiter
    .export(table)
    .await
    .or_notice("Error reading CSV file!")?;
  let text = recruit_csv::serialize(&rows, table.columns());

  Ok(attachment_response(
    &format!("{table}.csv"),
    "text/csv; charset=utf-8",
    text.into_bytes(),
  ))
}
