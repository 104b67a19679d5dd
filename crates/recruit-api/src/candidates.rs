//! Handlers for candidate endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/requisitions/{id}/candidates` | Multipart form, optional `resume` file; 201 |
//! | `POST` | `/candidates` | Same form, direct hire (no requisition); 201 |
//! | `POST` | `/candidates/bulk-upload` | Multipart `csv_file`, optional `attachments` files and `requisition_id` |
//! | `GET`  | `/candidates/{id}` | 404 if not found |
//! | `GET`  | `/candidates/{id}/resume` | The stored resume as a download |

use std::collections::{HashMap, HashSet};

use axum::{
  Json,
  extract::{Multipart, Path, State, multipart::MultipartRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use recruit_core::{
  import::candidates_from_rows,
  record::{Candidate, DIRECT_HIRE, NewCandidate},
  store::TableStore,
};
use tracing::{info, warn};

use crate::{
  AppState, Saved,
  error::{ApiError, OrNotice as _},
  files::stored_file,
  form::{Form, Upload},
};

const ADD_FAILED: &str = "Error adding candidate!";

fn new_candidate(form: &Form) -> NewCandidate {
  NewCandidate {
    name:            form.text("name").trim().to_owned(),
    email:           form.text("email").trim().to_owned(),
    phone:           form.text("phone"),
    experience:      form.text("experience"),
    skills:          form.text("skills"),
    current_salary:  form.optional("current_salary"),
    expected_salary: form.optional("expected_salary"),
    notice_period:   form.optional("notice_period"),
  }
}

/// Store `upload`, if any. A rejected file name is skipped, not an error.
async fn save_upload<S>(
  state: &AppState<S>,
  upload: Option<&Upload>,
) -> Result<Option<String>, ApiError> {
  match upload {
    None => Ok(None),
    Some(u) => state
      .attachments
      .save(&u.file_name, &u.bytes)
      .await
      .map_err(|e| ApiError::store("Error saving file!", e)),
  }
}

/// Remove uploads that ended up unreferenced.
async fn discard<'a, S>(state: &AppState<S>, names: impl IntoIterator<Item = &'a String>) {
  for name in names {
    if let Err(e) = state.attachments.remove(name).await {
      warn!(stored = %name, error = %e, "failed to remove unused upload");
    }
  }
}

async fn add<S>(
  state: &AppState<S>,
  requisition_id: u64,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
  S: TableStore,
{
  let form = Form::read(multipart).await?;
  let input = new_candidate(&form);
  input.validate()?;

  let resume = save_upload(state, form.file("resume")).await?;
  let candidate = state
    .recruiter
    .add_candidate(requisition_id, input, resume)
    .await
    .or_notice(ADD_FAILED)?;

  Ok((
    StatusCode::CREATED,
    Json(Saved::new("Candidate added successfully!", candidate)),
  )
    .into_response())
}

/// `POST /requisitions/{id}/candidates`
pub async fn add_to_requisition<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
  S: TableStore,
{
  add(&state, id, multipart).await
}

/// `POST /candidates`
pub async fn add_direct_hire<S>(
  State(state): State<AppState<S>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
  S: TableStore,
{
  add(&state, DIRECT_HIRE, multipart).await
}

/// `POST /candidates/bulk-upload`
///
/// Each sheet row may name a resume in its `resume_filename` column; it is
/// matched against the file names of the `attachments` parts. Rows whose
/// resume was not uploaded are created without one.
pub async fn bulk_upload<S>(
  State(state): State<AppState<S>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Saved<Vec<Candidate>>>), ApiError>
where
  S: TableStore,
{
  let form = Form::read(multipart).await?;

  let sheet = form
    .file("csv_file")
    .ok_or_else(|| ApiError::BadRequest("No file selected!".into()))?;
  if !sheet.file_name.to_ascii_lowercase().ends_with(".csv") {
    return Err(ApiError::BadRequest("Please select a valid CSV file!".into()));
  }

  let text = std::str::from_utf8(&sheet.bytes)
    .map_err(|_| ApiError::BadRequest("Error processing CSV file! Not valid UTF-8.".into()))?;
  let rows = recruit_csv::parse(text)
    .map_err(|e| ApiError::BadRequest(format!("Error processing CSV file! {e}")))?;
  let default_requisition = form.parse_or("requisition_id", DIRECT_HIRE)?;
  let imported = candidates_from_rows(&rows, Some(default_requisition))
    .map_err(|e| ApiError::BadRequest(format!("Error processing CSV file! {e}")))?;

  // Only files some row asks for are kept.
  let wanted: HashSet<&str> = imported
    .iter()
    .filter_map(|ic| ic.resume_original.as_deref())
    .collect();
  let mut resumes = HashMap::new();
  for upload in form.files("attachments") {
    if !wanted.contains(upload.file_name.as_str()) || resumes.contains_key(&upload.file_name) {
      continue;
    }
    match save_upload(&state, Some(upload)).await {
      Ok(Some(stored)) => {
        resumes.insert(upload.file_name.clone(), stored);
      }
      Ok(None) => {}
      Err(e) => {
        discard(&state, resumes.values()).await;
        return Err(e);
      }
    }
  }

  let result = state.recruiter.import_candidates(imported, &resumes).await;
  if result.is_err() {
    discard(&state, resumes.values()).await;
  }
  let created = result.or_notice("Error uploading candidates!")?;
  info!(count = created.len(), resumes = resumes.len(), "bulk upload complete");

  Ok((
    StatusCode::CREATED,
    Json(Saved::new(
      format!("{} candidates uploaded successfully!", created.len()),
      created,
    )),
  ))
}

/// `GET /candidates/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<Candidate>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.candidate(id).await?))
}

/// `GET /candidates/{id}/resume`
pub async fn resume<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Response, ApiError>
where
  S: TableStore,
{
  let candidate = state.recruiter.candidate(id).await?;
  let name = candidate
    .resume_filename
    .ok_or_else(|| ApiError::NotFound("No resume found for this candidate!".into()))?;
  stored_file(&state, &name, "Resume file not found!").await
}
