//! Handlers for onboarding and resignation endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/onboarding/{id}` | Candidate and latest checklist, if any |
//! | `POST` | `/onboarding` | JSON [`NewOnboarding`]; moves the candidate to `Onboarded` |
//! | `GET`  | `/resignation/{id}` | Employee and latest resignation, if any |
//! | `POST` | `/resignation` | Multipart form with optional letters; moves the employee to `Resigned` |

use axum::{
  Json,
  extract::{
    Multipart, Path, State,
    multipart::MultipartRejection,
    rejection::JsonRejection,
  },
  http::StatusCode,
};
use recruit_core::{
  event::{
    NewOnboarding, NewResignation, Onboarding, Resignation, ResignationDocuments,
    Settlement,
  },
  recruiter::CandidateSnapshot,
  store::TableStore,
};

use crate::{
  AppState, Saved,
  error::{ApiError, OrNotice as _},
  form::Form,
};

// ─── Onboarding ──────────────────────────────────────────────────────────────

/// `GET /onboarding/{id}`
pub async fn onboarding<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<CandidateSnapshot<Onboarding>>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.onboarding(id).await?))
}

/// `POST /onboarding`
pub async fn submit_onboarding<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<NewOnboarding>, JsonRejection>,
) -> Result<(StatusCode, Json<Saved<Onboarding>>), ApiError>
where
  S: TableStore,
{
  let Json(input) = body?;
  let onboarding = state
    .recruiter
    .submit_onboarding(input)
    .await
    .or_notice("Error updating onboarding!")?;
  Ok((
    StatusCode::CREATED,
    Json(Saved::new("Onboarding updated successfully!", onboarding)),
  ))
}

// ─── Resignation ─────────────────────────────────────────────────────────────

/// `GET /resignation/{id}`
pub async fn resignation_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<CandidateSnapshot<Resignation>>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.resignation_form(id).await?))
}

fn new_resignation(form: &Form) -> Result<NewResignation, ApiError> {
  Ok(NewResignation {
    candidate_id:             form.parse("candidate_id")?,
    resignation_date:         form.parse("resignation_date")?,
    last_working_date:        form.parse("last_working_date")?,
    reason:                   form.text("reason"),
    exit_interview_completed: form.flag("exit_interview_completed"),
    laptop_returned:          form.flag("laptop_returned"),
    id_card_returned:         form.flag("id_card_returned"),
    clearance_completed:      form.flag("clearance_completed"),
    final_settlement:         form.parse_or("final_settlement", Settlement::Pending)?,
    comments:                 form.text("comments"),
    hr_representative:        form.text("hr_representative").trim().to_owned(),
  })
}

/// `POST /resignation`
///
/// Letters go in the `resignation_letter`, `acceptance_letter` and
/// `relieving_letter` file parts.
pub async fn submit_resignation<S>(
  State(state): State<AppState<S>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Saved<Resignation>>), ApiError>
where
  S: TableStore,
{
  let form = Form::read(multipart).await?;
  let input = new_resignation(&form)?;
  input.validate()?;
  state.recruiter.candidate(input.candidate_id).await?;

  let mut documents = ResignationDocuments::default();
  for (field, slot) in [
    ("resignation_letter", &mut documents.resignation_letter),
    ("acceptance_letter", &mut documents.acceptance_letter),
    ("relieving_letter", &mut documents.relieving_letter),
  ] {
    if let Some(upload) = form.file(field) {
      *slot = state
        .attachments
        .save(&upload.file_name, &upload.bytes)
        .await
        .map_err(|e| ApiError::store("Error saving file!", e))?;
    }
  }

  let resignation = state
    .recruiter
    .submit_resignation(input, documents)
    .await
    .or_notice("Error recording resignation!")?;
  Ok((
    StatusCode::CREATED,
    Json(Saved::new("Resignation recorded successfully!", resignation)),
  ))
}
