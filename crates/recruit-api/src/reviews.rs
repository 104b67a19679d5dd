//! Handlers for screening and interview endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/screening/{id}` | Candidate and prior screenings |
//! | `POST` | `/screening` | JSON [`NewScreening`]; moves the candidate's stage |
//! | `GET`  | `/interview/{id}` | Candidate and prior interviews |
//! | `POST` | `/interview` | JSON [`NewInterview`]; moves the candidate's stage |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
};
use recruit_core::{
  event::{Interview, NewInterview, NewScreening, Screening},
  recruiter::CandidateHistory,
  store::TableStore,
};

use crate::{
  AppState, Saved,
  error::{ApiError, OrNotice as _},
};

// ─── Screening ───────────────────────────────────────────────────────────────

/// `GET /screening/{id}`
pub async fn screening_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<CandidateHistory<Screening>>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.screening_form(id).await?))
}

/// `POST /screening`
pub async fn submit_screening<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<NewScreening>, JsonRejection>,
) -> Result<(StatusCode, Json<Saved<Screening>>), ApiError>
where
  S: TableStore,
{
  let Json(input) = body?;
  let screening = state
    .recruiter
    .submit_screening(input)
    .await
    .or_notice("Error submitting screening result!")?;
  Ok((
    StatusCode::CREATED,
    Json(Saved::new("Screening result submitted successfully!", screening)),
  ))
}

// ─── Interviews ──────────────────────────────────────────────────────────────

/// `GET /interview/{id}`
pub async fn interview_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<CandidateHistory<Interview>>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.interview_form(id).await?))
}

/// `POST /interview`
pub async fn submit_interview<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<NewInterview>, JsonRejection>,
) -> Result<(StatusCode, Json<Saved<Interview>>), ApiError>
where
  S: TableStore,
{
  let Json(input) = body?;
  let interview = state
    .recruiter
    .submit_interview(input)
    .await
    .or_notice("Error submitting interview result!")?;
  Ok((
    StatusCode::CREATED,
    Json(Saved::new("Interview result submitted successfully!", interview)),
  ))
}
