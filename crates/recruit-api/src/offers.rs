//! Handlers for offer endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/offer/{id}` | Candidate and latest offer, if any |
//! | `POST` | `/offer` | JSON [`NewOffer`]; moves the candidate to `Offer` |
//! | `POST` | `/offer/{id}/signed` | Multipart `signed_offer` file; marks the latest offer accepted |
//! | `GET`  | `/offer-letter/{id}` | Candidate and latest offer; 404 if either is missing |

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
  event::{NewOffer, Offer},
  recruiter::{CandidateSnapshot, OfferLetter},
  store::TableStore,
};

use crate::{
  AppState, Saved,
  error::{ApiError, OrNotice as _},
  form::Form,
};

/// `GET /offer/{id}`
pub async fn form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<CandidateSnapshot<Offer>>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.offer_form(id).await?))
}

/// `POST /offer`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<NewOffer>, JsonRejection>,
) -> Result<(StatusCode, Json<Saved<Offer>>), ApiError>
where
  S: TableStore,
{
  let Json(input) = body?;
  let offer = state
    .recruiter
    .create_offer(input)
    .await
    .or_notice("Error creating offer!")?;
  Ok((
    StatusCode::CREATED,
    Json(Saved::new("Offer created successfully!", offer)),
  ))
}

/// `POST /offer/{id}/signed`
pub async fn upload_signed<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Saved<Offer>>, ApiError>
where
  S: TableStore,
{
  let form = Form::read(multipart).await?;
  let upload = form
    .file("signed_offer")
    .ok_or_else(|| ApiError::BadRequest("No file selected!".into()))?;

  // Fail before writing the file if there is nothing to attach it to.
  state.recruiter.offer_letter(id).await?;

  let stored = state
    .attachments
    .save(&upload.file_name, &upload.bytes)
    .await
    .map_err(|e| ApiError::store("Error saving file!", e))?
    .ok_or_else(|| ApiError::BadRequest("Please select a valid file!".into()))?;

  let offer = state
    .recruiter
    .accept_offer(id, stored)
    .await
    .or_notice("Error uploading signed offer!")?;
  Ok(Json(Saved::new("Signed offer uploaded successfully!", offer)))
}

/// `GET /offer-letter/{id}`
pub async fn letter<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<OfferLetter>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.offer_letter(id).await?))
}
