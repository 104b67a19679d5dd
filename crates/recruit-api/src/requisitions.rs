//! Handlers for `/requisitions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/requisitions` | Every requisition (the dashboard) |
//! | `POST` | `/requisitions` | JSON [`NewRequisition`]; 201 |
//! | `GET`  | `/requisitions/{id}` | Requisition with its candidates; 404 if not found |
//! | `POST` | `/requisitions/{id}/close` | Idempotent; 404 if not found |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use recruit_core::{
  record::{NewRequisition, Requisition},
  recruiter::RequisitionDetail,
  store::TableStore,
};

use crate::{
  AppState, Saved,
  error::{ApiError, OrNotice as _},
};

/// `GET /requisitions`
pub async fn list<S>(State(state): State<AppState<S>>) -> Json<Vec<Requisition>>
where
  S: TableStore,
{
  Json(state.recruiter.requisitions().await)
}

/// `POST /requisitions`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<NewRequisition>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TableStore,
{
  let Json(input) = body?;
  let requisition = state
    .recruiter
    .create_requisition(input)
    .await
    .or_notice("Error creating requisition!")?;
  Ok((
    StatusCode::CREATED,
    Json(Saved::new("Requisition created successfully!", requisition)),
  ))
}

/// `GET /requisitions/{id}`
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<RequisitionDetail>, ApiError>
where
  S: TableStore,
{
  Ok(Json(state.recruiter.requisition_detail(id).await?))
}

/// `POST /requisitions/{id}/close`
pub async fn close<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<Saved<Requisition>>, ApiError>
where
  S: TableStore,
{
  state
    .recruiter
    .close_requisition(id)
    .await
    .or_notice("Error closing requisition!")?;
  let requisition = state.recruiter.requisition(id).await?;
  Ok(Json(Saved::new("Requisition closed successfully!", requisition)))
}
