//! HTTP API for the recruitment tracker.
//!
//! Exposes an axum [`Router`] over a [`Recruiter`] backed by any
//! [`TableStore`], plus an [`AttachmentStore`] for uploaded documents.
//! Logging layers, body limits and serving are the caller's responsibility.
//!
//! Reads answer with JSON views; writes answer with a [`Saved`] body carrying
//! a confirmation notice; failures answer with `{"error": "<notice>"}`.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = recruit_api::api_router(AppState::new(store, attachments));
//! ```

pub mod attachments;
pub mod candidates;
pub mod employment;
pub mod error;
pub mod files;
pub mod form;
pub mod offers;
pub mod requisitions;
pub mod reviews;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use recruit_core::{Recruiter, store::TableStore};
use serde::Serialize;

pub use attachments::AttachmentStore;
pub use error::ApiError;

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub recruiter:   Recruiter<S>,
  pub attachments: Arc<AttachmentStore>,
}

impl<S: TableStore> AppState<S> {
  pub fn new(store: Arc<S>, attachments: AttachmentStore) -> Self {
    Self {
      recruiter:   Recruiter::new(store),
      attachments: Arc::new(attachments),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      recruiter:   self.recruiter.clone(),
      attachments: Arc::clone(&self.attachments),
    }
  }
}

/// Response body for a successful write.
#[derive(Debug, Serialize)]
pub struct Saved<T> {
  pub message: String,
  pub record:  T,
}

impl<T> Saved<T> {
  pub fn new(message: impl Into<String>, record: T) -> Self {
    Self {
      message: message.into(),
      record,
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: TableStore + 'static,
{
  Router::new()
    // Requisitions
    .route(
      "/requisitions",
      get(requisitions::list::<S>).post(requisitions::create::<S>),
    )
    .route("/requisitions/{id}", get(requisitions::detail::<S>))
    .route("/requisitions/{id}/close", post(requisitions::close::<S>))
    .route(
      "/requisitions/{id}/candidates",
      post(candidates::add_to_requisition::<S>),
    )
    // Candidates
    .route("/candidates", post(candidates::add_direct_hire::<S>))
    .route("/candidates/bulk-upload", post(candidates::bulk_upload::<S>))
    .route("/candidates/{id}", get(candidates::get_one::<S>))
    .route("/candidates/{id}/resume", get(candidates::resume::<S>))
    // Screening & interviews
    .route("/screening", post(reviews::submit_screening::<S>))
    .route("/screening/{id}", get(reviews::screening_form::<S>))
    .route("/interview", post(reviews::submit_interview::<S>))
    .route("/interview/{id}", get(reviews::interview_form::<S>))
    // Offers
    .route("/offer", post(offers::create::<S>))
    .route("/offer/{id}", get(offers::form::<S>))
    .route("/offer/{id}/signed", post(offers::upload_signed::<S>))
    .route("/offer-letter/{id}", get(offers::letter::<S>))
    // Onboarding & resignation
    .route("/onboarding", post(employment::submit_onboarding::<S>))
    .route("/onboarding/{id}", get(employment::onboarding::<S>))
    .route("/resignation", post(employment::submit_resignation::<S>))
    .route("/resignation/{id}", get(employment::resignation_form::<S>))
    // Files
    .route("/files/{name}", get(files::attachment::<S>))
    .route("/download/{table}", get(files::download::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests;
