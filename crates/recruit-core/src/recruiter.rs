//! [`Recruiter`] — every workflow operation, expressed over a [`TableStore`].
//!
//! Read failures are absorbed here: they are logged and the table is treated
//! as empty, so listing pages always render. Write failures, validation
//! failures and unknown ids come back as typed [`Error`]s for the caller to
//! turn into a user-facing notice.

use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
  Error, Result,
  event::{
    Interview, NewInterview, NewOffer, NewOnboarding, NewResignation,
    NewScreening, Offer, OfferStatus, Onboarding, Resignation,
    ResignationDocuments, Screening,
  },
  import::ImportedCandidate,
  record::{
    Candidate, CandidateEvent, DIRECT_HIRE, NewCandidate, NewRequisition,
    Record, Requisition, RequisitionStatus, now,
  },
  row::Row,
  stage::{Review, Stage, stage_after},
  store::TableStore,
  table::Table,
};

// ─── Views ───────────────────────────────────────────────────────────────────

/// A requisition with the candidates who applied to it.
#[derive(Debug, Clone, Serialize)]
pub struct RequisitionDetail {
  pub requisition: Requisition,
  pub candidates:  Vec<Candidate>,
}

/// A candidate with every prior row of one event table, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateHistory<E> {
  pub candidate: Candidate,
  pub history:   Vec<E>,
}

/// A candidate with the latest row of one event table, if any.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSnapshot<E> {
  pub candidate: Candidate,
  pub latest:    Option<E>,
}

/// Everything an offer letter is rendered from.
#[derive(Debug, Clone, Serialize)]
pub struct OfferLetter {
  pub candidate: Candidate,
  pub offer:     Offer,
}

// ─── Recruiter ───────────────────────────────────────────────────────────────

/// The recruitment workflow over a store. Cloning is cheap.
pub struct Recruiter<S> {
  store: Arc<S>,
}

impl<S> Clone for Recruiter<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: TableStore> Recruiter<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  // ── Generic table access ──────────────────────────────────────────────

  /// All rows of `table`; a failed read is logged and reads as empty.
  async fn rows(&self, table: Table) -> Vec<Row> {
    match self.store.read(table).await {
      Ok(rows) => rows,
      Err(e) => {
        tracing::error!(%table, error = %e, "failed to read table; treating as empty");
        Vec::new()
      }
    }
  }

  /// All decodable records of `R`'s table. Rows that fail to decode are
  /// skipped with a warning.
  async fn load<R: Record>(&self) -> Vec<R> {
    self
      .rows(R::TABLE)
      .await
      .iter()
      .filter_map(|row| match R::from_row(row) {
        Ok(rec) => Some(rec),
        Err(e) => {
          warn!(table = %R::TABLE, id = ?row.id(), error = %e, "skipping undecodable row");
          None
        }
      })
      .collect()
  }

  async fn find<R: Record>(&self, id: u64) -> Result<R> {
    self
      .load::<R>()
      .await
      .into_iter()
      .find(|r| r.id() == id)
      .ok_or(Error::NotFound { table: R::TABLE, id })
  }

  /// Persist `record` under a freshly assigned id.
  async fn create<R: Record>(&self, mut record: R) -> Result<R> {
    let id = self
      .store
      .insert(R::TABLE, record.to_row())
      .await
      .map_err(Error::storage)?;
    record.set_id(id);
    info!(table = %R::TABLE, id, "record created");
    Ok(record)
  }

  async fn history<E: CandidateEvent>(&self, candidate_id: u64) -> Vec<E> {
    let mut events: Vec<E> = self
      .load::<E>()
      .await
      .into_iter()
      .filter(|e| e.candidate_id() == candidate_id)
      .collect();
    // Stored order is append order; ids break ties if a table was rewritten.
    events.sort_by_key(|e| e.id());
    events
  }

  async fn latest<E: CandidateEvent>(&self, candidate_id: u64) -> Option<E> {
    self.history::<E>(candidate_id).await.pop()
  }

  async fn set_stage(&self, candidate: &Candidate, stage: Stage) -> Result<()> {
    if candidate.stage.is_terminal() && candidate.stage != stage {
      warn!(
        candidate = candidate.id,
        from = %candidate.stage,
        to = %stage,
        "moving candidate out of a terminal stage"
      );
    }
    let matched = self
      .store
      .update_field(Table::Candidates, candidate.id, "stage", stage.as_str().to_owned())
      .await
      .map_err(Error::storage)?;
    if matched == 0 {
      return Err(Error::NotFound {
        table: Table::Candidates,
        id:    candidate.id,
      });
    }
    info!(candidate = candidate.id, %stage, "stage updated");
    Ok(())
  }

  // ── Requisitions ──────────────────────────────────────────────────────

  pub async fn requisitions(&self) -> Vec<Requisition> { self.load().await }

  pub async fn requisition(&self, id: u64) -> Result<Requisition> { self.find(id).await }

  pub async fn requisition_detail(&self, id: u64) -> Result<RequisitionDetail> {
    let requisition = self.requisition(id).await?;
    let candidates = self.candidates_for(id).await;
    Ok(RequisitionDetail {
      requisition,
      candidates,
    })
  }

  pub async fn create_requisition(&self, input: NewRequisition) -> Result<Requisition> {
    input.validate()?;
    self.create(input.into_record(now())).await
  }

  /// Mark a requisition `Closed`. Closing an already closed one is a no-op
  /// success.
  pub async fn close_requisition(&self, id: u64) -> Result<()> {
    let matched = self
      .store
      .update_field(
        Table::Requisitions,
        id,
        "status",
        RequisitionStatus::Closed.as_str().to_owned(),
      )
      .await
      .map_err(Error::storage)?;
    if matched == 0 {
      return Err(Error::NotFound {
        table: Table::Requisitions,
        id,
      });
    }
    info!(requisition = id, "requisition closed");
    Ok(())
  }

  // ── Candidates ────────────────────────────────────────────────────────

  pub async fn candidate(&self, id: u64) -> Result<Candidate> { self.find(id).await }

  pub async fn candidates_for(&self, requisition_id: u64) -> Vec<Candidate> {
    self
      .load::<Candidate>()
      .await
      .into_iter()
      .filter(|c| c.requisition_id == requisition_id)
      .collect()
  }

  /// Add an applicant to a requisition. The requisition is a soft reference
  /// and is not checked.
  pub async fn add_candidate(
    &self,
    requisition_id: u64,
    input: NewCandidate,
    resume_filename: Option<String>,
  ) -> Result<Candidate> {
    input.validate()?;
    self
      .create(input.into_record(requisition_id, resume_filename, now()))
      .await
  }

  /// Add a candidate hired without a requisition.
  pub async fn add_direct_hire(
    &self,
    input: NewCandidate,
    resume_filename: Option<String>,
  ) -> Result<Candidate> {
    self.add_candidate(DIRECT_HIRE, input, resume_filename).await
  }

  /// Create one candidate per imported row in a single table write.
  ///
  /// `resumes` maps original upload names to stored names; a row whose
  /// resume is not in it is created with no resume.
  pub async fn import_candidates(
    &self,
    imported: Vec<ImportedCandidate>,
    resumes: &HashMap<String, String>,
  ) -> Result<Vec<Candidate>> {
    let applied = now();
    let mut candidates: Vec<Candidate> = imported
      .into_iter()
      .map(|ic| {
        let resume = ic
          .resume_original
          .as_deref()
          .and_then(|orig| resumes.get(orig))
          .cloned();
        ic.candidate.into_record(ic.requisition_id, resume, applied)
      })
      .collect();

    let ids = self
      .store
      .insert_all(Table::Candidates, candidates.iter().map(Record::to_row).collect())
      .await
      .map_err(Error::storage)?;
    for (candidate, id) in candidates.iter_mut().zip(ids) {
      candidate.set_id(id);
    }

    info!(count = candidates.len(), "candidates imported");
    Ok(candidates)
  }

  // ── Screening & interviews ────────────────────────────────────────────

  pub async fn screening_form(&self, candidate_id: u64) -> Result<CandidateHistory<Screening>> {
    let candidate = self.candidate(candidate_id).await?;
    let history = self.history(candidate_id).await;
    Ok(CandidateHistory { candidate, history })
  }

  /// Record a screening attempt and move the candidate per the lookup.
  pub async fn submit_screening(&self, input: NewScreening) -> Result<Screening> {
    input.validate()?;
    let candidate = self.candidate(input.candidate_id).await?;
    let screening = self.create(input.into_record(now())).await?;
    self
      .set_stage(&candidate, stage_after(Review::Screening, screening.status))
      .await?;
    Ok(screening)
  }

  pub async fn interview_form(&self, candidate_id: u64) -> Result<CandidateHistory<Interview>> {
    let candidate = self.candidate(candidate_id).await?;
    let history = self.history(candidate_id).await;
    Ok(CandidateHistory { candidate, history })
  }

  /// Record an interview round and move the candidate per the lookup.
  pub async fn submit_interview(&self, input: NewInterview) -> Result<Interview> {
    input.validate()?;
    let candidate = self.candidate(input.candidate_id).await?;
    let interview = self.create(input.into_record(now())).await?;
    self
      .set_stage(&candidate, stage_after(Review::Interview, interview.status))
      .await?;
    Ok(interview)
  }

  // ── Offers ────────────────────────────────────────────────────────────

  pub async fn offer_form(&self, candidate_id: u64) -> Result<CandidateSnapshot<Offer>> {
    self.snapshot(candidate_id).await
  }

  pub async fn create_offer(&self, input: NewOffer) -> Result<Offer> {
    input.validate()?;
    let candidate = self.candidate(input.candidate_id).await?;
    let offer = self.create(input.into_record(now())).await?;
    self.set_stage(&candidate, Stage::Offer).await?;
    Ok(offer)
  }

  pub async fn offer_letter(&self, candidate_id: u64) -> Result<OfferLetter> {
    let candidate = self.candidate(candidate_id).await?;
    let offer = self
      .latest::<Offer>(candidate_id)
      .await
      .ok_or(Error::NotFound {
        table: Table::Offers,
        id:    candidate_id,
      })?;
    Ok(OfferLetter { candidate, offer })
  }

  /// Attach the signed copy to the candidate's latest offer and mark it
  /// accepted.
  pub async fn accept_offer(&self, candidate_id: u64, signed_filename: String) -> Result<Offer> {
    let OfferLetter { mut offer, .. } = self.offer_letter(candidate_id).await?;

    self
      .store
      .update_fields(Table::Offers, offer.id, vec![
        ("signed_offer_filename", signed_filename.clone()),
        ("status", OfferStatus::Accepted.as_str().to_owned()),
      ])
      .await
      .map_err(Error::storage)?;

    offer.signed_offer_filename = Some(signed_filename);
    offer.status = OfferStatus::Accepted;
    info!(candidate = candidate_id, offer = offer.id, "offer accepted");
    Ok(offer)
  }

  // ── Onboarding & resignation ──────────────────────────────────────────

  async fn snapshot<E: CandidateEvent>(&self, candidate_id: u64) -> Result<CandidateSnapshot<E>> {
    let candidate = self.candidate(candidate_id).await?;
    let latest = self.latest(candidate_id).await;
    Ok(CandidateSnapshot { candidate, latest })
  }

  pub async fn onboarding(&self, candidate_id: u64) -> Result<CandidateSnapshot<Onboarding>> {
    self.snapshot(candidate_id).await
  }

  pub async fn submit_onboarding(&self, input: NewOnboarding) -> Result<Onboarding> {
    input.validate()?;
    let candidate = self.candidate(input.candidate_id).await?;
    let onboarding = self.create(input.into_record(now())).await?;
    self.set_stage(&candidate, Stage::Onboarded).await?;
    Ok(onboarding)
  }

  pub async fn resignation_form(&self, candidate_id: u64) -> Result<CandidateSnapshot<Resignation>> {
    self.snapshot(candidate_id).await
  }

  pub async fn submit_resignation(
    &self,
    input: NewResignation,
    documents: ResignationDocuments,
  ) -> Result<Resignation> {
    input.validate()?;
    let candidate = self.candidate(input.candidate_id).await?;
    let resignation = self.create(input.into_record(documents, now())).await?;
    self.set_stage(&candidate, Stage::Resigned).await?;
    Ok(resignation)
  }

  // ── Export ────────────────────────────────────────────────────────────

  /// Raw rows of `table` for download. Unlike the listing reads, a failure
  /// here is reported.
  pub async fn export(&self, table: Table) -> Result<Vec<Row>> {
    self.store.read(table).await.map_err(Error::storage)
  }
}
