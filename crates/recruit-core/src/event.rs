//! Append-only rows hanging off a candidate: review attempts, offers,
//! onboarding checklists and resignations.
//!
//! None of these are ever mutated after creation, with one exception: the
//! latest offer is marked `Accepted` when the signed copy is uploaded.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
  Error, Result,
  record::{
    CandidateEvent, Cells, Record, encode_date, encode_flag, encode_optional,
    encode_timestamp, require_text,
  },
  row::Row,
  stage::Outcome,
  table::Table,
};

macro_rules! candidate_event {
  ($($ty:ty),+) => {
    $(impl CandidateEvent for $ty {
      fn candidate_id(&self) -> u64 { self.candidate_id }
    })+
  };
}

candidate_event!(Screening, Interview, Offer, Onboarding, Resignation);

// ─── Screening ───────────────────────────────────────────────────────────────

/// One screening attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screening {
  pub id:                  u64,
  pub candidate_id:        u64,
  pub screener_name:       String,
  pub technical_score:     u8,
  pub communication_score: u8,
  pub experience_score:    u8,
  pub overall_score:       u8,
  pub comments:            String,
  pub status:              Outcome,
  pub screening_date:      NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewScreening {
  pub candidate_id:        u64,
  pub screener_name:       String,
  pub technical_score:     u8,
  pub communication_score: u8,
  pub experience_score:    u8,
  pub overall_score:       u8,
  #[serde(default)]
  pub comments:            String,
  pub status:              Outcome,
}

impl NewScreening {
  pub fn validate(&self) -> Result<()> { require_text("screener_name", &self.screener_name) }

  pub fn into_record(self, screening_date: NaiveDateTime) -> Screening {
    Screening {
      id: 0,
      candidate_id: self.candidate_id,
      screener_name: self.screener_name,
      technical_score: self.technical_score,
      communication_score: self.communication_score,
      experience_score: self.experience_score,
      overall_score: self.overall_score,
      comments: self.comments,
      status: self.status,
      screening_date,
    }
  }
}

impl Record for Screening {
  const TABLE: Table = Table::Screening;

  fn id(&self) -> u64 { self.id }

  fn set_id(&mut self, id: u64) { self.id = id; }

  fn to_row(&self) -> Row {
    Row::new()
      .with("id", self.id.to_string())
      .with("candidate_id", self.candidate_id.to_string())
      .with("screener_name", &self.screener_name)
      .with("technical_score", self.technical_score.to_string())
      .with("communication_score", self.communication_score.to_string())
      .with("experience_score", self.experience_score.to_string())
      .with("overall_score", self.overall_score.to_string())
      .with("comments", &self.comments)
      .with("status", self.status.as_str())
      .with("screening_date", encode_timestamp(self.screening_date))
  }

  fn from_row(row: &Row) -> Result<Self> {
    let c = Cells::new(Self::TABLE, row);
    Ok(Self {
      id:                  c.id("id")?,
      candidate_id:        c.id("candidate_id")?,
      screener_name:       c.text("screener_name"),
      technical_score:     c.parse("technical_score")?,
      communication_score: c.parse("communication_score")?,
      experience_score:    c.parse("experience_score")?,
      overall_score:       c.parse("overall_score")?,
      comments:            c.text("comments"),
      status:              c.parse("status")?,
      screening_date:      c.timestamp("screening_date")?,
    })
  }
}

// ─── Interview ───────────────────────────────────────────────────────────────

/// One interview round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
  pub id:                    u64,
  pub candidate_id:          u64,
  pub interviewer_name:      String,
  /// Free text, e.g. "Technical", "HR", "Managerial".
  pub interview_type:        String,
  pub technical_score:       u8,
  pub problem_solving_score: u8,
  pub communication_score:   u8,
  pub cultural_fit_score:    u8,
  pub overall_score:         u8,
  pub comments:              String,
  pub status:                Outcome,
  pub interview_date:        NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInterview {
  pub candidate_id:          u64,
  pub interviewer_name:      String,
  #[serde(default)]
  pub interview_type:        String,
  pub technical_score:       u8,
  pub problem_solving_score: u8,
  pub communication_score:   u8,
  pub cultural_fit_score:    u8,
  pub overall_score:         u8,
  #[serde(default)]
  pub comments:              String,
  pub status:                Outcome,
}

impl NewInterview {
  pub fn validate(&self) -> Result<()> {
    require_text("interviewer_name", &self.interviewer_name)
  }

  pub fn into_record(self, interview_date: NaiveDateTime) -> Interview {
    Interview {
      id: 0,
      candidate_id: self.candidate_id,
      interviewer_name: self.interviewer_name,
      interview_type: self.interview_type,
      technical_score: self.technical_score,
      problem_solving_score: self.problem_solving_score,
      communication_score: self.communication_score,
      cultural_fit_score: self.cultural_fit_score,
      overall_score: self.overall_score,
      comments: self.comments,
      status: self.status,
      interview_date,
    }
  }
}

impl Record for Interview {
  const TABLE: Table = Table::Interviews;

  fn id(&self) -> u64 { self.id }

  fn set_id(&mut self, id: u64) { self.id = id; }

  fn to_row(&self) -> Row {
    Row::new()
      .with("id", self.id.to_string())
      .with("candidate_id", self.candidate_id.to_string())
      .with("interviewer_name", &self.interviewer_name)
      .with("interview_type", &self.interview_type)
      .with("technical_score", self.technical_score.to_string())
      .with("problem_solving_score", self.problem_solving_score.to_string())
      .with("communication_score", self.communication_score.to_string())
      .with("cultural_fit_score", self.cultural_fit_score.to_string())
      .with("overall_score", self.overall_score.to_string())
      .with("comments", &self.comments)
      .with("status", self.status.as_str())
      .with("interview_date", encode_timestamp(self.interview_date))
  }

  fn from_row(row: &Row) -> Result<Self> {
    let c = Cells::new(Self::TABLE, row);
    Ok(Self {
      id:                    c.id("id")?,
      candidate_id:          c.id("candidate_id")?,
      interviewer_name:      c.text("interviewer_name"),
      interview_type:        c.text("interview_type"),
      technical_score:       c.parse("technical_score")?,
      problem_solving_score: c.parse("problem_solving_score")?,
      communication_score:   c.parse("communication_score")?,
      cultural_fit_score:    c.parse("cultural_fit_score")?,
      overall_score:         c.parse("overall_score")?,
      comments:              c.text("comments"),
      status:                c.parse("status")?,
      interview_date:        c.timestamp("interview_date")?,
    })
  }
}

// ─── Offer ───────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum OfferStatus {
  #[default]
  Sent,
  Accepted,
}

impl OfferStatus {
  pub fn as_str(self) -> &'static str { self.into() }
}

/// Compensation and position terms. Conventionally one per candidate; when
/// there are several the latest wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
  pub id:                     u64,
  pub candidate_id:           u64,
  pub job_title:              String,
  pub salary:                 String,
  pub joining_date:           NaiveDate,
  pub department:             String,
  pub location:               String,
  pub benefits:               String,
  pub offer_letter_generated: bool,
  pub offer_date:             NaiveDateTime,
  pub status:                 OfferStatus,
  pub signed_offer_filename:  Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOffer {
  pub candidate_id: u64,
  pub job_title:    String,
  pub salary:       String,
  pub joining_date: NaiveDate,
  #[serde(default)]
  pub department:   String,
  #[serde(default)]
  pub location:     String,
  #[serde(default)]
  pub benefits:     String,
}

impl NewOffer {
  pub fn validate(&self) -> Result<()> {
    require_text("job_title", &self.job_title)?;
    require_text("salary", &self.salary)
  }

  pub fn into_record(self, offer_date: NaiveDateTime) -> Offer {
    Offer {
      id: 0,
      candidate_id: self.candidate_id,
      job_title: self.job_title,
      salary: self.salary,
      joining_date: self.joining_date,
      department: self.department,
      location: self.location,
      benefits: self.benefits,
      offer_letter_generated: true,
      offer_date,
      status: OfferStatus::Sent,
      signed_offer_filename: None,
    }
  }
}

impl Record for Offer {
  const TABLE: Table = Table::Offers;

  fn id(&self) -> u64 { self.id }

  fn set_id(&mut self, id: u64) { self.id = id; }

  fn to_row(&self) -> Row {
    Row::new()
      .with("id", self.id.to_string())
      .with("candidate_id", self.candidate_id.to_string())
      .with("job_title", &self.job_title)
      .with("salary", &self.salary)
      .with("joining_date", encode_date(self.joining_date))
      .with("department", &self.department)
      .with("location", &self.location)
      .with("benefits", &self.benefits)
      .with("offer_letter_generated", encode_flag(self.offer_letter_generated))
      .with("offer_date", encode_timestamp(self.offer_date))
      .with("status", self.status.as_str())
      .with(
        "signed_offer_filename",
        encode_optional(&self.signed_offer_filename),
      )
  }

  fn from_row(row: &Row) -> Result<Self> {
    let c = Cells::new(Self::TABLE, row);
    Ok(Self {
      id:                     c.id("id")?,
      candidate_id:           c.id("candidate_id")?,
      job_title:              c.text("job_title"),
      salary:                 c.text("salary"),
      joining_date:           c.date("joining_date")?,
      department:             c.text("department"),
      location:               c.text("location"),
      benefits:               c.text("benefits"),
      offer_letter_generated: c.flag("offer_letter_generated"),
      offer_date:             c.timestamp("offer_date")?,
      status:                 c.parse("status")?,
      signed_offer_filename:  c.optional("signed_offer_filename"),
    })
  }
}

// ─── Onboarding ──────────────────────────────────────────────────────────────

/// The six onboarding checklist items, in column order.
pub const ONBOARDING_CHECKLIST: [&str; 6] = [
  "documents_verified",
  "laptop_assigned",
  "id_card_issued",
  "workspace_assigned",
  "orientation_completed",
  "system_access_provided",
];

/// A snapshot of the onboarding checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Onboarding {
  pub id:                     u64,
  pub candidate_id:           u64,
  pub documents_verified:     bool,
  pub laptop_assigned:        bool,
  pub id_card_issued:         bool,
  pub workspace_assigned:     bool,
  pub orientation_completed:  bool,
  pub system_access_provided: bool,
  pub comments:               String,
  pub onboarding_date:        NaiveDateTime,
  pub hr_representative:      String,
}

impl Onboarding {
  fn checklist(&self) -> [bool; 6] {
    [
      self.documents_verified,
      self.laptop_assigned,
      self.id_card_issued,
      self.workspace_assigned,
      self.orientation_completed,
      self.system_access_provided,
    ]
  }

  pub fn is_complete(&self) -> bool { self.checklist().iter().all(|done| *done) }
}

/// Unchecked items default to `No`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewOnboarding {
  pub candidate_id:           u64,
  #[serde(default)]
  pub documents_verified:     bool,
  #[serde(default)]
  pub laptop_assigned:        bool,
  #[serde(default)]
  pub id_card_issued:         bool,
  #[serde(default)]
  pub workspace_assigned:     bool,
  #[serde(default)]
  pub orientation_completed:  bool,
  #[serde(default)]
  pub system_access_provided: bool,
  #[serde(default)]
  pub comments:               String,
  pub hr_representative:      String,
}

impl NewOnboarding {
  pub fn validate(&self) -> Result<()> {
    require_text("hr_representative", &self.hr_representative)
  }

  pub fn into_record(self, onboarding_date: NaiveDateTime) -> Onboarding {
    Onboarding {
      id: 0,
      candidate_id: self.candidate_id,
      documents_verified: self.documents_verified,
      laptop_assigned: self.laptop_assigned,
      id_card_issued: self.id_card_issued,
      workspace_assigned: self.workspace_assigned,
      orientation_completed: self.orientation_completed,
      system_access_provided: self.system_access_provided,
      comments: self.comments,
      onboarding_date,
      hr_representative: self.hr_representative,
    }
  }
}

impl Record for Onboarding {
  const TABLE: Table = Table::Onboarding;

  fn id(&self) -> u64 { self.id }

  fn set_id(&mut self, id: u64) { self.id = id; }

  fn to_row(&self) -> Row {
    let mut row = Row::new()
      .with("id", self.id.to_string())
      .with("candidate_id", self.candidate_id.to_string())
      .with("comments", &self.comments)
      .with("onboarding_date", encode_timestamp(self.onboarding_date))
      .with("hr_representative", &self.hr_representative);
    for (column, done) in ONBOARDING_CHECKLIST.iter().zip(self.checklist()) {
      row.set(*column, encode_flag(done));
    }
    row
  }

  fn from_row(row: &Row) -> Result<Self> {
    let c = Cells::new(Self::TABLE, row);
    Ok(Self {
      id:                     c.id("id")?,
      candidate_id:           c.id("candidate_id")?,
      documents_verified:     c.flag("documents_verified"),
      laptop_assigned:        c.flag("laptop_assigned"),
      id_card_issued:         c.flag("id_card_issued"),
      workspace_assigned:     c.flag("workspace_assigned"),
      orientation_completed:  c.flag("orientation_completed"),
      system_access_provided: c.flag("system_access_provided"),
      comments:               c.text("comments"),
      onboarding_date:        c.timestamp("onboarding_date")?,
      hr_representative:      c.text("hr_representative"),
    })
  }
}

// ─── Resignation ─────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum Settlement {
  #[default]
  Pending,
  Completed,
}

impl Settlement {
  pub fn as_str(self) -> &'static str { self.into() }
}

/// Derived from the clearance items and the settlement; stored alongside them.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum CompletionStatus {
  Pending,
  #[serde(rename = "In Progress")]
  #[strum(serialize = "In Progress")]
  InProgress,
  Completed,
}

impl CompletionStatus {
  pub fn as_str(self) -> &'static str { self.into() }

  /// `Completed` once every clearance item is done and the settlement is
  /// paid; `Pending` while nothing has started.
  pub fn derive(clearance: &[bool], settlement: Settlement) -> Self {
    let settled = settlement == Settlement::Completed;
    if settled && clearance.iter().all(|done| *done) {
      Self::Completed
    } else if settled || clearance.iter().any(|done| *done) {
      Self::InProgress
    } else {
      Self::Pending
    }
  }
}

/// Stored names of the documents attached to a resignation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResignationDocuments {
  pub resignation_letter: Option<String>,
  pub acceptance_letter:  Option<String>,
  pub relieving_letter:   Option<String>,
}

/// A snapshot of an employee's exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resignation {
  pub id:                       u64,
  pub candidate_id:             u64,
  pub resignation_date:         NaiveDate,
  pub last_working_date:        NaiveDate,
  pub reason:                   String,
  pub exit_interview_completed: bool,
  pub laptop_returned:          bool,
  pub id_card_returned:         bool,
  pub clearance_completed:      bool,
  pub final_settlement:         Settlement,
  pub completion_status:        CompletionStatus,
  pub comments:                 String,
  pub hr_representative:        String,
  pub documents:                ResignationDocuments,
  pub recorded_date:            NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewResignation {
  pub candidate_id:             u64,
  pub resignation_date:         NaiveDate,
  pub last_working_date:        NaiveDate,
  #[serde(default)]
  pub reason:                   String,
  #[serde(default)]
  pub exit_interview_completed: bool,
  #[serde(default)]
  pub laptop_returned:          bool,
  #[serde(default)]
  pub id_card_returned:         bool,
  #[serde(default)]
  pub clearance_completed:      bool,
  #[serde(default)]
  pub final_settlement:         Settlement,
  #[serde(default)]
  pub comments:                 String,
  pub hr_representative:        String,
}

impl NewResignation {
  pub fn validate(&self) -> Result<()> {
    require_text("hr_representative", &self.hr_representative)?;
    if self.last_working_date < self.resignation_date {
      return Err(Error::Validation(
        "last_working_date must not precede resignation_date".into(),
      ));
    }
    Ok(())
  }

  pub fn into_record(
    self,
    documents: ResignationDocuments,
    recorded_date: NaiveDateTime,
  ) -> Resignation {
    let clearance = [
      self.exit_interview_completed,
      self.laptop_returned,
      self.id_card_returned,
      self.clearance_completed,
    ];
    Resignation {
      id: 0,
      candidate_id: self.candidate_id,
      resignation_date: self.resignation_date,
      last_working_date: self.last_working_date,
      reason: self.reason,
      exit_interview_completed: self.exit_interview_completed,
      laptop_returned: self.laptop_returned,
      id_card_returned: self.id_card_returned,
      clearance_completed: self.clearance_completed,
      final_settlement: self.final_settlement,
      completion_status: CompletionStatus::derive(&clearance, self.final_settlement),
      comments: self.comments,
      hr_representative: self.hr_representative,
      documents,
      recorded_date,
    }
  }
}

impl Record for Resignation {
  const TABLE: Table = Table::Resignations;

  fn id(&self) -> u64 { self.id }

  fn set_id(&mut self, id: u64) { self.id = id; }

  fn to_row(&self) -> Row {
    Row::new()
      .with("id", self.id.to_string())
      .with("candidate_id", self.candidate_id.to_string())
      .with("resignation_date", encode_date(self.resignation_date))
      .with("last_working_date", encode_date(self.last_working_date))
      .with("reason", &self.reason)
      .with(
        "exit_interview_completed",
        encode_flag(self.exit_interview_completed),
      )
      .with("laptop_returned", encode_flag(self.laptop_returned))
      .with("id_card_returned", encode_flag(self.id_card_returned))
      .with("clearance_completed", encode_flag(self.clearance_completed))
      .with("final_settlement", self.final_settlement.as_str())
      .with("completion_status", self.completion_status.as_str())
      .with("comments", &self.comments)
      .with("hr_representative", &self.hr_representative)
      .with(
        "resignation_letter_filename",
        encode_optional(&self.documents.resignation_letter),
      )
      .with(
        "acceptance_letter_filename",
        encode_optional(&self.documents.acceptance_letter),
      )
      .with(
        "relieving_letter_filename",
        encode_optional(&self.documents.relieving_letter),
      )
      .with("recorded_date", encode_timestamp(self.recorded_date))
  }

  fn from_row(row: &Row) -> Result<Self> {
    let c = Cells::new(Self::TABLE, row);
    Ok(Self {
      id:                       c.id("id")?,
      candidate_id:             c.id("candidate_id")?,
      resignation_date:         c.date("resignation_date")?,
      last_working_date:        c.date("last_working_date")?,
      reason:                   c.text("reason"),
      exit_interview_completed: c.flag("exit_interview_completed"),
      laptop_returned:          c.flag("laptop_returned"),
      id_card_returned:         c.flag("id_card_returned"),
      clearance_completed:      c.flag("clearance_completed"),
      final_settlement:         c
        .optional("final_settlement")
        .map(|_| c.parse("final_settlement"))
        .transpose()?
        .unwrap_or_default(),
      completion_status:        c.parse("completion_status")?,
      comments:                 c.text("comments"),
      hr_representative:        c.text("hr_representative"),
      documents:                ResignationDocuments {
        resignation_letter: c.optional("resignation_letter_filename"),
        acceptance_letter:  c.optional("acceptance_letter_filename"),
        relieving_letter:   c.optional("relieving_letter_filename"),
      },
      recorded_date:            c.timestamp("recorded_date")?,
    })
  }
}
