//! Typed records and their string-row encoding.
//!
//! Every table stores strings. A [`Record`] knows how to lay itself out as a
//! [`Row`] and how to rebuild itself from one; this is the single place where
//! column values are validated and typed.

use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound as _};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
  Error, Result,
  row::{self, Row},
  stage::Stage,
  table::Table,
};

/// Format of every `*_date` column that records a moment (`created_date`,
/// `applied_date`, ...).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of calendar-date columns entered on forms.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A typed view over one row of [`Record::TABLE`].
pub trait Record: Sized {
  const TABLE: Table;

  fn id(&self) -> u64;

  /// Called by the store once the id has been assigned.
  fn set_id(&mut self, id: u64);

  fn to_row(&self) -> Row;

  fn from_row(row: &Row) -> Result<Self>;
}

/// Append-only rows that reference a candidate (screening, interviews, offers,
/// onboarding, resignations). The last one appended is the authoritative one.
pub trait CandidateEvent: Record {
  fn candidate_id(&self) -> u64;
}

// ─── Cell helpers ────────────────────────────────────────────────────────────

/// The current local time, truncated to whole seconds so it survives a trip
/// through [`TIMESTAMP_FORMAT`].
pub fn now() -> NaiveDateTime { Local::now().naive_local().trunc_subsecs(0) }

pub fn encode_timestamp(t: NaiveDateTime) -> String {
  t.format(TIMESTAMP_FORMAT).to_string()
}

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn encode_flag(b: bool) -> &'static str { if b { "Yes" } else { "No" } }

/// Checkbox-style values. Anything not recognised as yes is no.
pub fn decode_flag(s: &str) -> bool {
  matches!(
    s.trim().to_ascii_lowercase().as_str(),
    "yes" | "y" | "true" | "on" | "1"
  )
}

pub(crate) fn encode_optional(v: &Option<String>) -> &str { v.as_deref().unwrap_or("") }

/// Read-side accessor over a row that maps failures to [`Error`] values
/// naming the table and column.
pub(crate) struct Cells<'a> {
  table: Table,
  row:   &'a Row,
}

impl<'a> Cells<'a> {
  pub(crate) fn new(table: Table, row: &'a Row) -> Self { Self { table, row } }

  fn required(&self, column: &'static str) -> Result<&'a str> {
    self.row.get(column).ok_or(Error::MissingColumn {
      table: self.table,
      column,
    })
  }

  fn invalid(column: &str, value: &str) -> Error {
    Error::InvalidValue {
      column: column.to_owned(),
      value:  value.to_owned(),
    }
  }

  /// Free text; a missing column reads as empty.
  pub(crate) fn text(&self, column: &str) -> String {
    self.row.get(column).unwrap_or_default().to_owned()
  }

  /// Free text where empty means absent.
  pub(crate) fn optional(&self, column: &str) -> Option<String> {
    self
      .row
      .get(column)
      .map(str::trim)
      .filter(|v| !v.is_empty())
      .map(str::to_owned)
  }

  pub(crate) fn id(&self, column: &'static str) -> Result<u64> {
    let v = self.required(column)?;
    row::parse_id(v).ok_or_else(|| Self::invalid(column, v))
  }

  pub(crate) fn parse<T: FromStr>(&self, column: &'static str) -> Result<T> {
    let v = self.required(column)?;
    v.trim().parse().map_err(|_| Self::invalid(column, v))
  }

  pub(crate) fn flag(&self, column: &str) -> bool {
    self.row.get(column).is_some_and(decode_flag)
  }

  pub(crate) fn date(&self, column: &'static str) -> Result<NaiveDate> {
    let v = self.required(column)?;
    NaiveDate::parse_from_str(v.trim(), DATE_FORMAT).map_err(|_| Self::invalid(column, v))
  }

  pub(crate) fn timestamp(&self, column: &'static str) -> Result<NaiveDateTime> {
    let v = self.required(column)?;
    NaiveDateTime::parse_from_str(v.trim(), TIMESTAMP_FORMAT)
      .map_err(|_| Self::invalid(column, v))
  }
}

/// Reject blank values for fields a form must fill in.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Validation(format!("{field} is required")));
  }
  Ok(())
}

// ─── Requisition ─────────────────────────────────────────────────────────────

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
pub enum RequisitionStatus {
  #[default]
  Open,
  Closed,
}

impl RequisitionStatus {
  pub fn as_str(self) -> &'static str { self.into() }
}

/// A job opening. Only ever mutated to flip `status` to `Closed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisition {
  pub id:                 u64,
  pub start_date:         NaiveDate,
  pub end_date:           NaiveDate,
  pub manager_name:       String,
  pub position_title:     String,
  pub job_description:    String,
  pub number_of_openings: u32,
  pub department:         String,
  pub location:           String,
  pub requirements:       String,
  pub status:             RequisitionStatus,
  pub created_date:       NaiveDateTime,
}

/// Form input for a new requisition.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRequisition {
  pub start_date:         NaiveDate,
  pub end_date:           NaiveDate,
  pub manager_name:       String,
  pub position_title:     String,
  #[serde(default)]
  pub job_description:    String,
  pub number_of_openings: u32,
  #[serde(default)]
  pub department:         String,
  #[serde(default)]
  pub location:           String,
  #[serde(default)]
  pub requirements:       String,
}

impl NewRequisition {
  pub fn validate(&self) -> Result<()> {
    require_text("manager_name", &self.manager_name)?;
    require_text("position_title", &self.position_title)?;
    if self.number_of_openings == 0 {
      return Err(Error::Validation(
        "number_of_openings must be at least 1".into(),
      ));
    }
    if self.end_date < self.start_date {
      return Err(Error::Validation(
        "end_date must not precede start_date".into(),
      ));
    }
    Ok(())
  }

  /// Build an `Open` requisition with an unassigned id.
  pub fn into_record(self, created_date: NaiveDateTime) -> Requisition {
    Requisition {
      id: 0,
      start_date: self.start_date,
      end_date: self.end_date,
      manager_name: self.manager_name,
      position_title: self.position_title,
      job_description: self.job_description,
      number_of_openings: self.number_of_openings,
      department: self.department,
      location: self.location,
      requirements: self.requirements,
      status: RequisitionStatus::Open,
      created_date,
    }
  }
}

impl Record for Requisition {
  const TABLE: Table = Table::Requisitions;

  fn id(&self) -> u64 { self.id }

  fn set_id(&mut self, id: u64) { self.id = id; }

  fn to_row(&self) -> Row {
    Row::new()
      .with("id", self.id.to_string())
      .with("start_date", encode_date(self.start_date))
      .with("end_date", encode_date(self.end_date))
      .with("manager_name", &self.manager_name)
      .with("position_title", &self.position_title)
      .with("job_description", &self.job_description)
      .with("number_of_openings", self.number_of_openings.to_string())
      .with("department", &self.department)
      .with("location", &self.location)
      .with("requirements", &self.requirements)
      .with("status", self.status.as_str())
      .with("created_date", encode_timestamp(self.created_date))
  }

  fn from_row(row: &Row) -> Result<Self> {
    let c = Cells::new(Self::TABLE, row);
    Ok(Self {
      id:                 c.id("id")?,
      start_date:         c.date("start_date")?,
      end_date:           c.date("end_date")?,
      manager_name:       c.text("manager_name"),
      position_title:     c.text("position_title"),
      job_description:    c.text("job_description"),
      number_of_openings: c.parse("number_of_openings")?,
      department:         c.text("department"),
      location:           c.text("location"),
      requirements:       c.text("requirements"),
      status:             c.parse("status")?,
      created_date:       c.timestamp("created_date")?,
    })
  }
}

// ─── Candidate ───────────────────────────────────────────────────────────────

/// `requisition_id` used for candidates hired without a requisition.
pub const DIRECT_HIRE: u64 = 0;

/// An applicant, and later an employee. `stage` is the only field that ever
/// changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
  pub id:              u64,
  /// Soft reference; [`DIRECT_HIRE`] when there is no requisition.
  pub requisition_id:  u64,
  pub name:            String,
  pub email:           String,
  pub phone:           String,
  pub experience:      String,
  pub skills:          String,
  /// Stored attachment name, see [`crate::attachment`].
  pub resume_filename: Option<String>,
  pub stage:           Stage,
  pub applied_date:    NaiveDateTime,
  pub current_salary:  Option<String>,
  pub expected_salary: Option<String>,
  pub notice_period:   Option<String>,
}

impl Candidate {
  pub fn is_direct_hire(&self) -> bool { self.requisition_id == DIRECT_HIRE }
}

/// Form input for a new candidate; the requisition and resume come from the
/// route and the upload respectively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCandidate {
  pub name:            String,
  pub email:           String,
  #[serde(default)]
  pub phone:           String,
  #[serde(default)]
  pub experience:      String,
  #[serde(default)]
  pub skills:          String,
  #[serde(default)]
  pub current_salary:  Option<String>,
  #[serde(default)]
  pub expected_salary: Option<String>,
  #[serde(default)]
  pub notice_period:   Option<String>,
}

impl NewCandidate {
  pub fn validate(&self) -> Result<()> {
    require_text("name", &self.name)?;
    require_text("email", &self.email)
  }

  /// Build an `Applied` candidate with an unassigned id.
  pub fn into_record(
    self,
    requisition_id: u64,
    resume_filename: Option<String>,
    applied_date: NaiveDateTime,
  ) -> Candidate {
    let blank_to_none = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    Candidate {
      id: 0,
      requisition_id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      experience: self.experience,
      skills: self.skills,
      resume_filename,
      stage: Stage::Applied,
      applied_date,
      current_salary: blank_to_none(self.current_salary),
      expected_salary: blank_to_none(self.expected_salary),
      notice_period: blank_to_none(self.notice_period),
    }
  }
}

impl Record for Candidate {
  const TABLE: Table = Table::Candidates;

  fn id(&self) -> u64 { self.id }

  fn set_id(&mut self, id: u64) { self.id = id; }

  fn to_row(&self) -> Row {
    Row::new()
      .with("id", self.id.to_string())
      .with("requisition_id", self.requisition_id.to_string())
      .with("name", &self.name)
      .with("email", &self.email)
      .with("phone", &self.phone)
      .with("experience", &self.experience)
      .with("skills", &self.skills)
      .with("resume_filename", encode_optional(&self.resume_filename))
      .with("stage", self.stage.as_str())
      .with("applied_date", encode_timestamp(self.applied_date))
      .with("current_salary", encode_optional(&self.current_salary))
      .with("expected_salary", encode_optional(&self.expected_salary))
      .with("notice_period", encode_optional(&self.notice_period))
  }

  fn from_row(row: &Row) -> Result<Self> {
    let c = Cells::new(Self::TABLE, row);
    Ok(Self {
      id:              c.id("id")?,
      // Blank for legacy direct hires.
      requisition_id:  c
        .optional("requisition_id")
        .map(|_| c.id("requisition_id"))
        .transpose()?
        .unwrap_or(DIRECT_HIRE),
      name:            c.text("name"),
      email:           c.text("email"),
      phone:           c.text("phone"),
      experience:      c.text("experience"),
      skills:          c.text("skills"),
      resume_filename: c.optional("resume_filename"),
      stage:           c.parse("stage")?,
      applied_date:    c.timestamp("applied_date")?,
      current_salary:  c.optional("current_salary"),
      expected_salary: c.optional("expected_salary"),
      notice_period:   c.optional("notice_period"),
    })
  }
}
