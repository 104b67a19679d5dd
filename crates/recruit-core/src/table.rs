//! The fixed set of tables and their conventional column layouts.
//!
//! Columns are a convention, not an enforced schema: a table's column set is
//! whatever keys have been written to it. The lists below only fix the order
//! in which known columns are laid out when a table is persisted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// One named, flat, header-plus-rows record set.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Table {
  Requisitions,
  Candidates,
  Screening,
  Interviews,
  Offers,
  Onboarding,
  Resignations,
}

impl Table {
  pub const ALL: [Table; 7] = [
    Table::Requisitions,
    Table::Candidates,
    Table::Screening,
    Table::Interviews,
    Table::Offers,
    Table::Onboarding,
    Table::Resignations,
  ];

  pub fn name(self) -> &'static str { self.into() }

  /// Parse a table name, rejecting anything outside [`Table::ALL`].
  pub fn parse(name: &str) -> Result<Self> {
    name
      .parse()
      .map_err(|_| Error::UnknownTable(name.to_owned()))
  }

  /// Conventional column order for this table.
  pub fn columns(self) -> &'static [&'static str] {
    match self {
      Self::Requisitions => &[
        "id",
        "start_date",
        "end_date",
        "manager_name",
        "position_title",
        "job_description",
        "number_of_openings",
        "department",
        "location",
        "requirements",
        "status",
        "created_date",
      ],
      Self::Candidates => &[
        "id",
        "requisition_id",
        "name",
        "email",
        "phone",
        "experience",
        "skills",
        "resume_filename",
        "stage",
        "applied_date",
        "current_salary",
        "expected_salary",
        "notice_period",
      ],
      Self::Screening => &[
        "id",
        "candidate_id",
        "screener_name",
        "technical_score",
        "communication_score",
        "experience_score",
        "overall_score",
        "comments",
        "status",
        "screening_date",
      ],
      Self::Interviews => &[
        "id",
        "candidate_id",
        "interviewer_name",
        "interview_type",
        "technical_score",
        "problem_solving_score",
        "communication_score",
        "cultural_fit_score",
        "overall_score",
        "comments",
        "status",
        "interview_date",
      ],
      Self::Offers => &[
        "id",
        "candidate_id",
        "job_title",
        "salary",
        "joining_date",
        "department",
        "location",
        "benefits",
        "offer_letter_generated",
        "offer_date",
        "status",
        "signed_offer_filename",
      ],
      Self::Onboarding => &[
        "id",
        "candidate_id",
        "documents_verified",
        "laptop_assigned",
        "id_card_issued",
        "workspace_assigned",
        "orientation_completed",
        "system_access_provided",
        "comments",
        "onboarding_date",
        "hr_representative",
      ],
      Self::Resignations => &[
        "id",
        "candidate_id",
        "resignation_date",
        "last_working_date",
        "reason",
        "exit_interview_completed",
        "laptop_returned",
        "id_card_returned",
        "clearance_completed",
        "final_settlement",
        "completion_status",
        "comments",
        "hr_representative",
        "resignation_letter_filename",
        "acceptance_letter_filename",
        "relieving_letter_filename",
        "recorded_date",
      ],
    }
  }
}
