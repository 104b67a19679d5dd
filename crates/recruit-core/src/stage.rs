//! Candidate stages and the fixed status → stage lookup.
//!
//! ```text
//! Applied → Screening[/Hold] → Interview[/Hold] → Offer → Onboarded → Resigned
//!              └──────────────────┴─→ Rejected
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Position of a candidate in the recruiting/employment lifecycle.
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
pub enum Stage {
  #[default]
  Applied,
  Screening,
  #[serde(rename = "Screening Hold")]
  #[strum(serialize = "Screening Hold")]
  ScreeningHold,
  Interview,
  #[serde(rename = "Interview Hold")]
  #[strum(serialize = "Interview Hold")]
  InterviewHold,
  Offer,
  Onboarded,
  Resigned,
  Rejected,
}

impl Stage {
  pub fn as_str(self) -> &'static str { self.into() }

  /// Stages no workflow step is expected to leave.
  pub fn is_terminal(self) -> bool { matches!(self, Self::Rejected | Self::Resigned) }
}

/// Result recorded on a screening or interview attempt.
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
pub enum Outcome {
  Shortlisted,
  Rejected,
  Hold,
}

impl Outcome {
  pub fn as_str(self) -> &'static str { self.into() }
}

/// Which review table an [`Outcome`] was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Review {
  Screening,
  Interview,
}

/// The stage a candidate moves to after a review with the given outcome.
pub fn stage_after(review: Review, outcome: Outcome) -> Stage {
  match (review, outcome) {
    (Review::Screening, Outcome::Shortlisted) => Stage::Screening,
    (Review::Screening, Outcome::Rejected) => Stage::Rejected,
    (Review::Screening, Outcome::Hold) => Stage::ScreeningHold,
    (Review::Interview, Outcome::Shortlisted) => Stage::Interview,
    (Review::Interview, Outcome::Rejected) => Stage::Rejected,
    (Review::Interview, Outcome::Hold) => Stage::InterviewHold,
  }
}
