//! Mapping rows of an uploaded candidate sheet onto new candidates.
//!
//! Parsing the upload itself is the codec's job (`recruit-csv`); this module
//! only interprets the resulting rows.

use crate::{
  Error, Result,
  record::{DIRECT_HIRE, NewCandidate},
  row::{Row, parse_id},
};

/// Column naming the resume file a row refers to, by its original name.
pub const RESUME_COLUMN: &str = "resume_filename";

/// One candidate read from a bulk upload.
#[derive(Debug, Clone)]
pub struct ImportedCandidate {
  pub requisition_id:  u64,
  pub candidate:       NewCandidate,
  /// Original file name as written in the sheet, matched against the files
  /// uploaded alongside it.
  pub resume_original: Option<String>,
}

/// Interpret every row as one candidate.
///
/// A blank `requisition_id` falls back to `default_requisition` (or
/// [`DIRECT_HIRE`]). A non-numeric requisition, or a row without a name or
/// email, rejects the whole sheet, naming the line it was found on (the
/// header is line 1).
pub fn candidates_from_rows(
  rows: &[Row],
  default_requisition: Option<u64>,
) -> Result<Vec<ImportedCandidate>> {
  rows
    .iter()
    .enumerate()
    .map(|(i, row)| {
      let cell = |c: &str| row.get(c).unwrap_or_default().trim().to_owned();
      let optional = |c: &str| Some(cell(c)).filter(|v| !v.is_empty());

      let requisition_id = match optional("requisition_id") {
        None => default_requisition.unwrap_or(DIRECT_HIRE),
        Some(raw) => parse_id(&raw).ok_or_else(|| {
          Error::Validation(format!(
            "line {}: invalid requisition_id {raw:?}",
            i + 2
          ))
        })?,
      };

      let candidate = NewCandidate {
        name:            cell("name"),
        email:           cell("email"),
        phone:           cell("phone"),
        experience:      cell("experience"),
        skills:          cell("skills"),
        current_salary:  optional("current_salary"),
        expected_salary: optional("expected_salary"),
        notice_period:   optional("notice_period"),
      };
      if let Err(Error::Validation(msg)) = candidate.validate() {
        return Err(Error::Validation(format!("line {}: {msg}", i + 2)));
      }

      Ok(ImportedCandidate {
        requisition_id,
        candidate,
        resume_original: optional(RESUME_COLUMN),
      })
    })
    .collect()
}
