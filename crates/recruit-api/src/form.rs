//! Buffered `multipart/form-data` bodies.
//!
//! Forms that carry documents (new candidates, bulk uploads, signed offers,
//! resignations) arrive as multipart. [`Form`] drains the whole body into
//! text fields and file parts so handlers can validate before anything is
//! written.

use std::{collections::HashMap, str::FromStr};

use axum::extract::{
  Multipart,
  multipart::{MultipartError, MultipartRejection},
};
use bytes::Bytes;
use recruit_core::record::decode_flag;

use crate::error::ApiError;

/// One uploaded file part.
#[derive(Debug, Clone)]
pub struct Upload {
  pub file_name: String,
  pub bytes:     Bytes,
}

#[derive(Debug, Default)]
pub struct Form {
  fields: HashMap<String, String>,
  files:  HashMap<String, Vec<Upload>>,
}

fn bad_part(e: MultipartError) -> ApiError { ApiError::BadRequest(e.body_text()) }

impl Form {
  /// Drain `multipart`. File parts submitted with an empty file name (an
  /// untouched file input) are dropped.
  pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, ApiError> {
    let mut multipart = multipart?;
    let mut form = Self::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_part)? {
      let name = field.name().unwrap_or_default().to_owned();
      match field.file_name().map(str::to_owned) {
        Some(file_name) => {
          let bytes = field.bytes().await.map_err(bad_part)?;
          if !file_name.is_empty() {
            form
              .files
              .entry(name)
              .or_default()
              .push(Upload { file_name, bytes });
          }
        }
        None => {
          let text = field.text().await.map_err(bad_part)?;
          form.fields.insert(name, text);
        }
      }
    }

    Ok(form)
  }

  /// Text field `name`; empty if absent.
  pub fn text(&self, name: &str) -> String {
    self.fields.get(name).cloned().unwrap_or_default()
  }

  /// Text field `name`, or `None` if absent or blank.
  pub fn optional(&self, name: &str) -> Option<String> {
    self
      .fields
      .get(name)
      .map(|v| v.trim())
      .filter(|v| !v.is_empty())
      .map(str::to_owned)
  }

  pub fn required(&self, name: &str) -> Result<String, ApiError> {
    self
      .optional(name)
      .ok_or_else(|| ApiError::BadRequest(format!("{name} is required")))
  }

  pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, ApiError> {
    let raw = self.required(name)?;
    raw
      .parse()
      .map_err(|_| ApiError::BadRequest(format!("invalid {name}: {raw:?}")))
  }

  /// Like [`Form::parse`], but a missing or blank field yields `default`.
  pub fn parse_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, ApiError> {
    match self.optional(name) {
      None => Ok(default),
      Some(_) => self.parse(name),
    }
  }

  /// Checkbox semantics: absent means unchecked.
  pub fn flag(&self, name: &str) -> bool { self.fields.get(name).is_some_and(|v| decode_flag(v)) }

  /// First file submitted under `name`.
  pub fn file(&self, name: &str) -> Option<&Upload> {
    self.files.get(name).and_then(|f| f.first())
  }

  /// Every file submitted under `name`.
  pub fn files(&self, name: &str) -> &[Upload] {
    self.files.get(name).map(Vec::as_slice).unwrap_or_default()
  }
}
