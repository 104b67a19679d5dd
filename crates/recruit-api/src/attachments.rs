//! On-disk storage for uploaded documents.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use recruit_core::attachment::{is_plain_name, stored_name};
use tracing::{info, warn};

/// A flat directory of uploaded files, addressed by stored name.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
  dir: PathBuf,
}

impl AttachmentStore {
  /// Use `dir` for uploads, creating it if needed.
  pub async fn open(dir: impl AsRef<Path>) -> std::io::Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&dir).await?;
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Save an upload under a fresh unique name and return that name.
  ///
  /// Returns `Ok(None)` without writing anything when the upload is not
  /// acceptable (no usable name, or an extension outside the allow-list).
  pub async fn save(&self, original: &str, bytes: &[u8]) -> std::io::Result<Option<String>> {
    let Some(name) = stored_name(original) else {
      warn!(original, "upload skipped: name or extension not allowed");
      return Ok(None);
    };
    tokio::fs::write(self.dir.join(&name), bytes).await?;
    info!(stored = %name, bytes = bytes.len(), "upload saved");
    Ok(Some(name))
  }

  /// Contents of the stored file `name`, or `None` if there is no such file
  /// or the name could point outside the directory.
  pub async fn read(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
    if !is_plain_name(name) {
      return Ok(None);
    }
    match tokio::fs::read(self.dir.join(name)).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }

  /// Delete the stored file `name`. A file that is already gone is not an
  /// error.
  pub async fn remove(&self, name: &str) -> std::io::Result<()> {
    if !is_plain_name(name) {
      return Ok(());
    }
    match tokio::fs::remove_file(self.dir.join(name)).await {
      Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
      _ => Ok(()),
    }
  }
}

/// `Content-Type` for a stored file, by extension.
pub fn content_type(name: &str) -> &'static str {
  let ext = name
    .rsplit_once('.')
    .map(|(_, ext)| ext.to_ascii_lowercase())
    .unwrap_or_default();
  match ext.as_str() {
    "pdf" => "application/pdf",
    "txt" => "text/plain; charset=utf-8",
    "csv" => "text/csv; charset=utf-8",
    "doc" => "application/msword",
    "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    _ => "application/octet-stream",
  }
}
