//! HTTP server assembly for the recruitment tracker.
//!
//! Holds the runtime configuration and wraps the [`recruit_api`] router in
//! the server-wide layers (request tracing, upload size limit).

use std::path::PathBuf;

use axum::{Router, extract::DefaultBodyLimit};
use recruit_api::AppState;
use recruit_core::store::TableStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`TableStore`] implementation holds the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// One CSV file per table under `data_dir`.
  #[default]
  Csv,
  /// A single SQLite database at `sqlite_path`.
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `RECRUIT_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub backend:          Backend,
  pub data_dir:         PathBuf,
  pub sqlite_path:      PathBuf,
  pub upload_dir:       PathBuf,
  pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "0.0.0.0".to_string(),
      port:             5000,
      backend:          Backend::Csv,
      data_dir:         PathBuf::from("csv_templates"),
      sqlite_path:      PathBuf::from("recruit.db"),
      upload_dir:       PathBuf::from("uploads"),
      max_upload_bytes: 16 * 1024 * 1024,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the served application: the API router plus tracing and the
/// request body limit.
pub fn router<S>(state: AppState<S>, config: &ServerConfig) -> Router
where
  S: TableStore + 'static,
{
  recruit_api::api_router(state)
    .layer(DefaultBodyLimit::max(config.max_upload_bytes))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
