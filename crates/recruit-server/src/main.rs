//! Recruitment tracker server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) and `RECRUIT_*`
//! environment variables, opens the configured table backend and serves the
//! HTTP API.
//!
//! # Preparing storage
//!
//! ```
//! cargo run -p recruit-server --bin server -- --init-tables
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use recruit_api::{AppState, AttachmentStore};
use recruit_core::store::TableStore;
use recruit_server::{Backend, ServerConfig};
use recruit_store_csv::CsvStore;
use recruit_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Recruitment tracker server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Prepare the configured backend's tables and exit.
  #[arg(long)]
  init_tables: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("RECRUIT").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  match server_cfg.backend {
    Backend::Csv => {
      let data_dir = expand_tilde(&server_cfg.data_dir);
      let store = CsvStore::open(&data_dir)
        .await
        .with_context(|| format!("failed to open table directory {data_dir:?}"))?;

      if cli.init_tables {
        let created = store
          .init_tables()
          .await
          .context("failed to initialise tables")?;
        tracing::info!(dir = ?data_dir, created = created.len(), "tables ready");
        return Ok(());
      }
      serve(store, &server_cfg).await
    }
    Backend::Sqlite => {
      let db_path = expand_tilde(&server_cfg.sqlite_path);
      if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
          .await
          .with_context(|| format!("failed to create {parent:?}"))?;
      }
      let store = SqliteStore::open(&db_path)
        .await
        .with_context(|| format!("failed to open store at {db_path:?}"))?;

      if cli.init_tables {
        tracing::info!(path = ?db_path, "database ready");
        return Ok(());
      }
      serve(store, &server_cfg).await
    }
  }
}

async fn serve<S>(store: S, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: TableStore + 'static,
{
  let upload_dir = expand_tilde(&server_cfg.upload_dir);
  let attachments = AttachmentStore::open(&upload_dir)
    .await
    .with_context(|| format!("failed to open upload directory {upload_dir:?}"))?;

  let state = AppState::new(Arc::new(store), attachments);
  let app = recruit_server::router(state, server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
