//! [`CsvStore`] — the flat-file implementation of [`TableStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::Arc,
};

use recruit_core::{
  Row, Table,
  row::{self, update_matching},
  store::TableStore,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Tables stored as CSV files in one directory.
///
/// Cloning is cheap; clones share the write lock, so every read-modify-write
/// made through any clone is serialised. Plain reads take no lock: a table
/// file is only ever replaced by rename, so a reader sees either the old or
/// the new contents.
#[derive(Clone)]
pub struct CsvStore {
  dir:  PathBuf,
  lock: Arc<Mutex<()>>,
}

impl CsvStore {
  /// Open a store rooted at `dir`, creating the directory if needed. Table
  /// files are created lazily on first write.
  pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&dir)
      .await
      .map_err(Error::io(&dir))?;
    Ok(Self {
      dir,
      lock: Arc::new(Mutex::new(())),
    })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Path of the file holding `table`.
  pub fn path(&self, table: Table) -> PathBuf {
    self.dir.join(format!("{}.csv", table.name()))
  }

  /// Write a header-only file for every table that has no file yet.
  /// Returns the tables that were created.
  pub async fn init_tables(&self) -> Result<Vec<Table>> {
    let _guard = self.lock.lock().await;
    let mut created = Vec::new();
    for table in Table::ALL {
      let path = self.path(table);
      let exists = tokio::fs::try_exists(&path)
        .await
        .map_err(Error::io(&path))?;
      if !exists {
        self.save(table, &[]).await?;
        created.push(table);
      }
    }
    info!(dir = %self.dir.display(), count = created.len(), "tables initialised");
    Ok(created)
  }

  async fn load(&self, table: Table) -> Result<Vec<Row>> {
    let path = self.path(table);
    let bytes = match tokio::fs::read(&path).await {
      Ok(b) => b,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(Error::io(&path)(e)),
    };
    let text = String::from_utf8(bytes).map_err(|_| Error::Encoding { path })?;
    recruit_csv::parse(&text).map_err(|source| Error::Csv { table, source })
  }

  /// Replace the table file. Callers must hold the write lock.
  async fn save(&self, table: Table, rows: &[Row]) -> Result<()> {
    let path = self.path(table);
    let tmp = self.dir.join(format!(".{}.csv.tmp", table.name()));
    let text = recruit_csv::serialize(rows, table.columns());

    tokio::fs::write(&tmp, text)
      .await
      .map_err(Error::io(&tmp))?;
    tokio::fs::rename(&tmp, &path)
      .await
      .map_err(Error::io(&path))?;

    debug!(%table, rows = rows.len(), "table written");
    Ok(())
  }
}

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for CsvStore {
  type Error = Error;

  async fn read(&self, table: Table) -> Result<Vec<Row>> { self.load(table).await }

  async fn write(&self, table: Table, rows: Vec<Row>) -> Result<()> {
    let _guard = self.lock.lock().await;
    self.save(table, &rows).await
  }

  async fn append(&self, table: Table, row: Row) -> Result<()> {
    let _guard = self.lock.lock().await;
    let mut rows = self.load(table).await?;
    rows.push(row);
    self.save(table, &rows).await
  }

  async fn next_id(&self, table: Table) -> Result<u64> {
    row::next_id(&self.load(table).await?).ok_or(Error::IdsExhausted { table })
  }

  async fn insert(&self, table: Table, mut row: Row) -> Result<u64> {
    let _guard = self.lock.lock().await;
    let mut rows = self.load(table).await?;
    let id = row::next_id(&rows).ok_or(Error::IdsExhausted { table })?;
    row.set_id(id);
    rows.push(row);
    self.save(table, &rows).await?;
    Ok(id)
  }

  async fn insert_all(&self, table: Table, new_rows: Vec<Row>) -> Result<Vec<u64>> {
    if new_rows.is_empty() {
      return Ok(Vec::new());
    }
    let _guard = self.lock.lock().await;
    let mut rows = self.load(table).await?;
    let ids = row::next_id(&rows)
      .and_then(|first| row::id_block(first, new_rows.len()))
      .ok_or(Error::IdsExhausted { table })?;
    for (&id, mut row) in ids.iter().zip(new_rows) {
      row.set_id(id);
      rows.push(row);
    }
    self.save(table, &rows).await?;
    Ok(ids)
  }

  async fn update_field(
    &self,
    table: Table,
    id: u64,
    field: &'static str,
    value: String,
  ) -> Result<usize> {
    self.update_fields(table, id, vec![(field, value)]).await
  }

  async fn update_fields(
    &self,
    table: Table,
    id: u64,
    fields: Vec<(&'static str, String)>,
  ) -> Result<usize> {
    let _guard = self.lock.lock().await;
    let mut rows = self.load(table).await?;
    let matched = update_matching(&mut rows, id, &fields);
    if matched > 0 {
      self.save(table, &rows).await?;
    }
    Ok(matched)
  }
}
