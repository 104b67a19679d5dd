//! [`SqliteStore`] — the SQLite implementation of [`TableStore`].

use std::path::Path;

use recruit_core::{
  Row, Table,
  row::{self, ID},
  store::TableStore,
};
use rusqlite::{Connection, TransactionBehavior};
use tracing::debug;

use crate::{Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Record tables backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Helpers (run on the connection thread) ──────────────────────────────────

fn boxed(e: impl Into<crate::Error>) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e.into()))
}

fn exhausted(table: &str) -> tokio_rusqlite::Error {
  boxed(crate::Error::IdsExhausted {
    table: table.to_owned(),
  })
}

fn encode_row(row: &Row) -> tokio_rusqlite::Result<String> {
  serde_json::to_string(row).map_err(boxed)
}

fn next_id_in(conn: &Connection, table: &str) -> tokio_rusqlite::Result<u64> {
  let max: i64 = conn.query_row(
    "SELECT COALESCE(MAX(record_id), 0) FROM table_rows WHERE table_name = ?1",
    rusqlite::params![table],
    |r| r.get(0),
  )?;
  row::id_after(u64::try_from(max).unwrap_or(0)).ok_or_else(|| exhausted(table))
}

fn insert_row(conn: &Connection, table: &str, row: &Row) -> tokio_rusqlite::Result<()> {
  let json = encode_row(row)?;
  let record_id = row
    .id()
    .map(|id| i64::try_from(id).map_err(|_| boxed(crate::Error::IdOutOfRange(id))))
    .transpose()?;
  conn.execute(
    "INSERT INTO table_rows (table_name, record_id, row_json) VALUES (?1, ?2, ?3)",
    rusqlite::params![table, record_id, json],
  )?;
  Ok(())
}

/// Give `rows` consecutive ids after the current maximum and append them.
fn insert_with_ids(
  conn: &mut Connection,
  table: &str,
  rows: Vec<Row>,
) -> tokio_rusqlite::Result<Vec<u64>> {
  let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
  let ids = row::id_block(next_id_in(&tx, table)?, rows.len()).ok_or_else(|| exhausted(table))?;
  for (&id, mut row) in ids.iter().zip(rows) {
    row.set_id(id);
    insert_row(&tx, table, &row)?;
  }
  tx.commit()?;
  Ok(ids)
}

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for SqliteStore {
  type Error = crate::Error;

  async fn read(&self, table: Table) -> Result<Vec<Row>> {
    let name = table.name();
    let raws: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT row_json FROM table_rows WHERE table_name = ?1 ORDER BY seq",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![name], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .iter()
      .map(|raw| serde_json::from_str::<Row>(raw).map_err(crate::Error::from))
      .collect()
  }

  async fn write(&self, table: Table, rows: Vec<Row>) -> Result<()> {
    let name = table.name();
    let count = rows.len();
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
          "DELETE FROM table_rows WHERE table_name = ?1",
          rusqlite::params![name],
        )?;
        for row in &rows {
          insert_row(&tx, name, row)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    debug!(%table, rows = count, "table replaced");
    Ok(())
  }

  async fn append(&self, table: Table, row: Row) -> Result<()> {
    let name = table.name();
    self
      .conn
      .call(move |conn| insert_row(conn, name, &row))
      .await?;
    Ok(())
  }

  async fn next_id(&self, table: Table) -> Result<u64> {
    let name = table.name();
    let id = self
      .conn
      .call(move |conn| next_id_in(conn, name))
      .await?;
    Ok(id)
  }

  async fn insert(&self, table: Table, row: Row) -> Result<u64> {
    let name = table.name();
    let ids = self
      .conn
      .call(move |conn| insert_with_ids(conn, name, vec![row]))
      .await?;
    // One row in, one id out.
    Ok(ids.into_iter().next().unwrap_or_default())
  }

  async fn insert_all(&self, table: Table, rows: Vec<Row>) -> Result<Vec<u64>> {
    if rows.is_empty() {
      return Ok(Vec::new());
    }
    let name = table.name();
    let ids = self
      .conn
      .call(move |conn| insert_with_ids(conn, name, rows))
      .await?;
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
    // No stored row can carry an id outside the INTEGER range.
    let Ok(key) = i64::try_from(id) else {
      return Ok(0);
    };
    let name = table.name();
    let matched = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut matched = 0;
        for (field, value) in &fields {
          let path = format!("$.\"{field}\"");
          matched = tx.execute(
            "UPDATE table_rows SET row_json = json_set(row_json, ?3, ?4)
             WHERE table_name = ?1 AND record_id = ?2",
            rusqlite::params![name, key, path, value],
          )?;
        }
        if let Some((_, value)) = fields.iter().find(|(field, _)| *field == ID) {
          let new_id = row::parse_id(value).and_then(|v| i64::try_from(v).ok());
          tx.execute(
            "UPDATE table_rows SET record_id = ?3 WHERE table_name = ?1 AND record_id = ?2",
            rusqlite::params![name, key, new_id],
          )?;
        }
        tx.commit()?;
        Ok(matched)
      })
      .await?;
    Ok(matched)
  }
}
