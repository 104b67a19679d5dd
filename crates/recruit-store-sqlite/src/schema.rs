//! SQL schema for the recruitment SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Every logical table lives here, one row per record, in insertion order.
-- `record_id` mirrors the row's `id` cell when it parses as an integer.
CREATE TABLE IF NOT EXISTS table_rows (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    table_name  TEXT    NOT NULL,
    record_id   INTEGER,
    row_json    TEXT    NOT NULL   -- JSON object of column -> text value
);

CREATE INDEX IF NOT EXISTS table_rows_record_idx ON table_rows(table_name, record_id);

PRAGMA user_version = 1;
";
