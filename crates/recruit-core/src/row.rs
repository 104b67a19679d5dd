//! [`Row`] — one untyped record: column name to string value.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

/// The column every table is keyed by.
pub const ID: &str = "id";

/// Highest id a store hands out. Ids must also fit an SQLite `INTEGER`.
pub const MAX_ID: u64 = i64::MAX as u64;

/// A single table row. All values are strings; typing is reconstructed by
/// [`crate::record::Record::from_row`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, String>);

impl Row {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, column: &str) -> Option<&str> {
    self.0.get(column).map(String::as_str)
  }

  /// Insert or overwrite a single column.
  pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
    self.0.insert(column.into(), value.into());
  }

  /// Builder form of [`Row::set`].
  pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
    self.set(column, value);
    self
  }

  /// The row's `id`, if present and numeric.
  pub fn id(&self) -> Option<u64> { self.get(ID).and_then(parse_id) }

  pub fn set_id(&mut self, id: u64) { self.set(ID, id.to_string()); }

  pub fn columns(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> btree_map::Iter<'_, String, String> { self.0.iter() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(
      iter
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    )
  }
}

impl<'a> IntoIterator for &'a Row {
  type Item = (&'a String, &'a String);
  type IntoIter = btree_map::Iter<'a, String, String>;

  fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Parse an id cell. Accepts a trailing `.0`, which spreadsheet tools write
/// when a numeric column has blanks in it.
pub fn parse_id(s: &str) -> Option<u64> {
  let s = s.trim();
  let s = s.strip_suffix(".0").unwrap_or(s);
  s.parse().ok()
}

/// `1` for an empty table or one without ids, otherwise `max(id) + 1`.
/// `None` once the table holds an id at or past [`MAX_ID`].
pub fn next_id(rows: &[Row]) -> Option<u64> {
  match rows.iter().filter_map(Row::id).max() {
    Some(max) => id_after(max),
    None => Some(1),
  }
}

/// The id following `max`, or `None` past [`MAX_ID`].
pub fn id_after(max: u64) -> Option<u64> { max.checked_add(1).filter(|id| *id <= MAX_ID) }

/// `count` consecutive ids starting at `first`, or `None` if the block would
/// run past [`MAX_ID`].
pub fn id_block(first: u64, count: usize) -> Option<Vec<u64>> {
  (0..count as u64)
    .map(|i| first.checked_add(i).filter(|id| *id <= MAX_ID))
    .collect()
}

/// Apply every `(column, value)` in `fields` to each row whose id is `id`.
/// Returns the number of rows touched.
pub fn update_matching(rows: &mut [Row], id: u64, fields: &[(&str, String)]) -> usize {
  let mut matched = 0;
  for row in rows.iter_mut().filter(|r| r.id() == Some(id)) {
    for (column, value) in fields {
      row.set(*column, value.as_str());
    }
    matched += 1;
  }
  matched
}
