//! Comma-separated table serializer.
//!
//! Writes a header line followed by one line per row, LF-terminated. Fields
//! are quoted only when they contain a comma, a quote or a line break.

use recruit_core::Row;

fn needs_quoting(field: &str) -> bool { field.contains([',', '"', '\n', '\r']) }

fn push_field(out: &mut String, field: &str) {
  if needs_quoting(field) {
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
  } else {
    out.push_str(field);
  }
}

fn push_line<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
  let start = out.len();
  let mut count = 0;
  for (i, field) in fields.into_iter().enumerate() {
    if i > 0 {
      out.push(',');
    }
    push_field(out, field);
    count += 1;
  }
  // A lone empty field would read back as a blank line.
  if count == 1 && out.len() == start {
    out.push_str("\"\"");
  }
  out.push('\n');
}

/// Render `rows` under the header `columns`. A row without a value for some
/// column gets an empty cell; values for columns not listed are not written.
pub(crate) fn serialize(rows: &[Row], columns: &[String]) -> String {
  let mut out = String::new();
  push_line(&mut out, columns.iter().map(String::as_str));
  for row in rows {
    push_line(
      &mut out,
      columns.iter().map(|c| row.get(c).unwrap_or_default()),
    );
  }
  out
}
