//! Comma-separated table parser.
//!
//! Pipeline:
//!   raw &str
//!     └─ records()    → Vec<Record> (fields + starting line)
//!          └─ to_rows() → Vec<Row> keyed by the header

use recruit_core::Row;

use crate::error::{Error, Result};

/// One physical record and the line it starts on (1-based).
pub(crate) struct Record {
  pub(crate) line:   usize,
  pub(crate) fields: Vec<String>,
}

#[derive(Clone, Copy)]
enum State {
  /// At the start of a field.
  FieldStart,
  /// Inside an unquoted field.
  Unquoted,
  /// Inside a quoted field.
  Quoted,
  /// Just read a `"` inside a quoted field: either an escaped quote or the
  /// end of the field.
  QuoteInQuoted,
}

/// Split `input` into records. Accepts LF and CRLF line endings, `""` as an
/// escaped quote inside quoted fields, and line breaks inside quoted fields.
/// A leading byte-order mark is ignored. Blank lines are dropped.
pub(crate) fn records(input: &str) -> Result<Vec<Record>> {
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);

  let mut out = Vec::new();
  let mut fields = Vec::new();
  let mut field = String::new();
  let mut state = State::FieldStart;
  let mut line = 1usize;
  let mut record_line = 1usize;

  let mut chars = input.chars().peekable();
  while let Some(c) = chars.next() {
    // Fold CRLF into LF outside quoted content; inside quotes a bare CR is
    // kept verbatim.
    let c = if c == '\r' && chars.peek() == Some(&'\n') && !matches!(state, State::Quoted) {
      chars.next();
      '\n'
    } else {
      c
    };

    match state {
      State::FieldStart | State::Unquoted => match c {
        '"' if matches!(state, State::FieldStart) => state = State::Quoted,
        ',' => {
          fields.push(std::mem::take(&mut field));
          state = State::FieldStart;
        }
        '\n' => {
          // Nothing at all on the line: blank, not one empty field. A quoted
          // `""` takes the other path.
          if !(matches!(state, State::FieldStart) && fields.is_empty()) {
            fields.push(std::mem::take(&mut field));
            out.push(Record {
              line:   record_line,
              fields: std::mem::take(&mut fields),
            });
          }
          line += 1;
          record_line = line;
          state = State::FieldStart;
        }
        _ => {
          field.push(c);
          state = State::Unquoted;
        }
      },
      State::Quoted => match c {
        '"' => state = State::QuoteInQuoted,
        _ => {
          if c == '\n' {
            line += 1;
          }
          field.push(c);
        }
      },
      State::QuoteInQuoted => match c {
        '"' => {
          field.push('"');
          state = State::Quoted;
        }
        ',' => {
          fields.push(std::mem::take(&mut field));
          state = State::FieldStart;
        }
        '\n' => {
          fields.push(std::mem::take(&mut field));
          out.push(Record {
            line:   record_line,
            fields: std::mem::take(&mut fields),
          });
          line += 1;
          record_line = line;
          state = State::FieldStart;
        }
        _ => return Err(Error::TrailingAfterQuote { line }),
      },
    }
  }

  match state {
    State::Quoted => return Err(Error::UnterminatedQuote { line: record_line }),
    State::FieldStart if fields.is_empty() => {}
    _ => {
      fields.push(field);
      out.push(Record {
        line: record_line,
        fields,
      });
    }
  }

  Ok(out)
}

/// Key every data record by the header record.
///
/// Short records are padded with empty cells. Header columns with an empty
/// name are dropped along with their cells.
pub(crate) fn to_rows(mut records: Vec<Record>) -> Result<Vec<Row>> {
  if records.is_empty() {
    return Ok(Vec::new());
  }
  let header = records.remove(0).fields;

  let mut seen = std::collections::HashSet::new();
  for name in header.iter().filter(|n| !n.is_empty()) {
    if !seen.insert(name.as_str()) {
      return Err(Error::DuplicateColumn(name.clone()));
    }
  }

  records
    .into_iter()
    .map(|record| {
      if record.fields.len() > header.len() {
        return Err(Error::RaggedRow {
          line:     record.line,
          expected: header.len(),
          found:    record.fields.len(),
        });
      }
      let mut cells = record.fields.into_iter();
      Ok(
        header
          .iter()
          .map(|name| (name, cells.next().unwrap_or_default()))
          .filter(|(name, _)| !name.is_empty())
          .map(|(name, value)| (name.clone(), value))
          .collect(),
      )
    })
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
