//! Naming rules for uploaded files (resumes, signed offers, resignation
//! documents).
//!
//! Files live in one flat directory. Each is stored as
//! `<uuid>_<sanitized original name>` and referenced from its owning record
//! by that exact stored name.

use uuid::Uuid;

/// Extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["txt", "pdf", "doc", "docx", "csv"];

/// Whether `filename` has an extension from [`ALLOWED_EXTENSIONS`].
pub fn is_allowed(filename: &str) -> bool {
  filename
    .rsplit_once('.')
    .is_some_and(|(_, ext)| {
      ALLOWED_EXTENSIONS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    })
}

/// Reduce a client-supplied name to a safe single path component.
///
/// Only the final path segment is kept. ASCII letters, digits, `.`, `-` and
/// `_` pass through; runs of anything else become a single `_`. Leading dots
/// and underscores are stripped so the result is never hidden or relative.
pub fn sanitize(filename: &str) -> String {
  let base = filename
    .rsplit(['/', '\\'])
    .next()
    .unwrap_or_default();

  let mut out = String::with_capacity(base.len());
  for ch in base.chars() {
    if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
      out.push(ch);
    } else if !out.ends_with('_') {
      out.push('_');
    }
  }

  out
    .trim_start_matches(['.', '_'])
    .trim_end_matches('_')
    .to_owned()
}

/// The name an accepted upload is stored under, or `None` when the upload
/// must be skipped (empty name, or extension not allowed).
pub fn stored_name(original: &str) -> Option<String> {
  let clean = sanitize(original);
  if clean.is_empty() || !is_allowed(&clean) {
    return None;
  }
  Some(format!("{}_{clean}", Uuid::new_v4()))
}

/// Whether `name` can only refer to a file directly inside the upload
/// directory.
pub fn is_plain_name(name: &str) -> bool {
  !name.is_empty()
    && name != "."
    && name != ".."
    && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn allow_list() {
    assert!(is_allowed("cv.pdf"));
    assert!(is_allowed("CV.DOCX"));
    assert!(is_allowed("notes.final.txt"));
    assert!(!is_allowed("photo.png"));
    assert!(!is_allowed("pdf"));
    assert!(!is_allowed("script.pdf.exe"));
  }

  #[test]
  fn sanitize_strips_paths_and_oddities() {
    assert_eq!(sanitize("../../etc/passwd"), "passwd");
    assert_eq!(sanitize(r"C:\Users\me\My Resume.pdf"), "My_Resume.pdf");
    assert_eq!(sanitize("  résumé (final).pdf"), "r_sum_final_.pdf");
    assert_eq!(sanitize(".hidden.txt"), "hidden.txt");
    assert_eq!(sanitize("???"), "");
  }

  #[test]
  fn stored_names_are_unique_and_keep_the_original() {
    let a = stored_name("Jane Doe.pdf").unwrap();
    let b = stored_name("Jane Doe.pdf").unwrap();
    assert_ne!(a, b);
    assert!(a.ends_with("_Jane_Doe.pdf"), "{a}");
    assert!(is_plain_name(&a));
  }

  #[test]
  fn disallowed_uploads_are_skipped() {
    assert_eq!(stored_name("virus.exe"), None);
    assert_eq!(stored_name(""), None);
  }

  #[test]
  fn plain_names() {
    assert!(is_plain_name("abc_cv.pdf"));
    assert!(!is_plain_name("../cv.pdf"));
    assert!(!is_plain_name("dir/cv.pdf"));
    assert!(!is_plain_name(".."));
    assert!(!is_plain_name(""));
  }
}
