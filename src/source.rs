//! Split a program into logical lines and collect `//` comments.

/// Marker that starts a comment running to end of line.
pub const COMMENT_MARKER: &str = "//";

/// A trimmed code line together with the comments written above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
  /// 1-based line number in the program text.
  pub number: usize,
  /// Code with the comment removed; empty for a comment-only entry.
  pub text: &'a str,
  pub comments: Vec<&'a str>,
}

/// Comments attach to the next line of code. A comment run that is followed
/// by a blank line (or the end of the file) is emitted on its own.
pub fn split_lines(program: &str) -> Vec<SourceLine<'_>> {
  let mut lines = Vec::new();
  let mut pending: Vec<&str> = Vec::new();
  let mut last = 0;

  for (index, raw) in program.lines().enumerate() {
    let number = index + 1;
    last = number;

    let (code, comment) = match raw.find(COMMENT_MARKER) {
      Some(at) => (&raw[..at], Some(raw[at..].trim_end())),
      None => (raw, None),
    };
    let code = code.trim();

    if !code.is_empty() {
      lines.push(SourceLine {
        number,
        text: code,
        comments: std::mem::take(&mut pending),
      });
    } else if comment.is_none() && !pending.is_empty() {
      lines.push(SourceLine {
        number,
        text: "",
        comments: std::mem::take(&mut pending),
      });
    }

    if let Some(comment) = comment {
      pending.push(comment);
    }
  }

  if !pending.is_empty() {
    lines.push(SourceLine {
      number: last,
      text: "",
      comments: pending,
    });
  }

  lines
}
