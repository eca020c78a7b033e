//! Line directives, decided once per line from its leading character.

/// Everything a single source line can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
  /// `Name := expr`
  Define { name: &'a str, expr: &'a str },
  /// `#expr`: print as a number.
  PrintNumber(&'a str),
  /// `?expr`: print as a boolean.
  PrintBoolean(&'a str),
  /// `@text`: print a highlighted label; the text is not compiled.
  PrintLabel(&'a str),
  /// `!expr`: print the generated function source.
  PrintSource(&'a str),
  /// Any other expression, emitted as a statement.
  Bare(&'a str),
  Blank,
}

pub const DEFINE_OPERATOR: &str = ":=";

impl<'a> Directive<'a> {
  pub fn parse(line: &'a str) -> Self {
    let line = line.trim();
    let mut chars = line.chars();
    match chars.next() {
      None => Self::Blank,
      Some('#') => Self::PrintNumber(chars.as_str().trim()),
      Some('?') => Self::PrintBoolean(chars.as_str().trim()),
      Some('@') => Self::PrintLabel(chars.as_str().trim()),
      Some('!') => Self::PrintSource(chars.as_str().trim()),
      Some(_) => match line.split_once(DEFINE_OPERATOR) {
        Some((name, expr)) => Self::Define {
          name: name.trim(),
          expr: expr.trim(),
        },
        None => Self::Bare(line),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn recognises_each_prefix() {
    assert_eq!(Directive::parse("#Two"), Directive::PrintNumber("Two"));
    assert_eq!(Directive::parse("? Not True"), Directive::PrintBoolean("Not True"));
    assert_eq!(Directive::parse("@hello world"), Directive::PrintLabel("hello world"));
    assert_eq!(Directive::parse("!One"), Directive::PrintSource("One"));
    assert_eq!(Directive::parse("Succ Zero"), Directive::Bare("Succ Zero"));
    assert_eq!(Directive::parse("   "), Directive::Blank);
  }

  #[test]
  fn definitions_split_at_first_operator() {
    assert_eq!(
      Directive::parse("One := Succ Zero"),
      Directive::Define {
        name: "One",
        expr: "Succ Zero"
      }
    );
    assert_eq!(
      Directive::parse("A := B := C"),
      Directive::Define {
        name: "A",
        expr: "B := C"
      }
    );
  }

  #[test]
  fn prefixes_win_over_definitions() {
    assert_eq!(Directive::parse("@x := y"), Directive::PrintLabel("x := y"));
    assert_eq!(Directive::parse("#A := B"), Directive::PrintNumber("A := B"));
  }
}
