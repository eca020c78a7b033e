//! Code generation: lower expression trees into JavaScript arrow functions and
//! assemble the final program text.
//!
//! Every abstraction becomes a one-argument arrow function and every
//! application a one-argument call, so `$fa.f a` turns into
//! `(f) => (a) => f(a)`. An arrow function standing in callee position is
//! parenthesized, otherwise the call would bind to its body.

use chrono::NaiveDate;

use crate::parser::Expr;

/// Decodes a Church numeral by counting applications of an increment.
pub const TO_NUMBER_HELPER: &str = "function toNumber(church) {
  return church(n => n + 1)(0);
}";

/// Decodes a Church boolean by selecting between two labels.
pub const TO_BOOLEAN_HELPER: &str = "function toBoolean(church) {
  return church(\"True\")(\"False\");
}";

/// Emit JavaScript for a single expression.
pub fn generate(expr: &Expr) -> String {
  let mut js = String::new();
  emit_expr(expr, &mut js);
  js
}

fn emit_expr(node: &Expr, js: &mut String) {
  match node {
    Expr::Variable { name } => js.push(*name),
    Expr::Reference { name } => js.push_str(name),
    Expr::Abstraction { param, body } => {
      js.push_str(&format!("({param}) => "));
      emit_expr(body, js);
    }
    Expr::Application { func, arg } => {
      if func.is_abstraction() {
        js.push('(');
        emit_expr(func, js);
        js.push(')');
      } else {
        emit_expr(func, js);
      }
      js.push('(');
      emit_expr(arg, js);
      js.push(')');
    }
  }
}

/// One line of generated output, tagged by what produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
  Comment(String),
  Definition(String),
  Statement(String),
}

impl OutputLine {
  fn text(&self) -> &str {
    match self {
      Self::Comment(text) | Self::Definition(text) | Self::Statement(text) => text,
    }
  }
}

/// Output buffer for one compiled program.
#[derive(Debug, Clone)]
pub struct Program {
  compiled_on: NaiveDate,
  lines: Vec<OutputLine>,
}

impl Program {
  pub fn new(compiled_on: NaiveDate) -> Self {
    Self {
      compiled_on,
      lines: Vec::new(),
    }
  }

  pub fn push(&mut self, line: OutputLine) {
    self.lines.push(line);
  }

  pub fn lines(&self) -> &[OutputLine] {
    &self.lines
  }

  pub fn header(&self) -> String {
    format!(
      "// Compiled on {} from λ calculus",
      self.compiled_on.format("%B %-d, %Y")
    )
  }

  /// Join everything into program text. The runtime helpers land right before
  /// the first statement, or at the end when there is none.
  pub fn render(&self) -> String {
    let header = self.header();
    let mut out: Vec<&str> = Vec::with_capacity(self.lines.len() + 3);
    out.push(&header);

    let mut helpers_emitted = false;
    for line in &self.lines {
      if !helpers_emitted && matches!(line, OutputLine::Statement(_)) {
        out.push(TO_NUMBER_HELPER);
        out.push(TO_BOOLEAN_HELPER);
        helpers_emitted = true;
      }
      out.push(line.text());
    }
    if !helpers_emitted {
      out.push(TO_NUMBER_HELPER);
      out.push(TO_BOOLEAN_HELPER);
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
  }
}
