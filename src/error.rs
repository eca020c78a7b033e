//! Error type shared by every stage of the compiler.
//!
//! Positional syntax errors keep the caret style: the offending expression is
//! echoed in quotes with a marker under the byte that broke it. Everything
//! else is a one-line message naming the token at fault.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
  #[snafu(display("{expr_line}\n{marker} {message}"))]
  Syntax {
    expr_line: String,
    marker: String,
    message: String,
  },

  #[snafu(display("{reason}: {expr}"))]
  MalformedLambda { expr: String, reason: &'static str },

  #[snafu(display("parameter '{param}' must be a single lowercase letter"))]
  InvalidParameter { param: char },

  #[snafu(display("unknown combination or invalid variable '{name}'"))]
  UnknownIdentifier { name: String },

  #[snafu(display("invalid argument '{name}'"))]
  InvalidArgument { name: String },

  #[snafu(display("combination '{name}' must start with a capital letter"))]
  InvalidDefinitionName { name: String },

  #[snafu(display("empty expression: '{expr}'"))]
  EmptyExpression { expr: String },

  /// A failure raised while compiling one line of a program.
  #[snafu(display("line {line}: {source}"))]
  Line {
    line: usize,
    #[snafu(source(from(CompileError, Box::new)))]
    source: Box<CompileError>,
  },
}

/// Coarse classification of a [`CompileError`], independent of line context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Syntax,
  MalformedLambda,
  InvalidParameter,
  UnknownIdentifier,
  InvalidDefinitionName,
  EmptyExpression,
}

impl CompileError {
  /// Construct a syntax error anchored at a byte offset in `expr`.
  pub fn at(expr: &str, loc: usize, message: impl Into<String>) -> Self {
    let expr_line = format!("'{expr}'");
    let safe_loc = loc.min(expr.len());
    let char_offset = expr[..safe_loc].chars().count() + 1; // opening quote
    let marker = format!("{}^", " ".repeat(char_offset));
    Self::Syntax {
      expr_line,
      marker,
      message: message.into(),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Syntax { .. } => ErrorKind::Syntax,
      Self::MalformedLambda { .. } => ErrorKind::MalformedLambda,
      Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
      Self::UnknownIdentifier { .. } | Self::InvalidArgument { .. } => ErrorKind::UnknownIdentifier,
      Self::InvalidDefinitionName { .. } => ErrorKind::InvalidDefinitionName,
      Self::EmptyExpression { .. } => ErrorKind::EmptyExpression,
      Self::Line { source, .. } => source.kind(),
    }
  }

  /// Source line the error was raised on, when it came through the dispatcher.
  pub fn line(&self) -> Option<usize> {
    match self {
      Self::Line { line, .. } => Some(*line),
      _ => None,
    }
  }
}
