//! Recursive-descent parser producing a lambda expression tree.
//!
//! Three entry points mirror the three shapes an expression can take:
//! `parse_expression` for top-level text (identifiers are checked against the
//! registry), `parse_lambda` for `$params.body` literals, and
//! `parse_application` for a lambda body, where tokens are taken verbatim.
//! Parenthesized groups always go back through `parse_expression`.

use snafu::ensure;

use crate::error::{
  CompileResult, EmptyExpressionSnafu, InvalidArgumentSnafu, InvalidParameterSnafu,
  MalformedLambdaSnafu, UnknownIdentifierSnafu,
};
use crate::registry::Registry;
use crate::tokenizer::{LAMBDA_MARKER, Token, TokenKind, group_interior, token_text, tokenize};

/// Expression tree produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  /// A single lowercase letter, usually bound by an enclosing lambda.
  Variable { name: char },
  /// Any other bare token: a combination name, or text passed through as-is.
  Reference { name: String },
  /// One curried parameter.
  Abstraction { param: char, body: Box<Expr> },
  Application { func: Box<Expr>, arg: Box<Expr> },
}

impl Expr {
  pub fn variable(name: char) -> Self {
    Self::Variable { name }
  }

  pub fn reference(name: impl Into<String>) -> Self {
    Self::Reference { name: name.into() }
  }

  pub fn abstraction(param: char, body: Expr) -> Self {
    Self::Abstraction {
      param,
      body: Box::new(body),
    }
  }

  pub fn apply(func: Expr, arg: Expr) -> Self {
    Self::Application {
      func: Box::new(func),
      arg: Box::new(arg),
    }
  }

  /// Number of directly nested abstractions at the root.
  pub fn arity(&self) -> usize {
    let mut node = self;
    let mut count = 0;
    while let Self::Abstraction { body, .. } = node {
      count += 1;
      node = body;
    }
    count
  }

  pub fn is_abstraction(&self) -> bool {
    matches!(self, Self::Abstraction { .. })
  }
}

/// How a bare word is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
  /// First token of a top-level application.
  Head,
  /// Later token of a top-level application.
  Argument,
  /// Token inside a lambda body; taken as written.
  Verbatim,
}

pub struct Parser<'r> {
  registry: &'r Registry,
}

impl<'r> Parser<'r> {
  pub fn new(registry: &'r Registry) -> Self {
    Self { registry }
  }

  /// Parse a top-level expression, validating every bare identifier.
  pub fn parse_expression(&self, text: &str) -> CompileResult<Expr> {
    let text = text.trim();

    if text.starts_with(LAMBDA_MARKER) {
      return self.parse_lambda(text);
    }

    if let Some(inner) = strip_outer_parens(text) {
      return self.parse_expression(inner);
    }

    let tokens = tokenize(text)?;
    let mut rest = tokens.iter();
    let Some(head) = rest.next() else {
      return EmptyExpressionSnafu { expr: text }.fail();
    };

    let head = self.parse_term(head, text, Role::Head)?;
    rest.try_fold(head, |acc, token| {
      let arg = self.parse_term(token, text, Role::Argument)?;
      Ok(Expr::apply(acc, arg))
    })
  }

  /// Parse a `$params.body` literal into nested single-parameter abstractions.
  pub fn parse_lambda(&self, literal: &str) -> CompileResult<Expr> {
    let literal = literal.trim();
    let Some(rest) = literal.strip_prefix(LAMBDA_MARKER) else {
      return self.parse_expression(literal);
    };

    let segments: Vec<&str> = rest.split('.').collect();
    ensure!(
      segments.len() >= 2,
      MalformedLambdaSnafu {
        expr: literal,
        reason: "malformed lambda expression",
      }
    );

    // The last segment always belongs to the body.
    let groups = segments[..segments.len() - 1]
      .iter()
      .take_while(|segment| is_param_group(segment))
      .count();
    ensure!(
      groups > 0,
      MalformedLambdaSnafu {
        expr: literal,
        reason: "no valid parameters in lambda expression",
      }
    );

    let body = segments[groups..].join(".");
    ensure!(
      !body.trim().is_empty(),
      EmptyExpressionSnafu { expr: literal }
    );

    let params: Vec<char> = segments[..groups]
      .iter()
      .flat_map(|group| group.chars())
      .collect();

    let mut node = self.parse_application(&body)?;
    for &param in params.iter().rev() {
      ensure!(param.is_ascii_lowercase(), InvalidParameterSnafu { param });
      node = Expr::abstraction(param, node);
    }
    Ok(node)
  }

  /// Parse a lambda body: juxtaposed terms folded into left-associative calls.
  pub fn parse_application(&self, body: &str) -> CompileResult<Expr> {
    let body = body.trim();
    // A nested literal at the front of a body extends to its end.
    if body.starts_with(LAMBDA_MARKER) {
      return self.parse_lambda(body);
    }

    let tokens = tokenize(body)?;
    let mut rest = tokens.iter();
    let Some(head) = rest.next() else {
      return EmptyExpressionSnafu { expr: body }.fail();
    };

    let head = self.parse_term(head, body, Role::Verbatim)?;
    rest.try_fold(head, |acc, token| {
      let arg = self.parse_term(token, body, Role::Verbatim)?;
      Ok(Expr::apply(acc, arg))
    })
  }

  fn parse_term(&self, token: &Token, source: &str, role: Role) -> CompileResult<Expr> {
    let text = token_text(token, source);
    match token.kind {
      TokenKind::Group => self.parse_expression(group_interior(token, source)),
      TokenKind::Lambda => self.parse_lambda(text),
      TokenKind::Word => {
        if let Some(name) = as_variable(text) {
          return Ok(Expr::variable(name));
        }
        match role {
          Role::Verbatim => Ok(Expr::reference(text)),
          _ if self.registry.contains(text) => Ok(Expr::reference(text)),
          Role::Head => UnknownIdentifierSnafu { name: text }.fail(),
          Role::Argument => InvalidArgumentSnafu { name: text }.fail(),
        }
      }
    }
  }
}

fn is_param_group(segment: &str) -> bool {
  !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_lowercase())
}

fn as_variable(text: &str) -> Option<char> {
  let mut chars = text.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) if c.is_ascii_lowercase() => Some(c),
    _ => None,
  }
}

/// Interior of `text` when its first `(` is closed by its last character.
fn strip_outer_parens(text: &str) -> Option<&str> {
  let inner = text.strip_prefix('(')?.strip_suffix(')')?;
  let mut depth = 1usize;
  for c in inner.chars() {
    match c {
      '(' => depth += 1,
      ')' => {
        depth -= 1;
        if depth == 0 {
          return None;
        }
      }
      _ => {}
    }
  }
  Some(inner.trim())
}
