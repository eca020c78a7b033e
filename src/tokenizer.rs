//! Lexical analysis: split one expression into whitespace-separated tokens.
//!
//! A parenthesized group is a single token no matter what it contains, so the
//! tokenizer only has to track nesting depth. Everything inside a group is
//! re-tokenized later when the parser descends into it.

use crate::error::{CompileError, CompileResult};

/// Introduces a lambda literal, as in `$fa.f a`.
pub const LAMBDA_MARKER: char = '$';

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// A bare identifier or bound variable.
  Word,
  /// A balanced `( ... )` group.
  Group,
  /// A lambda literal with no whitespace in it.
  Lambda,
}

/// Thin wrapper for lexical information needed by later stages.
#[derive(Debug, Clone)]
pub struct Token {
  pub kind: TokenKind,
  pub loc: usize,
  pub len: usize,
}

impl Token {
  fn new(text: &str, loc: usize) -> Self {
    let kind = if text.starts_with('(') && text.ends_with(')') {
      TokenKind::Group
    } else if text.starts_with(LAMBDA_MARKER) {
      TokenKind::Lambda
    } else {
      TokenKind::Word
    };
    Self {
      kind,
      loc,
      len: text.len(),
    }
  }
}

/// Lex `input` into a flat vector of tokens.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::new();
  let mut open_parens: Vec<usize> = Vec::new();
  let mut start: Option<usize> = None;

  for (i, c) in input.char_indices() {
    match c {
      '(' => {
        start.get_or_insert(i);
        open_parens.push(i);
      }
      ')' => {
        if open_parens.pop().is_none() {
          return Err(CompileError::at(input, i, "unmatched closing parenthesis"));
        }
        let begin = *start.get_or_insert(i);
        if open_parens.is_empty() {
          let end = i + c.len_utf8();
          tokens.push(Token::new(&input[begin..end], begin));
          start = None;
        }
      }
      c if c.is_whitespace() && open_parens.is_empty() => {
        if let Some(begin) = start.take() {
          tokens.push(Token::new(&input[begin..i], begin));
        }
      }
      _ => {
        start.get_or_insert(i);
      }
    }
  }

  if let Some(&loc) = open_parens.last() {
    return Err(CompileError::at(input, loc, "unmatched opening parenthesis"));
  }

  if let Some(begin) = start {
    tokens.push(Token::new(&input[begin..], begin));
  }

  Ok(tokens)
}

/// Return the slice from the source that produced this token.
pub fn token_text<'a>(token: &Token, source: &'a str) -> &'a str {
  let end = token.loc + token.len;
  &source[token.loc..end]
}

/// The trimmed text between a group's outer parentheses.
pub fn group_interior<'a>(token: &Token, source: &'a str) -> &'a str {
  let text = token_text(token, source);
  text[1..text.len() - 1].trim()
}
