//! Lexical analysis: turns the raw source into a vector of tokens.
//!
//! Matching is priority based rather than longest-match. Each position is
//! offered to an ordered table of matchers and the first one that accepts
//! wins, which is why the keywords sit ahead of the general identifier rule.

use std::fmt;

use snafu::OptionExt;
use tracing::debug;

use crate::error::{CompileResult, TokenizeSnafu};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Def,
  End,
  Identifier,
  Integer,
  OParen,
  CParen,
  Comma,
}

impl TokenKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Def => "def",
      Self::End => "end",
      Self::Identifier => "identifier",
      Self::Integer => "integer",
      Self::OParen => "oparen",
      Self::CParen => "cparen",
      Self::Comma => "comma",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A classified slice of the source. `value` is the exact matched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub value: &'a str,
  pub loc: usize,
}

impl<'a> Token<'a> {
  pub fn new(kind: TokenKind, value: &'a str, loc: usize) -> Self {
    Self { kind, value, loc }
  }
}

impl fmt::Display for Token<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.kind, self.value)
  }
}

/// Returns the byte length of the match anchored at the start of the input.
type Matcher = fn(&str) -> Option<usize>;

const MATCHERS: [(TokenKind, Matcher); 7] = [
  (TokenKind::Def, |rest: &str| keyword(rest, "def")),
  (TokenKind::End, |rest: &str| keyword(rest, "end")),
  (TokenKind::Identifier, |rest: &str| {
    word(rest, |b| b.is_ascii_alphabetic())
  }),
  (TokenKind::Integer, |rest: &str| word(rest, |b| b.is_ascii_digit())),
  (TokenKind::OParen, |rest: &str| punct(rest, '(')),
  (TokenKind::CParen, |rest: &str| punct(rest, ')')),
  (TokenKind::Comma, |rest: &str| punct(rest, ',')),
];

/// Lex the whole input. Fails on the first position no matcher accepts.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token<'_>>> {
  let mut tokens = Vec::new();
  let mut i = 0;

  loop {
    let rest = &input[i..];
    let trimmed = rest.trim_start();
    i += rest.len() - trimmed.len();
    if trimmed.is_empty() {
      break;
    }

    let (kind, len) = MATCHERS
      .iter()
      .find_map(|(kind, matcher)| matcher(trimmed).map(|len| (*kind, len)))
      .context(TokenizeSnafu {
        remainder: trimmed,
        loc: i,
      })?;

    tokens.push(Token::new(kind, &trimmed[..len], i));
    i += len;
  }

  debug!(count = tokens.len(), "tokenized source");
  Ok(tokens)
}

/// Human-friendly kind name used in diagnostics; `None` is the end of input.
pub fn describe_kind(kind: Option<TokenKind>) -> &'static str {
  kind.map_or("end of input", TokenKind::as_str)
}

fn keyword(rest: &str, kw: &str) -> Option<usize> {
  (rest.starts_with(kw) && !continues_word(&rest[kw.len()..])).then_some(kw.len())
}

/// A run of bytes accepted by `accept`, bounded by word boundaries on both sides.
fn word(rest: &str, accept: fn(u8) -> bool) -> Option<usize> {
  let len = rest.bytes().take_while(|b| accept(*b)).count();
  (len > 0 && !continues_word(&rest[len..])).then_some(len)
}

fn punct(rest: &str, c: char) -> Option<usize> {
  rest.starts_with(c).then_some(c.len_utf8())
}

fn continues_word(rest: &str) -> bool {
  rest
    .chars()
    .next()
    .is_some_and(|c| c.is_alphanumeric() || c == '_')
}
