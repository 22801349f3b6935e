//! Shared error utilities used across the compilation pipeline.
//!
//! Every stage fails fast: the first error aborts compilation and nothing is
//! emitted. Tokenizer and parser errors remember the byte offset they were
//! raised at so the driver can point at the offending character with a caret.

use std::io;
use std::path::PathBuf;

use snafu::Snafu;

use crate::tokenizer::{TokenKind, describe_kind};

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
  /// No token pattern matched at the cursor.
  #[snafu(display("Couldn't match token on {remainder}"))]
  Tokenize { remainder: String, loc: usize },

  /// The parser expected one kind of token and found another. A `found` of
  /// `None` means the tokens ran out.
  #[snafu(display(
    "Expected token type \"{expected}\" but got \"{}\"",
    describe_kind(*found)
  ))]
  Parse {
    expected: TokenKind,
    found: Option<TokenKind>,
    loc: usize,
  },

  /// Calls nested deeper than the parser is willing to recurse.
  #[snafu(display("Expression nesting exceeds {limit} levels"))]
  NestingTooDeep { limit: usize, loc: usize },

  #[snafu(display("failed to read {}: {source}", path.display()))]
  ReadSource { path: PathBuf, source: io::Error },
}

impl CompileError {
  /// Byte offset in the source the error points at, if it has one.
  pub fn loc(&self) -> Option<usize> {
    match self {
      Self::Tokenize { loc, .. }
      | Self::Parse { loc, .. }
      | Self::NestingTooDeep { loc, .. } => Some(*loc),
      Self::ReadSource { .. } => None,
    }
  }

  /// Render the error against the source it was raised on: the offending line
  /// quoted, with a caret under the failing column.
  pub fn report(&self, source: &str) -> String {
    let Some(loc) = self.loc() else {
      return self.to_string();
    };

    let safe_loc = loc.min(source.len());
    let line_start = source[..safe_loc].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[safe_loc..]
      .find('\n')
      .map_or(source.len(), |i| safe_loc + i);
    let line_no = source[..line_start].matches('\n').count() + 1;
    let column = source[line_start..safe_loc].chars().count() + 1;

    let expr_line = format!("'{}'", source[line_start..line_end].trim_end_matches('\r'));
    let marker = format!("{}^", " ".repeat(column)); // account for opening quote
    format!("{line_no}:{column}\n{expr_line}\n{marker} {self}")
  }
}
