//! Recursive-descent parser producing a single `def` AST.
//!
//! The grammar is LL(1) apart from expressions, where an identifier needs one
//! extra token of lookahead to tell a call from a variable reference:
//!
//! ```text
//! Def       := 'def' identifier ArgNames Expr 'end'
//! ArgNames  := '(' [ identifier (',' identifier)* ] ')'
//! Expr      := integer | identifier ArgsExprs | identifier
//! ArgsExprs := '(' [ Expr (',' Expr)* ] ')'
//! ```
//!
//! Parsing stops at the `end` keyword; anything after it is left unread.

use snafu::ensure;
use tracing::debug;

use crate::ast::{Def, Expr};
use crate::error::{CompileResult, NestingTooDeepSnafu, ParseSnafu};
use crate::tokenizer::{Token, TokenKind};

/// Deepest call nesting accepted before parsing gives up.
pub const MAX_NESTING: usize = 256;

/// Parse a definition from the front of the token sequence.
pub fn parse(tokens: &[Token<'_>]) -> CompileResult<Def> {
  let mut stream = TokenStream::new(tokens);
  let def = parse_def(&mut stream)?;

  debug!(name = %def.name, args = def.arg_names.len(), "parsed definition");
  Ok(def)
}

fn parse_def(stream: &mut TokenStream) -> CompileResult<Def> {
  stream.consume(TokenKind::Def)?;
  let name = stream.consume(TokenKind::Identifier)?.value;
  let arg_names = parse_arg_names(stream)?;
  let body = parse_expr(stream)?;
  stream.consume(TokenKind::End)?;
  Ok(Def::new(name, arg_names, body))
}

fn parse_arg_names(stream: &mut TokenStream) -> CompileResult<Vec<String>> {
  let mut arg_names = Vec::new();
  stream.consume(TokenKind::OParen)?;

  if stream.peek(TokenKind::Identifier, 0) {
    arg_names.push(stream.consume(TokenKind::Identifier)?.value.to_string());
    while stream.peek(TokenKind::Comma, 0) {
      stream.consume(TokenKind::Comma)?;
      arg_names.push(stream.consume(TokenKind::Identifier)?.value.to_string());
    }
  }

  stream.consume(TokenKind::CParen)?;
  Ok(arg_names)
}

fn parse_expr(stream: &mut TokenStream) -> CompileResult<Expr> {
  if stream.peek(TokenKind::Integer, 0) {
    let value = stream.consume(TokenKind::Integer)?.value;
    Ok(Expr::integer(value))
  } else if stream.peek(TokenKind::Identifier, 0) && stream.peek(TokenKind::OParen, 1) {
    parse_call(stream)
  } else {
    let value = stream.consume(TokenKind::Identifier)?.value;
    Ok(Expr::var_ref(value))
  }
}

fn parse_call(stream: &mut TokenStream) -> CompileResult<Expr> {
  let name_token = stream.consume(TokenKind::Identifier)?;
  ensure!(
    stream.depth < MAX_NESTING,
    NestingTooDeepSnafu {
      limit: MAX_NESTING,
      loc: name_token.loc,
    }
  );
  stream.depth += 1;

  let mut arg_exprs = Vec::new();
  stream.consume(TokenKind::OParen)?;

  if !stream.peek(TokenKind::CParen, 0) {
    arg_exprs.push(parse_expr(stream)?);
    while stream.peek(TokenKind::Comma, 0) {
      stream.consume(TokenKind::Comma)?;
      arg_exprs.push(parse_expr(stream)?);
    }
  }

  stream.consume(TokenKind::CParen)?;
  stream.depth -= 1;
  Ok(Expr::call(name_token.value, arg_exprs))
}

/// Lightweight cursor over the token slice. Tokens are never removed; only
/// `pos` moves. `depth` counts the calls currently being parsed.
struct TokenStream<'a> {
  tokens: &'a [Token<'a>],
  pos: usize,
  depth: usize,
}

impl<'a> TokenStream<'a> {
  fn new(tokens: &'a [Token<'a>]) -> Self {
    Self {
      tokens,
      pos: 0,
      depth: 0,
    }
  }

  fn current(&self) -> Option<&'a Token<'a>> {
    self.tokens.get(self.pos)
  }

  /// Whether the token `offset` places ahead of the cursor has kind `kind`.
  fn peek(&self, kind: TokenKind, offset: usize) -> bool {
    self
      .tokens
      .get(self.pos + offset)
      .is_some_and(|token| token.kind == kind)
  }

  /// Take the current token, failing unless it has kind `expected`.
  fn consume(&mut self, expected: TokenKind) -> CompileResult<&'a Token<'a>> {
    let found = self.current();
    ensure!(
      found.is_some_and(|token| token.kind == expected),
      ParseSnafu {
        expected,
        found: found.map(|token| token.kind),
        loc: found.map_or_else(|| self.end_loc(), |token| token.loc),
      }
    );

    self.pos += 1;
    Ok(&self.tokens[self.pos - 1])
  }

  /// Offset just past the last token, used when the input runs out.
  fn end_loc(&self) -> usize {
    self
      .tokens
      .last()
      .map_or(0, |token| token.loc + token.value.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CompileError;
  use crate::tokenizer::tokenize;

  fn parse_source(source: &str) -> CompileResult<Def> {
    parse(&tokenize(source)?)
  }

  #[test]
  fn parses_variable_body() {
    let def = parse_source("def f(x) x end").unwrap();
    assert_eq!(def, Def::new("f", vec!["x".to_string()], Expr::var_ref("x")));
  }

  #[test]
  fn parses_zero_argument_definition() {
    let def = parse_source("def f() 1 end").unwrap();
    assert!(def.arg_names.is_empty());
    assert_eq!(def.body, Expr::integer("1"));
  }

  #[test]
  fn keeps_argument_order() {
    let def = parse_source("def g(b, a, c) a end").unwrap();
    assert_eq!(def.arg_names, ["b", "a", "c"]);
  }

  #[test]
  fn identifier_before_oparen_is_a_call() {
    let def = parse_source("def f(x, y) add(x, add(y, 1)) end").unwrap();
    assert_eq!(
      def.body,
      Expr::call(
        "add",
        vec![
          Expr::var_ref("x"),
          Expr::call("add", vec![Expr::var_ref("y"), Expr::integer("1")]),
        ]
      )
    );
  }

  #[test]
  fn empty_call_arguments() {
    let def = parse_source("def f() g() end").unwrap();
    assert_eq!(def.body, Expr::call("g", vec![]));
  }

  #[test]
  fn duplicate_argument_names_are_accepted() {
    let def = parse_source("def f(x, x) y end").unwrap();
    assert_eq!(def.arg_names, ["x", "x"]);
  }

  #[test]
  fn truncated_input_reports_end_of_input() {
    let err = parse_source("def f(x").unwrap_err();
    assert!(matches!(
      err,
      CompileError::Parse {
        expected: TokenKind::CParen,
        found: None,
        loc: 7,
      }
    ));
  }

  #[test]
  fn mismatch_reports_expected_and_found() {
    let err = parse_source("def 1() x end").unwrap_err();
    assert_eq!(
      err.to_string(),
      "Expected token type \"identifier\" but got \"integer\""
    );
  }

  #[test]
  fn empty_input_expects_def() {
    let err = parse(&[]).unwrap_err();
    assert!(matches!(
      err,
      CompileError::Parse {
        expected: TokenKind::Def,
        found: None,
        loc: 0,
      }
    ));
  }

  #[test]
  fn tokens_after_end_are_ignored() {
    let def = parse_source("def f() 1 end junk").unwrap();
    assert_eq!(def, Def::new("f", vec![], Expr::integer("1")));

    let def = parse_source("def f() 1 end\ndef g() 2 end").unwrap();
    assert_eq!(def.name, "f");
  }

  fn nested_calls(depth: usize) -> String {
    format!("def f() {}1{} end", "g(".repeat(depth), ")".repeat(depth))
  }

  #[test]
  fn moderate_nesting_parses() {
    let def = parse_source(&nested_calls(64)).unwrap();
    assert_eq!(def.body.call_depth(), 64);
  }

  #[test]
  fn excessive_nesting_is_an_error() {
    let err = parse_source(&nested_calls(20_000)).unwrap_err();
    let limit_loc = "def f() ".len() + 2 * MAX_NESTING;
    assert!(matches!(
      err,
      CompileError::NestingTooDeep { limit: MAX_NESTING, loc } if loc == limit_loc
    ));
  }

  #[test]
  fn trailing_comma_in_arguments_fails() {
    assert!(parse_source("def f(x,) x end").is_err());
    assert!(parse_source("def f(x) g(x,) end").is_err());
  }
}
