//! Crate root: wires together the compilation pipeline.
//!
//! Each stage feeds the next and nothing flows backwards:
//! - `tokenizer` performs lexical analysis and produces a flat token vector.
//! - `parser` owns all syntactic knowledge and returns a `def` AST.
//! - `codegen` renders that AST as a line of JavaScript.
//! - `driver` reads sources and adds the surrounding boilerplate lines.
//! - `error` holds the failure type shared by the other modules.

pub mod ast;
pub mod codegen;
pub mod driver;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use ast::{Def, Expr};
pub use driver::Driver;
pub use error::{CompileError, CompileResult};

/// Compile a source string into a single line of JavaScript.
pub fn compile(source: &str) -> CompileResult<String> {
  let tokens = tokenizer::tokenize(source)?;
  let def = parser::parse(&tokens)?;
  tracing::debug!(depth = def.body.call_depth(), "compiling body");
  Ok(codegen::generate(&def))
}
