//! Ties the pipeline to the outside world: reading source text and wrapping
//! the generated function between a prelude and an epilogue line.

use std::io;
use std::path::Path;

use snafu::ResultExt;
use tracing::debug;

use crate::error::{CompileResult, ReadSourceSnafu};

/// Runtime helper the generated code may call.
pub const RUNTIME: &str = "const add = (x, y) => x + y";

/// Invocation printed after the generated function.
pub const TEST: &str = "console.log(f(1, 2))";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
  pub prelude: String,
  pub epilogue: String,
}

impl Default for Driver {
  fn default() -> Self {
    Self::new(RUNTIME, TEST)
  }
}

impl Driver {
  pub fn new(prelude: impl Into<String>, epilogue: impl Into<String>) -> Self {
    Self {
      prelude: prelude.into(),
      epilogue: epilogue.into(),
    }
  }

  /// Compile `source` and return the prelude, the generated function and the
  /// epilogue as three newline-separated lines.
  pub fn compile_source(&self, source: &str) -> CompileResult<String> {
    let generated = crate::compile(source)?;
    Ok([self.prelude.as_str(), generated.as_str(), self.epilogue.as_str()].join("\n"))
  }

  pub fn compile_file(&self, path: &Path) -> CompileResult<String> {
    let source = read_source(path)?;
    self.compile_source(&source)
  }
}

pub fn read_source(path: &Path) -> CompileResult<String> {
  debug!(path = %path.display(), "reading source");
  std::fs::read_to_string(path).context(ReadSourceSnafu { path })
}

pub fn read_stdin() -> CompileResult<String> {
  debug!("reading source from stdin");
  io::read_to_string(io::stdin()).context(ReadSourceSnafu { path: "<stdin>" })
}
