//! Syntax tree produced by the parser and consumed by the code generator.
//!
//! Literal and identifier text is stored exactly as it appeared in the source;
//! nothing here reinterprets it.

/// The single top-level `def ... end` construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Def {
  pub name: String,
  pub arg_names: Vec<String>,
  pub body: Expr,
}

impl Def {
  pub fn new(name: impl Into<String>, arg_names: Vec<String>, body: Expr) -> Self {
    Self {
      name: name.into(),
      arg_names,
      body,
    }
  }
}

/// Expression tree produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  Integer { value: String },
  Call { name: String, arg_exprs: Vec<Expr> },
  VarRef { value: String },
}

impl Expr {
  pub fn integer(value: impl Into<String>) -> Self {
    Self::Integer {
      value: value.into(),
    }
  }

  pub fn call(name: impl Into<String>, arg_exprs: Vec<Expr>) -> Self {
    Self::Call {
      name: name.into(),
      arg_exprs,
    }
  }

  pub fn var_ref(value: impl Into<String>) -> Self {
    Self::VarRef {
      value: value.into(),
    }
  }

  /// How many calls deep the expression nests. Leaves are 0.
  pub fn call_depth(&self) -> usize {
    match self {
      Self::Integer { .. } | Self::VarRef { .. } => 0,
      Self::Call { arg_exprs, .. } => {
        1 + arg_exprs.iter().map(Expr::call_depth).max().unwrap_or(0)
      }
    }
  }
}
