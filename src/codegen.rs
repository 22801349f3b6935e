//! Code generation: render the parsed definition as a one-line JavaScript
//! function.
//!
//! The walk is a straight recursion over the tree. Literal and identifier text
//! is copied through untouched.

use tracing::debug;

use crate::ast::{Def, Expr};

/// Emit JavaScript for a definition.
pub fn generate(def: &Def) -> String {
  let mut js = String::new();
  js.push_str("function ");
  js.push_str(&def.name);
  js.push_str(" (");
  js.push_str(&def.arg_names.join(", "));
  js.push_str(") { return ");
  emit_expr(&def.body, &mut js);
  js.push_str(" }");

  debug!(name = %def.name, len = js.len(), "generated function");
  js
}

fn emit_expr(expr: &Expr, js: &mut String) {
  match expr {
    Expr::Integer { value } | Expr::VarRef { value } => js.push_str(value),
    Expr::Call { name, arg_exprs } => {
      js.push_str(name);
      js.push('(');
      for (i, arg) in arg_exprs.iter().enumerate() {
        if i > 0 {
          js.push_str(", ");
        }
        emit_expr(arg, js);
      }
      js.push(')');
    }
  }
}
