//! SurfGraph expression evaluator.
//!
//! Formulas are lexed and parsed into an [`Expr`] tree restricted to numeric
//! literals, identifiers, `+ - * / **`, unary signs, parentheses and function
//! calls. The tree is then walked elementwise over `ndarray` arrays, resolving
//! names only against a [`Namespace`] built from a fixed builtin table plus
//! the caller's bound variables.

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod namespace;
pub mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{EvalError, Result};
pub use eval::{evaluate, Expression};
pub use namespace::{Builtin, Namespace};
