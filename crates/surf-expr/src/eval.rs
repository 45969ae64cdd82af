//! Tree-walking evaluation over `ndarray` arrays.

use std::collections::BTreeSet;

use ndarray::{arr0, ArrayD};
use surf_math::zip_broadcast;

use crate::ast::{Expr, UnaryOp};
use crate::error::{EvalError, Result};
use crate::namespace::{Builtin, Entry, Namespace};
use crate::parser;

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    tree: Expr,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self> {
        let tree = parser::parse(source)?;
        Ok(Self {
            source: source.to_owned(),
            tree,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// Every name referenced, variables and functions alike.
    pub fn identifiers(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.tree.collect_identifiers(&mut names);
        names
    }

    /// Check that every name resolves in `ns` and is used the way its
    /// entry allows, without computing anything. Errors are reported for
    /// the leftmost offending name.
    pub fn check(&self, ns: &Namespace) -> Result<()> {
        check_node(&self.tree, ns)
    }

    /// Evaluate elementwise against `ns`.
    ///
    /// The result has the broadcast shape of the variables the expression
    /// uses; an expression that uses none yields a 0-d array. Division by
    /// zero and out-of-domain arguments produce `inf` or `NaN` entries.
    pub fn evaluate(&self, ns: &Namespace) -> Result<ArrayD<f64>> {
        self.check(ns)?;
        let value = eval_node(&self.tree, ns)?;
        log::trace!(
            "evaluated '{}' ({} nodes) to shape {:?}",
            self.source,
            self.tree.node_count(),
            value.shape()
        );
        Ok(value)
    }
}

/// Parse and evaluate `expression` against `ns` in one step.
pub fn evaluate(expression: &str, ns: &Namespace) -> Result<ArrayD<f64>> {
    Expression::parse(expression)?.evaluate(ns)
}

fn check_node(expr: &Expr, ns: &Namespace) -> Result<()> {
    match expr {
        Expr::Literal(_) => Ok(()),
        Expr::Identifier(name) => match ns.resolve(name) {
            Some(Entry::Variable(_)) | Some(Entry::Builtin(Builtin::Constant(_))) => Ok(()),
            Some(Entry::Builtin(_)) => Err(EvalError::NotAValue(name.clone())),
            None => Err(EvalError::UnknownIdentifier(name.clone())),
        },
        Expr::Unary { operand, .. } => check_node(operand, ns),
        Expr::Binary { lhs, rhs, .. } => {
            check_node(lhs, ns)?;
            check_node(rhs, ns)
        }
        Expr::Call { name, args } => {
            let expected = match ns.resolve(name) {
                Some(Entry::Builtin(builtin)) => builtin
                    .arity()
                    .ok_or_else(|| EvalError::NotCallable(name.clone()))?,
                Some(Entry::Variable(_)) => return Err(EvalError::NotCallable(name.clone())),
                None => return Err(EvalError::UnknownIdentifier(name.clone())),
            };
            if args.len() != expected {
                return Err(EvalError::ArityMismatch {
                    name: name.clone(),
                    expected,
                    found: args.len(),
                });
            }
            args.iter().try_for_each(|arg| check_node(arg, ns))
        }
    }
}

fn combine<F>(op: &str, a: &ArrayD<f64>, b: &ArrayD<f64>, f: F) -> Result<ArrayD<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    zip_broadcast(a, b, f).ok_or_else(|| EvalError::ShapeMismatch {
        op: op.to_owned(),
        left: a.shape().to_vec(),
        right: b.shape().to_vec(),
    })
}

fn eval_node(expr: &Expr, ns: &Namespace) -> Result<ArrayD<f64>> {
    match expr {
        Expr::Literal(value) => Ok(arr0(*value).into_dyn()),
        Expr::Identifier(name) => match ns.resolve(name) {
            Some(Entry::Variable(value)) => Ok(value.clone()),
            Some(Entry::Builtin(Builtin::Constant(c))) => Ok(arr0(*c).into_dyn()),
            Some(Entry::Builtin(_)) => Err(EvalError::NotAValue(name.clone())),
            None => Err(EvalError::UnknownIdentifier(name.clone())),
        },
        Expr::Unary { op, operand } => {
            let value = eval_node(operand, ns)?;
            Ok(match op {
                UnaryOp::Neg => value.mapv_into(|x| -x),
                UnaryOp::Plus => value,
            })
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = eval_node(lhs, ns)?;
            let b = eval_node(rhs, ns)?;
            combine(op.symbol(), &a, &b, |x, y| op.apply(x, y))
        }
        Expr::Call { name, args } => match (ns.resolve(name), args.as_slice()) {
            (Some(Entry::Builtin(Builtin::Unary(f))), [arg]) => {
                Ok(eval_node(arg, ns)?.mapv_into(*f))
            }
            (Some(Entry::Builtin(Builtin::Binary(f))), [a, b]) => {
                let a = eval_node(a, ns)?;
                let b = eval_node(b, ns)?;
                combine(name, &a, &b, *f)
            }
            (Some(Entry::Builtin(builtin)), _) => match builtin.arity() {
                Some(expected) => Err(EvalError::ArityMismatch {
                    name: name.clone(),
                    expected,
                    found: args.len(),
                }),
                None => Err(EvalError::NotCallable(name.clone())),
            },
            (Some(Entry::Variable(_)), _) => Err(EvalError::NotCallable(name.clone())),
            (None, _) => Err(EvalError::UnknownIdentifier(name.clone())),
        },
    }
}
