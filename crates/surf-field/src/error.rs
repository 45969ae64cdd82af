use surf_core::SurfError;
use surf_expr::EvalError;
use thiserror::Error;

use crate::generator::EquationSlot;

#[derive(Debug, Error)]
pub enum FieldError {
    /// One of the three equations failed to parse or evaluate.
    #[error("{slot} equation: {source}")]
    Equation {
        slot: EquationSlot,
        #[source]
        source: EvalError,
    },

    #[error("Invalid {parameter} range [{min}, {max}]: {reason}")]
    InvalidRange {
        parameter: &'static str,
        min: f64,
        max: f64,
        reason: &'static str,
    },

    #[error(transparent)]
    Config(#[from] SurfError),
}

impl FieldError {
    /// The evaluator error behind an equation failure.
    pub fn eval_error(&self) -> Option<&EvalError> {
        match self {
            FieldError::Equation { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Which equation failed, if the failure came from one.
    pub fn slot(&self) -> Option<EquationSlot> {
        match self {
            FieldError::Equation { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
