use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Input outside the arithmetic grammar. `column` is the 1-based
    /// character position of the offending construct.
    #[error("Syntax error at column {column}: {message}")]
    Syntax { message: String, column: usize },

    #[error("Unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("Shape mismatch in '{op}': {left:?} cannot broadcast with {right:?}")]
    ShapeMismatch {
        op: String,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    #[error("Function '{name}' takes {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("'{0}' is not a function")]
    NotCallable(String),

    #[error("Function '{0}' used as a value; call it with arguments")]
    NotAValue(String),
}

impl EvalError {
    pub(crate) fn syntax(message: impl Into<String>, column: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            column,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
