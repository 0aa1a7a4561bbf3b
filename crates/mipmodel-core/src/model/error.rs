//! Model error types.

use mipmodel_expr::TermError;
use mipmodel_expr::ids::{ConstraintId, VariableId};
use thiserror::Error;

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Invalid variable ID
    #[error("[VARIABLE_INVALID_ID] Variable ID {} does not exist", .0.inner())]
    InvalidVariableId(VariableId),
    /// Invalid constraint ID
    #[error("[CONSTRAINT_INVALID_ID] Constraint ID {} does not exist", .0.inner())]
    InvalidConstraintId(ConstraintId),
    /// A variable bound is NaN
    #[error("[VARIABLE_NAN_BOUND] Variable bounds must not be NaN (lower {lower}, upper {upper})")]
    NanBound { lower: f64, upper: f64 },
    /// A constraint right-hand side is NaN
    #[error("[CONSTRAINT_NAN_RHS] Constraint right-hand side is NaN")]
    NanRightHandSide,
    /// Rejected term
    #[error(transparent)]
    Term(#[from] TermError),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::NanBound { .. } => "VARIABLE_NAN_BOUND",
            ModelError::NanRightHandSide => "CONSTRAINT_NAN_RHS",
            ModelError::Term(err) => err.code(),
        }
    }
}
