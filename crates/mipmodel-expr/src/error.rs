//! Term construction errors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TermError {
    #[error("[TERM_NAN_COEFFICIENT] term coefficient is NaN")]
    NanCoefficient,
}

impl TermError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            TermError::NanCoefficient => "TERM_NAN_COEFFICIENT",
        }
    }
}
