//! Error types for sqlclause

use thiserror::Error;

/// Result type alias for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors raised while turning a clause tree into SQL
#[derive(Debug, Error)]
pub enum CompileError {
    /// The dialect's compiler has no rendering for this operation
    #[error("{operation} is not implemented in the {dialect} compiler")]
    Unsupported {
        operation: &'static str,
        dialect: &'static str,
    },

    /// Builder state that cannot be rendered
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown dialect name given to the dialect factory
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

impl CompileError {
    /// Create an unsupported-operation error
    pub fn unsupported(operation: &'static str, dialect: &'static str) -> Self {
        Self::Unsupported { operation, dialect }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is an unsupported-operation error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
