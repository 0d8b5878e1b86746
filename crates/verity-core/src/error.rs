//! Error types for Verity Core
//!
//! These are programming-usage errors raised while building conditions.
//! A value failing a condition is never an error; see `EvaluationResult`.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid reference for operator '{operator}': {message}")]
    InvalidReference { operator: String, message: String },

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
