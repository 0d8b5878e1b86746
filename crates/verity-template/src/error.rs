//! Error types for Verity Template
//!
//! Rendering never fails; only building a context from external data can.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Invalid context: expected an object, got {0}")]
    InvalidContext(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
