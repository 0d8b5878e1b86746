//! Verity SDK - named assertions with configurable messages
//!
//! Wraps the condition evaluator and the template renderer behind an
//! assertion API:
//!
//! ```ignore
//! use verity_sdk::{Assert, Subject, Value};
//!
//! let assert = Assert::new();
//! assert.gte(&Value::from(42), 43, &Subject::var("width"))?;
//! ```
//!
//! A failed assertion returns `SdkError::AssertionFailed` holding the rendered
//! message and the evaluator diagnostics.

pub mod assert;
pub mod config;
pub mod error;
pub mod fields;

pub use assert::{Assert, Subject, DEFAULT_VAR_NAME};
pub use config::MessageConfig;
pub use error::{AssertionError, AssertionKind, Result, SdkError};
pub use fields::{Fields, TypeList};

// Re-export core types for convenience
pub use verity_core::{Condition, EvaluationResult, Operator, Pattern, Reference, Value};
pub use verity_template::{render, Context};
