//! Verity Core - value model and condition evaluator
//!
//! This crate provides the pieces every other Verity crate builds on:
//! - `Value`, the runtime datum conditions are checked against
//! - the condition model (`Condition`, `Clause`, `Operator`, `Reference`, `Pattern`)
//! - the condition evaluator and the describer producing its diagnostic phrases
//! - error types

pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use condition::{
    describe, evaluate, Clause, Condition, ConditionParser, EvaluationResult, Operator, Pattern,
    Reference, What,
};
pub use error::{CoreError, Result};
pub use types::Value;
