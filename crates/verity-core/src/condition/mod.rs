//! Condition Module
//!
//! Declarative value constraints and their evaluator. A condition is used by:
//! - the assertion layer (`assert_value` and its shorthands)
//! - field-level checks on objects
//! - any caller wanting a structured pass/fail explanation for a value
//!
//! # Syntax
//!
//! Conditions are usually written as JSON (or YAML) documents.
//!
//! ## Literal
//! ```json
//! 42
//! ```
//! Sugar for `{ "eq": 42 }`.
//!
//! ## Single condition (AND, in declaration order)
//! ```json
//! { "type": "number", "integer": true, "gte": 0 }
//! ```
//!
//! ## Compound condition (OR)
//! ```json
//! [ { "eq": 0 }, { "gte": 100 } ]
//! ```
//!
//! ## Operators
//! - `type` - runtime type tag
//! - `eq` / `neq` - structural equality
//! - `lt`, `lte`, `gt`, `gte` - natural ordering
//! - `integer` - whole (or, with `false`, fractional) number
//! - `divides`, `multiple` - exact division
//! - `contains`, `begins`, `ends`, `matches` and their `...Not` negations
//! - `length` - nested condition on the string/array length
//! - `each` - nested condition on every array element
//!
//! A list reference (`{ "eq": [1, 2] }`) accepts any of its alternatives.

mod describer;
mod evaluator;
mod parser;
mod types;

pub use describer::{describe, describe_condition, join_alternatives};
pub use evaluator::evaluate;
pub use parser::ConditionParser;
pub use types::{Clause, Condition, EvaluationResult, Operator, Pattern, Reference, What};
