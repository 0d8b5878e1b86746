//! Verity Template - message templates with conditional blocks
//!
//! A template mixes literal text, `%name%` placeholders and `(?expr text?)`
//! blocks that are kept only when `expr` holds for the token context:
//!
//! ```text
//! Wrong value for '%varName%', expected %expected%, got %_ACTUAL_%(?funName in %funName%?)
//! ```
//!
//! Blocks nest. They are resolved before placeholders are substituted, so block
//! expressions always see the raw context values.

pub mod blocks;
pub mod context;
pub mod error;
pub mod expr;
pub mod macros;
pub mod render;

pub use blocks::{extract_blocks, Block};
pub use context::Context;
pub use error::{Result, TemplateError};
pub use expr::{eval_expr, parse_expr, ConditionExpr, ExprOperator};
pub use macros::Macro;
pub use render::render;
