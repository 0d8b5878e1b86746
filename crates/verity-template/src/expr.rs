//! Block expressions
//!
//! The expression opening a `(?...?)` block is either a bare token name,
//! true when the token is truthy, or a comparison of a token with a literal:
//!
//! ```text
//! funName
//! value >= 42
//! value === 'a b c'
//! var1 != false
//! ```

use crate::context::Context;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use verity_core::Value;

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("valid decimal pattern"));

/// Comparison used by a block expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprOperator {
    /// Truthiness of the token
    Boolean,
    /// `==`, numeric when either side is a number
    Eq,
    /// `===`, same type and value
    StrictEq,
    /// `!=`
    Ne,
    /// `!==`
    StrictNe,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ExprOperator {
    /// Binary operators, longer spellings before their prefixes
    const BINARY: [ExprOperator; 8] = [
        ExprOperator::StrictEq,
        ExprOperator::StrictNe,
        ExprOperator::Eq,
        ExprOperator::Ne,
        ExprOperator::Gte,
        ExprOperator::Lte,
        ExprOperator::Gt,
        ExprOperator::Lt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExprOperator::Boolean => "boolean",
            ExprOperator::Eq => "==",
            ExprOperator::StrictEq => "===",
            ExprOperator::Ne => "!=",
            ExprOperator::StrictNe => "!==",
            ExprOperator::Gt => ">",
            ExprOperator::Gte => ">=",
            ExprOperator::Lt => "<",
            ExprOperator::Lte => "<=",
        }
    }

    /// The binary operator `text` starts with, if any
    pub(crate) fn match_prefix(text: &str) -> Option<ExprOperator> {
        Self::BINARY
            .iter()
            .copied()
            .find(|op| text.starts_with(op.as_str()))
    }
}

impl fmt::Display for ExprOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed block expression
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionExpr {
    pub operator: ExprOperator,
    /// Token name
    pub lho: String,
    /// Literal to compare with; `None` for `Boolean`
    pub rho: Option<Value>,
}

impl ConditionExpr {
    pub fn boolean(lho: impl Into<String>) -> Self {
        Self {
            operator: ExprOperator::Boolean,
            lho: lho.into(),
            rho: None,
        }
    }

    pub fn binary(operator: ExprOperator, lho: impl Into<String>, rho: impl Into<Value>) -> Self {
        Self {
            operator,
            lho: lho.into(),
            rho: Some(rho.into()),
        }
    }
}

/// Parse a block expression
pub fn parse_expr(text: &str) -> ConditionExpr {
    let text = text.trim();
    match find_operator(text) {
        Some((at, operator)) => {
            let lho = text[..at].trim();
            let rho = text[at + operator.as_str().len()..].trim();
            ConditionExpr::binary(operator, lho, parse_literal(rho))
        }
        None => ConditionExpr::boolean(text),
    }
}

/// First binary operator outside quotes
fn find_operator(text: &str) -> Option<(usize, ExprOperator)> {
    let mut quote: Option<char> = None;
    for (at, c) in text.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None => {
                if let Some(operator) = ExprOperator::match_prefix(&text[at..]) {
                    return Some((at, operator));
                }
            }
        }
    }
    None
}

/// Quoted text, `true`/`false`, or a signed decimal number (`NaN` otherwise)
pub(crate) fn parse_literal(text: &str) -> Value {
    let quoted = text.len() >= 2
        && (text.starts_with('\'') && text.ends_with('\'')
            || text.starts_with('"') && text.ends_with('"'));
    if quoted {
        return Value::String(text[1..text.len() - 1].to_string());
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if DECIMAL_RE.is_match(text) => Value::Number(text.parse::<f64>().unwrap_or(f64::NAN)),
        _ => Value::Number(f64::NAN),
    }
}

/// Evaluate a block expression against the context
pub fn eval_expr(expr: &ConditionExpr, context: &Context) -> bool {
    let lho = context.value(&expr.lho);
    let Some(rho) = expr.rho.as_ref() else {
        return lho.is_truthy();
    };

    match expr.operator {
        ExprOperator::Boolean => lho.is_truthy(),
        ExprOperator::StrictEq => lho == rho,
        ExprOperator::StrictNe => lho != rho,
        ExprOperator::Eq => loose_eq(lho, rho),
        ExprOperator::Ne => !loose_eq(lho, rho),
        ExprOperator::Gt => lho.natural_cmp(rho).is_some_and(|o| o.is_gt()),
        ExprOperator::Gte => lho.natural_cmp(rho).is_some_and(|o| o.is_ge()),
        ExprOperator::Lt => lho.natural_cmp(rho).is_some_and(|o| o.is_lt()),
        ExprOperator::Lte => lho.natural_cmp(rho).is_some_and(|o| o.is_le()),
    }
}

fn loose_eq(lho: &Value, rho: &Value) -> bool {
    if lho.is_undefined() || rho.is_undefined() {
        return false;
    }
    if lho.as_f64().is_some() || rho.as_f64().is_some() {
        return lho.to_number() == rho.to_number();
    }
    lho.to_plain_string() == rho.to_plain_string()
}
