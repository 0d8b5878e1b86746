//! Condition document parser
//!
//! Builds a `Condition` from a JSON document:
//! - a scalar is a literal (`42`)
//! - an object is a single condition (`{"gte": 0, "lt": 10}`), keys kept in order
//! - an array is a compound condition (`[{"eq": 0}, {"gte": 100}]`)
//!
//! Pattern references are either pattern text (`"^[a-f]+$"`) or an object
//! carrying flags (`{"pattern": "[a-f]+", "flags": "g"}`). Unknown operator
//! keys and invalid patterns are rejected here, so evaluation never meets them.

use super::types::{Clause, Condition, Operator, Pattern, Reference};
use crate::error::{CoreError, Result};
use crate::types::Value;
use serde_json::Map;

/// Parser for condition documents
pub struct ConditionParser;

impl ConditionParser {
    /// Parse a condition document
    pub fn parse(json: &serde_json::Value) -> Result<Condition> {
        match json {
            serde_json::Value::Array(items) => {
                let items = items.iter().map(Self::parse).collect::<Result<Vec<_>>>()?;
                Ok(Condition::Compound(items))
            }
            serde_json::Value::Object(map) => Self::parse_single(map),
            scalar => Ok(Condition::Literal(Value::from(scalar))),
        }
    }

    /// Parse a condition from JSON text
    pub fn parse_str(text: &str) -> Result<Condition> {
        let json: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| CoreError::InvalidCondition(e.to_string()))?;
        Self::parse(&json)
    }

    fn parse_single(map: &Map<String, serde_json::Value>) -> Result<Condition> {
        let clauses = map
            .iter()
            .map(|(key, reference)| Self::parse_clause(key, reference))
            .collect::<Result<Vec<_>>>()?;
        Ok(Condition::Single(clauses))
    }

    fn parse_clause(key: &str, json: &serde_json::Value) -> Result<Clause> {
        let operator: Operator = key.parse().inspect_err(|_| {
            log::debug!("rejecting unknown operator key '{}'", key);
        })?;

        let reference = if operator.is_nested() {
            Reference::Condition(Box::new(Self::parse(json)?))
        } else if operator.is_pattern() {
            Self::parse_patterns(json)?
        } else {
            match json {
                serde_json::Value::Array(items) => {
                    Reference::Values(items.iter().map(Value::from).collect())
                }
                scalar => Reference::Value(Value::from(scalar)),
            }
        };

        Clause::new(operator, reference)
    }

    fn parse_patterns(json: &serde_json::Value) -> Result<Reference> {
        match json {
            serde_json::Value::Array(items) => {
                let patterns = items
                    .iter()
                    .map(Self::parse_pattern)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Reference::Patterns(patterns))
            }
            single => Ok(Reference::Pattern(Self::parse_pattern(single)?)),
        }
    }

    fn parse_pattern(json: &serde_json::Value) -> Result<Pattern> {
        match json {
            serde_json::Value::String(source) => Pattern::literal(source.as_str()),
            serde_json::Value::Object(map) => {
                let source = map
                    .get("pattern")
                    .and_then(serde_json::Value::as_str)
                    .ok_or_else(|| {
                        CoreError::InvalidCondition("pattern object needs a 'pattern' string".to_string())
                    })?;
                let flags = map
                    .get("flags")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("");
                Pattern::compiled(source, flags)
            }
            other => Err(CoreError::InvalidReference {
                operator: "matches".to_string(),
                message: format!("expected a pattern, got {}", other),
            }),
        }
    }
}
