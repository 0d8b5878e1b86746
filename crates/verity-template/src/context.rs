//! Token context
//!
//! The flat name to value mapping a template is rendered against.

use crate::error::{Result, TemplateError};
use std::collections::HashMap;
use verity_core::types::{Value, UNDEFINED};

/// Named values available to placeholders, macros and block expressions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    tokens: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a token only when a value is present
    pub fn with_opt<V: Into<Value>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.tokens.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.tokens.get(name)
    }

    /// Token value, `Value::Undefined` when absent
    pub fn value(&self, name: &str) -> &Value {
        self.tokens.get(name).unwrap_or(&UNDEFINED)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Build a context from a JSON object
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(map
                .iter()
                .map(|(name, value)| (name.clone(), Value::from(value)))
                .collect()),
            other => Err(TemplateError::InvalidContext(
                Value::from(other).type_name().to_string(),
            )),
        }
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(tokens: HashMap<String, Value>) -> Self {
        Self { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_lookup() {
        let context = Context::new()
            .with("value", "1234")
            .with("var1", false)
            .with_opt("funName", None::<&str>);

        assert_eq!(context.get("value"), Some(&Value::from("1234")));
        assert_eq!(context.value("var1"), &Value::Bool(false));
        assert!(!context.contains("funName"));
        assert_eq!(context.value("funName"), &Value::Undefined);
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn test_from_json() {
        let context = Context::from_json(&json!({"value": [1, 2], "var2": 42})).unwrap();
        assert_eq!(context.value("var2"), &Value::from(42));
        assert_eq!(context.value("value").length(), Some(2));

        let err = Context::from_json(&json!([1, 2])).unwrap_err();
        assert_eq!(err, TemplateError::InvalidContext("array".to_string()));
    }
}
