//! Built-in placeholders computed from the context

use crate::context::Context;

/// Reserved placeholder names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Macro {
    /// `_TYPE_`: type tag of `value`
    Type,
    /// `_LEN_`: length of `value`
    Len,
    /// `_ACTUAL_`: `actual`, quoted
    Actual,
    /// `_VALUE_`: `value`, quoted
    Value,
}

impl Macro {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "_TYPE_" => Some(Macro::Type),
            "_LEN_" => Some(Macro::Len),
            "_ACTUAL_" => Some(Macro::Actual),
            "_VALUE_" => Some(Macro::Value),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Macro::Type => "_TYPE_",
            Macro::Len => "_LEN_",
            Macro::Actual => "_ACTUAL_",
            Macro::Value => "_VALUE_",
        }
    }

    pub fn expand(&self, context: &Context) -> String {
        match self {
            Macro::Type => context.value("value").type_name().to_string(),
            Macro::Len => context
                .value("value")
                .length()
                .map_or_else(|| "undefined".to_string(), |len| len.to_string()),
            Macro::Actual => context.value("actual").to_quoted_string(),
            Macro::Value => context.value("value").to_quoted_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_core::Value;

    #[test]
    fn test_type() {
        let expand = |value: Value| Macro::Type.expand(&Context::new().with("value", value));
        assert_eq!(expand(Value::Null), "null");
        assert_eq!(expand(Value::from(1234)), "number");
        assert_eq!(expand(Value::from("42")), "string");
        assert_eq!(Macro::Type.expand(&Context::new()), "undefined");
    }

    #[test]
    fn test_len() {
        let context = Context::new().with("value", "1234");
        assert_eq!(Macro::Len.expand(&context), "4");

        let context = Context::new().with("value", vec![Value::from(1), Value::from(2)]);
        assert_eq!(Macro::Len.expand(&context), "2");

        let context = Context::new().with("value", 42);
        assert_eq!(Macro::Len.expand(&context), "undefined");
    }

    #[test]
    fn test_actual_and_value() {
        let context = Context::new().with("actual", 1234).with("value", "1234");
        assert_eq!(Macro::Actual.expand(&context), "1234");
        assert_eq!(Macro::Value.expand(&context), "\"1234\"");

        let context = Context::new().with("value", vec![Value::from(1), Value::from(2)]);
        assert_eq!(Macro::Value.expand(&context), "[1,2]");
        assert_eq!(Macro::Actual.expand(&context), "<undefined>");
    }

    #[test]
    fn test_names() {
        for name in ["_TYPE_", "_LEN_", "_ACTUAL_", "_VALUE_"] {
            assert_eq!(Macro::from_name(name).map(|m| m.name()), Some(name));
        }
        assert_eq!(Macro::from_name("value"), None);
    }
}
