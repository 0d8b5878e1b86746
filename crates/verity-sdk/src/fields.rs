//! Per-field rules for object assertions

use crate::error::{Result, SdkError};
use verity_core::Condition;

/// Accepted type tags, e.g. `["number", "string"]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeList(Vec<String>);

impl TypeList {
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Tags joined with `/`, as shown in messages
    pub fn joined(&self) -> String {
        self.0.join("/")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn from_json(json: &serde_json::Value) -> Result<Self> {
        let tag = |v: &serde_json::Value| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| SdkError::ConfigError(format!("expected a type name, got {}", v)))
        };
        match json {
            serde_json::Value::Array(items) => Ok(Self(items.iter().map(tag).collect::<Result<_>>()?)),
            single => Ok(Self(vec![tag(single)?])),
        }
    }
}

impl From<&str> for TypeList {
    fn from(tag: &str) -> Self {
        Self(vec![tag.to_string()])
    }
}

impl From<Vec<&str>> for TypeList {
    fn from(tags: Vec<&str>) -> Self {
        Self(tags.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TypeList {
    fn from(tags: [&str; N]) -> Self {
        Self(tags.iter().map(|t| t.to_string()).collect())
    }
}

impl From<Vec<String>> for TypeList {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

/// Named rules checked in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Fields<T> {
    rules: Vec<(String, T)>,
}

impl<T> Fields<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule for `name`
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<T>) -> Self {
        self.rules.push((name.into(), rule.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn from_json_with(
        json: &serde_json::Value,
        parse: impl Fn(&serde_json::Value) -> Result<T>,
    ) -> Result<Self> {
        let map = json.as_object().ok_or_else(|| {
            SdkError::ConfigError(format!("expected an object of field rules, got {}", json))
        })?;
        let rules = map
            .iter()
            .map(|(name, rule)| Ok((name.clone(), parse(rule)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }
}

impl<T> Default for Fields<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Fields<TypeList> {
    /// `{"a": "number", "b": ["number", "string"]}`
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        Self::from_json_with(json, TypeList::from_json)
    }
}

impl Fields<Condition> {
    /// `{"a": 20, "d": {"length": {"lte": 6}}}`
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        Self::from_json_with(json, |rule| Ok(Condition::from_json(rule)?))
    }
}
