//! Message configuration
//!
//! One message template per assertion kind. Templates use the syntax of
//! `verity_template`: `%name%` placeholders, macros and `(?expr text?)` blocks.
//! Missing keys in a configuration document keep the built-in message.
//!
//! ```yaml
//! value: "Bad value for %varName%: %expected% expected, got %_ACTUAL_%"
//! allowed_fields: "Unknown option '%field%'"
//! ```

use crate::error::{AssertionKind, Result, SdkError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TYPE_MESSAGE: &str =
    "Wrong type for '%varName%', expected %type%, got %_TYPE_%(?funName in %funName%?)";
pub const DEFAULT_VALUE_MESSAGE: &str =
    "Wrong value for '%varName%', expected %expected%, got %_ACTUAL_%(?funName in %funName%?)";
pub const DEFAULT_FIELD_TYPES_MESSAGE: &str =
    "Wrong type for field '%field%' of '%varName%', expected %type%, got %actual%(?funName in %funName%?)";
pub const DEFAULT_FIELD_VALUES_MESSAGE: &str =
    "Wrong value for field '%field%' of '%varName%', expected %expected%, got %_ACTUAL_%(?funName in %funName%?)";
pub const DEFAULT_ALLOWED_FIELDS_MESSAGE: &str =
    "Unexpected field '%field%' in '%varName%'(?funName in %funName%?)";
pub const DEFAULT_FORBIDDEN_FIELDS_MESSAGE: &str =
    "Field '%field%' not allowed in '%varName%'(?funName in %funName%?)";

/// Message templates, one per assertion kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageConfig {
    #[serde(rename = "type")]
    pub type_message: String,
    #[serde(rename = "value")]
    pub value_message: String,
    pub field_types: String,
    pub field_values: String,
    pub optional_field_types: String,
    pub optional_field_values: String,
    pub allowed_fields: String,
    pub forbidden_fields: String,
}

impl MessageConfig {
    /// The built-in catalog
    pub fn new() -> Self {
        Self {
            type_message: DEFAULT_TYPE_MESSAGE.to_string(),
            value_message: DEFAULT_VALUE_MESSAGE.to_string(),
            field_types: DEFAULT_FIELD_TYPES_MESSAGE.to_string(),
            field_values: DEFAULT_FIELD_VALUES_MESSAGE.to_string(),
            optional_field_types: DEFAULT_FIELD_TYPES_MESSAGE.to_string(),
            optional_field_values: DEFAULT_FIELD_VALUES_MESSAGE.to_string(),
            allowed_fields: DEFAULT_ALLOWED_FIELDS_MESSAGE.to_string(),
            forbidden_fields: DEFAULT_FORBIDDEN_FIELDS_MESSAGE.to_string(),
        }
    }

    /// Load from a JSON document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML document
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Template for `kind`
    pub fn message(&self, kind: AssertionKind) -> &str {
        match kind {
            AssertionKind::Type => &self.type_message,
            AssertionKind::Value => &self.value_message,
            AssertionKind::FieldTypes => &self.field_types,
            AssertionKind::FieldValues => &self.field_values,
            AssertionKind::OptionalFieldTypes => &self.optional_field_types,
            AssertionKind::OptionalFieldValues => &self.optional_field_values,
            AssertionKind::AllowedFields => &self.allowed_fields,
            AssertionKind::ForbiddenFields => &self.forbidden_fields,
        }
    }

    pub fn set_message(&mut self, kind: AssertionKind, template: impl Into<String>) {
        let slot = match kind {
            AssertionKind::Type => &mut self.type_message,
            AssertionKind::Value => &mut self.value_message,
            AssertionKind::FieldTypes => &mut self.field_types,
            AssertionKind::FieldValues => &mut self.field_values,
            AssertionKind::OptionalFieldTypes => &mut self.optional_field_types,
            AssertionKind::OptionalFieldValues => &mut self.optional_field_values,
            AssertionKind::AllowedFields => &mut self.allowed_fields,
            AssertionKind::ForbiddenFields => &mut self.forbidden_fields,
        };
        *slot = template.into();
    }

    /// Replace the template for `kind`
    pub fn with_message(mut self, kind: AssertionKind, template: impl Into<String>) -> Self {
        self.set_message(kind, template);
        self
    }

    pub fn with_type_message(self, template: impl Into<String>) -> Self {
        self.with_message(AssertionKind::Type, template)
    }

    pub fn with_value_message(self, template: impl Into<String>) -> Self {
        self.with_message(AssertionKind::Value, template)
    }

    /// Reject empty templates
    pub fn validate(&self) -> Result<()> {
        match AssertionKind::ALL
            .iter()
            .find(|kind| self.message(**kind).trim().is_empty())
        {
            Some(kind) => Err(SdkError::ConfigError(format!(
                "empty message template for '{}'",
                kind
            ))),
            None => Ok(()),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self::new()
    }
}
