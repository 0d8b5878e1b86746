//! SDK error types

use std::fmt;
use thiserror::Error;
use verity_core::{CoreError, EvaluationResult};

/// Which assertion produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionKind {
    Type,
    Value,
    FieldTypes,
    FieldValues,
    OptionalFieldTypes,
    OptionalFieldValues,
    AllowedFields,
    ForbiddenFields,
}

impl AssertionKind {
    pub const ALL: [AssertionKind; 8] = [
        AssertionKind::Type,
        AssertionKind::Value,
        AssertionKind::FieldTypes,
        AssertionKind::FieldValues,
        AssertionKind::OptionalFieldTypes,
        AssertionKind::OptionalFieldValues,
        AssertionKind::AllowedFields,
        AssertionKind::ForbiddenFields,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssertionKind::Type => "type",
            AssertionKind::Value => "value",
            AssertionKind::FieldTypes => "field_types",
            AssertionKind::FieldValues => "field_values",
            AssertionKind::OptionalFieldTypes => "optional_field_types",
            AssertionKind::OptionalFieldValues => "optional_field_values",
            AssertionKind::AllowedFields => "allowed_fields",
            AssertionKind::ForbiddenFields => "forbidden_fields",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed assertion with its rendered message
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct AssertionError {
    pub kind: AssertionKind,
    pub message: String,
    /// Offending field for field assertions
    pub field: Option<String>,
    /// Evaluator output for value assertions
    pub diagnostics: Option<EvaluationResult>,
}

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// A value did not satisfy an assertion
    #[error("{0}")]
    AssertionFailed(#[from] AssertionError),

    /// Condition could not be built
    #[error("Condition error: {0}")]
    CoreError(#[from] CoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl SdkError {
    /// The assertion failure, if this is one
    pub fn as_assertion(&self) -> Option<&AssertionError> {
        match self {
            SdkError::AssertionFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_error_displays_message() {
        let error = AssertionError {
            kind: AssertionKind::AllowedFields,
            message: "Unexpected field 'foo' in 'argument'".to_string(),
            field: Some("foo".to_string()),
            diagnostics: None,
        };
        assert_eq!(error.to_string(), "Unexpected field 'foo' in 'argument'");

        let sdk_error: SdkError = error.into();
        assert_eq!(sdk_error.to_string(), "Unexpected field 'foo' in 'argument'");
        assert_eq!(
            sdk_error.as_assertion().map(|e| e.kind),
            Some(AssertionKind::AllowedFields)
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let sdk_error: SdkError = CoreError::UnknownOperator("between".to_string()).into();
        assert!(sdk_error.to_string().contains("Condition error"));
        assert!(sdk_error.to_string().contains("between"));
        assert!(sdk_error.as_assertion().is_none());
    }

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("unknown message key".to_string());
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AssertionKind::OptionalFieldValues.to_string(), "optional_field_values");
        assert_eq!(AssertionKind::ALL.len(), 8);
    }
}
