//! Assertion API
//!
//! `Assert` checks values with the condition evaluator and turns failures into
//! `AssertionError`s whose message is rendered from the configured templates.
//!
//! ```ignore
//! let assert = Assert::new();
//! let subject = Subject::var("width").in_fun("resize");
//! assert.gte(&Value::from(42), 43, &subject)?;
//! // Wrong value for 'width', expected greater than or equal to 43, got 42 in resize
//! ```

use crate::config::MessageConfig;
use crate::error::{AssertionError, AssertionKind, Result};
use crate::fields::{Fields, TypeList};
use verity_core::{evaluate, Condition, EvaluationResult, Operator, Reference, Value};
use verity_template::{render, Context};

pub const DEFAULT_VAR_NAME: &str = "argument";

/// Names shown in assertion messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    /// Variable or argument name; the instance default when unset
    pub var_name: Option<String>,
    /// Function the assertion runs in
    pub fun_name: Option<String>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self {
            var_name: Some(name.into()),
            fun_name: None,
        }
    }

    pub fn in_fun(mut self, name: impl Into<String>) -> Self {
        self.fun_name = Some(name.into());
        self
    }
}

/// Assertion entry point holding the message catalog
#[derive(Debug, Clone)]
pub struct Assert {
    messages: MessageConfig,
    default_var_name: String,
}

impl Assert {
    pub fn new() -> Self {
        Self {
            messages: MessageConfig::default(),
            default_var_name: DEFAULT_VAR_NAME.to_string(),
        }
    }

    /// Use a custom message catalog
    pub fn with_messages(mut self, messages: MessageConfig) -> Self {
        self.messages = messages;
        self
    }

    /// Variable name used when a subject does not name one
    pub fn with_default_var_name(mut self, name: impl Into<String>) -> Self {
        self.default_var_name = name.into();
        self
    }

    pub fn messages(&self) -> &MessageConfig {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageConfig {
        &mut self.messages
    }

    // =========================================================================
    // Value assertions
    // =========================================================================

    /// The value's type tag must be one of `types`
    pub fn assert_type(
        &self,
        value: &Value,
        types: impl Into<TypeList>,
        subject: &Subject,
    ) -> Result<()> {
        let types = types.into();
        if types.contains(value.type_name()) {
            return Ok(());
        }
        let context = self
            .context(subject)
            .with("value", value.clone())
            .with("type", types.joined());
        self.fail(AssertionKind::Type, &context, None, None)
    }

    /// The value must satisfy `condition`
    pub fn assert_value(&self, value: &Value, condition: &Condition, subject: &Subject) -> Result<()> {
        let result = evaluate(value, condition);
        if result.result {
            return Ok(());
        }
        let context = self.value_context(subject, value, &result);
        self.fail(AssertionKind::Value, &context, None, Some(result))
    }

    // =========================================================================
    // Object field assertions
    // =========================================================================

    /// Every listed field must have one of its types; missing fields fail
    pub fn assert_field_types(
        &self,
        value: &Value,
        fields: &Fields<TypeList>,
        subject: &Subject,
    ) -> Result<()> {
        self.check_field_types(AssertionKind::FieldTypes, value, fields, subject)
    }

    /// Every listed field that is present must have one of its types
    pub fn assert_optional_field_types(
        &self,
        value: &Value,
        fields: &Fields<TypeList>,
        subject: &Subject,
    ) -> Result<()> {
        self.check_field_types(AssertionKind::OptionalFieldTypes, value, fields, subject)
    }

    /// Every listed field must satisfy its condition; missing fields are checked as undefined
    pub fn assert_field_values(
        &self,
        value: &Value,
        fields: &Fields<Condition>,
        subject: &Subject,
    ) -> Result<()> {
        self.check_field_values(AssertionKind::FieldValues, value, fields, subject)
    }

    /// Every listed field that is present must satisfy its condition
    pub fn assert_optional_field_values(
        &self,
        value: &Value,
        fields: &Fields<Condition>,
        subject: &Subject,
    ) -> Result<()> {
        self.check_field_values(AssertionKind::OptionalFieldValues, value, fields, subject)
    }

    /// Every key of an object must be listed; other values pass
    pub fn assert_allowed_fields(&self, value: &Value, names: &[&str], subject: &Subject) -> Result<()> {
        self.check_keys(AssertionKind::AllowedFields, value, subject, |key| {
            names.contains(&key)
        })
    }

    /// No key of an object may be listed; other values pass
    pub fn assert_forbidden_fields(
        &self,
        value: &Value,
        names: &[&str],
        subject: &Subject,
    ) -> Result<()> {
        self.check_keys(AssertionKind::ForbiddenFields, value, subject, |key| {
            !names.contains(&key)
        })
    }

    fn check_field_types(
        &self,
        kind: AssertionKind,
        value: &Value,
        fields: &Fields<TypeList>,
        subject: &Subject,
    ) -> Result<()> {
        let optional = kind == AssertionKind::OptionalFieldTypes;
        for (name, types) in fields.iter() {
            let field = value.field(name);
            if (optional && field.is_undefined()) || types.contains(field.type_name()) {
                continue;
            }
            let actual = if field.is_undefined() {
                "<undefined>"
            } else {
                field.type_name()
            };
            let context = self
                .context(subject)
                .with("value", field.clone())
                .with("type", types.joined())
                .with("actual", actual)
                .with("field", name);
            return self.fail(kind, &context, Some(name), None);
        }
        Ok(())
    }

    fn check_field_values(
        &self,
        kind: AssertionKind,
        value: &Value,
        fields: &Fields<Condition>,
        subject: &Subject,
    ) -> Result<()> {
        let optional = kind == AssertionKind::OptionalFieldValues;
        for (name, condition) in fields.iter() {
            let field = value.field(name);
            if optional && field.is_undefined() {
                continue;
            }
            let result = evaluate(field, condition);
            if result.result {
                continue;
            }
            let context = self.value_context(subject, field, &result).with("field", name);
            return self.fail(kind, &context, Some(name), Some(result));
        }
        Ok(())
    }

    fn check_keys(
        &self,
        kind: AssertionKind,
        value: &Value,
        subject: &Subject,
        accept: impl Fn(&str) -> bool,
    ) -> Result<()> {
        let Some(object) = value.as_object() else {
            return Ok(());
        };
        match object.keys().find(|key| !accept(key)) {
            Some(key) => {
                let context = self.context(subject).with("field", key.as_str());
                self.fail(kind, &context, Some(key.as_str()), None)
            }
            None => Ok(()),
        }
    }

    // =========================================================================
    // Shorthands
    // =========================================================================

    fn assert_clause(
        &self,
        value: &Value,
        operator: Operator,
        reference: impl Into<Reference>,
        subject: &Subject,
    ) -> Result<()> {
        let condition = Condition::clause(operator, reference)?;
        self.assert_value(value, &condition, subject)
    }

    pub fn equal(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Eq, reference, subject)
    }

    pub fn not_equal(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Neq, reference, subject)
    }

    pub fn lt(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Lt, reference, subject)
    }

    pub fn lte(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Lte, reference, subject)
    }

    pub fn gt(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Gt, reference, subject)
    }

    pub fn gte(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Gte, reference, subject)
    }

    /// `true` for a whole number, `false` for a number with a fractional part
    pub fn integer(&self, value: &Value, integer: bool, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Integer, integer, subject)
    }

    pub fn divides(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Divides, reference, subject)
    }

    pub fn multiple(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Multiple, reference, subject)
    }

    pub fn contains(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Contains, reference, subject)
    }

    pub fn begins(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Begins, reference, subject)
    }

    pub fn ends(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Ends, reference, subject)
    }

    pub fn matches(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Matches, reference, subject)
    }

    pub fn contains_not(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::ContainsNot, reference, subject)
    }

    pub fn begins_not(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::BeginsNot, reference, subject)
    }

    pub fn ends_not(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::EndsNot, reference, subject)
    }

    pub fn matches_not(&self, value: &Value, reference: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::MatchesNot, reference, subject)
    }

    /// Check the length against a nested condition, e.g. `6` or a `{lte: 6}` condition
    pub fn length(&self, value: &Value, condition: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Length, condition, subject)
    }

    /// Check every element against a nested condition
    pub fn each(&self, value: &Value, condition: impl Into<Reference>, subject: &Subject) -> Result<()> {
        self.assert_clause(value, Operator::Each, condition, subject)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    fn context(&self, subject: &Subject) -> Context {
        let var_name = subject
            .var_name
            .clone()
            .unwrap_or_else(|| self.default_var_name.clone());
        Context::new()
            .with("varName", var_name)
            .with_opt("funName", subject.fun_name.clone())
    }

    fn value_context(&self, subject: &Subject, value: &Value, result: &EvaluationResult) -> Context {
        self.context(subject)
            .with("value", value.clone())
            .with("expected", result.details.clone().unwrap_or_default())
            .with("actual", result.actual.clone().unwrap_or_default())
    }

    fn fail(
        &self,
        kind: AssertionKind,
        context: &Context,
        field: Option<&str>,
        diagnostics: Option<EvaluationResult>,
    ) -> Result<()> {
        let message = render(self.messages.message(kind), context);
        tracing::debug!(
            kind = %kind,
            var_name = %context.value("varName"),
            field = field.unwrap_or_default(),
            "Assertion failed: {}",
            message
        );
        Err(AssertionError {
            kind,
            message,
            field: field.map(str::to_string),
            diagnostics,
        }
        .into())
    }
}

impl Default for Assert {
    fn default() -> Self {
        Self::new()
    }
}
