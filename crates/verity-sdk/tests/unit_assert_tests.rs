//! Unit tests for the assertion API

use serde_json::json;
use verity_sdk::{
    Assert, AssertionKind, Condition, Fields, MessageConfig, Operator, Pattern, Result, SdkError,
    Subject, TypeList, Value,
};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn cond(json: serde_json::Value) -> Condition {
    Condition::from_json(&json).expect("valid condition")
}

fn failure(result: Result<()>) -> String {
    match result {
        Err(SdkError::AssertionFailed(err)) => err.message,
        other => panic!("Expected assertion failure, got {:?}", other),
    }
}

fn any() -> Subject {
    Subject::new()
}

// =============================================================================
// Type and value assertions
// =============================================================================

#[test]
fn test_assert_type() {
    let assert = Assert::new();
    assert!(assert.assert_type(&v(json!(42)), "number", &any()).is_ok());
    assert!(assert
        .assert_type(&v(json!("42")), ["number", "string"], &any())
        .is_ok());

    assert_eq!(
        failure(assert.assert_type(&v(json!(42)), "string", &any())),
        "Wrong type for 'argument', expected string, got number"
    );
    assert_eq!(
        failure(assert.assert_type(&v(json!(42)), ["string", "boolean"], &any())),
        "Wrong type for 'argument', expected string/boolean, got number"
    );
}

#[test]
fn test_assert_value() {
    let assert = Assert::new();
    assert!(assert
        .assert_value(&v(json!(200)), &cond(json!({"integer": true, "gte": 200})), &any())
        .is_ok());

    assert_eq!(
        failure(assert.assert_value(&v(json!(123)), &cond(json!({"gte": 200})), &any())),
        "Wrong value for 'argument', expected greater than or equal to 200, got 123"
    );
    assert_eq!(
        failure(assert.assert_value(
            &v(json!(255.5)),
            &cond(json!({"integer": true, "gte": 200})),
            &any()
        )),
        "Wrong value for 'argument', expected integer number, got 255.5"
    );
    assert_eq!(
        failure(assert.assert_value(
            &v(json!(123)),
            &cond(json!({"integer": true, "gte": 200})),
            &any()
        )),
        "Wrong value for 'argument', expected greater than or equal to 200, got 123"
    );
    assert_eq!(
        failure(assert.assert_value(&v(json!(50)), &cond(json!([0, {"gte": 100}])), &any())),
        "Wrong value for 'argument', expected 0 or greater than or equal to 100, got 50"
    );
}

#[test]
fn test_function_name_in_message() {
    let assert = Assert::new();
    let subject = Subject::var("width").in_fun("resize");
    assert_eq!(
        failure(assert.assert_type(&v(json!(null)), "number", &subject)),
        "Wrong type for 'width', expected number, got null in resize"
    );
}

// =============================================================================
// Field assertions
// =============================================================================

fn field_types() -> Fields<TypeList> {
    Fields::<TypeList>::from_json(&json!({
        "a": ["number", "string"],
        "b": ["number", "string", "boolean"],
        "c": "boolean",
        "d": "object"
    }))
    .unwrap()
}

fn field_values() -> Fields<Condition> {
    Fields::<Condition>::from_json(&json!({
        "a": 20,
        "b": [{"eq": 12}, {"lte": 6, "integer": true}],
        "c": {"begins": "bla"},
        "d": {"length": {"lte": 6}}
    }))
    .unwrap()
}

#[test]
fn test_assert_field_types() {
    let assert = Assert::new();
    let fields = field_types();
    assert!(assert
        .assert_field_types(&v(json!({"a": 1, "b": "bla", "c": false, "d": {"a": 1}})), &fields, &any())
        .is_ok());

    assert_eq!(
        failure(assert.assert_field_types(&v(json!({"a": 1, "b": "bla", "d": {"a": 1}})), &fields, &any())),
        "Wrong type for field 'c' of 'argument', expected boolean, got <undefined>"
    );
    assert_eq!(
        failure(assert.assert_field_types(
            &v(json!({"a": 1, "b": "bla", "c": "false", "d": {"a": 1}})),
            &fields,
            &any()
        )),
        "Wrong type for field 'c' of 'argument', expected boolean, got string"
    );
    assert_eq!(
        failure(assert.assert_field_types(
            &v(json!({"a": 1, "b": ["bla"], "c": false, "d": {"a": 1}})),
            &fields,
            &any()
        )),
        "Wrong type for field 'b' of 'argument', expected number/string/boolean, got array"
    );
}

#[test]
fn test_assert_optional_field_types() {
    let assert = Assert::new();
    let fields = field_types();
    assert!(assert
        .assert_optional_field_types(&v(json!({"a": 1, "b": "bla", "d": {"a": 1}})), &fields, &any())
        .is_ok());

    assert_eq!(
        failure(assert.assert_optional_field_types(&v(json!({"a": 1, "c": "false"})), &fields, &any())),
        "Wrong type for field 'c' of 'argument', expected boolean, got string"
    );
}

#[test]
fn test_assert_field_values() {
    let assert = Assert::new();
    let fields = field_values();
    assert!(assert
        .assert_field_values(&v(json!({"a": 20, "b": 12, "c": "bla", "d": "123456"})), &fields, &any())
        .is_ok());
    assert!(assert
        .assert_field_values(&v(json!({"a": 20, "b": 5, "c": "blabla", "d": "1234"})), &fields, &any())
        .is_ok());

    assert_eq!(
        failure(assert.assert_field_values(&v(json!({"a": 20, "b": 12, "d": "123456"})), &fields, &any())),
        "Wrong value for field 'c' of 'argument', expected string beginning with \"bla\", got <undefined>"
    );
    assert_eq!(
        failure(assert.assert_field_values(
            &v(json!({"a": 21, "b": 12, "c": "bla", "d": "123456"})),
            &fields,
            &any()
        )),
        "Wrong value for field 'a' of 'argument', expected 20, got 21"
    );
    assert_eq!(
        failure(assert.assert_field_values(
            &v(json!({"a": 20, "b": 12, "c": "bla", "d": "1234567"})),
            &fields,
            &any()
        )),
        "Wrong value for field 'd' of 'argument', expected length less than or equal to 6, got 7"
    );
    assert_eq!(
        failure(assert.assert_field_values(
            &v(json!({"a": 20, "b": 3.5, "c": "bla", "d": "123456"})),
            &fields,
            &any()
        )),
        "Wrong value for field 'b' of 'argument', expected 12 or integer number, got 3.5"
    );
}

#[test]
fn test_assert_optional_field_values() {
    let assert = Assert::new();
    let fields = field_values();
    assert!(assert
        .assert_optional_field_values(&v(json!({"a": 20, "d": "123"})), &fields, &any())
        .is_ok());

    let err = assert
        .assert_optional_field_values(&v(json!({"a": 20, "b": 7})), &fields, &any())
        .unwrap_err();
    let error = err.as_assertion().unwrap();
    assert_eq!(error.kind, AssertionKind::OptionalFieldValues);
    assert_eq!(error.field.as_deref(), Some("b"));
    assert_eq!(
        error.message,
        "Wrong value for field 'b' of 'argument', expected 12 or less than or equal to 6, got 7"
    );
}

#[test]
fn test_assert_allowed_fields() {
    let assert = Assert::new();
    let allowed = ["a", "b", "c", "d"];
    assert!(assert.assert_allowed_fields(&v(json!({})), &allowed, &any()).is_ok());
    assert!(assert
        .assert_allowed_fields(&v(json!({"a": 10, "b": {"x": 12}, "c": null})), &allowed, &any())
        .is_ok());
    assert!(assert.assert_allowed_fields(&v(json!("text")), &allowed, &any()).is_ok());

    assert_eq!(
        failure(assert.assert_allowed_fields(&v(json!({"a": 10, "c": null, "foo": 42})), &allowed, &any())),
        "Unexpected field 'foo' in 'argument'"
    );
}

#[test]
fn test_assert_forbidden_fields() {
    let assert = Assert::new();
    let forbidden = ["x", "y", "z"];
    assert!(assert
        .assert_forbidden_fields(&v(json!({"a": 10, "b": {"x": 12, "y": 33}})), &forbidden, &any())
        .is_ok());

    assert_eq!(
        failure(assert.assert_forbidden_fields(&v(json!({"a": 10, "z": 42})), &forbidden, &any())),
        "Field 'z' not allowed in 'argument'"
    );
}

// =============================================================================
// Shorthands
// =============================================================================

#[test]
fn test_comparison_shorthands() {
    let assert = Assert::new();
    let value = v(json!(123));

    assert!(assert.equal(&value, 123, &any()).is_ok());
    assert_eq!(
        failure(assert.equal(&value, 122, &any())),
        "Wrong value for 'argument', expected 122, got 123"
    );
    assert_eq!(
        failure(assert.not_equal(&value, vec![Value::from(121), Value::from(122), Value::from(123)], &any())),
        "Wrong value for 'argument', expected not 121, 122 or 123, got 123"
    );
    assert_eq!(
        failure(assert.lt(&value, 123, &any())),
        "Wrong value for 'argument', expected less than 123, got 123"
    );
    assert_eq!(
        failure(assert.lte(&value, 122, &any())),
        "Wrong value for 'argument', expected less than or equal to 122, got 123"
    );
    assert_eq!(
        failure(assert.gt(&value, 124, &any())),
        "Wrong value for 'argument', expected greater than 124, got 123"
    );
    assert_eq!(
        failure(assert.gte(&value, 124, &any())),
        "Wrong value for 'argument', expected greater than or equal to 124, got 123"
    );
}

#[test]
fn test_number_shorthands() {
    let assert = Assert::new();
    assert!(assert.integer(&v(json!(4)), true, &any()).is_ok());
    assert_eq!(
        failure(assert.integer(&v(json!(123.5)), true, &any())),
        "Wrong value for 'argument', expected integer number, got 123.5"
    );

    assert!(assert.divides(&v(json!(7)), 49, &any()).is_ok());
    assert_eq!(
        failure(assert.divides(&v(json!(5)), 49, &any())),
        "Wrong value for 'argument', expected exact divider of 49, got 5"
    );

    assert!(assert.multiple(&v(json!(42)), 21, &any()).is_ok());
    assert_eq!(
        failure(assert.multiple(&v(json!(100)), 21, &any())),
        "Wrong value for 'argument', expected exact multiple of 21, got 100"
    );
}

#[test]
fn test_string_shorthands() {
    let assert = Assert::new();
    let value = v(json!("abcdef"));

    assert!(assert.contains(&value, "bcd", &any()).is_ok());
    assert_eq!(
        failure(assert.contains(&value, "bce", &any())),
        "Wrong value for 'argument', expected string containing \"bce\", got \"abcdef\""
    );
    assert!(assert.begins(&value, vec!["xyz", "abc"], &any()).is_ok());
    assert_eq!(
        failure(assert.ends(&v(json!("abcdefg")), "def", &any())),
        "Wrong value for 'argument', expected string ending with \"def\", got \"abcdefg\""
    );
    assert_eq!(
        failure(assert.matches(&v(json!("abcdefg")), "^[a-f]+$", &any())),
        "Wrong value for 'argument', expected string matching \"^[a-f]+$\", got \"abcdefg\""
    );
}

#[test]
fn test_negated_string_shorthands() -> anyhow::Result<()> {
    let assert = Assert::new();
    let value = v(json!("abcdef"));

    assert!(assert.contains_not(&value, vec!["123", "cba"], &any()).is_ok());
    assert_eq!(
        failure(assert.contains_not(&value, vec!["123", "cba", "bcd"], &any())),
        "Wrong value for 'argument', expected string not containing \"123\", \"cba\" or \"bcd\", got \"abcdef\""
    );

    assert!(assert.begins_not(&value, vec!["bcd", "xyz"], &any()).is_ok());
    assert_eq!(
        failure(assert.begins_not(&value, vec!["bcd", "xyz", "abc"], &any())),
        "Wrong value for 'argument', expected string not beginning with \"bcd\", \"xyz\" or \"abc\", got \"abcdef\""
    );

    assert!(assert.ends_not(&value, vec!["abc", "xyz"], &any()).is_ok());
    assert_eq!(
        failure(assert.ends_not(&value, vec!["abc", "def", "xyz"], &any())),
        "Wrong value for 'argument', expected string not ending with \"abc\", \"def\" or \"xyz\", got \"abcdef\""
    );

    assert!(assert.matches_not(&value, "[1-6]+", &any()).is_ok());
    let patterns = vec![Pattern::compiled("[x-z]+", "")?, Pattern::compiled("[a-f]+", "")?];
    assert_eq!(
        failure(assert.matches_not(&value, patterns, &any())),
        "Wrong value for 'argument', expected string not matching /[x-z]+/ or /[a-f]+/, got \"abcdef\""
    );
    Ok(())
}

#[test]
fn test_length_and_each() -> anyhow::Result<()> {
    let assert = Assert::new();

    assert!(assert.length(&v(json!("abcdef")), 6, &any()).is_ok());
    assert!(assert.length(&v(json!("")), 0, &any()).is_ok());
    assert_eq!(
        failure(assert.length(&v(json!("123456")), Condition::clause(Operator::Gt, 6)?, &any())),
        "Wrong value for 'argument', expected length greater than 6, got 6"
    );

    assert!(assert
        .each(&v(json!([1, 2, 6])), Condition::clause(Operator::Lte, 6)?, &any())
        .is_ok());
    assert_eq!(
        failure(assert.each(
            &v(json!(["foo", "123", "bar"])),
            Condition::clause(Operator::ContainsNot, vec!["2", "5"])?,
            &any()
        )),
        "Wrong value for 'argument', expected string not containing \"2\" or \"5\", got \"123\""
    );
    Ok(())
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_messages_from_yaml() -> anyhow::Result<()> {
    let messages = MessageConfig::from_yaml_str(
        "value: \"%varName% must be %expected%(?funName (from %funName%)?)\"\n",
    )?;
    let assert = Assert::new().with_messages(messages);

    assert_eq!(
        failure(assert.gt(&v(json!(1)), 2, &Subject::var("count"))),
        "count must be greater than 2"
    );
    assert_eq!(
        failure(assert.gt(&v(json!(1)), 2, &Subject::var("count").in_fun("main"))),
        "count must be greater than 2 (from main)"
    );
    assert_eq!(
        failure(assert.assert_type(&v(json!(1)), "string", &any())),
        "Wrong type for 'argument', expected string, got number"
    );
    Ok(())
}
