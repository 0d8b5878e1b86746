//! Value assertion example
//!
//! This example demonstrates:
//! - Checking values with the assertion shorthands
//! - Checking object fields against per-field conditions
//! - Reading the evaluator diagnostics of a failure
//!
//! Run with `RUST_LOG=debug cargo run --example assert_values` to see failures logged.

use serde_json::json;
use verity_sdk::{Assert, Condition, Fields, Operator, SdkError, Subject, TypeList, Value};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Assert Values Example ===\n");

    let assert = Assert::new();
    let subject = Subject::var("width").in_fun("resize");

    // Passing assertions return Ok(())
    assert.gte(&Value::from(640), 320, &subject)?;
    assert.length(&Value::from("abcdef"), Condition::clause(Operator::Lte, 6)?, &subject)?;
    println!("width 640 and \"abcdef\" passed\n");

    // Failing assertions carry the rendered message
    report(assert.gte(&Value::from(42), 43, &subject));
    report(assert.each(
        &Value::from(json!([12, 1, 7])),
        Condition::from_json(&json!([{"eq": [12, 24]}, {"lte": 6}]))?,
        &Subject::var("sizes"),
    ));

    // Object fields
    let request = Value::from(json!({"user": "alice", "amount": 12.5, "extra": true}));
    let types = Fields::<TypeList>::new()
        .field("user", "string")
        .field("amount", "number");
    assert.assert_field_types(&request, &types, &Subject::var("request"))?;

    let values = Fields::<Condition>::from_json(&json!({
        "user": {"length": {"gte": 3}},
        "amount": {"integer": true}
    }))?;
    report(assert.assert_field_values(&request, &values, &Subject::var("request")));
    report(assert.assert_allowed_fields(&request, &["user", "amount"], &Subject::var("request")));

    Ok(())
}

fn report(result: verity_sdk::Result<()>) {
    match result {
        Ok(()) => println!("passed"),
        Err(SdkError::AssertionFailed(failure)) => {
            println!("{}", failure);
            if let Some(diagnostics) = &failure.diagnostics {
                println!("  what: {}", diagnostics.what_path().unwrap_or_default());
                if let Some(index) = diagnostics.index {
                    println!("  index: {}", index);
                }
            }
            println!();
        }
        Err(other) => println!("error: {}\n", other),
    }
}
