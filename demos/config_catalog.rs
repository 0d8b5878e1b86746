//! Message catalog example
//!
//! Loads custom assertion messages from YAML and field conditions from JSON,
//! then validates a few records with them.

use serde_json::json;
use verity_sdk::{Assert, Condition, Fields, MessageConfig, Subject, Value};

const MESSAGES: &str = r#"
value: "%varName% must be %expected% (got %_ACTUAL_%)"
field_values: "%varName%.%field% must be %expected% (got %_ACTUAL_%)"
forbidden_fields: "%varName% may not set '%field%'"
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Config Catalog Example ===\n");

    let messages = MessageConfig::from_yaml_str(MESSAGES)?;
    let assert = Assert::new()
        .with_messages(messages)
        .with_default_var_name("record");

    let rules = Fields::<Condition>::from_json(&json!({
        "id": {"type": "string", "matches": "^[a-z]{3}-[0-9]+$"},
        "port": [{"eq": 0}, {"integer": true, "gte": 1024, "lt": 65536}],
        "tags": {"each": {"type": "string", "length": {"gt": 0}}}
    }))?;

    let records = [
        json!({"id": "abc-12", "port": 8080, "tags": ["web"]}),
        json!({"id": "abc-12", "port": 80, "tags": []}),
        json!({"id": "ABC", "port": 0}),
        json!({"id": "abc-1", "port": 0, "tags": ["ok", ""]}),
        json!({"id": "abc-1", "port": 0, "admin": true}),
    ];

    for record in &records {
        let value = Value::from(record);
        let outcome = assert
            .assert_optional_field_values(&value, &rules, &Subject::new())
            .and_then(|_| assert.assert_forbidden_fields(&value, &["admin"], &Subject::new()));
        match outcome {
            Ok(()) => println!("{} ok", record),
            Err(err) => println!("{} -> {}", record, err),
        }
    }

    Ok(())
}
