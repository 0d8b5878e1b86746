//! Template rendering example
//!
//! Renders a message template with placeholders, macros and nested
//! conditional blocks against a few token contexts.

use serde_json::json;
use verity_template::{extract_blocks, render, Context};

const TEMPLATE: &str =
    "Got %_VALUE_%(?value , a %_TYPE_%(?var1 === false  of length %_LEN_%(?var2 > 40 , over %var2%?)?)?)";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Render Messages Example ===\n");
    println!("Template: {}\n", TEMPLATE);

    for block in extract_blocks(TEMPLATE) {
        println!("Outer block: {:?} -> {:?}", block.condition, block.message);
    }
    println!();

    let contexts = [
        json!({"value": "1234", "var1": false, "var2": 42}),
        json!({"value": "1234", "var1": false, "var2": 7}),
        json!({"value": [1, 2, 3], "var1": true}),
        json!({"value": ""}),
    ];

    for tokens in &contexts {
        let context = Context::from_json(tokens)?;
        println!("{}", tokens);
        println!("  -> {}", render(TEMPLATE, &context));
    }

    Ok(())
}
