//! Unit tests for template rendering

use serde_json::json;
use verity_template::{extract_blocks, parse_expr, render, Context, ConditionExpr, ExprOperator};

// =============================================================================
// Conditional blocks
// =============================================================================

#[test]
fn test_blocks_kept_only_when_condition_holds() -> anyhow::Result<()> {
    let tokens = Context::from_json(&json!({"value": "there it is", "var1": 25, "var2": true}))?;
    let template = "Tokens: (?value == 'there it is' this should show?)\
                    (?var1 >= 25 this as well?)(?var2 this too?)\
                    (?value=='somethingelse' this shouldn't show?)\
                    (?var3 and neither should this?)(?var1 > 25 nor this?)";
    assert_eq!(
        render(template, &tokens),
        "Tokens:  this should show this as well this too"
    );
    Ok(())
}

#[test]
fn test_false_token_drops_block() -> anyhow::Result<()> {
    let tokens = Context::from_json(&json!({"var2": false, "var3": 0, "var4": ""}))?;
    assert_eq!(render("a(?var2 b?)(?var3 c?)(?var4 d?)e", &tokens), "ae");
    Ok(())
}

#[test]
fn test_placeholders_inside_blocks() -> anyhow::Result<()> {
    let tokens = Context::from_json(&json!({"value": "123456", "var1": false, "var2": 43}))?;
    assert_eq!(
        render("Tokens:(?value %_TYPE_% %_LEN_% %var1% %var2%?)", &tokens),
        "Tokens: string 6 false 43"
    );
    Ok(())
}

#[test]
fn test_nested_blocks() -> anyhow::Result<()> {
    let tokens = Context::from_json(&json!({"value": "1234", "var1": false, "var2": 42}))?;
    assert_eq!(
        render(
            "Tokens:(?value %value%(?var1 === false %_TYPE_% %_LEN_%(?var2 > 40 %var2%?)?)?)",
            &tokens
        ),
        "Tokens: 1234 string 4 42"
    );
    assert_eq!(
        render(
            "Tokens:(?value %value%(?var1 === false %_TYPE_% %_LEN_%(?var2 > 42 %var2%?)?)?)",
            &tokens
        ),
        "Tokens: 1234 string 4"
    );
    Ok(())
}

#[test]
fn test_function_name_suffix() {
    let template = "Wrong value for '%varName%', expected %expected%, got %_ACTUAL_%(?funName in %funName%?)";

    let tokens = Context::new()
        .with("varName", "argument")
        .with("expected", "greater than or equal to 43")
        .with("actual", 42);
    assert_eq!(
        render(template, &tokens),
        "Wrong value for 'argument', expected greater than or equal to 43, got 42"
    );

    let tokens = tokens.with("funName", "resize");
    assert_eq!(
        render(template, &tokens),
        "Wrong value for 'argument', expected greater than or equal to 43, got 42 in resize"
    );
}

#[test]
fn test_unbalanced_block_is_literal() -> anyhow::Result<()> {
    let tokens = Context::from_json(&json!({"value": 1}))?;
    assert_eq!(render("broken (?value %value%", &tokens), "broken (?value 1");
    Ok(())
}

#[test]
fn test_unresolved_placeholder_leaves_closing_marker_for_next_name() -> anyhow::Result<()> {
    let tokens = Context::from_json(&json!({"y": 1, "z": "b"}))?;
    assert_eq!(render("%x%y%", &tokens), "%x1");
    assert_eq!(render("%x%y%%z%", &tokens), "%x1b");
    assert_eq!(render("50%y%", &tokens), "501");
    Ok(())
}

#[test]
fn test_rendering_is_idempotent_on_plain_output() -> anyhow::Result<()> {
    let tokens = Context::from_json(&json!({"value": "abc", "n": 3}))?;
    let once = render("(?n >= 3 %value% has %_LEN_% chars?)", &tokens);
    assert_eq!(once, " abc has 3 chars");
    assert_eq!(render(&once, &tokens), once);
    Ok(())
}

// =============================================================================
// Grammar
// =============================================================================

#[test]
fn test_parse_expr_scenario() {
    assert_eq!(
        parse_expr("value >= 42"),
        ConditionExpr {
            operator: ExprOperator::Gte,
            lho: "value".to_string(),
            rho: Some(42.into()),
        }
    );
}

#[test]
fn test_extract_blocks_with_complete_nested_block() {
    let blocks = extract_blocks("(?a x (?b y?) z?) and (?c w?)");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].message, " x (?b y?) z");
    assert_eq!(blocks[1].raw, "(?c w?)");
}
