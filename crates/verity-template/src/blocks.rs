//! Conditional block extraction
//!
//! A block is `(?expr message?)`. The message runs from the end of the
//! expression to the closing marker, keeps its leading whitespace and drops
//! trailing whitespace. Only outermost blocks are extracted; nested blocks stay
//! verbatim inside the message for a later pass.

use crate::expr::{parse_expr, ConditionExpr, ExprOperator};
use std::ops::Range;

pub const OPEN: &str = "(?";
pub const CLOSE: &str = "?)";

/// Characters that end a bare token name
const OPERATOR_CHARS: &[char] = &['=', '!', '<', '>'];

/// An outermost conditional block
#[derive(Debug, Clone, PartialEq)]
pub struct Block<'a> {
    /// The whole block including markers
    pub raw: &'a str,
    /// Byte range of `raw` in the scanned text
    pub span: Range<usize>,
    pub condition: ConditionExpr,
    /// Text kept when the condition holds, possibly with nested blocks
    pub message: &'a str,
}

/// Extract the outermost blocks of `text` in order
///
/// Unbalanced markers are not blocks and stay as literal text.
pub fn extract_blocks(text: &str) -> Vec<Block<'_>> {
    let bytes = text.as_bytes();
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut at = 0;

    while at + 1 < bytes.len() {
        let rest = &bytes[at..];
        if rest.starts_with(OPEN.as_bytes()) {
            if depth == 0 {
                start = at;
            }
            depth += 1;
            at += OPEN.len();
        } else if depth > 0 && rest.starts_with(CLOSE.as_bytes()) {
            depth -= 1;
            at += CLOSE.len();
            if depth == 0 {
                blocks.push(Block::parse(text, start..at));
            }
        } else {
            at += 1;
        }
    }

    if depth > 0 {
        log::debug!("unbalanced block marker at byte {} left as text", start);
    }
    blocks
}

impl<'a> Block<'a> {
    fn parse(text: &'a str, span: Range<usize>) -> Self {
        let raw = &text[span.clone()];
        let content = &raw[OPEN.len()..raw.len() - CLOSE.len()];
        let (expression, message) = split_content(content);
        Self {
            raw,
            span,
            condition: parse_expr(expression),
            message: message.trim_end(),
        }
    }
}

/// Split block content into the expression and the message
fn split_content(content: &str) -> (&str, &str) {
    let body = content.trim_start();
    let name_end = body
        .find(|c: char| c.is_whitespace() || OPERATOR_CHARS.contains(&c))
        .unwrap_or(body.len());
    let after_name = body[name_end..].trim_start();

    let Some(operator) = ExprOperator::match_prefix(after_name) else {
        return body.split_at(name_end);
    };

    let literal = after_name[operator.as_str().len()..].trim_start();
    let literal_end = literal_len(literal);
    body.split_at(body.len() - literal.len() + literal_end)
}

/// Byte length of the literal at the start of `text`
fn literal_len(text: &str) -> usize {
    match text.chars().next() {
        Some(quote @ ('\'' | '"')) => text[1..]
            .find(quote)
            .map_or(text.len(), |end| end + 2),
        _ => text.find(char::is_whitespace).unwrap_or(text.len()),
    }
}
