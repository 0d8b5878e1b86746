//! Template renderer

use crate::blocks::extract_blocks;
use crate::context::Context;
use crate::expr::eval_expr;
use crate::macros::Macro;
use regex::Regex;
use std::sync::LazyLock;
use verity_core::Value;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([A-Za-z0-9_.$-]+)%").expect("valid placeholder pattern"));

/// Render `template` against `context`
///
/// Blocks are resolved first (nested blocks recursively, left to right), then
/// `%name%` placeholders are substituted in one pass over the result. Names that
/// are neither macros nor context tokens are left as they are, and their closing
/// `%` can still open the next placeholder.
pub fn render(template: &str, context: &Context) -> String {
    let resolved = resolve_blocks(template, context);
    substitute_placeholders(&resolved, context)
}

fn resolve_blocks(template: &str, context: &Context) -> String {
    let blocks = extract_blocks(template);
    if blocks.is_empty() {
        return template.to_string();
    }

    let mut output = String::with_capacity(template.len());
    let mut last = 0;
    for block in &blocks {
        output.push_str(&template[last..block.span.start]);
        if eval_expr(&block.condition, context) {
            output.push_str(&resolve_blocks(block.message, context));
        } else {
            log::trace!("dropping block {}", block.raw);
        }
        last = block.span.end;
    }
    output.push_str(&template[last..]);
    output
}

fn substitute_placeholders(text: &str, context: &Context) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    let mut at = 0;

    while let Some(caps) = PLACEHOLDER_RE.captures_at(text, at) {
        let (whole, name) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(name)) => (whole, name.as_str()),
            _ => break,
        };
        let expansion = match Macro::from_name(name) {
            Some(m) => Some(m.expand(context)),
            None => context.get(name).map(Value::to_plain_string),
        };
        match expansion {
            Some(expansion) => {
                output.push_str(&text[last..whole.start()]);
                output.push_str(&expansion);
                last = whole.end();
                at = whole.end();
            }
            // The closing marker may open the next placeholder.
            None => at = whole.end() - 1,
        }
    }
    output.push_str(&text[last..]);
    output
}
