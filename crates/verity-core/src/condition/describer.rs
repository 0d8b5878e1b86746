//! Human-readable phrases for operators and their references
//!
//! These phrases fill the `details` field of failed evaluations, e.g.
//! `greater than or equal to 43` or `string containing "abc"`.

use super::types::{Condition, Operator, Reference};

/// Describe what `operator` with `reference` expects
pub fn describe(operator: Operator, reference: &Reference) -> String {
    match operator {
        Operator::Type => format!("type {}", alternatives(reference)),
        Operator::Eq => alternatives(reference),
        Operator::Neq => format!("not {}", alternatives(reference)),
        Operator::Lt => format!("less than {}", alternatives(reference)),
        Operator::Lte => format!("less than or equal to {}", alternatives(reference)),
        Operator::Gt => format!("greater than {}", alternatives(reference)),
        Operator::Gte => format!("greater than or equal to {}", alternatives(reference)),
        Operator::Integer => join_alternatives(reference.values().iter().map(|v| {
            if v.as_bool() == Some(false) {
                "non-integer number".to_string()
            } else {
                "integer number".to_string()
            }
        })),
        Operator::Divides => format!("exact divider of {}", alternatives(reference)),
        Operator::Multiple => format!("exact multiple of {}", alternatives(reference)),
        Operator::Contains => format!("string containing {}", alternatives(reference)),
        Operator::Begins => format!("string beginning with {}", alternatives(reference)),
        Operator::Ends => format!("string ending with {}", alternatives(reference)),
        Operator::Matches => format!("string matching {}", alternatives(reference)),
        Operator::ContainsNot => format!("string not containing {}", alternatives(reference)),
        Operator::BeginsNot => format!("string not beginning with {}", alternatives(reference)),
        Operator::EndsNot => format!("string not ending with {}", alternatives(reference)),
        Operator::MatchesNot => format!("string not matching {}", alternatives(reference)),
        Operator::Length => format!("length {}", alternatives(reference)),
        Operator::Each => alternatives(reference),
    }
}

/// Describe a whole condition without evaluating it
pub fn describe_condition(condition: &Condition) -> String {
    match condition {
        Condition::Literal(value) => value.to_quoted_string(),
        Condition::Single(clauses) => clauses
            .iter()
            .map(|clause| describe(clause.operator(), clause.reference()))
            .collect::<Vec<_>>()
            .join(" and "),
        Condition::Compound(items) => join_alternatives(items.iter().map(describe_condition)),
    }
}

/// Join phrases as `A, B or C`
pub fn join_alternatives<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut items: Vec<String> = items.into_iter().collect();
    match items.pop() {
        None => String::new(),
        Some(last) if items.is_empty() => last,
        Some(last) => format!("{} or {}", items.join(", "), last),
    }
}

fn alternatives(reference: &Reference) -> String {
    match reference {
        Reference::Value(value) => value.to_quoted_string(),
        Reference::Values(values) => join_alternatives(values.iter().map(|v| v.to_quoted_string())),
        Reference::Pattern(pattern) => pattern.to_string(),
        Reference::Patterns(patterns) => join_alternatives(patterns.iter().map(|p| p.to_string())),
        Reference::Condition(condition) => describe_condition(condition),
    }
}
