//! Condition evaluator
//!
//! Evaluation is total: every `(value, condition)` pair yields an
//! `EvaluationResult`. Failures carry the failing check, its reference, the
//! examined value and a describer phrase.

use super::describer::{describe, join_alternatives};
use super::types::{Clause, Condition, EvaluationResult, Operator, Reference, What};
use crate::types::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Relative tolerance for exact-division checks on decimals
const DIVISION_TOLERANCE: f64 = 1e-9;

/// Evaluate `value` against `condition`
pub fn evaluate(value: &Value, condition: &Condition) -> EvaluationResult {
    match condition {
        Condition::Literal(literal) => {
            let clause = Clause::from_parts(Operator::Eq, Reference::Value(literal.clone()));
            evaluate_clause(value, &clause)
        }
        Condition::Single(clauses) => evaluate_single(value, clauses),
        Condition::Compound(items) => evaluate_compound(value, items),
    }
}

fn evaluate_single(value: &Value, clauses: &[Clause]) -> EvaluationResult {
    for clause in clauses {
        let result = evaluate_clause(value, clause);
        if !result.result {
            return result;
        }
    }
    EvaluationResult::pass()
}

fn evaluate_compound(value: &Value, items: &[Condition]) -> EvaluationResult {
    let mut phrases = Vec::with_capacity(items.len());
    let mut merged: Vec<Clause> = Vec::new();

    for item in items {
        let result = evaluate(value, item);
        if result.result {
            return EvaluationResult::pass();
        }
        phrases.push(result.details.unwrap_or_default());
        merge_condition(&mut merged, item);
    }

    let details = join_alternatives(phrases);
    log::trace!("compound condition failed: {}", details);
    EvaluationResult::fail(
        What::Compound,
        Reference::Condition(Box::new(Condition::Single(merged))),
        value.clone(),
        details,
    )
}

/// Fold a failing alternative into the merged diagnostic reference
fn merge_condition(merged: &mut Vec<Clause>, condition: &Condition) {
    match condition {
        Condition::Literal(literal) => {
            merge_reference(merged, Operator::Eq, Reference::Value(literal.clone()))
        }
        Condition::Single(clauses) => {
            for clause in clauses {
                merge_reference(merged, clause.operator(), clause.reference().clone());
            }
        }
        Condition::Compound(items) => {
            for item in items {
                merge_condition(merged, item);
            }
        }
    }
}

fn merge_reference(merged: &mut Vec<Clause>, operator: Operator, reference: Reference) {
    match merged.iter_mut().find(|clause| clause.operator() == operator) {
        Some(existing) => {
            let slot = existing.reference_mut();
            let current = std::mem::replace(slot, Reference::Values(Vec::new()));
            *slot = current.merge(reference);
        }
        None => merged.push(Clause::from_parts(operator, reference)),
    }
}

fn evaluate_clause(value: &Value, clause: &Clause) -> EvaluationResult {
    let operator = clause.operator();
    let reference = clause.reference();

    match operator {
        Operator::Length => evaluate_length(value, &nested_condition(reference)),
        Operator::Each => evaluate_each(value, reference, &nested_condition(reference)),
        _ if check(value, operator, reference) => EvaluationResult::pass(),
        _ => {
            let actual = match operator {
                Operator::Type => Value::String(value.type_name().to_string()),
                _ => value.clone(),
            };
            let details = describe(operator, reference);
            log::trace!("'{}' failed for {}: expected {}", operator, actual, details);
            EvaluationResult::fail(What::Operator(operator), reference.clone(), actual, details)
        }
    }
}

fn nested_condition(reference: &Reference) -> Cow<'_, Condition> {
    match reference {
        Reference::Condition(condition) => Cow::Borrowed(condition.as_ref()),
        Reference::Value(v) => Cow::Owned(Condition::Literal(v.clone())),
        other => Cow::Owned(Condition::Compound(
            other.values().iter().cloned().map(Condition::Literal).collect(),
        )),
    }
}

fn evaluate_length(value: &Value, condition: &Condition) -> EvaluationResult {
    let length = value
        .length()
        .map(Value::from)
        .unwrap_or(Value::Undefined);
    let nested = evaluate(&length, condition);
    if nested.result {
        return nested;
    }
    EvaluationResult {
        result: false,
        what: Some(What::Length(Box::new(nested.what.unwrap_or(What::Compound)))),
        details: Some(format!("length {}", nested.details.unwrap_or_default())),
        actual: Some(nested.actual.unwrap_or(length)),
        ..nested
    }
}

fn evaluate_each(value: &Value, reference: &Reference, condition: &Condition) -> EvaluationResult {
    let Some(items) = value.as_array() else {
        return EvaluationResult::fail(
            What::Operator(Operator::Each),
            reference.clone(),
            value.clone(),
            "array".to_string(),
        );
    };

    for (index, item) in items.iter().enumerate() {
        let nested = evaluate(item, condition);
        if !nested.result {
            return EvaluationResult {
                what: Some(What::Each(Box::new(nested.what.unwrap_or(What::Compound)))),
                index: Some(index),
                ..nested
            };
        }
    }
    EvaluationResult::pass()
}

/// Run a leaf operator; list references accept any alternative
fn check(value: &Value, operator: Operator, reference: &Reference) -> bool {
    let values = reference.values();

    match operator {
        Operator::Type => values
            .iter()
            .any(|tag| tag.as_str() == Some(value.type_name())),
        Operator::Eq => values.iter().any(|r| value == r),
        Operator::Neq => !values.iter().any(|r| value == r),
        Operator::Lt => compares(value, values, |o| o == Ordering::Less),
        Operator::Lte => compares(value, values, |o| o != Ordering::Greater),
        Operator::Gt => compares(value, values, |o| o == Ordering::Greater),
        Operator::Gte => compares(value, values, |o| o != Ordering::Less),
        Operator::Integer => values.iter().any(|r| match r.as_bool() {
            Some(true) => value.is_integer(),
            Some(false) => value.as_f64().is_some() && !value.is_integer(),
            None => false,
        }),
        Operator::Divides => value.as_f64().is_some_and(|n| {
            values
                .iter()
                .filter_map(Value::as_f64)
                .any(|r| is_exact_quotient(r, n))
        }),
        Operator::Multiple => value.as_f64().is_some_and(|n| {
            values
                .iter()
                .filter_map(Value::as_f64)
                .any(|r| is_exact_quotient(n, r))
        }),
        Operator::Contains
        | Operator::Begins
        | Operator::Ends
        | Operator::ContainsNot
        | Operator::BeginsNot
        | Operator::EndsNot => {
            let Some(text) = value.as_str() else {
                return false;
            };
            let found = values.iter().any(|r| {
                let needle = reference_text(r);
                match operator {
                    Operator::Contains | Operator::ContainsNot => text.contains(needle.as_ref()),
                    Operator::Begins | Operator::BeginsNot => text.starts_with(needle.as_ref()),
                    _ => text.ends_with(needle.as_ref()),
                }
            });
            found != operator.is_negated()
        }
        Operator::Matches | Operator::MatchesNot => {
            let Some(text) = value.as_str() else {
                return false;
            };
            let found = reference.patterns().iter().any(|p| p.is_match(text));
            found != operator.is_negated()
        }
        Operator::Length | Operator::Each => false,
    }
}

fn compares(value: &Value, references: &[Value], accept: impl Fn(Ordering) -> bool) -> bool {
    references
        .iter()
        .any(|r| value.natural_cmp(r).is_some_and(&accept))
}

/// Whether `divisor` divides `dividend` to a whole quotient, tolerating decimal rounding
fn is_exact_quotient(dividend: f64, divisor: f64) -> bool {
    if divisor == 0.0 || !divisor.is_finite() || !dividend.is_finite() {
        return false;
    }
    let quotient = dividend / divisor;
    (quotient - quotient.round()).abs() <= DIVISION_TOLERANCE * quotient.abs().max(1.0)
}

fn reference_text(reference: &Value) -> Cow<'_, str> {
    match reference.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(reference.to_plain_string()),
    }
}
