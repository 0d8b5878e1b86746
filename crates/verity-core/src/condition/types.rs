//! Condition types: operators, references, patterns and evaluation results

use crate::error::{CoreError, Result};
use crate::types::Value;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::str::FromStr;

/// Constraint operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Runtime type tag (`type`)
    Type,
    /// Structural equality (`eq`)
    Eq,
    /// Structural inequality (`neq`)
    Neq,
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`lte`)
    Lte,
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`gte`)
    Gte,
    /// Whole / fractional number (`integer`)
    Integer,
    /// Value evenly divides the reference (`divides`)
    Divides,
    /// Value is a multiple of the reference (`multiple`)
    Multiple,
    /// Substring (`contains`)
    Contains,
    /// Prefix (`begins`)
    Begins,
    /// Suffix (`ends`)
    Ends,
    /// Regular expression search (`matches`)
    Matches,
    /// Negated substring (`containsNot`)
    ContainsNot,
    /// Negated prefix (`beginsNot`)
    BeginsNot,
    /// Negated suffix (`endsNot`)
    EndsNot,
    /// Negated regular expression search (`matchesNot`)
    MatchesNot,
    /// Nested condition on the length (`length`)
    Length,
    /// Nested condition on every element (`each`)
    Each,
}

impl Operator {
    pub const ALL: [Operator; 20] = [
        Operator::Type,
        Operator::Eq,
        Operator::Neq,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
        Operator::Integer,
        Operator::Divides,
        Operator::Multiple,
        Operator::Contains,
        Operator::Begins,
        Operator::Ends,
        Operator::Matches,
        Operator::ContainsNot,
        Operator::BeginsNot,
        Operator::EndsNot,
        Operator::MatchesNot,
        Operator::Length,
        Operator::Each,
    ];

    /// Operator key as written in condition documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Type => "type",
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Integer => "integer",
            Operator::Divides => "divides",
            Operator::Multiple => "multiple",
            Operator::Contains => "contains",
            Operator::Begins => "begins",
            Operator::Ends => "ends",
            Operator::Matches => "matches",
            Operator::ContainsNot => "containsNot",
            Operator::BeginsNot => "beginsNot",
            Operator::EndsNot => "endsNot",
            Operator::MatchesNot => "matchesNot",
            Operator::Length => "length",
            Operator::Each => "each",
        }
    }

    /// Look up an operator by its key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == key)
    }

    /// Returns true if the reference is itself a condition
    pub fn is_nested(&self) -> bool {
        matches!(self, Operator::Length | Operator::Each)
    }

    /// Returns true if the reference is one or more patterns
    pub fn is_pattern(&self) -> bool {
        matches!(self, Operator::Matches | Operator::MatchesNot)
    }

    /// Returns true if this operator passes only when none of its alternatives hold
    pub fn is_negated(&self) -> bool {
        matches!(
            self,
            Operator::Neq
                | Operator::ContainsNot
                | Operator::BeginsNot
                | Operator::EndsNot
                | Operator::MatchesNot
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s).ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

/// A regular expression reference for `matches` / `matchesNot`
///
/// A literal pattern is plain pattern text; a compiled pattern also carries
/// flags and renders as `/source/flags`.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: Option<String>,
    regex: Regex,
}

impl Pattern {
    /// Flags accepted by `Pattern::compiled`
    pub const FLAGS: &'static str = "dgimsuy";

    /// Pattern given as plain text
    pub fn literal(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = Self::build(&source, "")?;
        Ok(Self {
            source,
            flags: None,
            regex,
        })
    }

    /// Precompiled pattern with flags (`i`, `m`, `s` change matching)
    pub fn compiled(source: impl Into<String>, flags: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let flags = flags.into();
        if let Some(flag) = flags.chars().find(|c| !Self::FLAGS.contains(*c)) {
            return Err(CoreError::InvalidPattern {
                pattern: format!("/{}/{}", source, flags),
                message: format!("unsupported flag '{}'", flag),
            });
        }
        let regex = Self::build(&source, &flags)?;
        Ok(Self {
            source,
            flags: Some(flags),
            regex,
        })
    }

    fn build(source: &str, flags: &str) -> Result<Regex> {
        RegexBuilder::new(source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|e| CoreError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Option<&str> {
        self.flags.as_deref()
    }

    pub fn is_literal(&self) -> bool {
        self.flags.is_none()
    }

    /// Unanchored search
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.flags {
            None => write!(f, "\"{}\"", self.source),
            Some(flags) => write!(f, "/{}/{}", self.source, flags),
        }
    }
}

/// The comparison value(s) attached to an operator
///
/// A list means "any of these alternatives" for that operator only.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Value(Value),
    Values(Vec<Value>),
    Pattern(Pattern),
    Patterns(Vec<Pattern>),
    /// Nested condition for `length` / `each`
    Condition(Box<Condition>),
}

impl Reference {
    /// Scalar alternatives (empty for patterns and nested conditions)
    pub fn values(&self) -> &[Value] {
        match self {
            Reference::Value(v) => std::slice::from_ref(v),
            Reference::Values(vs) => vs,
            _ => &[],
        }
    }

    /// Pattern alternatives (empty for everything else)
    pub fn patterns(&self) -> &[Pattern] {
        match self {
            Reference::Pattern(p) => std::slice::from_ref(p),
            Reference::Patterns(ps) => ps,
            _ => &[],
        }
    }

    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Reference::Condition(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Reference::Values(_) | Reference::Patterns(_))
    }

    fn into_values(self) -> Vec<Value> {
        match self {
            Reference::Value(v) => vec![v],
            Reference::Values(vs) => vs,
            _ => Vec::new(),
        }
    }

    fn into_patterns(self) -> Vec<Pattern> {
        match self {
            Reference::Pattern(p) => vec![p],
            Reference::Patterns(ps) => ps,
            _ => Vec::new(),
        }
    }

    /// Union of two references for the same operator
    pub(crate) fn merge(self, other: Reference) -> Reference {
        match (self, other) {
            (Reference::Condition(first), Reference::Condition(second)) => {
                let mut items = match *first {
                    Condition::Compound(items) => items,
                    single => vec![single],
                };
                items.push(*second);
                Reference::Condition(Box::new(Condition::Compound(items)))
            }
            (
                first @ (Reference::Pattern(_) | Reference::Patterns(_)),
                second @ (Reference::Pattern(_) | Reference::Patterns(_)),
            ) => {
                let mut patterns = first.into_patterns();
                patterns.extend(second.into_patterns());
                Reference::Patterns(patterns)
            }
            (
                first @ (Reference::Value(_) | Reference::Values(_)),
                second @ (Reference::Value(_) | Reference::Values(_)),
            ) => {
                let mut values = first.into_values();
                values.extend(second.into_values());
                Reference::Values(values)
            }
            (first, _) => first,
        }
    }

    fn invalid(operator: Operator, message: &str) -> CoreError {
        CoreError::InvalidReference {
            operator: operator.to_string(),
            message: message.to_string(),
        }
    }

    /// Normalize a reference for `operator`, rejecting shapes it cannot use
    fn normalize(self, operator: Operator) -> Result<Reference> {
        match operator {
            Operator::Length | Operator::Each => {
                let condition = match self {
                    Reference::Condition(c) => *c,
                    Reference::Value(v) => Condition::Literal(v),
                    Reference::Values(vs) => {
                        Condition::Compound(vs.into_iter().map(Condition::Literal).collect())
                    }
                    _ => return Err(Self::invalid(operator, "expected a nested condition")),
                };
                Ok(Reference::Condition(Box::new(condition)))
            }
            Operator::Matches | Operator::MatchesNot => match self {
                Reference::Pattern(_) | Reference::Patterns(_) => Ok(self),
                Reference::Value(Value::String(s)) => Ok(Reference::Pattern(Pattern::literal(s)?)),
                Reference::Values(vs) => {
                    let patterns = vs
                        .into_iter()
                        .map(|v| match v {
                            Value::String(s) => Pattern::literal(s),
                            _ => Err(Self::invalid(operator, "expected pattern text")),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Reference::Patterns(patterns))
                }
                _ => Err(Self::invalid(operator, "expected pattern text or a compiled pattern")),
            },
            _ => {
                if !matches!(self, Reference::Value(_) | Reference::Values(_)) {
                    return Err(Self::invalid(operator, "expected a value or a list of values"));
                }
                let valid = match operator {
                    Operator::Type => self.values().iter().all(|v| v.as_str().is_some()),
                    Operator::Integer => self.values().iter().all(|v| v.as_bool().is_some()),
                    _ => true,
                };
                if !valid {
                    let expected = if operator == Operator::Type {
                        "expected type names"
                    } else {
                        "expected true or false"
                    };
                    return Err(Self::invalid(operator, expected));
                }
                Ok(self)
            }
        }
    }
}

impl From<Value> for Reference {
    fn from(v: Value) -> Self {
        Reference::Value(v)
    }
}

impl From<Vec<Value>> for Reference {
    fn from(vs: Vec<Value>) -> Self {
        Reference::Values(vs)
    }
}

impl From<bool> for Reference {
    fn from(b: bool) -> Self {
        Reference::Value(Value::Bool(b))
    }
}

impl From<f64> for Reference {
    fn from(n: f64) -> Self {
        Reference::Value(Value::Number(n))
    }
}

impl From<i32> for Reference {
    fn from(n: i32) -> Self {
        Reference::Value(Value::from(n))
    }
}

impl From<i64> for Reference {
    fn from(n: i64) -> Self {
        Reference::Value(Value::from(n))
    }
}

impl From<&str> for Reference {
    fn from(s: &str) -> Self {
        Reference::Value(Value::from(s))
    }
}

impl From<String> for Reference {
    fn from(s: String) -> Self {
        Reference::Value(Value::String(s))
    }
}

impl From<Vec<&str>> for Reference {
    fn from(items: Vec<&str>) -> Self {
        Reference::Values(items.into_iter().map(Value::from).collect())
    }
}

impl From<Pattern> for Reference {
    fn from(p: Pattern) -> Self {
        Reference::Pattern(p)
    }
}

impl From<Vec<Pattern>> for Reference {
    fn from(ps: Vec<Pattern>) -> Self {
        Reference::Patterns(ps)
    }
}

impl From<Condition> for Reference {
    fn from(c: Condition) -> Self {
        Reference::Condition(Box::new(c))
    }
}

/// One operator with its reference, e.g. `gte: 43`
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    operator: Operator,
    reference: Reference,
}

impl Clause {
    /// Create a clause, checking the reference shape against the operator
    pub fn new(operator: Operator, reference: impl Into<Reference>) -> Result<Self> {
        let reference = reference.into().normalize(operator)?;
        Ok(Self {
            operator,
            reference,
        })
    }

    /// Build without validation; only for references already normalized
    pub(crate) fn from_parts(operator: Operator, reference: Reference) -> Self {
        Self {
            operator,
            reference,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub(crate) fn reference_mut(&mut self) -> &mut Reference {
        &mut self.reference
    }
}

/// A declarative constraint evaluated against a value
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Bare value, sugar for `{ eq: value }`
    Literal(Value),
    /// Operator clauses, all of which must hold (checked in order)
    Single(Vec<Clause>),
    /// Alternatives, at least one of which must hold
    Compound(Vec<Condition>),
}

impl Condition {
    pub fn literal(value: impl Into<Value>) -> Self {
        Condition::Literal(value.into())
    }

    /// One-clause condition, e.g. `Condition::clause(Operator::Gte, 43)`
    pub fn clause(operator: Operator, reference: impl Into<Reference>) -> Result<Self> {
        Ok(Condition::Single(vec![Clause::new(operator, reference)?]))
    }

    /// Add another clause that must also hold
    pub fn and(self, operator: Operator, reference: impl Into<Reference>) -> Result<Self> {
        let clause = Clause::new(operator, reference)?;
        let clauses = match self {
            Condition::Single(mut clauses) => {
                clauses.push(clause);
                clauses
            }
            Condition::Literal(v) => vec![Clause::from_parts(Operator::Eq, Reference::Value(v)), clause],
            Condition::Compound(_) => {
                return Err(CoreError::InvalidCondition(
                    "cannot add clauses to a compound condition".to_string(),
                ))
            }
        };
        Ok(Condition::Single(clauses))
    }

    /// Alternatives, at least one of which must hold
    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Compound(conditions)
    }

    /// Parse a condition document
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        super::parser::ConditionParser::parse(json)
    }

    /// Evaluate a value against this condition
    pub fn evaluate(&self, value: &Value) -> EvaluationResult {
        super::evaluator::evaluate(value, self)
    }
}

impl TryFrom<&serde_json::Value> for Condition {
    type Error = CoreError;

    fn try_from(json: &serde_json::Value) -> Result<Self> {
        Condition::from_json(json)
    }
}

impl<'de> serde::Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let json = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
        Condition::from_json(&json).map_err(serde::de::Error::custom)
    }
}

/// Which check failed: an operator, a compound, or a nested path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum What {
    Operator(Operator),
    Compound,
    Length(Box<What>),
    Each(Box<What>),
}

impl fmt::Display for What {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            What::Operator(op) => write!(f, "{}", op),
            What::Compound => f.write_str("compound"),
            What::Length(inner) => write!(f, "length/{}", inner),
            What::Each(inner) => write!(f, "each/{}", inner),
        }
    }
}

/// Outcome of evaluating a value against a condition
///
/// Passing results carry no diagnostics. `index` is only set for `each`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub result: bool,
    pub what: Option<What>,
    pub reference: Option<Reference>,
    pub actual: Option<Value>,
    pub details: Option<String>,
    pub index: Option<usize>,
}

impl EvaluationResult {
    pub fn pass() -> Self {
        Self {
            result: true,
            what: None,
            reference: None,
            actual: None,
            details: None,
            index: None,
        }
    }

    pub fn fail(what: What, reference: Reference, actual: Value, details: String) -> Self {
        Self {
            result: false,
            what: Some(what),
            reference: Some(reference),
            actual: Some(actual),
            details: Some(details),
            index: None,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.result
    }

    /// `what` as a path string, e.g. `"length/eq"`
    pub fn what_path(&self) -> Option<String> {
        self.what.as_ref().map(ToString::to_string)
    }
}
