/*!
 * Operator Evaluator
 * Closed table of comparison and temporal operators
 *
 * Every operator is total: arity mismatches, unparsable dates, invalid
 * regexes, and unknown operators produce `result=false` with a diagnostic
 * instead of an error. This is the fail-closed leaf of the engine.
 */

use crate::core::timeparse::{parse_duration, parse_instant};
use crate::policy::OperatorKind;
use serde_json::Value;
use std::cmp::Ordering;
use time::OffsetDateTime;

/// Outcome of applying one operator
#[derive(Debug, Clone, PartialEq)]
pub struct OpOutcome {
    pub result: bool,
    /// Present when the operator could not be applied meaningfully.
    /// A diagnostic outcome is never flipped by condition negation.
    pub diagnostic: Option<String>,
}

impl OpOutcome {
    fn of(result: bool) -> Self {
        Self {
            result,
            diagnostic: None,
        }
    }

    fn invalid(diagnostic: impl Into<String>) -> Self {
        Self {
            result: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Apply `op` to the resolved actual value and the condition's expected
/// value. `now` anchors the temporal operators.
pub fn apply(
    op: OperatorKind,
    actual: Option<&Value>,
    expected: &Value,
    now: OffsetDateTime,
) -> OpOutcome {
    let Some(actual) = actual else {
        return OpOutcome::invalid("field did not resolve to a value");
    };

    match op {
        OperatorKind::Equals => scalar_equality(actual, expected),
        OperatorKind::NotEquals => {
            let outcome = scalar_equality(actual, expected);
            match outcome.diagnostic {
                Some(_) => outcome,
                None => OpOutcome::of(!outcome.result),
            }
        }
        OperatorKind::Contains => membership(actual, expected),
        OperatorKind::NotContains => {
            let outcome = membership(actual, expected);
            match outcome.diagnostic {
                Some(_) => outcome,
                None => OpOutcome::of(!outcome.result),
            }
        }
        OperatorKind::In => match expected.as_array() {
            Some(members) => OpOutcome::of(members.iter().any(|m| loose_eq(m, actual))),
            None => OpOutcome::invalid("IN expects an array of candidates"),
        },
        OperatorKind::Between => between(actual, expected),
        OperatorKind::GreaterThan => match compare(actual, expected) {
            Some(ordering) => OpOutcome::of(ordering == Ordering::Greater),
            None => OpOutcome::invalid("GREATER_THAN expects comparable numbers or timestamps"),
        },
        OperatorKind::LessThan => match compare(actual, expected) {
            Some(ordering) => OpOutcome::of(ordering == Ordering::Less),
            None => OpOutcome::invalid("LESS_THAN expects comparable numbers or timestamps"),
        },
        OperatorKind::MatchesRegex => matches_regex(actual, expected),
        OperatorKind::WithinLast => within_last(actual, expected, now),
        OperatorKind::Unknown => OpOutcome::invalid("unsupported operator"),
    }
}

/// Strict scalar equality over strings, numbers, and booleans
fn scalar_equality(actual: &Value, expected: &Value) -> OpOutcome {
    if !is_scalar(actual) || !is_scalar(expected) {
        return OpOutcome::invalid("equality expects scalar operands");
    }
    OpOutcome::of(loose_eq(actual, expected))
}

/// Set membership: actual must be an array, expected a scalar
fn membership(actual: &Value, expected: &Value) -> OpOutcome {
    match actual.as_array() {
        Some(members) => OpOutcome::of(members.iter().any(|m| loose_eq(m, expected))),
        None => OpOutcome::invalid("membership expects an array field"),
    }
}

fn between(actual: &Value, expected: &Value) -> OpOutcome {
    let bounds = match expected.as_array() {
        Some(bounds) if bounds.len() == 2 => bounds,
        _ => return OpOutcome::invalid("BETWEEN expects a [low, high] pair"),
    };
    let (low, high) = (&bounds[0], &bounds[1]);
    match (compare(actual, low), compare(actual, high)) {
        (Some(lo), Some(hi)) => OpOutcome::of(lo != Ordering::Less && hi != Ordering::Greater),
        _ => OpOutcome::invalid("BETWEEN bounds are not comparable with the field value"),
    }
}

fn matches_regex(actual: &Value, expected: &Value) -> OpOutcome {
    let Some(text) = actual.as_str() else {
        return OpOutcome::invalid("MATCHES_REGEX expects a string field");
    };
    let Some(pattern) = expected.as_str() else {
        return OpOutcome::invalid("MATCHES_REGEX expects a string pattern");
    };
    match regex::Regex::new(pattern) {
        Ok(re) => OpOutcome::of(re.is_match(text)),
        Err(_) => OpOutcome::invalid("invalid regex pattern"),
    }
}

/// `WITHIN_LAST` with a `"<N>_days"` / `"<N>_hours"` expected value.
/// Future timestamps never satisfy "within last".
fn within_last(actual: &Value, expected: &Value, now: OffsetDateTime) -> OpOutcome {
    let Some(spec) = expected.as_str() else {
        return OpOutcome::invalid("WITHIN_LAST expects a duration string");
    };
    let Some(duration) = parse_duration(spec) else {
        return OpOutcome::invalid("WITHIN_LAST expects '<N>_days' or '<N>_hours'");
    };
    let Some(instant) = actual.as_str().and_then(parse_instant) else {
        return OpOutcome::invalid("WITHIN_LAST expects a timestamp field");
    };
    OpOutcome::of(instant <= now && now - instant <= duration)
}

/// Equality that treats 1 and 1.0 as equal but is otherwise strict
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn is_scalar(value: &Value) -> bool {
    value.is_string() || value.is_number() || value.is_boolean()
}

/// A value usable in an ordering comparison
enum Comparable {
    Instant(OffsetDateTime),
    Number(f64),
}

fn comparable(value: &Value) -> Option<Comparable> {
    match value {
        Value::Number(n) => n.as_f64().map(Comparable::Number),
        Value::String(s) => parse_instant(s).map(Comparable::Instant),
        _ => None,
    }
}

/// Order two values as timestamps or as numbers; mixed kinds do not compare
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (comparable(a)?, comparable(b)?) {
        (Comparable::Instant(x), Comparable::Instant(y)) => Some(x.cmp(&y)),
        (Comparable::Number(x), Comparable::Number(y)) => x.partial_cmp(&y),
        _ => None,
    }
}
