/*!
 * Condition Evaluator
 * One condition: resolve the field, apply the operator, honor negation
 */

use super::operators;
use super::resolver;
use super::result::ConditionResult;
use crate::policy::Condition;
use serde_json::Value;
use time::OffsetDateTime;

/// Evaluate a single condition against the context document.
///
/// Negation flips the boolean outcome only; a diagnostic failure (bad
/// operator, wrong value shape, unresolved field) stays a failure even when
/// the condition is negated.
pub fn evaluate(document: &Value, now: OffsetDateTime, condition: &Condition) -> ConditionResult {
    let actual = resolver::resolve(document, &condition.field_path);
    let outcome = operators::apply(condition.operator, actual, &condition.value, now);

    let result = if outcome.diagnostic.is_none() && condition.is_negated {
        !outcome.result
    } else {
        outcome.result
    };

    let reason = match &outcome.diagnostic {
        Some(diagnostic) => format!(
            "{} {}: failed ({})",
            condition.field_path,
            condition.operator.as_str(),
            diagnostic
        ),
        None => format!(
            "{} {} {}: {}{}",
            condition.field_path,
            condition.operator.as_str(),
            condition.value,
            if result { "passed" } else { "failed" },
            if condition.is_negated { " (negated)" } else { "" }
        ),
    };

    ConditionResult {
        condition_id: condition.id.clone(),
        field_path: condition.field_path.clone(),
        operator: condition.operator,
        expected_value: condition.value.clone(),
        actual_value: actual.cloned().unwrap_or(Value::Null),
        result,
        reason,
    }
}

/// Placeholder result for a condition that was never evaluated because its
/// rule was rejected by the individual time window
pub fn skipped(condition: &Condition) -> ConditionResult {
    ConditionResult {
        condition_id: condition.id.clone(),
        field_path: condition.field_path.clone(),
        operator: condition.operator,
        expected_value: condition.value.clone(),
        actual_value: Value::Null,
        result: false,
        reason: "skipped: rule outside its individual time window".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::OperatorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2025-02-01 12:00:00 UTC);

    fn document() -> Value {
        json!({
            "user": {
                "status": "active",
                "groups": ["staff"]
            }
        })
    }

    #[test]
    fn test_basic_condition() {
        let condition = Condition::new("c1", "user.status", OperatorKind::Equals, json!("active"));
        let result = evaluate(&document(), NOW, &condition);
        assert!(result.result);
        assert_eq!(result.actual_value, json!("active"));
        assert_eq!(result.reason, "user.status EQUALS \"active\": passed");
    }

    #[test]
    fn test_negation_flips_boolean() {
        let condition = Condition::new("c1", "user.status", OperatorKind::Equals, json!("active"))
            .negated();
        let result = evaluate(&document(), NOW, &condition);
        assert!(!result.result);
        assert!(result.reason.contains("(negated)"));
    }

    #[test]
    fn test_negation_never_flips_diagnostic_failure() {
        // user.plan does not resolve; NOT_EQUALS negated must not pass
        let condition = Condition::new("c1", "user.plan", OperatorKind::Equals, json!("gold"))
            .negated();
        let result = evaluate(&document(), NOW, &condition);
        assert!(!result.result);
        assert!(result.reason.contains("did not resolve"));
        assert_eq!(result.actual_value, Value::Null);
    }

    #[test]
    fn test_skipped_marker() {
        let condition = Condition::new("c1", "user.status", OperatorKind::Equals, json!("active"));
        let result = skipped(&condition);
        assert!(!result.result);
        assert!(result.reason.starts_with("skipped"));
    }
}
