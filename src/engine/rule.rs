/*!
 * Rule Evaluator
 * Time-window gate, then exhaustive condition evaluation
 */

use super::condition;
use super::result::RuleResult;
use crate::policy::Rule;
use serde_json::Value;
use time::OffsetDateTime;

/// Evaluate one rule.
///
/// An individual time window that excludes `now` rejects the rule without
/// evaluating its conditions; they are still listed as skipped so the trace
/// stays complete. Otherwise every condition is evaluated (no short-circuit,
/// the trace must be exhaustive) and combined with the rule's operator.
pub fn evaluate(document: &Value, now: OffsetDateTime, rule: &Rule) -> RuleResult {
    if !rule.window_contains(now) {
        return RuleResult {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            result: false,
            operator: rule.logic_operator,
            access_level: rule.access_level,
            reason: "outside individual time window".to_string(),
            condition_results: rule.conditions.iter().map(condition::skipped).collect(),
            window_excluded: true,
        };
    }

    let condition_results: Vec<_> = rule
        .conditions
        .iter()
        .map(|c| condition::evaluate(document, now, c))
        .collect();
    let outcomes: Vec<bool> = condition_results.iter().map(|c| c.result).collect();
    let result = rule.logic_operator.combine(&outcomes);
    let passed = outcomes.iter().filter(|ok| **ok).count();

    RuleResult {
        rule_id: rule.id.clone(),
        rule_name: rule.name.clone(),
        result,
        operator: rule.logic_operator,
        access_level: rule.access_level,
        reason: format!(
            "{}/{} conditions passed ({})",
            passed,
            outcomes.len(),
            rule.logic_operator.as_str()
        ),
        condition_results,
        window_excluded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{AccessLevel, Condition, LogicOperator, OperatorKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2025-04-01 00:00:00 UTC);

    fn document() -> Value {
        json!({"user": {"status": "active", "role": "student"}})
    }

    fn status_condition(expected: &str) -> Condition {
        Condition::new("c-status", "user.status", OperatorKind::Equals, json!(expected))
    }

    #[test]
    fn test_and_semantics() {
        let rule = Rule::new("r1", "Both", LogicOperator::And, AccessLevel::Read)
            .with_condition(status_condition("active"))
            .with_condition(Condition::new(
                "c-role",
                "user.role",
                OperatorKind::Equals,
                json!("teacher"),
            ));
        let result = evaluate(&document(), NOW, &rule);
        assert!(!result.result);
        assert_eq!(result.reason, "1/2 conditions passed (AND)");

        let rule = Rule::new("r2", "Both", LogicOperator::And, AccessLevel::Read)
            .with_condition(status_condition("active"))
            .with_condition(Condition::new(
                "c-role",
                "user.role",
                OperatorKind::Equals,
                json!("student"),
            ));
        assert!(evaluate(&document(), NOW, &rule).result);
    }

    #[test]
    fn test_or_semantics_and_no_short_circuit() {
        let rule = Rule::new("r1", "Either", LogicOperator::Or, AccessLevel::Full)
            .with_condition(status_condition("active"))
            .with_condition(status_condition("suspended"));
        let result = evaluate(&document(), NOW, &rule);
        assert!(result.result);
        // both conditions evaluated despite the first one passing
        assert_eq!(result.condition_results.len(), 2);
        assert!(result.condition_results[0].result);
        assert!(!result.condition_results[1].result);
    }

    #[test]
    fn test_empty_conditions_vacuous() {
        let and_rule = Rule::new("r1", "Vacuous", LogicOperator::And, AccessLevel::Read);
        assert!(evaluate(&document(), NOW, &and_rule).result);

        let or_rule = Rule::new("r2", "Vacuous", LogicOperator::Or, AccessLevel::Read);
        assert!(!evaluate(&document(), NOW, &or_rule).result);
    }

    #[test]
    fn test_window_excludes_regardless_of_conditions() {
        let rule = Rule::new("r1", "Seasonal", LogicOperator::And, AccessLevel::Read)
            .with_condition(status_condition("active"))
            .with_window(
                Some(datetime!(2025-01-15 00:00:00 UTC)),
                Some(datetime!(2025-03-15 00:00:00 UTC)),
            );
        // NOW is 2025-04-01, outside the window, condition would have passed
        let result = evaluate(&document(), NOW, &rule);
        assert!(!result.result);
        assert!(result.window_excluded);
        assert_eq!(result.reason, "outside individual time window");
        assert_eq!(result.condition_results.len(), 1);
        assert!(result.condition_results[0].reason.starts_with("skipped"));
    }

    #[test]
    fn test_open_ended_window() {
        let rule = Rule::new("r1", "From", LogicOperator::And, AccessLevel::Read)
            .with_condition(status_condition("active"))
            .with_window(Some(datetime!(2025-01-15 00:00:00 UTC)), None);
        assert!(evaluate(&document(), NOW, &rule).result);
    }
}
