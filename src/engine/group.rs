/*!
 * Group Evaluator
 * Combines a group's rules under the group logic operator
 */

use super::result::GroupResult;
use super::rule;
use crate::policy::RuleGroup;
use serde_json::Value;
use time::OffsetDateTime;

/// Evaluate one rule group. Every rule is evaluated (no short-circuit) so
/// the result tree stays complete for debugging.
pub fn evaluate(document: &Value, now: OffsetDateTime, group: &RuleGroup) -> GroupResult {
    let rule_results: Vec<_> = group
        .rules
        .iter()
        .map(|r| rule::evaluate(document, now, r))
        .collect();
    let outcomes: Vec<bool> = rule_results.iter().map(|r| r.result).collect();
    let result = group.logic_operator.combine(&outcomes);
    let passed = outcomes.iter().filter(|ok| **ok).count();

    GroupResult {
        group_id: group.id.clone(),
        group_name: group.name.clone(),
        result,
        operator: group.logic_operator,
        reason: format!(
            "{}/{} rules passed ({})",
            passed,
            outcomes.len(),
            group.logic_operator.as_str()
        ),
        rule_results,
    }
}
