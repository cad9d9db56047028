/*!
 * Result Tree
 * Per-level evaluation outcomes mirroring the policy tree 1:1
 */

use crate::policy::{AccessLevel, LogicOperator, OperatorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one condition, kept even when the condition failed or was
/// skipped so the trace stays exhaustive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionResult {
    pub condition_id: String,
    pub field_path: String,
    pub operator: OperatorKind,
    pub expected_value: Value,
    pub actual_value: Value,
    pub result: bool,
    pub reason: String,
}

/// Outcome of one rule. `access_level` is only meaningful when `result`
/// is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub rule_id: String,
    pub rule_name: String,
    pub result: bool,
    pub operator: LogicOperator,
    pub access_level: AccessLevel,
    pub reason: String,
    pub condition_results: Vec<ConditionResult>,
    /// Set when the rule was rejected by its individual time window and its
    /// conditions were listed without being evaluated. Not part of the wire
    /// shape.
    #[serde(skip)]
    pub window_excluded: bool,
}

/// Outcome of one rule group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResult {
    pub group_id: String,
    pub group_name: String,
    pub result: bool,
    pub operator: LogicOperator,
    pub reason: String,
    pub rule_results: Vec<RuleResult>,
}

/// Final decision for one evaluation, with the full per-level detail and a
/// human-readable trace for admin debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub allowed: bool,
    pub access_level: Option<AccessLevel>,
    pub reason: String,
    pub evaluation_strategy: String,
    pub main_operator: LogicOperator,
    pub execution_time_ms: f64,
    pub group_results: Vec<GroupResult>,
    pub evaluation_trace: Vec<String>,
}

impl EvaluationResult {
    pub(crate) const STRATEGY: &'static str = "COMPLEX";

    /// Degraded result for an internal anomaly caught at the orchestrator
    /// boundary: fail closed, keep the contract shape
    pub(crate) fn evaluation_error(
        main_operator: LogicOperator,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            allowed: false,
            access_level: None,
            reason: reason.into(),
            evaluation_strategy: Self::STRATEGY.to_string(),
            main_operator,
            execution_time_ms: 0.0,
            group_results: Vec::new(),
            evaluation_trace: Vec::new(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_evaluation_error_shape() {
        let result = EvaluationResult::evaluation_error(
            LogicOperator::Or,
            "evaluation error: internal panic during evaluation",
        );
        assert!(!result.is_allowed());
        assert_eq!(result.access_level, None);
        assert!(result.group_results.is_empty());
        assert!(result.evaluation_trace.is_empty());

        // the degraded result still serializes with the full wire shape
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire["allowed"], json!(false));
        assert_eq!(wire["accessLevel"], json!(null));
        assert_eq!(wire["evaluationStrategy"], json!("COMPLEX"));
        assert_eq!(wire["mainOperator"], json!("OR"));
        assert!(wire["reason"]
            .as_str()
            .unwrap()
            .starts_with("evaluation error"));
    }
}
