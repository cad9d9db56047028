/*!
 * Evaluation Engine
 * Recursive policy evaluation with a full per-level trace
 *
 * One evaluator per tree level, composed leaves-first: field resolver and
 * operator table at the bottom, then condition, rule, and group evaluators,
 * orchestrated by [`ComplexRuleEngine`]. The whole walk is a pure synchronous
 * function of the policy and the evaluation context and never raises;
 * malformed input fails closed with diagnostics carried in the result tree.
 *
 * ## Usage
 * ```
 * use access_engine::context::{Clock, EvaluationContext, ResourceRef, Subject};
 * use access_engine::engine::ComplexRuleEngine;
 * use access_engine::policy::{AccessLevel, Condition, LogicOperator, OperatorKind, Policy, Rule, RuleGroup};
 * use serde_json::json;
 * use time::macros::datetime;
 *
 * let policy = Policy::new("course_a", LogicOperator::Or).with_group(
 *     RuleGroup::new("g1", "Premium", LogicOperator::Or, 0).with_rule(
 *         Rule::new("r1", "Premium service", LogicOperator::And, AccessLevel::Full)
 *             .with_condition(Condition::new(
 *                 "c1",
 *                 "user.services",
 *                 OperatorKind::Contains,
 *                 json!("premium"),
 *             )),
 *     ),
 * );
 * let ctx = EvaluationContext::new(
 *     ResourceRef::new("course_a", "content"),
 *     Clock::at(datetime!(2025-02-01 12:00:00 UTC)),
 * )
 * .with_subject(Subject::new("u_1").with_service("premium"));
 *
 * let result = ComplexRuleEngine::new()
 *     .evaluate("course_a", &ctx, Some(&policy))
 *     .expect("policy is configured");
 * assert!(result.allowed);
 * ```
 */

pub mod condition;
pub mod evaluator;
pub mod group;
pub mod operators;
pub mod resolver;
pub mod result;
pub mod rule;

// Re-export commonly used items
pub use evaluator::ComplexRuleEngine;
pub use operators::OpOutcome;
pub use result::{ConditionResult, EvaluationResult, GroupResult, RuleResult};
