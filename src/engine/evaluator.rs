/*!
 * Policy Evaluator
 * Orchestrates the full group -> rule -> condition walk for one decision
 *
 * The engine is a pure function of its inputs: no I/O, no shared state, no
 * clock reads. It never raises; malformed policy data fails closed at the
 * condition level and a last-resort panic guard converts anything else into
 * a denied result with an "evaluation error" reason.
 */

use super::group;
use super::result::{EvaluationResult, GroupResult};
use crate::context::EvaluationContext;
use crate::policy::{AccessLevel, Policy, RuleGroup};
use log::{debug, warn};
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// The complex rule evaluation engine. Stateless; safe to share and call
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct ComplexRuleEngine;

impl ComplexRuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `policy` for `resource_id` under `ctx`.
    ///
    /// Returns `None` when the policy is absent, disabled, or has no groups:
    /// "not configured" is distinct from "denied" and tells the caller to
    /// fall back to its simple access path.
    pub fn evaluate(
        &self,
        resource_id: &str,
        ctx: &EvaluationContext,
        policy: Option<&Policy>,
    ) -> Option<EvaluationResult> {
        let policy = policy?;
        if !policy.is_configured() {
            debug!("policy for '{resource_id}' is disabled or empty, falling back");
            return None;
        }
        if policy.resource_id != resource_id {
            warn!(
                "evaluating policy for '{}' against resource '{resource_id}'",
                policy.resource_id
            );
        }

        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| evaluate_tree(ctx, policy)));
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let mut result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("policy evaluation for '{resource_id}' panicked: {message}");
                EvaluationResult::evaluation_error(
                    policy.main_logic_operator,
                    format!("evaluation error: {message}"),
                )
            }
        };
        result.execution_time_ms = elapsed_ms;

        debug!(
            "evaluated '{resource_id}': allowed={} level={:?} in {elapsed_ms:.3}ms",
            result.allowed, result.access_level
        );
        Some(result)
    }
}

fn evaluate_tree(ctx: &EvaluationContext, policy: &Policy) -> EvaluationResult {
    let document = ctx.to_document();
    let now = ctx.clock.current_date;

    // Priority orders evaluation, reporting, and tie-breaks; the stable sort
    // keeps declaration order among equal priorities. It never changes the
    // boolean outcome.
    let mut ordered: Vec<&RuleGroup> = policy.rule_groups.iter().collect();
    ordered.sort_by_key(|g| g.priority);

    let group_results: Vec<GroupResult> = ordered
        .iter()
        .map(|g| group::evaluate(&document, now, g))
        .collect();
    let outcomes: Vec<bool> = group_results.iter().map(|g| g.result).collect();
    let allowed = policy.main_logic_operator.combine(&outcomes);
    let passed = outcomes.iter().filter(|ok| **ok).count();

    let access_level = if allowed {
        effective_access_level(&group_results)
    } else {
        None
    };

    let reason = format!(
        "access {}: {}/{} groups passed ({})",
        if allowed { "granted" } else { "denied" },
        passed,
        outcomes.len(),
        policy.main_logic_operator.as_str()
    );

    let evaluation_trace = build_trace(&group_results);

    EvaluationResult {
        allowed,
        access_level,
        reason,
        evaluation_strategy: EvaluationResult::STRATEGY.to_string(),
        main_operator: policy.main_logic_operator,
        execution_time_ms: 0.0,
        group_results,
        evaluation_trace,
    }
}

/// Most permissive access level among passing rules of passing groups.
///
/// Groups arrive priority-sorted, rules in declaration order, so the strict
/// `>` upgrade makes ties resolve to the lowest priority / earliest
/// declaration, deterministically.
fn effective_access_level(groups: &[GroupResult]) -> Option<AccessLevel> {
    let mut best: Option<AccessLevel> = None;
    for group in groups.iter().filter(|g| g.result) {
        for rule in group.rule_results.iter().filter(|r| r.result) {
            if best.map_or(true, |current| rule.access_level > current) {
                best = Some(rule.access_level);
            }
        }
    }
    best
}

/// One human-readable line per node visited, in visit order
fn build_trace(groups: &[GroupResult]) -> Vec<String> {
    let mut trace = Vec::new();
    for group in groups {
        trace.push(format!(
            "group '{}' ({}): {}",
            group.group_name,
            group.operator.as_str(),
            verdict(group.result)
        ));
        for rule in &group.rule_results {
            trace.push(format!(
                "  rule '{}' ({}, {}): {} - {}",
                rule.rule_name,
                rule.operator.as_str(),
                rule.access_level.as_str(),
                verdict(rule.result),
                rule.reason
            ));
            for condition in &rule.condition_results {
                let marker = if rule.window_excluded {
                    "SKIPPED"
                } else {
                    verdict(condition.result)
                };
                trace.push(format!(
                    "    condition '{}' [{}]: {}",
                    condition.condition_id, marker, condition.reason
                ));
            }
        }
    }
    trace
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "internal panic during evaluation".to_string()
    }
}
