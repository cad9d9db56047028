/*!
 * Policy Model
 * Immutable rule-tree data model for complex access policies
 *
 * A policy is a nested boolean structure: groups of rules, rules of
 * conditions, combined at every level by an AND/OR logic operator. The
 * model is read-only input to the evaluation engine; nothing here touches
 * the clock or any external state.
 */

pub mod model;
pub mod types;

// Re-export commonly used items
pub use model::{Condition, Policy, Rule, RuleGroup};
pub use types::{AccessLevel, LogicOperator, OperatorKind};
