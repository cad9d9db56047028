/*!
 * Access Engine Library
 * Complex rule evaluation for protected resources
 *
 * Given a fully resolved subject, a point in time, and a request context,
 * the engine evaluates a nested boolean policy (groups of rules, rules of
 * conditions) and produces an access decision with a complete, human-
 * auditable evaluation trace. It is a pure decision function: it fetches
 * nothing, persists nothing, enforces nothing, and never raises regardless
 * of how malformed the policy data is.
 */

pub mod api;
pub mod context;
pub mod core;
pub mod engine;
pub mod policy;

// Re-exports
pub use api::{build_context, decode_request, EvaluateRequest, EvaluateResponse};
pub use context::{Clock, EvaluationContext, RequestInfo, ResourceRef, Subject, SubjectStatus};
pub use core::errors::{EngineError, EngineResult};
pub use engine::{ComplexRuleEngine, EvaluationResult};
pub use policy::{AccessLevel, Condition, LogicOperator, OperatorKind, Policy, Rule, RuleGroup};
