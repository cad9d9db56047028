/*!
 * API Module
 * Wire contract of the evaluation endpoint
 *
 * The HTTP layer itself is external; this module owns the request and
 * response payload shapes it exchanges with the engine and the context
 * builder that turns a payload into an [`EvaluationContext`].
 *
 * [`EvaluationContext`]: crate::context::EvaluationContext
 */

pub mod request;
pub mod response;

// Re-export for convenience
pub use request::{build_context, decode_request, EvaluateRequest};
pub use response::EvaluateResponse;
