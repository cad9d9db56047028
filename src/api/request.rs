/*!
 * Evaluate Request
 * Inbound payload and context building
 */

use crate::context::{Clock, EvaluationContext, RequestInfo, ResourceRef, Subject};
use crate::core::errors::{EngineError, EngineResult};
use crate::core::timeparse::{parse_instant, valid_hhmm};
use serde::Deserialize;
use time::OffsetDateTime;

/// Default resource type when the payload does not carry one
const DEFAULT_RESOURCE_TYPE: &str = "content";

/// Body of `POST /evaluate`.
///
/// `simulatedDate`/`simulatedTime` let administrators replay a decision at a
/// chosen point in time; when omitted, the caller's fallback instant (the
/// wall clock at the boundary) is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub resource_id: String,
    #[serde(default)]
    pub user: Option<Subject>,
    #[serde(default)]
    pub simulated_date: Option<String>,
    #[serde(default)]
    pub simulated_time: Option<String>,
    #[serde(default)]
    pub request: Option<RequestInfo>,
}

/// Decode a JSON payload into an [`EvaluateRequest`]
pub fn decode_request(payload: &str) -> EngineResult<EvaluateRequest> {
    serde_json::from_str(payload).map_err(|err| EngineError::malformed(err.to_string()))
}

/// Build the evaluation context from a request payload.
///
/// `fallback_now` anchors the clock when no `simulatedDate` is given; the
/// engine itself never reads the wall clock, so even this boundary stays
/// testable. All three clock values derive from the same instant;
/// `simulatedTime` overrides only the `HH:MM` component.
pub fn build_context(
    request: &EvaluateRequest,
    fallback_now: OffsetDateTime,
) -> EngineResult<EvaluationContext> {
    let instant = match &request.simulated_date {
        Some(raw) => parse_instant(raw).ok_or_else(|| {
            EngineError::invalid(format!("unparsable simulatedDate: {raw}"))
        })?,
        None => fallback_now,
    };

    let mut clock = Clock::at(instant);
    if let Some(hhmm) = &request.simulated_time {
        if !valid_hhmm(hhmm) {
            return Err(EngineError::invalid(format!(
                "simulatedTime must be HH:MM, got: {hhmm}"
            )));
        }
        clock = clock.with_time_override(hhmm.clone());
    }

    let mut ctx = EvaluationContext::new(
        ResourceRef::new(&request.resource_id, DEFAULT_RESOURCE_TYPE),
        clock,
    );
    if let Some(subject) = &request.user {
        ctx = ctx.with_subject(subject.clone());
    }
    if let Some(info) = &request.request {
        ctx = ctx.with_request(info.clone());
    }
    Ok(ctx)
}
