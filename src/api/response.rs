/*!
 * Evaluate Response
 * Outbound payload wrapping the engine's decision
 */

use crate::engine::EvaluationResult;
use serde::{Deserialize, Serialize};

/// Body of the `POST /evaluate` response.
///
/// `result: null` means the policy is not configured and the caller should
/// fall back to its simple access path; it is not a denial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub result: Option<EvaluationResult>,
}

impl EvaluateResponse {
    pub fn from_result(result: Option<EvaluationResult>) -> Self {
        Self {
            success: true,
            result,
        }
    }
}
