/*!
 * Error Types
 * Boundary errors with thiserror and serde support
 *
 * Evaluation itself never surfaces errors; malformed policy data degrades to
 * condition-level failures carried in the result tree. These types cover the
 * wire boundary only (payload decoding and context building).
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for boundary operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised at the engine's wire boundary
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error")]
pub enum EngineError {
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl EngineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}
