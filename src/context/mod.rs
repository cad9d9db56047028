/*!
 * Evaluation Context
 * Everything a single evaluation may look at, materialized up front
 *
 * The context is immutable per evaluation and carries no live handles: the
 * subject, the request metadata, the resource, and a clock snapshot. Field
 * paths in conditions resolve against the JSON document produced by
 * [`EvaluationContext::to_document`], which keeps path access total and
 * schema-free.
 */

pub mod clock;
pub mod request;
pub mod subject;

// Re-export commonly used items
pub use clock::Clock;
pub use request::{Geo, RequestInfo, ResourceRef};
pub use subject::{Subject, SubjectStatus};

use serde::Serialize;
use serde_json::Value;

/// Input to one policy evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationContext {
    #[serde(rename = "user")]
    pub subject: Option<Subject>,
    pub request: RequestInfo,
    pub resource: ResourceRef,
    #[serde(flatten)]
    pub clock: Clock,
}

impl EvaluationContext {
    pub fn new(resource: ResourceRef, clock: Clock) -> Self {
        Self {
            subject: None,
            request: RequestInfo::default(),
            resource,
            clock,
        }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_request(mut self, request: RequestInfo) -> Self {
        self.request = request;
        self
    }

    /// Materialize the context as a JSON document for field-path resolution.
    ///
    /// Top-level keys: `user`, `request`, `resource`, `current_date`,
    /// `current_time`, `current_day`. Serialization failure degrades to an
    /// empty document, under which every condition fails closed.
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
