/*!
 * Subject
 * The resolved user a policy decides about
 */

use crate::core::timeparse::flexible_instant;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Account status of the subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// Fully resolved subject attributes.
///
/// The caller materializes this before evaluation; the engine never fetches
/// subject data. Unknown payload fields land in `extra` and stay reachable
/// through condition field paths (e.g. `user.plan_tier`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub status: SubjectStatus,
    #[serde(default, with = "flexible_instant", skip_serializing_if = "Option::is_none")]
    pub deactivation_date: Option<OffsetDateTime>,
    #[serde(default, with = "flexible_instant", skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<OffsetDateTime>,
    #[serde(default, with = "flexible_instant", skip_serializing_if = "Option::is_none")]
    pub last_login: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub extra: ahash::HashMap<String, Value>,
}

impl Subject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: SubjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.services.push(service.into());
        self
    }

    pub fn with_deactivation_date(mut self, instant: OffsetDateTime) -> Self {
        self.deactivation_date = Some(instant);
        self
    }

    pub fn with_subscription_end_date(mut self, instant: OffsetDateTime) -> Self {
        self.subscription_end_date = Some(instant);
        self
    }

    pub fn with_last_login(mut self, instant: OffsetDateTime) -> Self {
        self.last_login = Some(instant);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_payload() {
        let subject: Subject = serde_json::from_value(json!({
            "id": "u_123",
            "email": "ana@example.com",
            "role": "student",
            "groups": ["cohort_2024"],
            "services": ["marketing_digital_premium"],
            "status": "inactive",
            "deactivation_date": "2024-08-01",
            "plan_tier": "gold"
        }))
        .unwrap();

        assert_eq!(subject.status, SubjectStatus::Inactive);
        assert!(subject.deactivation_date.is_some());
        assert_eq!(subject.extra.get("plan_tier"), Some(&json!("gold")));
        assert!(subject.last_login.is_none());
    }

    #[test]
    fn test_serialized_extra_fields_flatten() {
        let subject = Subject::new("u_1").with_attribute("seats", json!(4));
        let doc = serde_json::to_value(&subject).unwrap();
        assert_eq!(doc["seats"], json!(4));
        assert_eq!(doc["status"], json!("active"));
    }
}
