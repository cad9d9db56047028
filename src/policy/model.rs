/*!
 * Policy Tree
 * Policy, rule group, rule, and condition records
 */

use super::types::{AccessLevel, LogicOperator, OperatorKind};
use crate::core::timeparse::{self, flexible_instant};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Single attribute comparison: field path, operator, expected value,
/// optional negation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: String,
    pub field_path: String,
    pub operator: OperatorKind,
    pub value: Value,
    #[serde(default)]
    pub is_negated: bool,
}

impl Condition {
    pub fn new(
        id: impl Into<String>,
        field_path: impl Into<String>,
        operator: OperatorKind,
        value: Value,
    ) -> Self {
        Self {
            id: id.into(),
            field_path: field_path.into(),
            operator,
            value,
            is_negated: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.is_negated = true;
        self
    }
}

/// Named AND/OR collection of conditions granting an access level,
/// optionally limited to an individual time window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub logic_operator: LogicOperator,
    pub access_level: AccessLevel,
    #[serde(default, with = "flexible_instant", skip_serializing_if = "Option::is_none")]
    pub individual_start_date: Option<OffsetDateTime>,
    #[serde(default, with = "flexible_instant", skip_serializing_if = "Option::is_none")]
    pub individual_end_date: Option<OffsetDateTime>,
    pub conditions: Vec<Condition>,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        logic_operator: LogicOperator,
        access_level: AccessLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logic_operator,
            access_level,
            individual_start_date: None,
            individual_end_date: None,
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_window(
        mut self,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> Self {
        self.individual_start_date = start;
        self.individual_end_date = end;
        self
    }

    /// Whether `instant` falls inside the rule's individual time window.
    /// Absent bounds are open; both bounds are inclusive.
    pub fn window_contains(&self, instant: OffsetDateTime) -> bool {
        self.individual_start_date.map_or(true, |start| instant >= start)
            && self.individual_end_date.map_or(true, |end| instant <= end)
    }
}

/// Named AND/OR collection of rules, with a priority for reporting order
/// and tie-breaks (lower = first; never affects the boolean outcome)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleGroup {
    pub id: String,
    pub name: String,
    pub logic_operator: LogicOperator,
    #[serde(default)]
    pub priority: i32,
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        logic_operator: LogicOperator,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logic_operator,
            priority,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Complex access policy for one resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub resource_id: String,
    pub is_enabled: bool,
    pub main_logic_operator: LogicOperator,
    pub rule_groups: Vec<RuleGroup>,
}

impl Policy {
    pub fn new(resource_id: impl Into<String>, main_logic_operator: LogicOperator) -> Self {
        Self {
            resource_id: resource_id.into(),
            is_enabled: true,
            main_logic_operator,
            rule_groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: RuleGroup) -> Self {
        self.rule_groups.push(group);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    /// A disabled or empty policy is "not configured": the engine returns
    /// no result and the caller falls back to its simple access path.
    pub fn is_configured(&self) -> bool {
        self.is_enabled && !self.rule_groups.is_empty()
    }

    /// Advisory structural checks for admin tooling.
    ///
    /// Evaluation never relies on these; a policy failing validation still
    /// evaluates, with the offending conditions failing closed.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for group in &self.rule_groups {
            if group.rules.is_empty() {
                problems.push(format!("group '{}' has no rules", group.id));
            }
            for rule in &group.rules {
                if let (Some(start), Some(end)) =
                    (rule.individual_start_date, rule.individual_end_date)
                {
                    if start > end {
                        problems.push(format!(
                            "rule '{}' has an inverted time window",
                            rule.id
                        ));
                    }
                }
                for condition in &rule.conditions {
                    problems.extend(validate_condition(rule, condition));
                }
            }
        }
        problems
    }
}

fn validate_condition(rule: &Rule, condition: &Condition) -> Option<String> {
    let problem = match condition.operator {
        OperatorKind::Unknown => Some("unknown operator".to_string()),
        OperatorKind::Between => match condition.value.as_array() {
            Some(bounds) if bounds.len() == 2 => None,
            _ => Some("BETWEEN expects a [low, high] pair".to_string()),
        },
        OperatorKind::In => condition
            .value
            .as_array()
            .is_none()
            .then(|| "IN expects an array value".to_string()),
        OperatorKind::MatchesRegex => match condition.value.as_str() {
            Some(pattern) => regex::Regex::new(pattern)
                .is_err()
                .then(|| "invalid regex pattern".to_string()),
            None => Some("MATCHES_REGEX expects a string pattern".to_string()),
        },
        OperatorKind::WithinLast => match condition.value.as_str() {
            Some(duration) => timeparse::parse_duration(duration)
                .is_none()
                .then(|| "WITHIN_LAST expects '<N>_days' or '<N>_hours'".to_string()),
            None => Some("WITHIN_LAST expects a duration string".to_string()),
        },
        _ => None,
    };
    problem.map(|detail| {
        format!(
            "rule '{}', condition '{}': {}",
            rule.id, condition.id, detail
        )
    })
}
