/*!
 * Policy Enums
 * Access levels, logic operators, and the closed condition operator set
 */

use serde::{Deserialize, Serialize};

/// Ordered permission grant attached to a passing rule.
///
/// Variants are declared from least to most permissive so the derived `Ord`
/// is the permissiveness ordering used for tie-breaking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessLevel {
    Read,
    Full,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Read => "READ",
            AccessLevel::Full => "FULL",
        }
    }
}

/// AND/OR combinator applied over child boolean outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOperator {
    And,
    Or,
}

impl LogicOperator {
    /// Combine child outcomes.
    ///
    /// An empty slice is vacuously `true` for AND and `false` for OR; the
    /// same convention applies at every level of the tree.
    pub fn combine(&self, outcomes: &[bool]) -> bool {
        match self {
            LogicOperator::And => outcomes.iter().all(|passed| *passed),
            LogicOperator::Or => outcomes.iter().any(|passed| *passed),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicOperator::And => "AND",
            LogicOperator::Or => "OR",
        }
    }
}

/// Closed set of condition operators.
///
/// Unrecognized operator names in stored policy data deserialize to
/// `Unknown` so a single malformed condition stays a condition-level
/// failure instead of rejecting the whole policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatorKind {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    In,
    Between,
    GreaterThan,
    LessThan,
    MatchesRegex,
    WithinLast,
    #[serde(other)]
    Unknown,
}

impl OperatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorKind::Equals => "EQUALS",
            OperatorKind::NotEquals => "NOT_EQUALS",
            OperatorKind::Contains => "CONTAINS",
            OperatorKind::NotContains => "NOT_CONTAINS",
            OperatorKind::In => "IN",
            OperatorKind::Between => "BETWEEN",
            OperatorKind::GreaterThan => "GREATER_THAN",
            OperatorKind::LessThan => "LESS_THAN",
            OperatorKind::MatchesRegex => "MATCHES_REGEX",
            OperatorKind::WithinLast => "WITHIN_LAST",
            OperatorKind::Unknown => "UNKNOWN",
        }
    }
}
