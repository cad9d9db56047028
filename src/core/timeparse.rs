/*!
 * Timestamp Parsing
 * Lenient instant handling shared by the context, policy model, and operators
 */

use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

/// Bare calendar date, e.g. `2025-01-15`
const BARE_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse an instant from an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
/// Bare dates resolve to midnight UTC.
pub fn parse_instant(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(instant);
    }
    Date::parse(raw, BARE_DATE)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Parse a duration string of the form `<N>_days` or `<N>_hours`.
/// Counts that overflow the second scale are rejected, not clamped.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let (count, unit) = raw.split_once('_')?;
    let count: i64 = count.parse().ok()?;
    if count < 0 {
        return None;
    }
    let seconds = match unit {
        "days" | "day" => count.checked_mul(86_400)?,
        "hours" | "hour" => count.checked_mul(3_600)?,
        _ => return None,
    };
    Some(Duration::seconds(seconds))
}

/// Check that a string is a valid `HH:MM` wall-clock time
pub fn valid_hhmm(raw: &str) -> bool {
    let Some((hours, minutes)) = raw.split_once(':') else {
        return false;
    };
    let digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    digits(hours)
        && digits(minutes)
        && hours.parse::<u8>().is_ok_and(|h| h < 24)
        && minutes.parse::<u8>().is_ok_and(|m| m < 60)
}

/// Serde adapter for optional timestamps that arrive either as RFC 3339
/// or as bare dates, and always serialize as RFC 3339
pub mod flexible_instant {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => {
                let formatted = instant.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) => super::parse_instant(&text).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("unparsable timestamp: {text}"))
            }),
        }
    }
}
