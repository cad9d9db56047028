/*!
 * Clock Snapshot
 * Date, wall-clock time, and weekday frozen at one instant
 *
 * The engine never reads the wall clock; whoever builds the context picks
 * the instant (real or simulated) and all three derived values stay
 * mutually consistent.
 */

use serde::Serialize;
use time::OffsetDateTime;

/// Point-in-time snapshot used for every temporal check in one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct Clock {
    #[serde(with = "time::serde::rfc3339")]
    pub current_date: OffsetDateTime,
    pub current_time: String,
    pub current_day: String,
}

impl Clock {
    /// Derive all three values from a single instant
    pub fn at(instant: OffsetDateTime) -> Self {
        Self {
            current_date: instant,
            current_time: format!("{:02}:{:02}", instant.hour(), instant.minute()),
            current_day: instant.weekday().to_string(),
        }
    }

    /// Override the wall-clock time, e.g. from a simulated `HH:MM` value.
    /// The caller is responsible for having validated the format.
    pub fn with_time_override(mut self, hhmm: impl Into<String>) -> Self {
        self.current_time = hhmm.into();
        self
    }
}
