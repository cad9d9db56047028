/*!
 * Core Module
 * Shared error types and timestamp parsing
 */

pub mod errors;
pub mod timeparse;

// Re-export for convenience
pub use errors::{EngineError, EngineResult};
pub use timeparse::{parse_duration, parse_instant, valid_hhmm};
