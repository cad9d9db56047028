/*!
 * Field Resolver
 * Dot-path attribute lookup over the materialized context document
 */

use serde_json::Value;

/// Resolve a dot-separated path against the context document.
///
/// Any missing segment, non-object intermediate, or JSON `null` leaf
/// short-circuits to `None`. No type coercion happens here; that is the
/// operator evaluator's job.
pub fn resolve<'doc>(document: &'doc Value, path: &str) -> Option<&'doc Value> {
    let mut current = document;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
