//! Value rendering for error messages.

use serde_json::Value;

/// Render a value for an error message.
///
/// Strings come out JSON-quoted (`"test"`), absent values as `undefined`, and
/// everything else through `Value`'s `Display`, so objects and arrays render
/// as compact JSON with keys in their original order.
pub fn print(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => value.to_string(),
    }
}
