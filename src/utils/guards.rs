//! Shape checks over loosely-typed JSON values.

use serde_json::Value;

/// `None` (absent) or JSON `null`.
pub fn is_nil(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// A JSON object; arrays, `null` and scalars are not.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Same as [`is_object`]: JSON objects have no prototype chain.
pub fn is_plain_object(value: &Value) -> bool {
    is_object(value)
}
