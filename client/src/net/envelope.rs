//! Response envelope unwrapping.
//!
//! The backend answers some endpoints with a bare payload and others with the
//! payload nested under a wrapper key. Rather than probing shapes at every
//! call site, responses go through one unwrapping pass with a fixed key
//! precedence.

use serde_json::Value;

/// Wrapper keys checked in precedence order.
pub const ENVELOPE_KEYS: [&str; 3] = ["data", "content", "list"];

/// Unwraps one envelope level using the default key precedence.
pub fn unwrap_envelope(value: Value) -> Value {
    unwrap_envelope_with(value, &ENVELOPE_KEYS)
}

/// Unwraps one envelope level: for a JSON object, the first `candidate_keys`
/// entry present replaces the whole value. Arrays and scalars pass through
/// untouched, as does an object carrying none of the keys.
pub fn unwrap_envelope_with(value: Value, candidate_keys: &[&str]) -> Value {
    match value {
        Value::Object(mut map) => {
            for key in candidate_keys {
                if let Some(inner) = map.remove(*key) {
                    return inner;
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}
