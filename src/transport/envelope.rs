//! Shared decoding of server responses.
//!
//! Every endpoint answers either with its success payload or with the same
//! error envelope `{error: true, code, errorNum, errorMessage}`. A response is
//! an error iff its `error` attribute is present and truthy.

use crate::error::{RemoteError, TransportError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode raw transport output into a JSON payload.
///
/// # Errors
///
/// Returns `RemoteError::TransportUnavailable` if no text was obtained,
/// `RemoteError::MalformedResponse` if the text is not JSON, and
/// `RemoteError::Server` if the payload is an error envelope.
pub fn decode(response: Result<String, TransportError>) -> Result<Value, RemoteError> {
    let text = response?;
    let payload: Value = serde_json::from_str(&text)?;

    match error_from_payload(&payload) {
        Some(err) => Err(err),
        None => Ok(payload),
    }
}

/// Decode raw transport output into a typed payload.
///
/// # Errors
///
/// Same as [`decode`], plus `RemoteError::MalformedResponse` if the success
/// payload does not have the expected shape.
pub fn decode_as<T: DeserializeOwned>(
    response: Result<String, TransportError>,
) -> Result<T, RemoteError> {
    let payload = decode(response)?;
    Ok(serde_json::from_value(payload)?)
}

/// Extract the error envelope from a payload, if it is one.
pub fn error_from_payload(payload: &Value) -> Option<RemoteError> {
    let flag = payload.get("error")?;
    if !is_truthy(flag) {
        return None;
    }

    Some(RemoteError::Server {
        code: integer_field(payload, "code"),
        error_num: integer_field(payload, "errorNum"),
        message: payload
            .get("errorMessage")
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default(),
    })
}

fn integer_field(payload: &Value, name: &str) -> i64 {
    payload
        .get(name)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0)
}

/// JSON truthiness as the server's clients have always read the flag.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
