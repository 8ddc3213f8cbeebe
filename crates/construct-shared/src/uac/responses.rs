use serde_json::Value;

use crate::token::AuthToken;

/// Body returned by both the login and registration endpoints on success
///
/// Registration also returns the created user which is not needed
#[derive(Debug, serde::Deserialize)]
pub struct TokenResponse {
    pub token: AuthToken,
}

/// Extracts a human readable reason from an error body
///
/// Uses `detail` if present, otherwise the first message found in `fields`
/// (in order). Field values may be a single message or a list of messages.
pub fn rejection_reason(body: &Value, fields: &[&str], fallback: &str) -> String {
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }
    fields
        .iter()
        .find_map(|field| match body.get(*field)? {
            Value::String(msg) => Some(msg.clone()),
            Value::Array(list) => list.iter().find_map(Value::as_str).map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| fallback.to_string())
}
