//! Raw HTTP response snapshot kept on API errors.

use bytes::Bytes;
use serde_json::Value;
use std::collections::BTreeMap;

/// Snapshot of an HTTP response.
///
/// Attached to HTTP-derived errors so callers can inspect what the server
/// actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercase names, UTF-8 values only)
    pub headers: BTreeMap<String, String>,
    /// Response body
    pub body: Bytes,
}

impl ApiResponse {
    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON, or `None` when empty or not JSON.
    pub fn json(&self) -> Option<Value> {
        if self.body.is_empty() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    /// The `message` field of a JSON object body, if it is a string.
    pub fn message_field(&self) -> Option<String> {
        match self.json()? {
            Value::Object(map) => map.get("message")?.as_str().map(str::to_owned),
            _ => None,
        }
    }

    /// Get a header value by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
