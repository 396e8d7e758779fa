//! Helpers shared by the request dispatcher and the typed resources.

use crate::error::{HashgridError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Join `endpoint` onto `base_url` and append query parameters.
///
/// Absolute `http(s)://` endpoints are used as-is. Otherwise the endpoint is
/// appended to the base with exactly one `/` between them.
pub fn build_url(base_url: &str, endpoint: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        let base = base_url.trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        Url::parse(&format!("{}/{}", base, path))?
    };

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Headers sent with every request.
pub fn default_headers(api_key: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| HashgridError::Config("API key contains invalid characters".into()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Decode a response value into a record.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Decode a response value into a list of records.
///
/// Empty bodies arrive from the dispatcher as `{}`; those (and `null`) are
/// an empty list.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(ref map) if map.is_empty() => Ok(Vec::new()),
        Value::Array(_) => decode(value),
        other => Err(HashgridError::Decode(format!(
            "expected a JSON array, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
