//! Translation of HTTP responses into JSON values or typed errors.
//!
//! | Status | Result |
//! |--------|--------|
//! | 2xx, empty body | `{}` |
//! | 2xx, JSON body | parsed value |
//! | 2xx, other body | `{"content": <text>}` |
//! | 401 | [`HashgridError::Authentication`] |
//! | 404 | [`HashgridError::NotFound`] |
//! | 422 | [`HashgridError::Validation`] |
//! | other | [`HashgridError::Api`] |

use crate::error::{HashgridError, Result};
use crate::types::ApiResponse;
use http::StatusCode;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Read a reqwest response fully and interpret it.
pub(crate) async fn handle_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status().as_u16();
    let mut headers = BTreeMap::new();
    for (k, v) in response.headers() {
        if let Ok(val) = v.to_str() {
            headers.insert(k.as_str().to_string(), val.to_string());
        }
    }
    let body = response.bytes().await?;

    interpret(ApiResponse {
        status,
        headers,
        body,
    })
}

/// Map a response snapshot onto a JSON value or the matching error kind.
pub(crate) fn interpret(response: ApiResponse) -> Result<Value> {
    let status = StatusCode::from_u16(response.status)
        .map_err(|_| HashgridError::Request(format!("invalid status code {}", response.status)))?;

    if !status.is_success() {
        return Err(status_error(status, response));
    }

    if response.body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_slice(&response.body) {
        Ok(value) => Ok(value),
        Err(_) => Ok(json!({ "content": response.text() })),
    }
}

fn status_error(status: StatusCode, response: ApiResponse) -> HashgridError {
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED => HashgridError::Authentication {
            message: "Authentication failed. Check your API key.".to_string(),
            status: code,
            response: Box::new(response),
        },
        StatusCode::NOT_FOUND => HashgridError::NotFound {
            message: "Resource not found".to_string(),
            status: code,
            response: Box::new(response),
        },
        StatusCode::UNPROCESSABLE_ENTITY => HashgridError::Validation {
            message: response
                .message_field()
                .unwrap_or_else(|| "Validation error".to_string()),
            status: code,
            response: Box::new(response),
        },
        _ => HashgridError::Api {
            message: response
                .message_field()
                .unwrap_or_else(|| format!("API error: {}", code)),
            status: code,
            response: Box::new(response),
        },
    }
}
