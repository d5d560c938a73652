//
//  gerrit-client
//  api/decode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Decoding
//!
//! Gerrit prefixes every JSON response body with `)]}'` and a newline so that a
//! browser cannot evaluate the body as a script. Every response goes through
//! [`decode_body`] before it reaches a resource client.
//!
//! | Body | Result |
//! |------|--------|
//! | empty or whitespace | `Value::String("")` |
//! | non-JSON content type | `Value::String(raw)` |
//! | `)]}'\n{...}` | parsed JSON |
//! | `{...}` | parsed JSON |
//! | malformed JSON | [`GerritError::InvalidJson`] |

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use super::common::{GerritError, Result};

/// The anti-XSSI prefix Gerrit puts in front of JSON bodies.
pub const MAGIC_JSON_PREFIX: &str = ")]}'\n";

/// Decodes a response body according to its content type.
///
/// # Parameters
///
/// * `content_type` - The raw `Content-Type` header, if any
/// * `body` - The response body as text
///
/// # Returns
///
/// Parsed JSON, or the raw text as a string value when the response is not
/// declared as `application/json`.
///
/// # Example
///
/// ```rust
/// use gerrit_client::api::decode::decode_body;
/// use serde_json::json;
///
/// let v = decode_body(Some("application/json; charset=UTF-8"), ")]}'\n{\"a\": 1}").unwrap();
/// assert_eq!(v, json!({"a": 1}));
/// ```
pub fn decode_body(content_type: Option<&str>, body: &str) -> Result<Value> {
    let content = body.trim();
    if content.is_empty() {
        return Ok(Value::String(String::new()));
    }

    let media_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .unwrap_or("");
    if media_type != "application/json" {
        return Ok(Value::String(content.to_string()));
    }

    let content = content.strip_prefix(MAGIC_JSON_PREFIX).unwrap_or(content);
    serde_json::from_str(content).map_err(|_| GerritError::InvalidJson(content.to_string()))
}

/// Decodes a base64 string value into UTF-8 text.
///
/// Content endpoints (`/files/{path}/content`, `/patch`, gitiles `?format=TEXT`)
/// return base64 as a plain-text body.
pub fn decode_base64(value: &Value) -> Result<String> {
    let encoded = value.as_str().ok_or_else(|| {
        GerritError::InvalidArgument("expected a base64 string response".to_string())
    })?;
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8(bytes)?)
}
