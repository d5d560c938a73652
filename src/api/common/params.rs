//
//  gerrit-client
//  api/common/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query Parameters for Gerrit List Endpoints
//!
//! Gerrit list endpoints share a small vocabulary of single-letter query
//! parameters. This module keeps that vocabulary in one place.
//!
//! | Parameter | Meaning |
//! |-----------|---------|
//! | `n` | Limit the number of results |
//! | `S` / `s` | Skip the first results (`s` on branches and tags) |
//! | `o` | Additional output options, repeatable |
//! | `q` | Query string, repeatable |
//! | `p` / `m` / `r` | Prefix, substring match or regex filter |
//!
//! # Example
//!
//! ```rust
//! use gerrit_client::api::common::{Params, Pattern};
//!
//! let params = Params::new()
//!     .push("n", 25)
//!     .push_opt("S", None::<u32>)
//!     .with_pattern(Some(&Pattern::Match("core".into())), false)
//!     .unwrap();
//! assert_eq!(params.as_slice(), &[("n".to_string(), "25".to_string()), ("m".to_string(), "core".to_string())]);
//! ```

use serde_json::Value;

use super::{GerritError, Result};

/// A name filter accepted by list endpoints.
///
/// Serialized as `p`, `m` or `r` respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Names starting with the value (`p`)
    Prefix(String),
    /// Names containing the value, case-insensitive (`m`)
    Match(String),
    /// Names matching the regular expression (`r`)
    Regex(String),
}

impl Pattern {
    /// The query parameter key for this pattern.
    pub fn key(&self) -> &'static str {
        match self {
            Pattern::Prefix(_) => "p",
            Pattern::Match(_) => "m",
            Pattern::Regex(_) => "r",
        }
    }

    /// The filter value.
    pub fn value(&self) -> &str {
        match self {
            Pattern::Prefix(v) | Pattern::Match(v) | Pattern::Regex(v) => v,
        }
    }
}

/// Ordered list of query parameters.
///
/// Keys may repeat (`q`, `o`), so this is a list rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a parameter only when a value is present.
    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Appends one parameter per value.
    pub fn push_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for v in values {
            self = self.push(key, v);
        }
        self
    }

    /// Appends the pattern filter, if any.
    ///
    /// Endpoints that do not support prefix filtering pass `allow_prefix = false`;
    /// a [`Pattern::Prefix`] is then rejected.
    pub fn with_pattern(self, pattern: Option<&Pattern>, allow_prefix: bool) -> Result<Self> {
        match pattern {
            None => Ok(self),
            Some(Pattern::Prefix(_)) if !allow_prefix => Err(GerritError::InvalidArgument(
                "prefix patterns are not supported by this endpoint".to_string(),
            )),
            Some(p) => Ok(self.push(p.key(), p.value())),
        }
    }

    /// Builds parameters from the scalar fields of a JSON object.
    ///
    /// Strings are sent verbatim, other scalars in their JSON form. Nulls,
    /// arrays and nested objects are skipped.
    pub fn from_json(input: &Value) -> Self {
        let mut params = Self::new();
        if let Some(map) = input.as_object() {
            for (key, value) in map {
                match value {
                    Value::String(s) => params = params.push(key, s),
                    Value::Bool(_) | Value::Number(_) => params = params.push(key, value),
                    _ => {}
                }
            }
        }
        params
    }

    /// Pairs in insertion order.
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Percent-encodes a path segment the way form encoding does.
///
/// Slashes become `%2F` and spaces become `+`, which is what Gerrit expects
/// for project, branch and file names embedded in a URL path.
pub fn quote_plus(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_opt_skips_none() {
        let params = Params::new()
            .push_opt("n", Some(10))
            .push_opt::<u32>("S", None)
            .push_opt("type", Some("CODE"));
        assert_eq!(params.get("n"), Some("10"));
        assert_eq!(params.get("S"), None);
        assert_eq!(params.get("type"), Some("CODE"));
    }

    #[test]
    fn test_pattern_keys() {
        assert_eq!(Pattern::Prefix("a".into()).key(), "p");
        assert_eq!(Pattern::Match("a".into()).key(), "m");
        assert_eq!(Pattern::Regex("a.*".into()).key(), "r");
    }

    #[test]
    fn test_prefix_rejected_when_not_allowed() {
        let result = Params::new().with_pattern(Some(&Pattern::Prefix("x".into())), false);
        assert!(matches!(result, Err(GerritError::InvalidArgument(_))));

        let params = Params::new()
            .with_pattern(Some(&Pattern::Prefix("x".into())), true)
            .unwrap();
        assert_eq!(params.get("p"), Some("x"));
    }

    #[test]
    fn test_repeated_keys_keep_order() {
        let params = Params::new().push_all("q", ["status:open", "owner:self"]);
        assert_eq!(
            params.as_slice(),
            &[
                ("q".to_string(), "status:open".to_string()),
                ("q".to_string(), "owner:self".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_json_scalars_only() {
        let params = Params::from_json(&json!({
            "source": "feature",
            "strategy": "recursive",
            "force": true,
            "nested": {"a": 1},
        }));
        assert_eq!(params.get("source"), Some("feature"));
        assert_eq!(params.get("force"), Some("true"));
        assert_eq!(params.get("nested"), None);
    }

    #[test]
    fn test_quote_plus() {
        assert_eq!(quote_plus("platform/build"), "platform%2Fbuild");
        assert_eq!(quote_plus("a b"), "a+b");
        assert_eq!(quote_plus("refs/heads/main"), "refs%2Fheads%2Fmain");
    }
}
