//
//  gerrit-client
//  api/model.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Handles
//!
//! Gerrit returns loosely typed JSON records (`ChangeInfo`, `ProjectInfo`,
//! `AccountInfo`, ...) whose fields vary with the server version and the
//! requested options. Rather than mirroring every entity as a struct, each
//! handle keeps the raw record next to the identifiers needed to address it.
//!
//! Every handle implements [`Resource`]:
//!
//! - [`Resource::json`] returns the raw record
//! - [`Resource::field`] / [`Resource::field_str`] read single attributes
//! - [`Resource::endpoint`] is the REST path of the resource, and the basis of
//!   handle equality
//!
//! # Example
//!
//! ```rust,no_run
//! use gerrit_client::api::{GerritClient, Resource};
//!
//! # async fn run(client: GerritClient) -> gerrit_client::api::Result<()> {
//! let project = client.projects().get("platform/build").await?;
//! println!("{} -> {}", project.endpoint(), project.field_str("state").unwrap_or("?"));
//! # Ok(())
//! # }
//! ```

use serde_json::{Map, Value};

/// Common accessors shared by every resource handle.
pub trait Resource {
    /// REST path of the resource, without the auth suffix.
    fn endpoint(&self) -> String;

    /// The raw JSON record the handle was built from.
    fn json(&self) -> &Value;

    /// A single attribute of the record.
    fn field(&self, key: &str) -> Option<&Value> {
        self.json().get(key)
    }

    /// A single string attribute of the record.
    fn field_str(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }
}

/// Implements `PartialEq` by endpoint for resource handles.
macro_rules! impl_resource_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $crate::api::Resource::endpoint(self) == $crate::api::Resource::endpoint(other)
                }
            }
        )+
    };
}

pub(crate) use impl_resource_eq;

/// Returns the elements of a JSON array, or nothing for other values.
pub(crate) fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Turns a `{key: {...}}` map into a list, storing each key under `key_field`.
pub(crate) fn map_to_list(value: Value, key_field: &str) -> Vec<Value> {
    let Value::Object(map) = value else {
        return Vec::new();
    };
    map.into_iter()
        .map(|(key, entry)| with_field(entry, key_field, Value::String(key)))
        .collect()
}

/// Flattens a `{path: [...]}` map (comments, drafts) into one list with `path` set.
pub(crate) fn flatten_by_path(value: Value) -> Vec<Value> {
    let Value::Object(map) = value else {
        return Vec::new();
    };
    map.into_iter()
        .flat_map(|(path, entries)| {
            into_list(entries)
                .into_iter()
                .map(move |entry| with_field(entry, "path", Value::String(path.clone())))
        })
        .collect()
}

/// Sets `key` on a JSON object. Non-objects are wrapped into a new object.
pub(crate) fn with_field(value: Value, key: &str, field: Value) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    map.insert(key.to_string(), field);
    Value::Object(map)
}

/// Reads a string attribute, defaulting to empty.
pub(crate) fn str_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// True for the empty string Gerrit answers with when there is no content.
pub(crate) fn is_empty_response(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_to_list_adds_key() {
        let list = map_to_list(json!({"web": {"url": "https://hook"}}), "name");
        assert_eq!(list, vec![json!({"name": "web", "url": "https://hook"})]);
        assert!(map_to_list(json!([]), "name").is_empty());
    }

    #[test]
    fn test_map_to_list_keeps_server_order() {
        let value: Value =
            serde_json::from_str(r#"{"/COMMIT_MSG": {}, "zz.txt": {}, ".gitignore": {}}"#).unwrap();
        let paths: Vec<String> = map_to_list(value, "path")
            .iter()
            .map(|v| str_field(v, "path"))
            .collect();
        assert_eq!(paths, ["/COMMIT_MSG", "zz.txt", ".gitignore"]);
    }

    #[test]
    fn test_flatten_by_path() {
        let value = json!({
            "README": [{"id": "a"}, {"id": "b"}],
            "src/lib.rs": [{"id": "c"}]
        });
        let list = flatten_by_path(value);
        assert_eq!(list.len(), 3);
        assert!(list.contains(&json!({"id": "c", "path": "src/lib.rs"})));
        assert!(list.contains(&json!({"id": "a", "path": "README"})));
    }

    #[test]
    fn test_str_field() {
        let v = json!({"_number": 42, "id": "abc"});
        assert_eq!(str_field(&v, "id"), "abc");
        assert_eq!(str_field(&v, "_number"), "42");
        assert_eq!(str_field(&v, "missing"), "");
    }

    #[test]
    fn test_is_empty_response() {
        assert!(is_empty_response(&json!("")));
        assert!(is_empty_response(&json!({})));
        assert!(!is_empty_response(&json!({"a": 1})));
    }
}
