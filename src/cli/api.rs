//
//  gerrit-client
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw REST API access.
//!
//! ```text
//! gerrit api /changes/?q=status:open+owner:self
//! gerrit api /projects/demo/description -X PUT -F description="Demo project"
//! gerrit api /changes/ -X POST --input change.json
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Result};
use clap::Args;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::{Body, Params};
use crate::config::Config;

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Endpoint path, e.g. /changes/?q=status:open
    pub endpoint: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Field as key=value. Query parameter for GET and DELETE, JSON body field otherwise
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Read the JSON body from a file, or - for stdin
    #[arg(long)]
    pub input: Option<String>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = connect(global, &config).await?;
        let method = self.parse_method()?;

        let fields = self
            .field
            .iter()
            .map(|f| parse_field(f))
            .collect::<Result<Vec<_>>>()?;

        let sends_query = method == Method::GET || method == Method::DELETE;
        let mut params = Params::new();
        let body = match self.read_input()? {
            Some(body) => Some(body),
            None if sends_query => {
                for (key, value) in &fields {
                    params = params.push(key, field_text(value));
                }
                None
            }
            None if fields.is_empty() => None,
            None => Some(Value::Object(fields.into_iter().collect::<Map<_, _>>())),
        };

        let body = body.as_ref().map(Body::Json).unwrap_or(Body::Empty);
        let result = client.request(method, &self.endpoint, &params, body).await?;
        global.writer(&config).write_value(&result, &[])
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn read_input(&self) -> Result<Option<Value>> {
        let Some(input) = &self.input else {
            return Ok(None);
        };
        let content = if input == "-" {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            fs::read_to_string(input)?
        };
        Ok(Some(serde_json::from_str(&content)?))
    }
}

/// Parses `key=value`. Booleans, numbers, `null` and JSON arrays/objects are
/// typed; everything else is a string.
fn parse_field(field: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = field.split_once('=') else {
        bail!("Invalid field format: {}. Expected key=value", field);
    };
    let value = match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Number(n.into())
            } else if raw.starts_with('[') || raw.starts_with('{') {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            } else {
                Value::String(raw.to_string())
            }
        }
    };
    Ok((key.to_string(), value))
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_types() {
        assert_eq!(parse_field("n=25").unwrap(), ("n".into(), json!(25)));
        assert_eq!(parse_field("notify=false").unwrap(), ("notify".into(), json!(false)));
        assert_eq!(
            parse_field("labels={\"Code-Review\": 2}").unwrap(),
            ("labels".into(), json!({"Code-Review": 2}))
        );
        assert_eq!(
            parse_field("message=a=b").unwrap(),
            ("message".into(), json!("a=b"))
        );
        assert!(parse_field("novalue").is_err());
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&json!("status:open")), "status:open");
        assert_eq!(field_text(&json!(10)), "10");
    }
}
