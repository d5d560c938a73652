//
//  gerrit-client
//  api/server/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server Configuration API
//!
//! Endpoints under `/config/server`: version and info, default preferences,
//! caches and background tasks.
//!
//! ## Module Organization
//!
//! - [`caches`] - Cache listing and flushing
//! - [`tasks`] - Background task queue
//!
//! ## Example
//!
//! ```rust,no_run
//! use gerrit_client::api::GerritClient;
//!
//! # async fn run(client: GerritClient) -> gerrit_client::api::Result<()> {
//! let config = client.config();
//! println!("{}", config.version().await?);
//! for cache in config.caches().list().await? {
//!     println!("{}", cache.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod caches;
pub mod tasks;

pub use caches::{Cache, Caches};
pub use tasks::{Task, Tasks};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::common::{GerritError, Result};
use super::GerritClient;

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?").expect("valid version regex"));

/// Parses the leading `major.minor[.patch]` of a Gerrit version string.
///
/// Suffixes such as `-rc1` or `-12-gabcdef` are ignored.
///
/// ```
/// use gerrit_client::api::server::parse_version;
///
/// assert_eq!(parse_version("3.9.1"), Some((3, 9, 1)));
/// assert_eq!(parse_version("3.2-rc4"), Some((3, 2, 0)));
/// assert_eq!(parse_version("unknown"), None);
/// ```
pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let caps = VERSION_RE.captures(version.trim())?;
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
    };
    Some((part(1)?, part(2)?, part(3).unwrap_or(0)))
}

const ENDPOINT: &str = "/config/server";

/// Client for `/config/server`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    client: GerritClient,
}

impl ServerConfig {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    fn path(suffix: &str) -> String {
        format!("{}{}", ENDPOINT, suffix)
    }

    /// The server version string.
    pub async fn version(&self) -> Result<String> {
        match self.client.get(&Self::path("/version")).await? {
            Value::String(version) => Ok(version),
            other => Err(GerritError::InvalidJson(format!(
                "unexpected version payload: {}",
                other
            ))),
        }
    }

    /// The server configuration (`ServerInfo`).
    pub async fn server_info(&self) -> Result<Value> {
        self.client.get(&Self::path("/info")).await
    }

    /// Runs consistency checks (`ConsistencyCheckInput`).
    pub async fn check_consistency(&self, input: &Value) -> Result<Value> {
        self.client
            .post(&Self::path("/check.consistency"), Some(input))
            .await
    }

    /// Reloads `gerrit.config`. Returns the changed and unchanged entries.
    pub async fn reload(&self) -> Result<Value> {
        self.client.post(&Self::path("/reload"), None).await
    }

    /// Confirms an email address with the token sent by mail (`EmailConfirmationInput`).
    pub async fn confirm_email(&self, input: &Value) -> Result<()> {
        self.client
            .put(&Self::path("/email.confirm"), Some(input))
            .await?;
        Ok(())
    }

    /// Summary of the server state. `option` is `jvm` or `gc`.
    pub async fn summary(&self, option: Option<&str>) -> Result<Value> {
        let endpoint = match option {
            Some(option) => Self::path(&format!("/summary?{}", option)),
            None => Self::path("/summary"),
        };
        self.client.get(&endpoint).await
    }

    /// Global capabilities known to the server.
    pub async fn capabilities(&self) -> Result<Value> {
        self.client.get(&Self::path("/capabilities")).await
    }

    /// Menu entries contributed by plugins.
    pub async fn top_menus(&self) -> Result<Value> {
        self.client.get(&Self::path("/top-menus")).await
    }

    /// Server-wide default preferences.
    pub async fn get_default_user_preferences(&self) -> Result<Value> {
        self.client.get(&Self::path("/preferences")).await
    }

    /// Updates the default preferences (`PreferencesInput`).
    pub async fn set_default_user_preferences(&self, input: &Value) -> Result<Value> {
        self.client.put(&Self::path("/preferences"), Some(input)).await
    }

    /// Server-wide default diff preferences.
    pub async fn get_default_diff_preferences(&self) -> Result<Value> {
        self.client.get(&Self::path("/preferences.diff")).await
    }

    /// Updates the default diff preferences.
    pub async fn set_default_diff_preferences(&self, input: &Value) -> Result<Value> {
        self.client
            .put(&Self::path("/preferences.diff"), Some(input))
            .await
    }

    /// Server-wide default edit preferences.
    pub async fn get_default_edit_preferences(&self) -> Result<Value> {
        self.client.get(&Self::path("/preferences.edit")).await
    }

    /// Updates the default edit preferences.
    pub async fn set_default_edit_preferences(&self, input: &Value) -> Result<Value> {
        self.client
            .put(&Self::path("/preferences.edit"), Some(input))
            .await
    }

    /// Reindexes changes by id (`IndexChangesInput`).
    pub async fn index_changes(&self, input: &Value) -> Result<()> {
        self.client
            .post(&Self::path("/index.changes"), Some(input))
            .await?;
        Ok(())
    }

    /// Server caches.
    pub fn caches(&self) -> Caches {
        Caches::new(self.client.clone())
    }

    /// Background tasks of the server.
    pub fn tasks(&self) -> Tasks {
        Tasks::new(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const JSON: &str = "application/json";

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("3.9.1"), Some((3, 9, 1)));
        assert_eq!(parse_version("2.16.28-12-g0a1b2c3"), Some((2, 16, 28)));
        assert_eq!(parse_version(" 3.10 "), Some((3, 10, 0)));
        assert_eq!(parse_version("v3.9"), None);
        assert!(parse_version("3.1.9").unwrap() < (3, 2, 0));
    }

    #[tokio::test]
    async fn test_version() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/config/server/version")
            .with_header("content-type", JSON)
            .with_body(")]}'\n\"3.9.1\"")
            .create_async()
            .await;

        let config = ServerConfig::new(GerritClient::new(&server.url()).unwrap());
        assert_eq!(config.version().await.unwrap(), "3.9.1");
    }

    #[tokio::test]
    async fn test_summary_option() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/config/server/summary?jvm")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"jvm_summary\": {\"vm_vendor\": \"Oracle Corporation\"}}")
            .create_async()
            .await;

        let config = ServerConfig::new(GerritClient::new(&server.url()).unwrap());
        let summary = config.summary(Some("jvm")).await.unwrap();
        assert_eq!(summary["jvm_summary"]["vm_vendor"], "Oracle Corporation");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_set_default_diff_preferences() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/config/server/preferences.diff")
            .match_body(mockito::Matcher::Json(json!({"context": 10})))
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"context\": 10, \"tab_size\": 8}")
            .create_async()
            .await;

        let config = ServerConfig::new(GerritClient::new(&server.url()).unwrap());
        let prefs = config
            .set_default_diff_preferences(&json!({"context": 10}))
            .await
            .unwrap();
        assert_eq!(prefs["tab_size"], 8);
        mock.assert_async().await;
    }
}
