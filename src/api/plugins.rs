//
//  gerrit-client
//  api/plugins.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Plugins API (`/plugins`).
//!
//! Plugin management endpoints live in the `gerrit~` namespace so they do
//! not collide with REST endpoints contributed by the plugins themselves.

use serde_json::Value;

use super::common::{Params, Pattern, Result};
use super::model::{impl_resource_eq, str_field};
use super::{GerritClient, Resource};

/// Options for [`Plugins::list`].
#[derive(Debug, Clone)]
pub struct PluginListOptions {
    /// Include disabled plugins
    pub is_all: bool,
    pub limit: u32,
    pub skip: u32,
    pub pattern: Option<Pattern>,
}

impl Default for PluginListOptions {
    fn default() -> Self {
        Self {
            is_all: false,
            limit: 25,
            skip: 0,
            pattern: None,
        }
    }
}

/// An installed plugin (`PluginInfo`).
#[derive(Debug, Clone)]
pub struct Plugin {
    client: GerritClient,
    id: String,
    data: Value,
}

impl_resource_eq!(Plugin);

impl Resource for Plugin {
    fn endpoint(&self) -> String {
        format!("/plugins/{}", self.id)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Plugin {
    pub fn id(&self) -> &str {
        &self.id
    }

    async fn action(&self, action: &str) -> Result<Value> {
        self.client
            .post(&format!("{}/gerrit~{}", self.endpoint(), action), None)
            .await
    }

    /// Enables the plugin.
    pub async fn enable(&self) -> Result<Value> {
        self.action("enable").await
    }

    /// Disables the plugin.
    pub async fn disable(&self) -> Result<Value> {
        self.action("disable").await
    }

    /// Reloads the plugin.
    pub async fn reload(&self) -> Result<Value> {
        self.action("reload").await
    }
}

/// Client for `/plugins`.
#[derive(Debug, Clone)]
pub struct Plugins {
    client: GerritClient,
}

impl Plugins {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    /// Lists installed plugins, keyed by plugin id.
    pub async fn list(&self, options: &PluginListOptions) -> Result<Value> {
        let params = Params::new()
            .push("n", options.limit)
            .push("S", options.skip)
            .with_pattern(options.pattern.as_ref(), true)?
            .push("all", u8::from(options.is_all));
        self.client.get_with("/plugins/", &params).await
    }

    /// Status of a plugin (`PluginInfo`).
    pub async fn get(&self, id: &str) -> Result<Plugin> {
        let data = self
            .client
            .get(&format!("/plugins/{}/gerrit~status", id))
            .await?;
        Ok(self.wrap(id, data))
    }

    /// Installs a plugin from a URL (`PluginInput`).
    pub async fn install(&self, id: &str, input: &Value) -> Result<Plugin> {
        let data = self
            .client
            .put(&format!("/plugins/{}.jar", id), Some(input))
            .await?;
        Ok(self.wrap(id, data))
    }

    fn wrap(&self, requested: &str, data: Value) -> Plugin {
        let id = match str_field(&data, "id") {
            id if id.is_empty() => requested.to_string(),
            id => id,
        };
        Plugin {
            client: self.client.clone(),
            id,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const JSON: &str = "application/json";

    #[tokio::test]
    async fn test_list_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/plugins/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("n".into(), "25".into()),
                Matcher::UrlEncoded("S".into(), "0".into()),
                Matcher::UrlEncoded("p".into(), "delete".into()),
                Matcher::UrlEncoded("all".into(), "1".into()),
            ]))
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"delete-project\": {\"id\": \"delete-project\", \"version\": \"2.8\"}}")
            .create_async()
            .await;

        let plugins = Plugins::new(GerritClient::new(&server.url()).unwrap());
        let options = PluginListOptions {
            is_all: true,
            pattern: Some(Pattern::Prefix("delete".into())),
            ..Default::default()
        };
        let result = plugins.list(&options).await.unwrap();
        assert_eq!(result["delete-project"]["version"], "2.8");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_and_disable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/plugins/replication/gerrit~status")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"replication\", \"version\": \"3.9.1\"}")
            .create_async()
            .await;
        let disable = server
            .mock("POST", "/plugins/replication/gerrit~disable")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"replication\", \"disabled\": true}")
            .create_async()
            .await;

        let plugins = Plugins::new(GerritClient::new(&server.url()).unwrap());
        let plugin = plugins.get("replication").await.unwrap();
        assert_eq!(plugin.field_str("version"), Some("3.9.1"));
        let result = plugin.disable().await.unwrap();
        assert_eq!(result["disabled"], json!(true));
        disable.assert_async().await;
    }
}
