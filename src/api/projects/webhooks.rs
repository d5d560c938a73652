//
//  gerrit-client
//  api/projects/webhooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Remotes of the `webhooks` plugin for one project
//! (`/config/server/webhooks~projects/{project}/remotes/`).
//!
//! The plugin keys remotes by name and does not repeat the name inside the
//! record, so the handles add it under `name`.

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{impl_resource_eq, map_to_list, str_field, with_field};
use crate::api::{GerritClient, Resource};

/// A webhook remote.
#[derive(Debug, Clone)]
pub struct Webhook {
    client: GerritClient,
    project: String,
    data: Value,
}

impl_resource_eq!(Webhook);

impl Resource for Webhook {
    fn endpoint(&self) -> String {
        format!(
            "/config/server/webhooks~projects/{}/remotes/{}",
            self.project,
            self.name()
        )
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Webhook {
    pub fn name(&self) -> String {
        str_field(&self.data, "name")
    }

    /// Deletes the remote.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the webhook remotes of one project.
#[derive(Debug, Clone)]
pub struct Webhooks {
    client: GerritClient,
    project: String,
}

impl Webhooks {
    pub(crate) fn new(client: GerritClient, project: &str) -> Self {
        Self {
            client,
            project: project.to_string(),
        }
    }

    fn wrap(&self, data: Value) -> Webhook {
        Webhook {
            client: self.client.clone(),
            project: self.project.clone(),
            data,
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!(
            "/config/server/webhooks~projects/{}/remotes/{}",
            self.project, name
        )
    }

    /// Configured remotes, each with its `name`.
    pub async fn list(&self) -> Result<Vec<Webhook>> {
        let result = self.client.get(&self.endpoint("")).await?;
        Ok(map_to_list(result, "name")
            .into_iter()
            .map(|w| self.wrap(w))
            .collect())
    }

    /// Creates or updates a remote (`url`, `events`, `connection_timeout`, ...).
    pub async fn create(&self, name: &str, input: &Value) -> Result<Webhook> {
        let data = self.client.put(&self.endpoint(name), Some(input)).await?;
        Ok(self.wrap(with_field(data, "name", Value::String(name.to_string()))))
    }

    /// A remote by name.
    pub async fn get(&self, name: &str) -> Result<Webhook> {
        let data = self.client.get(&self.endpoint(name)).await?;
        Ok(self.wrap(with_field(data, "name", Value::String(name.to_string()))))
    }

    /// Deletes a remote by name.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client.delete(&self.endpoint(name)).await
    }
}
