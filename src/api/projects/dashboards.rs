//
//  gerrit-client
//  api/projects/dashboards.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project dashboards (`/projects/{project}/dashboards/`).
//!
//! Dashboard ids have the form `{ref}:{path}`, e.g. `main:closed`.

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

/// A dashboard (`DashboardInfo`).
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: GerritClient,
    project: String,
    data: Value,
}

impl_resource_eq!(Dashboard);

impl Resource for Dashboard {
    fn endpoint(&self) -> String {
        format!("/projects/{}/dashboards/{}", self.project, self.id())
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Dashboard {
    pub fn id(&self) -> String {
        str_field(&self.data, "id")
    }

    /// Deletes the dashboard.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the dashboards of one project.
#[derive(Debug, Clone)]
pub struct Dashboards {
    client: GerritClient,
    project: String,
}

impl Dashboards {
    pub(crate) fn new(client: GerritClient, project: &str) -> Self {
        Self {
            client,
            project: project.to_string(),
        }
    }

    fn wrap(&self, data: Value) -> Dashboard {
        Dashboard {
            client: self.client.clone(),
            project: self.project.clone(),
            data,
        }
    }

    fn endpoint(&self, id: &str) -> String {
        format!("/projects/{}/dashboards/{}", self.project, id)
    }

    /// Dashboards of the project (`DashboardInfo`).
    pub async fn list(&self) -> Result<Vec<Dashboard>> {
        let result = self.client.get(&self.endpoint("")).await?;
        Ok(into_list(result).into_iter().map(|d| self.wrap(d)).collect())
    }

    /// A dashboard by id, e.g. `main:closed`.
    pub async fn get(&self, id: &str) -> Result<Dashboard> {
        let data = self.client.get(&self.endpoint(id)).await?;
        Ok(self.wrap(data))
    }

    /// Creates or updates a dashboard (`DashboardInput`).
    pub async fn create(&self, id: &str, input: &Value) -> Result<Dashboard> {
        let data = self.client.put(&self.endpoint(id), Some(input)).await?;
        Ok(self.wrap(data))
    }

    /// Deletes a dashboard by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&self.endpoint(id)).await
    }
}
