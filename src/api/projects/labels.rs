//
//  gerrit-client
//  api/projects/labels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Review label definitions of a project (`/projects/{project}/labels/`).
//!
//! The endpoint exists since Gerrit 3.2.0; [`ProjectLabels`] covers older
//! servers as well.

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

/// Labels as returned by [`Project::labels`](super::Project::labels).
#[derive(Debug, Clone)]
pub enum ProjectLabels {
    /// The `labels` field of the project record (servers before 3.2.0).
    Legacy(Value),
    /// The labels endpoint.
    Api(Labels),
}

/// A label definition (`LabelDefinitionInfo`).
#[derive(Debug, Clone)]
pub struct Label {
    client: GerritClient,
    project: String,
    data: Value,
}

impl_resource_eq!(Label);

impl Resource for Label {
    fn endpoint(&self) -> String {
        format!("/projects/{}/labels/{}", self.project, self.name())
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Label {
    pub fn name(&self) -> String {
        str_field(&self.data, "name")
    }

    /// Updates the label (`LabelDefinitionInput`) and returns it re-read,
    /// under its possibly new name.
    pub async fn set(&self, input: &Value) -> Result<Label> {
        let result = self.client.put(&self.endpoint(), Some(input)).await?;
        Labels::new(self.client.clone(), &self.project)
            .get(&str_field(&result, "name"))
            .await
    }

    /// Deletes the label definition.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the labels of one project.
#[derive(Debug, Clone)]
pub struct Labels {
    client: GerritClient,
    project: String,
}

impl Labels {
    pub(crate) fn new(client: GerritClient, project: &str) -> Self {
        Self {
            client,
            project: project.to_string(),
        }
    }

    fn wrap(&self, data: Value) -> Label {
        Label {
            client: self.client.clone(),
            project: self.project.clone(),
            data,
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("/projects/{}/labels/{}", self.project, name)
    }

    /// Label definitions of the project.
    pub async fn list(&self) -> Result<Vec<Label>> {
        let result = self.client.get(&self.endpoint("")).await?;
        Ok(into_list(result).into_iter().map(|l| self.wrap(l)).collect())
    }

    /// A label definition by name.
    pub async fn get(&self, name: &str) -> Result<Label> {
        let data = self.client.get(&self.endpoint(name)).await?;
        Ok(self.wrap(data))
    }

    /// Creates a label (`LabelDefinitionInput`).
    pub async fn create(&self, name: &str, input: &Value) -> Result<Label> {
        let data = self.client.put(&self.endpoint(name), Some(input)).await?;
        Ok(self.wrap(data))
    }

    /// Deletes a label definition by name.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client.delete(&self.endpoint(name)).await
    }
}
