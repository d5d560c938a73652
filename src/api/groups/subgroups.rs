//
//  gerrit-client
//  api/groups/subgroups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct subgroups of an internal group (`/groups/{id}/groups`).

use super::Group;
use crate::api::common::{GerritError, Result};
use crate::api::model::into_list;
use crate::api::GerritClient;

#[derive(Debug, Clone)]
pub struct Subgroups {
    client: GerritClient,
    group_id: String,
}

impl Subgroups {
    pub(crate) fn new(client: GerritClient, group_id: &str) -> Self {
        Self {
            client,
            group_id: group_id.to_string(),
        }
    }

    fn endpoint(&self, subgroup: &str) -> String {
        format!("/groups/{}/groups/{}", self.group_id, subgroup)
    }

    /// Included groups (`GroupInfo`).
    pub async fn list(&self) -> Result<Vec<Group>> {
        let result = self.client.get(&self.endpoint("")).await?;
        Ok(into_list(result)
            .into_iter()
            .map(|item| Group::from_json(self.client.clone(), "", item))
            .collect())
    }

    /// Retrieves a subgroup by id or name.
    pub async fn get(&self, subgroup: &str) -> Result<Group> {
        let data = self
            .client
            .get(&self.endpoint(subgroup))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::GroupNotFound(format!("Subgroup {} does not exist", subgroup))
                })
            })?;
        Ok(Group::from_json(self.client.clone(), subgroup, data))
    }

    /// Adds an internal or external group as subgroup.
    pub async fn add(&self, subgroup: &str) -> Result<Group> {
        let data = self.client.put(&self.endpoint(subgroup), None).await?;
        Ok(Group::from_json(self.client.clone(), subgroup, data))
    }

    /// Removes an included group.
    pub async fn remove(&self, subgroup: &str) -> Result<()> {
        self.client.delete(&self.endpoint(subgroup)).await
    }
}
