//
//  gerrit-client
//  api/groups/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Groups API
//!
//! Endpoints under `/groups`. A group may be addressed by its UUID, its
//! legacy numeric id or its name.

pub mod group;
pub mod members;
pub mod subgroups;

pub use group::Group;
pub use members::Members;
pub use subgroups::Subgroups;

use serde_json::Value;

use super::common::{GerritError, Params, Pattern, Result};
use super::GerritClient;

/// Client for `/groups`.
#[derive(Debug, Clone)]
pub struct Groups {
    client: GerritClient,
}

impl Groups {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    /// Lists the groups visible to the caller.
    ///
    /// `options` are `o` flags such as `INCLUDES` or `MEMBERS`. Only match and
    /// regex patterns are accepted.
    pub async fn list(
        &self,
        pattern: Option<&Pattern>,
        options: &[&str],
        limit: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Value> {
        let params = Params::new()
            .push_all("o", options.iter())
            .push_opt("n", limit)
            .push_opt("S", skip)
            .with_pattern(pattern, false)?;
        self.client.get_with("/groups/", &params).await
    }

    /// Queries groups, e.g. `inname:test`.
    ///
    /// Servers older than 3.2.0 only understand the `query2` parameter.
    pub async fn search(
        &self,
        query: &str,
        options: &[&str],
        limit: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Value> {
        let key = if self.client.version_before(3, 2, 0).await? {
            "query2"
        } else {
            "query"
        };
        let params = Params::new()
            .push(key, query)
            .push_all("o", options.iter())
            .push_opt("limit", limit)
            .push_opt("start", skip);
        self.client.get_with("/groups/", &params).await
    }

    /// Retrieves a group.
    ///
    /// # Errors
    ///
    /// [`GerritError::GroupNotFound`] when the server answers 404.
    pub async fn get(&self, id: &str, detailed: bool) -> Result<Group> {
        let endpoint = if detailed {
            format!("/groups/{}/detail", id)
        } else {
            format!("/groups/{}/", id)
        };
        let data = self.client.get(&endpoint).await.map_err(|e| {
            e.on_not_found(|| GerritError::GroupNotFound(format!("Group {} does not exist", id)))
        })?;
        Ok(Group::from_json(self.client.clone(), id, data))
    }

    /// Creates an internal group (`GroupInput`).
    ///
    /// # Errors
    ///
    /// [`GerritError::GroupAlreadyExists`] when a group with that name exists.
    pub async fn create(&self, name: &str, input: &Value) -> Result<Group> {
        match self.get(name, false).await {
            Ok(_) => Err(
                GerritError::GroupAlreadyExists(format!("Group {} already exists", name)).logged(),
            ),
            Err(GerritError::GroupNotFound(_)) => {
                let data = self
                    .client
                    .put(&format!("/groups/{}", name), Some(input))
                    .await?;
                Ok(Group::from_json(self.client.clone(), name, data))
            }
            Err(e) => Err(e),
        }
    }
}
