//
//  gerrit-client
//  api/groups/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The [`Group`] handle (`/groups/{id}`).
//!
//! Most setters are only allowed on Gerrit internal groups; the server answers
//! 405 for external ones, surfaced as [`GerritError::NotAllowed`].
//!
//! [`GerritError::NotAllowed`]: crate::api::GerritError::NotAllowed

use serde_json::Value;

use super::{Members, Subgroups};
use crate::api::common::Result;
use crate::api::model::{impl_resource_eq, str_field};
use crate::api::{GerritClient, Resource};

/// A group (`GroupInfo`).
#[derive(Debug, Clone)]
pub struct Group {
    client: GerritClient,
    id: String,
    data: Value,
}

impl_resource_eq!(Group);

impl Resource for Group {
    fn endpoint(&self) -> String {
        format!("/groups/{}", self.id)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Group {
    /// Wraps a group record, addressed by its UUID when the record has one.
    pub(crate) fn from_json(client: GerritClient, requested: &str, data: Value) -> Self {
        let id = match str_field(&data, "id") {
            id if id.is_empty() => requested.to_string(),
            id => id,
        };
        Self { client, id, data }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.endpoint(), suffix)
    }

    /// Name of the group.
    pub async fn get_name(&self) -> Result<Value> {
        self.client.get(&self.path("/name")).await
    }

    /// Renames the group (`GroupNameInput`).
    pub async fn set_name(&self, input: &Value) -> Result<Value> {
        self.client.put(&self.path("/name"), Some(input)).await
    }

    /// Description of the group.
    pub async fn get_description(&self) -> Result<Value> {
        self.client.get(&self.path("/description")).await
    }

    /// Sets the description (`GroupDescriptionInput`).
    pub async fn set_description(&self, input: &Value) -> Result<Value> {
        self.client.put(&self.path("/description"), Some(input)).await
    }

    /// Removes the description.
    pub async fn delete_description(&self) -> Result<()> {
        self.client.delete(&self.path("/description")).await
    }

    /// Group options (`GroupOptionsInfo`).
    pub async fn get_options(&self) -> Result<Value> {
        self.client.get(&self.path("/options")).await
    }

    /// Sets group options (`GroupOptionsInput`).
    pub async fn set_options(&self, input: &Value) -> Result<Value> {
        self.client.put(&self.path("/options"), Some(input)).await
    }

    /// The owner group (`GroupInfo`).
    pub async fn get_owner(&self) -> Result<Value> {
        self.client.get(&self.path("/owner")).await
    }

    /// Sets the owner group (`GroupOwnerInput`).
    pub async fn set_owner(&self, input: &Value) -> Result<Value> {
        self.client.put(&self.path("/owner"), Some(input)).await
    }

    /// Membership changes of the group (`GroupAuditEventInfo`).
    pub async fn get_audit_log(&self) -> Result<Value> {
        self.client.get(&self.path("/log.audit")).await
    }

    /// Reindexes the group.
    pub async fn index(&self) -> Result<()> {
        self.client.post(&self.path("/index"), None).await?;
        Ok(())
    }

    /// Direct members of the group.
    pub fn members(&self) -> Members {
        Members::new(self.client.clone(), &self.id)
    }

    /// Included groups.
    pub fn subgroups(&self) -> Subgroups {
        Subgroups::new(self.client.clone(), &self.id)
    }
}
