//
//  gerrit-client
//  api/accounts/ssh_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SSH public keys of an account (`/accounts/{username}/sshkeys`).
//!
//! Keys are addressed by their sequence number (`seq`).

use serde_json::Value;

use crate::api::common::{GerritError, Result};
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

/// An SSH key (`SshKeyInfo`).
#[derive(Debug, Clone)]
pub struct SshKey {
    client: GerritClient,
    username: String,
    data: Value,
}

impl_resource_eq!(SshKey);

impl Resource for SshKey {
    fn endpoint(&self) -> String {
        format!("/accounts/{}/sshkeys/{}", self.username, self.seq())
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl SshKey {
    /// Sequence number of the key.
    pub fn seq(&self) -> String {
        str_field(&self.data, "seq")
    }

    /// Removes the key.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the SSH keys of one account.
#[derive(Debug, Clone)]
pub struct SshKeys {
    client: GerritClient,
    username: String,
}

impl SshKeys {
    pub(crate) fn new(client: GerritClient, username: &str) -> Self {
        Self {
            client,
            username: username.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/accounts/{}/sshkeys", self.username)
    }

    fn wrap(&self, data: Value) -> SshKey {
        SshKey {
            client: self.client.clone(),
            username: self.username.clone(),
            data,
        }
    }

    /// SSH keys of the account (`SshKeyInfo`).
    pub async fn list(&self) -> Result<Vec<SshKey>> {
        let result = self.client.get(&self.endpoint()).await?;
        Ok(into_list(result).into_iter().map(|k| self.wrap(k)).collect())
    }

    /// Retrieves a key by sequence number.
    ///
    /// # Errors
    ///
    /// [`GerritError::SshKeyNotFound`] when the server answers 404.
    pub async fn get(&self, seq: u32) -> Result<SshKey> {
        let data = self
            .client
            .get(&format!("{}/{}", self.endpoint(), seq))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::SshKeyNotFound(format!("SSH Key {} does not exist", seq))
                })
            })?;
        Ok(self.wrap(data))
    }

    /// Adds a key given in OpenSSH format.
    pub async fn add(&self, ssh_key: &str) -> Result<SshKey> {
        let data = self.client.post_text(&self.endpoint(), ssh_key).await?;
        Ok(self.wrap(data))
    }

    /// Removes a key by sequence number.
    pub async fn delete(&self, seq: u32) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", self.endpoint(), seq))
            .await
    }
}
