//
//  gerrit-client
//  api/accounts/gpg_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! GPG public keys of an account (`/accounts/{username}/gpgkeys`).

use serde_json::Value;

use crate::api::common::{GerritError, Result};
use crate::api::model::{impl_resource_eq, map_to_list, str_field};
use crate::api::{GerritClient, Resource};

/// A GPG key (`GpgKeyInfo`), addressed by its short id.
#[derive(Debug, Clone)]
pub struct GpgKey {
    client: GerritClient,
    username: String,
    data: Value,
}

impl_resource_eq!(GpgKey);

impl Resource for GpgKey {
    fn endpoint(&self) -> String {
        format!("/accounts/{}/gpgkeys/{}", self.username, self.id())
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl GpgKey {
    pub fn id(&self) -> String {
        str_field(&self.data, "id")
    }

    /// Removes the key.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the GPG keys of one account.
#[derive(Debug, Clone)]
pub struct GpgKeys {
    client: GerritClient,
    username: String,
}

impl GpgKeys {
    pub(crate) fn new(client: GerritClient, username: &str) -> Self {
        Self {
            client,
            username: username.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/accounts/{}/gpgkeys", self.username)
    }

    fn wrap(&self, data: Value) -> GpgKey {
        GpgKey {
            client: self.client.clone(),
            username: self.username.clone(),
            data,
        }
    }

    /// All keys. The server keys them by id, which is added to each record.
    pub async fn list(&self) -> Result<Vec<GpgKey>> {
        let result = self.client.get(&self.endpoint()).await?;
        Ok(map_to_list(result, "id")
            .into_iter()
            .map(|k| self.wrap(k))
            .collect())
    }

    /// Retrieves a key by id.
    ///
    /// # Errors
    ///
    /// [`GerritError::GpgKeyNotFound`] when the server answers 404.
    pub async fn get(&self, id: &str) -> Result<GpgKey> {
        let data = self
            .client
            .get(&format!("{}/{}", self.endpoint(), id))
            .await
            .map_err(|e| {
                e.on_not_found(|| GerritError::GpgKeyNotFound(format!("GPG key {} does not exist", id)))
            })?;
        Ok(self.wrap(data))
    }

    /// Adds and deletes keys in one call (`GpgKeysInput`).
    pub async fn modify(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.endpoint(), Some(input)).await
    }

    /// Removes a key by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", self.endpoint(), id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_adds_ids() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts/jdoe/gpgkeys")
            .with_header("content-type", "application/json")
            .with_body(")]}'\n{\"AFC8A49B\": {\"fingerprint\": \"0192 723D 42D1 0C5B 32A6\", \"status\": \"TRUSTED\"}}")
            .create_async()
            .await;

        let keys = GpgKeys::new(GerritClient::new(&server.url()).unwrap(), "jdoe");
        let list = keys.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id(), "AFC8A49B");
        assert_eq!(list[0].endpoint(), "/accounts/jdoe/gpgkeys/AFC8A49B");
    }
}
