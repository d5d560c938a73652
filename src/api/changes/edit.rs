//
//  gerrit-client
//  api/changes/edit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The change edit (`/changes/{change}/edit`).
//!
//! A change edit is a pending, unpublished modification of the current patch
//! set. Each user has at most one edit per change.

use serde_json::{json, Value};

use crate::api::common::{quote_plus, Result};
use crate::api::model::impl_resource_eq;
use crate::api::{GerritClient, Resource};

/// A change edit (`EditInfo`).
#[derive(Debug, Clone)]
pub struct Edit {
    client: GerritClient,
    change: String,
    data: Value,
}

impl_resource_eq!(Edit);

impl Resource for Edit {
    fn endpoint(&self) -> String {
        format!("/changes/{}/edit", self.change)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Edit {
    pub(crate) fn new(client: GerritClient, change: &str, data: Value) -> Self {
        Self {
            client,
            change: change.to_string(),
            data,
        }
    }

    fn file_path(&self, file: &str) -> String {
        format!("{}/{}", self.endpoint(), quote_plus(file))
    }

    /// Content of a file in the edit, base64 encoded.
    pub async fn get_change_file_content(&self, file: &str) -> Result<Value> {
        self.client.get(&self.file_path(file)).await
    }

    /// Meta data of a file in the edit.
    pub async fn get_file_meta_data(&self, file: &str) -> Result<Value> {
        self.client
            .get(&format!("{}/meta", self.file_path(file)))
            .await
    }

    /// Replaces the content of a file.
    pub async fn put_change_file_content(&self, file: &str, content: &str) -> Result<()> {
        self.client.put_text(&self.file_path(file), content).await?;
        Ok(())
    }

    /// Restores a file to its state in the patch set.
    pub async fn restore_file_content(&self, file: &str) -> Result<()> {
        self.client
            .post(&self.endpoint(), Some(&json!({ "restore_path": file })))
            .await?;
        Ok(())
    }

    /// Renames a file in the edit.
    pub async fn rename_file(&self, old_path: &str, new_path: &str) -> Result<()> {
        let input = json!({ "old_path": old_path, "new_path": new_path });
        self.client.post(&self.endpoint(), Some(&input)).await?;
        Ok(())
    }

    /// Deletes a file in the edit.
    pub async fn delete_file(&self, file: &str) -> Result<()> {
        self.client.delete(&self.file_path(file)).await
    }

    /// Changes the commit message of the edit (`ChangeEditMessageInput`).
    pub async fn change_commit_message(&self, input: &Value) -> Result<()> {
        self.client
            .put(&format!("{}:message", self.endpoint()), Some(input))
            .await?;
        Ok(())
    }

    /// Commit message of the edit.
    pub async fn get_commit_message(&self) -> Result<Value> {
        self.client
            .get(&format!("{}:message", self.endpoint()))
            .await
    }

    /// Publishes the edit as a new patch set (`PublishChangeEditInput`).
    pub async fn publish(&self, input: &Value) -> Result<()> {
        self.client
            .post(&format!("{}:publish", self.endpoint()), Some(input))
            .await?;
        Ok(())
    }

    /// Rebases the edit onto the current patch set.
    pub async fn rebase(&self) -> Result<()> {
        self.client
            .post(&format!("{}:rebase", self.endpoint()), None)
            .await?;
        Ok(())
    }

    /// Discards the edit.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::PLAIN_TEXT_CONTENT_TYPE;
    use mockito::Matcher;

    fn edit(url: &str) -> Edit {
        Edit::new(GerritClient::new(url).unwrap(), "demo~4247", json!({"ref": "refs/users/01/1000001/edit-4247/1"}))
    }

    #[tokio::test]
    async fn test_put_file_content_as_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/changes/demo~4247/edit/src%2Fmain.rs")
            .match_header("content-type", PLAIN_TEXT_CONTENT_TYPE)
            .match_body("fn main() {}\n")
            .with_status(204)
            .create_async()
            .await;

        edit(&server.url())
            .put_change_file_content("src/main.rs", "fn main() {}\n")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rename_file() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/changes/demo~4247/edit")
            .match_body(Matcher::Json(json!({"old_path": "a.txt", "new_path": "b.txt"})))
            .with_status(204)
            .create_async()
            .await;

        edit(&server.url()).rename_file("a.txt", "b.txt").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_publish_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/changes/demo~4247/edit:publish")
            .with_status(204)
            .create_async()
            .await;

        edit(&server.url())
            .publish(&json!({"notify": "NONE"}))
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
