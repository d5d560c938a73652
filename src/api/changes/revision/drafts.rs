//
//  gerrit-client
//  api/changes/revision/drafts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Draft comments of the caller on a revision
//! (`/changes/{change}/revisions/{revision}/drafts`).

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{flatten_by_path, impl_resource_eq, str_field};
use crate::api::{GerritClient, Resource};

/// A draft comment (`CommentInfo`).
#[derive(Debug, Clone)]
pub struct Draft {
    client: GerritClient,
    change: String,
    revision: String,
    data: Value,
}

impl_resource_eq!(Draft);

impl Resource for Draft {
    fn endpoint(&self) -> String {
        format!(
            "/changes/{}/revisions/{}/drafts/{}",
            self.change,
            self.revision,
            self.id()
        )
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Draft {
    pub fn id(&self) -> String {
        str_field(&self.data, "id")
    }

    /// Updates the draft (`CommentInput`) and returns the new version.
    pub async fn update(&self, input: &Value) -> Result<Draft> {
        let data = self.client.put(&self.endpoint(), Some(input)).await?;
        Ok(Draft {
            data,
            ..self.clone()
        })
    }

    /// Deletes the draft.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the drafts on one revision.
#[derive(Debug, Clone)]
pub struct Drafts {
    client: GerritClient,
    change: String,
    revision: String,
}

impl Drafts {
    pub(crate) fn new(client: GerritClient, change: &str, revision: &str) -> Self {
        Self {
            client,
            change: change.to_string(),
            revision: revision.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/changes/{}/revisions/{}/drafts", self.change, self.revision)
    }

    fn wrap(&self, data: Value) -> Draft {
        Draft {
            client: self.client.clone(),
            change: self.change.clone(),
            revision: self.revision.clone(),
            data,
        }
    }

    /// All drafts, with the file `path` set on each.
    pub async fn list(&self) -> Result<Vec<Draft>> {
        let result = self.client.get(&self.endpoint()).await?;
        Ok(flatten_by_path(result)
            .into_iter()
            .map(|d| self.wrap(d))
            .collect())
    }

    /// A draft comment by id.
    pub async fn get(&self, id: &str) -> Result<Draft> {
        let data = self
            .client
            .get(&format!("{}/{}", self.endpoint(), id))
            .await?;
        Ok(self.wrap(data))
    }

    /// Creates a draft (`CommentInput`).
    pub async fn create(&self, input: &Value) -> Result<Draft> {
        let data = self.client.put(&self.endpoint(), Some(input)).await?;
        Ok(self.wrap(data))
    }

    /// Deletes a draft by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", self.endpoint(), id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const JSON: &str = "application/json";

    #[tokio::test]
    async fn test_list_flattens_paths() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/changes/demo~7/revisions/current/drafts")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"README\": [{\"id\": \"d1\", \"line\": 3}], \"src/lib.rs\": [{\"id\": \"d2\"}, {\"id\": \"d3\"}]}")
            .create_async()
            .await;

        let drafts = Drafts::new(GerritClient::new(&server.url()).unwrap(), "demo~7", "current");
        let list = drafts.list().await.unwrap();
        assert_eq!(list.len(), 3);
        let d1 = list.iter().find(|d| d.id() == "d1").unwrap();
        assert_eq!(d1.field_str("path"), Some("README"));
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/changes/demo~7/revisions/current/drafts")
            .match_body(Matcher::Json(json!({"path": "README", "line": 1, "message": "typo"})))
            .with_status(201)
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"d9\", \"path\": \"README\", \"message\": \"typo\"}")
            .create_async()
            .await;
        server
            .mock("PUT", "/changes/demo~7/revisions/current/drafts/d9")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"d9\", \"path\": \"README\", \"message\": \"fixed typo\"}")
            .create_async()
            .await;

        let drafts = Drafts::new(GerritClient::new(&server.url()).unwrap(), "demo~7", "current");
        let draft = drafts
            .create(&json!({"path": "README", "line": 1, "message": "typo"}))
            .await
            .unwrap();
        let updated = draft.update(&json!({"message": "fixed typo"})).await.unwrap();
        assert_eq!(updated.field_str("message"), Some("fixed typo"));
        assert_eq!(updated, draft);
    }
}
