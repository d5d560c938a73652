//
//  gerrit-client
//  api/changes/revision/comments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Published comments on a revision
//! (`/changes/{change}/revisions/{revision}/comments`).

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{flatten_by_path, impl_resource_eq, str_field};
use crate::api::{GerritClient, Resource};

/// A published comment (`CommentInfo`).
#[derive(Debug, Clone)]
pub struct Comment {
    client: GerritClient,
    change: String,
    revision: String,
    data: Value,
}

impl_resource_eq!(Comment);

impl Resource for Comment {
    fn endpoint(&self) -> String {
        format!(
            "/changes/{}/revisions/{}/comments/{}",
            self.change,
            self.revision,
            self.id()
        )
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Comment {
    pub fn id(&self) -> String {
        str_field(&self.data, "id")
    }

    /// Deletes the comment content. Administrators only.
    ///
    /// With a `DeleteCommentInput` (carrying a `reason`) the POST form is used
    /// and the rewritten comment is returned.
    pub async fn delete(&self, input: Option<&Value>) -> Result<Value> {
        match input {
            None => self.client.delete_decoded(&self.endpoint()).await,
            Some(input) => {
                self.client
                    .post(&format!("{}/delete", self.endpoint()), Some(input))
                    .await
            }
        }
    }
}

/// Client for the published comments on one revision.
#[derive(Debug, Clone)]
pub struct Comments {
    client: GerritClient,
    change: String,
    revision: String,
}

impl Comments {
    pub(crate) fn new(client: GerritClient, change: &str, revision: &str) -> Self {
        Self {
            client,
            change: change.to_string(),
            revision: revision.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/changes/{}/revisions/{}/comments", self.change, self.revision)
    }

    fn wrap(&self, data: Value) -> Comment {
        Comment {
            client: self.client.clone(),
            change: self.change.clone(),
            revision: self.revision.clone(),
            data,
        }
    }

    /// All comments, with the file `path` set on each.
    pub async fn list(&self) -> Result<Vec<Comment>> {
        let result = self.client.get(&self.endpoint()).await?;
        Ok(flatten_by_path(result)
            .into_iter()
            .map(|c| self.wrap(c))
            .collect())
    }

    /// A published comment by id.
    pub async fn get(&self, id: &str) -> Result<Comment> {
        let data = self
            .client
            .get(&format!("{}/{}", self.endpoint(), id))
            .await?;
        Ok(self.wrap(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_with_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/changes/demo~7/revisions/abc/comments/c1")
            .with_header("content-type", "application/json")
            .with_body(")]}'\n{\"id\": \"c1\", \"message\": \"password=hunter2\"}")
            .create_async()
            .await;
        let post = server
            .mock("POST", "/changes/demo~7/revisions/abc/comments/c1/delete")
            .with_header("content-type", "application/json")
            .with_body(")]}'\n{\"id\": \"c1\", \"message\": \"Comment removed by: admin; Reason: leak\"}")
            .create_async()
            .await;

        let comments = Comments::new(GerritClient::new(&server.url()).unwrap(), "demo~7", "abc");
        let comment = comments.get("c1").await.unwrap();
        let result = comment.delete(Some(&json!({"reason": "leak"}))).await.unwrap();
        assert_eq!(result["message"], "Comment removed by: admin; Reason: leak");
        post.assert_async().await;
    }
}
