//
//  gerrit-client
//  api/projects/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! A commit of a project (`/projects/{project}/commits/{commit}`).

use serde_json::Value;

use crate::api::common::{quote_plus, Result};
use crate::api::decode::decode_base64;
use crate::api::model::impl_resource_eq;
use crate::api::{GerritClient, Resource};

/// A commit (`CommitInfo`).
#[derive(Debug, Clone)]
pub struct Commit {
    client: GerritClient,
    project: String,
    commit: String,
    data: Value,
}

impl_resource_eq!(Commit);

impl Resource for Commit {
    fn endpoint(&self) -> String {
        format!("/projects/{}/commits/{}", self.project, self.commit)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Commit {
    pub(crate) fn new(client: GerritClient, project: &str, commit: &str, data: Value) -> Self {
        Self {
            client,
            project: project.to_string(),
            commit: commit.to_string(),
            data,
        }
    }

    /// The commit SHA-1.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Branches and tags containing the commit.
    pub async fn get_include_in(&self) -> Result<Value> {
        self.client.get(&format!("{}/in", self.endpoint())).await
    }

    /// Content of a file in the commit. Base64 unless `decode` is set.
    pub async fn get_file_content(&self, file: &str, decode: bool) -> Result<String> {
        let endpoint = format!("{}/files/{}/content", self.endpoint(), quote_plus(file));
        let value = self.client.get(&endpoint).await?;
        if decode {
            return decode_base64(&value);
        }
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Cherry-picks the commit onto a branch (`CherryPickInput`).
    pub async fn cherry_pick(&self, input: &Value) -> Result<Value> {
        self.client
            .post(&format!("{}/cherrypick", self.endpoint()), Some(input))
            .await
    }

    /// Files modified by the commit.
    pub async fn list_change_files(&self) -> Result<Value> {
        self.client
            .get(&format!("{}/files/", self.endpoint()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_file_content_decoded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects/demo/commits/abc123/files/docs%2FREADME.md/content")
            .with_header("content-type", "text/plain; charset=ISO-8859-1")
            .with_body("IyBEZW1vCg==")
            .create_async()
            .await;

        let commit = Commit::new(GerritClient::new(&server.url()).unwrap(), "demo", "abc123", json!({}));
        assert_eq!(commit.get_file_content("docs/README.md", false).await.unwrap(), "IyBEZW1vCg==");
        assert_eq!(commit.get_file_content("docs/README.md", true).await.unwrap(), "# Demo\n");
    }

    #[test]
    fn test_equality_by_endpoint() {
        let client = GerritClient::new("http://review").unwrap();
        let a = Commit::new(client.clone(), "demo", "abc", json!({"subject": "one"}));
        let b = Commit::new(client.clone(), "demo", "abc", json!({"subject": "two"}));
        let c = Commit::new(client, "other", "abc", json!({}));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
