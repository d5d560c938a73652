//
//  gerrit-client
//  api/projects/tags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tags of a project (`/projects/{project}/tags`).

use serde_json::Value;

use crate::api::common::{quote_plus, GerritError, Params, Pattern, Result};
use crate::api::model::{impl_resource_eq, str_field};
use crate::api::{GerritClient, Resource};

const TAG_PREFIX: &str = "refs/tags/";

/// A tag (`TagInfo`).
#[derive(Debug, Clone)]
pub struct Tag {
    client: GerritClient,
    project: String,
    data: Value,
}

impl_resource_eq!(Tag);

impl Resource for Tag {
    fn endpoint(&self) -> String {
        format!("/projects/{}/tags/{}", self.project, quote_plus(&self.name()))
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Tag {
    /// The tag name: `ref` without `refs/tags/`.
    pub fn name(&self) -> String {
        let reference = str_field(&self.data, "ref");
        reference
            .strip_prefix(TAG_PREFIX)
            .map(str::to_string)
            .unwrap_or(reference)
    }

    /// Deletes the tag.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the tags of one project.
#[derive(Debug, Clone)]
pub struct Tags {
    client: GerritClient,
    project: String,
}

impl Tags {
    pub(crate) fn new(client: GerritClient, project: &str) -> Self {
        Self {
            client,
            project: project.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/projects/{}/tags", self.project)
    }

    /// Lists tags. Only `Match` and `Regex` patterns are accepted.
    pub async fn list(
        &self,
        pattern: Option<&Pattern>,
        limit: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Value> {
        let params = Params::new()
            .push_opt("n", limit)
            .push_opt("s", skip)
            .with_pattern(pattern, false)?;
        self.client
            .get_with(&format!("{}/", self.endpoint()), &params)
            .await
    }

    /// Retrieves a tag by name.
    ///
    /// # Errors
    ///
    /// [`GerritError::TagNotFound`] when the server answers 404.
    pub async fn get(&self, name: &str) -> Result<Tag> {
        let data = self
            .client
            .get(&format!("{}/{}", self.endpoint(), quote_plus(name)))
            .await
            .map_err(|e| {
                e.on_not_found(|| GerritError::TagNotFound(format!("Tag {} does not exist", name)))
            })?;
        Ok(Tag {
            client: self.client.clone(),
            project: self.project.clone(),
            data,
        })
    }

    /// Creates a tag (`TagInput`).
    ///
    /// # Errors
    ///
    /// [`GerritError::TagAlreadyExists`] when the tag exists.
    pub async fn create(&self, name: &str, input: &Value) -> Result<Tag> {
        match self.get(name).await {
            Ok(_) => {
                Err(GerritError::TagAlreadyExists(format!("Tag {} already exists", name)).logged())
            }
            Err(GerritError::TagNotFound(_)) => {
                let data = self
                    .client
                    .put(&format!("{}/{}", self.endpoint(), quote_plus(name)), Some(input))
                    .await?;
                Ok(Tag {
                    client: self.client.clone(),
                    project: self.project.clone(),
                    data,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a tag by name.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", self.endpoint(), quote_plus(name)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const JSON: &str = "application/json";

    #[tokio::test]
    async fn test_tag_name_and_delete() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects/demo/tags/v1.0")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"ref\": \"refs/tags/v1.0\", \"revision\": \"49ce77fd\"}")
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/projects/demo/tags/v1.0")
            .with_status(204)
            .create_async()
            .await;

        let tags = Tags::new(GerritClient::new(&server.url()).unwrap(), "demo");
        let tag = tags.get("v1.0").await.unwrap();
        assert_eq!(tag.name(), "v1.0");
        tag.delete().await.unwrap();
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_tag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects/demo/tags/v2.0")
            .with_status(404)
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/projects/demo/tags/v2.0")
            .with_status(201)
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"ref\": \"refs/tags/v2.0\"}")
            .create_async()
            .await;

        let tags = Tags::new(GerritClient::new(&server.url()).unwrap(), "demo");
        let tag = tags.create("v2.0", &json!({"revision": "main"})).await.unwrap();
        assert_eq!(tag.name(), "v2.0");
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_tag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects/demo/tags/nope")
            .with_status(404)
            .create_async()
            .await;

        let tags = Tags::new(GerritClient::new(&server.url()).unwrap(), "demo");
        assert!(matches!(tags.get("nope").await, Err(GerritError::TagNotFound(_))));
    }
}
