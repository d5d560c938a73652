//
//  gerrit-client
//  api/projects/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The [`Project`] handle.
//!
//! Addressed as `/projects/{id}`, where `id` is the URL-encoded project name
//! reported by the server.

use serde_json::Value;

use super::{Branches, Commit, Dashboards, Labels, ProjectLabels, Tags, Webhooks};
use crate::api::changes::Change;
use crate::api::common::{quote_plus, GerritError, Params, Result};
use crate::api::model::{impl_resource_eq, str_field};
use crate::api::{GerritClient, Resource};

/// A Gerrit project (`ProjectInfo`).
#[derive(Debug, Clone)]
pub struct Project {
    client: GerritClient,
    id: String,
    data: Value,
}

impl_resource_eq!(Project);

impl Resource for Project {
    fn endpoint(&self) -> String {
        format!("/projects/{}", self.id)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Project {
    /// Wraps a `ProjectInfo` record. Falls back to the encoded `name` when the
    /// record carries no `id`.
    pub(crate) fn from_json(client: GerritClient, name: &str, data: Value) -> Self {
        let id = match str_field(&data, "id") {
            id if id.is_empty() => quote_plus(name),
            id => id,
        };
        Self { client, id, data }
    }

    /// The URL-encoded project name.
    pub fn id(&self) -> &str {
        &self.id
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.client.get(&format!("{}{}", self.endpoint(), path)).await
    }

    async fn put(&self, path: &str, input: &Value) -> Result<Value> {
        self.client
            .put(&format!("{}{}", self.endpoint(), path), Some(input))
            .await
    }

    async fn post(&self, path: &str, input: Option<&Value>) -> Result<Value> {
        self.client
            .post(&format!("{}{}", self.endpoint(), path), input)
            .await
    }

    /// Description of the project.
    pub async fn get_description(&self) -> Result<Value> {
        self.get("/description").await
    }

    /// Sets the description (`ProjectDescriptionInput`).
    pub async fn set_description(&self, input: &Value) -> Result<Value> {
        self.put("/description", input).await
    }

    /// Removes the description.
    pub async fn delete_description(&self) -> Result<()> {
        self.client
            .delete(&format!("{}/description", self.endpoint()))
            .await
    }

    /// Deletes the project. Requires the `delete-project` plugin.
    pub async fn delete(&self) -> Result<()> {
        self.post("/delete-project~delete", None).await?;
        Ok(())
    }

    /// Name of the parent project. Empty for `All-Projects`.
    pub async fn get_parent(&self) -> Result<Value> {
        self.get("/parent").await
    }

    /// Sets the parent project (`ProjectParentInput`).
    pub async fn set_parent(&self, input: &Value) -> Result<Value> {
        self.put("/parent", input).await
    }

    /// Branch that `HEAD` points to.
    pub async fn get_head(&self) -> Result<Value> {
        self.get("/HEAD").await
    }

    /// Sets `HEAD` (`HeadInput`).
    pub async fn set_head(&self, input: &Value) -> Result<Value> {
        self.put("/HEAD", input).await
    }

    /// Effective configuration, including inherited values.
    pub async fn get_config(&self) -> Result<Value> {
        self.get("/config").await
    }

    /// Updates the configuration (`ConfigInput`).
    pub async fn set_config(&self, input: &Value) -> Result<Value> {
        self.put("/config", input).await
    }

    /// Repository statistics.
    pub async fn get_statistics(&self) -> Result<Value> {
        self.get("/statistics.git").await
    }

    /// Runs `git gc` on the repository (`GCInput`).
    pub async fn run_garbage_collection(&self, input: &Value) -> Result<Value> {
        self.post("/gc", Some(input)).await
    }

    /// Marks commits as banned (`BanInput`).
    pub async fn ban_commits(&self, input: &Value) -> Result<Value> {
        self.put("/ban", input).await
    }

    /// Access rights (`ProjectAccessInfo`).
    pub async fn get_access_rights(&self) -> Result<Value> {
        self.get("/access").await
    }

    /// Updates access rights (`ProjectAccessInput`).
    pub async fn set_access_rights(&self, input: &Value) -> Result<Value> {
        self.post("/access", Some(input)).await
    }

    /// Creates a change in this project. Gerrit 3.3+.
    pub async fn create_change(&self, input: &Value) -> Result<Change> {
        let data = self.post("/create.change", Some(input)).await?;
        Ok(Change::from_json(self.client.clone(), data))
    }

    /// Proposes an access rights update as a change for review.
    pub async fn create_access_rights_change(&self, input: &Value) -> Result<Change> {
        let data = self.put("/access:review", input).await?;
        Ok(Change::from_json(self.client.clone(), data))
    }

    /// Checks access for another account (`account`, `perm`, `ref`).
    pub async fn check_access(&self, options: &Params) -> Result<Value> {
        self.client
            .get_with(&format!("{}/check.access", self.endpoint()), options)
            .await
    }

    /// Adds or updates the project in the secondary index (`IndexProjectInput`).
    pub async fn index(&self, input: &Value) -> Result<()> {
        self.post("/index", Some(input)).await?;
        Ok(())
    }

    /// Reindexes every change of the project.
    pub async fn index_all_changes(&self) -> Result<()> {
        self.post("/index.changes", None).await?;
        Ok(())
    }

    /// Runs consistency checks (`CheckProjectInput`).
    pub async fn check_consistency(&self, input: &Value) -> Result<Value> {
        self.post("/check", Some(input)).await
    }

    /// Direct child projects.
    pub async fn child_projects(&self) -> Result<Value> {
        self.get("/children/").await
    }

    /// Branches of the project.
    pub fn branches(&self) -> Branches {
        Branches::new(self.client.clone(), &self.id)
    }

    /// Tags of the project.
    pub fn tags(&self) -> Tags {
        Tags::new(self.client.clone(), &self.id)
    }

    /// Dashboards of the project.
    pub fn dashboards(&self) -> Dashboards {
        Dashboards::new(self.client.clone(), &self.id)
    }

    /// Remotes of the `webhooks` plugin.
    pub fn webhooks(&self) -> Webhooks {
        Webhooks::new(self.client.clone(), &self.id)
    }

    /// Retrieves a commit of the project.
    ///
    /// # Errors
    ///
    /// [`GerritError::CommitNotFound`] when the server answers 404.
    pub async fn get_commit(&self, commit: &str) -> Result<Commit> {
        let data = self
            .get(&format!("/commits/{}", commit))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::CommitNotFound(format!("Commit {} does not exist", commit))
                })
            })?;
        Ok(Commit::new(self.client.clone(), &self.id, commit, data))
    }

    /// Label definitions of the project.
    ///
    /// Servers older than 3.2.0 have no labels endpoint; the `labels` field of
    /// the project record is returned instead.
    pub async fn labels(&self) -> Result<ProjectLabels> {
        if self.client.version_before(3, 2, 0).await? {
            let record = self.client.get(&self.endpoint()).await?;
            let labels = record.get("labels").cloned().unwrap_or(Value::Null);
            return Ok(ProjectLabels::Legacy(labels));
        }
        Ok(ProjectLabels::Api(Labels::new(self.client.clone(), &self.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientOptions;
    use mockito::Matcher;
    use serde_json::json;

    const JSON: &str = "application/json";

    fn project(url: &str) -> Project {
        let client =
            GerritClient::with_options(ClientOptions::new(url).username("admin").password("pw"))
                .unwrap();
        Project::from_json(client, "demo", json!({"id": "demo", "name": "demo"}))
    }

    #[test]
    fn test_id_fallback() {
        let client = GerritClient::new("http://review").unwrap();
        let p = Project::from_json(client, "platform/build", json!({}));
        assert_eq!(p.endpoint(), "/projects/platform%2Fbuild");
    }

    #[tokio::test]
    async fn test_set_description() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/a/projects/demo/description")
            .match_body(Matcher::Json(json!({"description": "new"})))
            .with_header("content-type", JSON)
            .with_body(")]}'\n\"new\"")
            .create_async()
            .await;

        let value = project(&server.url())
            .set_description(&json!({"description": "new"}))
            .await
            .unwrap();
        assert_eq!(value, json!("new"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_commit() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/projects/demo/commits/deadbeef")
            .with_status(404)
            .create_async()
            .await;

        let err = project(&server.url()).get_commit("deadbeef").await.unwrap_err();
        assert!(matches!(err, GerritError::CommitNotFound(_)));
    }

    #[tokio::test]
    async fn test_labels_on_old_server_reads_project_record() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/config/server/version")
            .with_header("content-type", JSON)
            .with_body(")]}'\n\"3.1.8\"")
            .create_async()
            .await;
        server
            .mock("GET", "/a/projects/demo")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"demo\", \"labels\": {\"Code-Review\": {}}}")
            .create_async()
            .await;

        match project(&server.url()).labels().await.unwrap() {
            ProjectLabels::Legacy(labels) => assert!(labels.get("Code-Review").is_some()),
            ProjectLabels::Api(_) => panic!("expected the legacy labels field"),
        }
    }

    #[tokio::test]
    async fn test_labels_on_new_server_uses_endpoint() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/config/server/version")
            .with_header("content-type", JSON)
            .with_body(")]}'\n\"3.9.1\"")
            .create_async()
            .await;

        let labels = project(&server.url()).labels().await.unwrap();
        assert!(matches!(labels, ProjectLabels::Api(_)));
    }

    #[tokio::test]
    async fn test_check_access_sends_options() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/a/projects/demo/check.access")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("account".into(), "1000098".into()),
                Matcher::UrlEncoded("ref".into(), "refs/heads/main".into()),
            ]))
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"status\": 200}")
            .create_async()
            .await;

        let params = Params::new()
            .push("account", 1000098)
            .push("ref", "refs/heads/main");
        let result = project(&server.url()).check_access(&params).await.unwrap();
        assert_eq!(result["status"], 200);
        mock.assert_async().await;
    }
}
