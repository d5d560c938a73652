//
//  gerrit-client
//  api/projects/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Projects API
//!
//! Endpoints under `/projects`: listing, querying, creating and deleting
//! projects, plus the per-project resources reachable from a [`Project`]
//! handle.
//!
//! ## Module Organization
//!
//! - [`project`] - The [`Project`] handle and its settings endpoints
//! - [`branches`] - Branch listing and management
//! - [`tags`] - Tag listing and management
//! - [`commit`] - Commits of a project
//! - [`dashboards`] - Project dashboards
//! - [`labels`] - Review labels (Gerrit 3.2+)
//! - [`webhooks`] - Remotes of the `webhooks` plugin
//!
//! ## Example
//!
//! ```rust,no_run
//! use gerrit_client::api::{GerritClient, Pattern};
//! use gerrit_client::api::projects::ProjectListOptions;
//!
//! # async fn run(client: GerritClient) -> gerrit_client::api::Result<()> {
//! let options = ProjectListOptions {
//!     pattern: Some(Pattern::Prefix("platform/".into())),
//!     description: true,
//!     ..Default::default()
//! };
//! let projects = client.projects().list(&options).await?;
//! for (name, info) in projects.as_object().into_iter().flatten() {
//!     println!("{}: {}", name, info["description"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod branches;
pub mod commit;
pub mod dashboards;
pub mod labels;
pub mod project;
pub mod tags;
pub mod webhooks;

pub use branches::{Branch, Branches};
pub use commit::Commit;
pub use dashboards::{Dashboard, Dashboards};
pub use labels::{Label, Labels, ProjectLabels};
pub use project::Project;
pub use tags::{Tag, Tags};
pub use webhooks::{Webhook, Webhooks};

use serde_json::Value;

use super::common::{quote_plus, GerritError, Params, Pattern, Result};
use super::GerritClient;

/// Filters for [`Projects::list`].
///
/// # Fields
///
/// * `is_all` - Include hidden projects. Not combinable with `state`
/// * `limit` - Maximum number of results (`n`)
/// * `skip` - Results to skip (`S`)
/// * `pattern` - Name filter (`p`, `m` or `r`)
/// * `project_type` - `code`, `permissions` or `all`
/// * `description` - Include project descriptions (`d`)
/// * `branch` - Only projects having this branch (`b`)
/// * `state` - `ACTIVE`, `READ_ONLY` or `HIDDEN`
#[derive(Debug, Clone)]
pub struct ProjectListOptions {
    pub is_all: bool,
    pub limit: u32,
    pub skip: u32,
    pub pattern: Option<Pattern>,
    pub project_type: Option<String>,
    pub description: bool,
    pub branch: Option<String>,
    pub state: Option<String>,
}

impl Default for ProjectListOptions {
    fn default() -> Self {
        Self {
            is_all: false,
            limit: 25,
            skip: 0,
            pattern: None,
            project_type: None,
            description: false,
            branch: None,
            state: None,
        }
    }
}

impl ProjectListOptions {
    fn to_params(&self) -> Result<Params> {
        if self.is_all && self.state.is_some() {
            return Err(GerritError::InvalidArgument(
                "is_all can not be used together with the state option.".to_string(),
            ));
        }
        let mut params = Params::new()
            .push("n", self.limit)
            .push("S", self.skip)
            .push_opt("type", self.project_type.as_deref())
            .push_opt("b", self.branch.as_deref())
            .push_opt("state", self.state.as_deref())
            .with_pattern(self.pattern.as_ref(), true)?;
        if self.is_all {
            params = params.push("all", 1);
        }
        Ok(params.push("d", u8::from(self.description)))
    }
}

/// Client for `/projects`.
#[derive(Debug, Clone)]
pub struct Projects {
    client: GerritClient,
}

impl Projects {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    /// Lists the projects visible to the caller, keyed by name.
    pub async fn list(&self, options: &ProjectListOptions) -> Result<Value> {
        let params = options.to_params()?;
        self.client.get_with("/projects/", &params).await
    }

    /// Queries projects (`name:`, `parent:`, `inname:`, `description:`, `state:`).
    pub async fn search(&self, query: &str, limit: u32, skip: u32) -> Result<Value> {
        let params = Params::new()
            .push("query", query)
            .push("limit", limit)
            .push("start", skip);
        self.client.get_with("/projects/", &params).await
    }

    /// Retrieves a project by name.
    ///
    /// # Errors
    ///
    /// [`GerritError::ProjectNotFound`] when the server answers 404.
    pub async fn get(&self, name: &str) -> Result<Project> {
        let data = self
            .client
            .get(&format!("/projects/{}", quote_plus(name)))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::ProjectNotFound(format!("Project {} does not exist", name))
                })
            })?;
        Ok(Project::from_json(self.client.clone(), name, data))
    }

    /// Creates a project and returns it.
    ///
    /// # Errors
    ///
    /// [`GerritError::ProjectAlreadyExists`] when a project with this name exists.
    pub async fn create(&self, name: &str, input: &Value) -> Result<Project> {
        match self.get(name).await {
            Ok(_) => Err(GerritError::ProjectAlreadyExists(format!(
                "Project {} already exists",
                name
            ))
            .logged()),
            Err(GerritError::ProjectNotFound(_)) => {
                self.client
                    .put(&format!("/projects/{}", quote_plus(name)), Some(input))
                    .await?;
                self.get(name).await
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a project. Requires the `delete-project` plugin.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.get(name).await?;
        self.client
            .post(
                &format!("/projects/{}/delete-project~delete", quote_plus(name)),
                None,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientOptions, Resource};
    use mockito::Matcher;
    use serde_json::json;

    const JSON: &str = "application/json; charset=utf-8";

    fn client(url: &str) -> GerritClient {
        GerritClient::with_options(ClientOptions::new(url).username("admin").password("pw")).unwrap()
    }

    #[test]
    fn test_list_rejects_all_with_state() {
        let options = ProjectListOptions {
            is_all: true,
            state: Some("ACTIVE".into()),
            ..Default::default()
        };
        assert!(matches!(options.to_params(), Err(GerritError::InvalidArgument(_))));
    }

    #[test]
    fn test_list_params() {
        let options = ProjectListOptions {
            is_all: true,
            pattern: Some(Pattern::Regex("plat.*".into())),
            ..Default::default()
        };
        let params = options.to_params().unwrap();
        assert_eq!(params.get("n"), Some("25"));
        assert_eq!(params.get("S"), Some("0"));
        assert_eq!(params.get("r"), Some("plat.*"));
        assert_eq!(params.get("all"), Some("1"));
        assert_eq!(params.get("d"), Some("0"));
    }

    #[tokio::test]
    async fn test_get_project() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/projects/platform%2Fbuild")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"platform%2Fbuild\", \"name\": \"platform/build\", \"state\": \"ACTIVE\"}")
            .create_async()
            .await;

        let project = client(&server.url()).projects().get("platform/build").await.unwrap();
        assert_eq!(project.id(), "platform%2Fbuild");
        assert_eq!(project.endpoint(), "/projects/platform%2Fbuild");
        assert_eq!(project.field_str("state"), Some("ACTIVE"));
    }

    #[tokio::test]
    async fn test_get_missing_project() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/projects/nope")
            .with_status(404)
            .create_async()
            .await;

        let err = client(&server.url()).projects().get("nope").await.unwrap_err();
        assert!(matches!(err, GerritError::ProjectNotFound(_)));
        assert_eq!(err.to_string(), "Project nope does not exist");
    }

    #[tokio::test]
    async fn test_create_existing_project() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/projects/demo")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"demo\"}")
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/a/projects/demo")
            .expect(0)
            .create_async()
            .await;

        let err = client(&server.url())
            .projects()
            .create("demo", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, GerritError::ProjectAlreadyExists(_)));
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_project() {
        let mut server = mockito::Server::new_async().await;
        // A matching mock with hits left is preferred, so the first lookup
        // sees the 404 and the one after the PUT sees the project.
        let missing = server
            .mock("GET", "/a/projects/demo")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;
        let found = server
            .mock("GET", "/a/projects/demo")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"demo\", \"description\": \"demo\"}")
            .expect(1)
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/a/projects/demo")
            .match_body(Matcher::Json(json!({"description": "demo"})))
            .with_status(201)
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"demo\"}")
            .create_async()
            .await;

        let project = client(&server.url())
            .projects()
            .create("demo", &json!({"description": "demo"}))
            .await
            .unwrap();
        assert_eq!(project.field_str("description"), Some("demo"));
        missing.assert_async().await;
        put.assert_async().await;
        found.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_sends_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/a/projects/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "state:active parent:All-Projects".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
                Matcher::UrlEncoded("start".into(), "0".into()),
            ]))
            .with_header("content-type", JSON)
            .with_body(")]}'\n[]")
            .create_async()
            .await;

        client(&server.url())
            .projects()
            .search("state:active parent:All-Projects", 10, 0)
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
