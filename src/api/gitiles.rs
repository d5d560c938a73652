//
//  gerrit-client
//  api/gitiles.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gitiles
//!
//! Two ways to browse repositories through Gitiles:
//!
//! - [`GerritGitiles`] goes through the Gerrit `gitiles` plugin
//!   (`/plugins/gitiles`) and shares the Gerrit client's credentials.
//! - [`GitilesClient`] talks to a standalone Gitiles host such as
//!   `https://gerrit.googlesource.com`. Gitiles has no `/a` prefix, so
//!   requests go straight to `{base_url}/{repo}/...`.
//!
//! Gitiles answers `?format=JSON` with the same `)]}'` prefix as Gerrit.

use reqwest::Method;
use serde_json::Value;

use super::client::{strip_trailing_slash, Body, ClientOptions, GerritClient};
use super::common::{Params, Result};
use super::decode::decode_base64;

fn json_params(start: Option<&str>) -> Params {
    Params::new().push("format", "JSON").push_opt("s", start)
}

/// Gitiles endpoints exposed by the Gerrit `gitiles` plugin.
#[derive(Debug, Clone)]
pub struct GerritGitiles {
    client: GerritClient,
}

impl GerritGitiles {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    /// Retrieves a commit.
    pub async fn commit(&self, project: &str, commit: &str) -> Result<Value> {
        self.client
            .get_with(
                &format!("/plugins/gitiles/{}/+/{}", project, commit),
                &json_params(None),
            )
            .await
    }

    /// Commit history of a branch, optionally continuing from `start`.
    pub async fn commits(&self, project: &str, branch: &str, start: Option<&str>) -> Result<Value> {
        self.client
            .get_with(
                &format!("/plugins/gitiles/{}/+log/{}", project, branch),
                &json_params(start),
            )
            .await
    }
}

/// Client for a standalone Gitiles server.
///
/// # Example
///
/// ```rust,no_run
/// use gerrit_client::api::gitiles::GitilesClient;
/// use gerrit_client::api::ClientOptions;
///
/// # async fn run() -> gerrit_client::api::Result<()> {
/// let gitiles = GitilesClient::new(ClientOptions::new("https://gerrit.googlesource.com/"))?;
/// let readme = gitiles.download_file("gerrit", "master", "README.md", "TEXT", true).await?;
/// println!("{}", readme);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitilesClient {
    client: GerritClient,
    base_url: String,
}

impl GitilesClient {
    /// Creates a client. Credentials, TLS, timeout and retry options apply as
    /// for [`GerritClient`]; the auth suffix is never used.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = strip_trailing_slash(&options.base_url);
        let client = GerritClient::with_options(options.auth_suffix(""))?;
        Ok(Self { client, base_url })
    }

    /// Absolute URL of a Gitiles path.
    pub fn get_endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let url = self.get_endpoint_url(endpoint);
        self.client
            .execute(Method::GET, &url, params, Body::Empty)
            .await
    }

    /// Retrieves a commit.
    pub async fn commit(&self, repo: &str, commit: &str) -> Result<Value> {
        self.get(&format!("/{}/+/{}", repo, commit), &json_params(None))
            .await
    }

    /// Commit history of `reference`, optionally continuing from `start`.
    pub async fn commits(&self, repo: &str, reference: &str, start: Option<&str>) -> Result<Value> {
        self.get(&format!("/{}/+log/{}", repo, reference), &json_params(start))
            .await
    }

    /// Downloads a file. `format=TEXT` returns base64, which is decoded to
    /// UTF-8 when `decode` is set.
    pub async fn download_file(
        &self,
        repo: &str,
        reference: &str,
        path: &str,
        format: &str,
        decode: bool,
    ) -> Result<String> {
        let result = self
            .get(
                &format!("/{}/+/{}/{}", repo, reference, path),
                &Params::new().push("format", format),
            )
            .await?;
        if decode {
            return decode_base64(&result);
        }
        Ok(match result {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}
