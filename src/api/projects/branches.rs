//
//  gerrit-client
//  api/projects/branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branches of a project (`/projects/{project}/branches`).
//!
//! Branch names are given without the `refs/heads/` prefix and are
//! form-encoded in the path, so `feature/login` becomes `feature%2Flogin`.

use serde_json::Value;

use crate::api::common::{quote_plus, GerritError, Params, Pattern, Result};
use crate::api::decode::decode_base64;
use crate::api::model::{impl_resource_eq, str_field};
use crate::api::{GerritClient, Resource};

const BRANCH_PREFIX: &str = "refs/heads/";

/// A branch (`BranchInfo`).
#[derive(Debug, Clone)]
pub struct Branch {
    client: GerritClient,
    project: String,
    name: String,
    data: Value,
}

impl_resource_eq!(Branch);

impl Resource for Branch {
    fn endpoint(&self) -> String {
        format!("/projects/{}/branches/{}", self.project, quote_plus(&self.name))
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Branch {
    /// Short branch name, without `refs/heads/`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content of a file at the branch tip. Base64 unless `decode` is set.
    pub async fn get_file_content(&self, file: &str, decode: bool) -> Result<String> {
        let endpoint = format!("{}/files/{}/content", self.endpoint(), quote_plus(file));
        let value = self.client.get(&endpoint).await?;
        if decode {
            return decode_base64(&value);
        }
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Checks whether `source` can be merged into this branch.
    ///
    /// The input is sent as query parameters (`source`, `strategy`).
    ///
    /// # Errors
    ///
    /// [`GerritError::BranchNotFound`] when the source branch does not exist.
    pub async fn is_mergeable(&self, input: &Value) -> Result<Value> {
        let source = str_field(input, "source");
        Branches::new(self.client.clone(), &self.project)
            .get(&source)
            .await
            .map_err(|e| match e {
                GerritError::BranchNotFound(_) => GerritError::BranchNotFound(format!(
                    "Source Branch {} does not exist",
                    source
                ))
                .logged(),
                other => other,
            })?;
        self.client
            .get_with(
                &format!("{}/mergeable", self.endpoint()),
                &Params::from_json(input),
            )
            .await
    }

    /// Reflog of the branch. Administrators only.
    pub async fn get_reflog(&self) -> Result<Value> {
        self.client
            .get(&format!("{}/reflog", self.endpoint()))
            .await
    }

    /// Deletes the branch.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the branches of one project.
#[derive(Debug, Clone)]
pub struct Branches {
    client: GerritClient,
    project: String,
}

impl Branches {
    pub(crate) fn new(client: GerritClient, project: &str) -> Self {
        Self {
            client,
            project: project.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/projects/{}/branches", self.project)
    }

    /// Lists branches. Only `Match` and `Regex` patterns are accepted.
    pub async fn list(&self, pattern: Option<&Pattern>, limit: u32, skip: u32) -> Result<Value> {
        let params = Params::new()
            .push("n", limit)
            .push("s", skip)
            .with_pattern(pattern, false)?;
        self.client
            .get_with(&format!("{}/", self.endpoint()), &params)
            .await
    }

    /// Retrieves a branch by short name.
    ///
    /// # Errors
    ///
    /// [`GerritError::BranchNotFound`] when the server answers 404.
    pub async fn get(&self, name: &str) -> Result<Branch> {
        let data = self
            .client
            .get(&format!("{}/{}", self.endpoint(), quote_plus(name)))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::BranchNotFound(format!("Branch {} does not exist", name))
                })
            })?;
        let reference = str_field(&data, "ref");
        let short = reference
            .strip_prefix(BRANCH_PREFIX)
            .unwrap_or(&reference)
            .to_string();
        Ok(Branch {
            client: self.client.clone(),
            project: self.project.clone(),
            name: if short.is_empty() { name.to_string() } else { short },
            data,
        })
    }

    /// Creates a branch (`BranchInput`) and returns it.
    ///
    /// # Errors
    ///
    /// [`GerritError::BranchAlreadyExists`] when the branch exists.
    pub async fn create(&self, name: &str, input: &Value) -> Result<Branch> {
        match self.get(name).await {
            Ok(_) => Err(GerritError::BranchAlreadyExists(format!(
                "Branch {} already exists",
                name
            ))
            .logged()),
            Err(GerritError::BranchNotFound(_)) => {
                self.client
                    .put(&format!("{}/{}", self.endpoint(), quote_plus(name)), Some(input))
                    .await?;
                self.get(name).await
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a branch after checking it exists.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.get(name).await?;
        self.client
            .delete(&format!("{}/{}", self.endpoint(), quote_plus(name)))
            .await
    }
}
