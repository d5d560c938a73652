//
//  gerrit-client
//  api/changes/revision/files.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Revision Files
//!
//! [`RevisionFiles`] is a lazily populated view of
//! `/changes/{change}/revisions/{revision}/files`. The file map is requested
//! once, on first use, and every accessor afterwards works on the cached
//! list. The cache is an async once-cell, so concurrent first uses still
//! produce a single request.
//!
//! ```rust,no_run
//! # use gerrit_client::api::changes::Revision;
//! # async fn run(revision: Revision) -> gerrit_client::api::Result<()> {
//! let files = revision.files();
//! if files.contains("src/lib.rs").await? {
//!     let diff = files.get("src/lib.rs").await?.get_diff(true).await?;
//!     println!("{}", diff);
//! }
//! println!("{} files touched", files.len().await?);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::api::common::{quote_plus, GerritError, Params, Result};
use crate::api::decode::decode_base64;
use crate::api::model::{impl_resource_eq, map_to_list, str_field};
use crate::api::{GerritClient, Resource};

/// A file of a revision (`FileInfo` plus its `path`).
#[derive(Debug, Clone)]
pub struct RevisionFile {
    client: GerritClient,
    change: String,
    revision: String,
    data: Value,
}

impl_resource_eq!(RevisionFile);

impl Resource for RevisionFile {
    fn endpoint(&self) -> String {
        format!(
            "/changes/{}/revisions/{}/files/{}",
            self.change,
            self.revision,
            quote_plus(&self.path())
        )
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl RevisionFile {
    /// Path of the file in the revision.
    pub fn path(&self) -> String {
        str_field(&self.data, "path")
    }

    /// Content of the file. Base64 unless `decode` is set.
    ///
    /// # Errors
    ///
    /// [`GerritError::FileContentNotFound`] when the server answers 404.
    pub async fn get_content(&self, decode: bool) -> Result<String> {
        let result = self
            .client
            .get(&format!("{}/content", self.endpoint()))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::FileContentNotFound(format!(
                        "Revision File {} content does not exist",
                        self.path()
                    ))
                })
            })?;
        if decode {
            return decode_base64(&result);
        }
        Ok(result.as_str().unwrap_or_default().to_string())
    }

    /// Downloads the file in a form that cannot be executed by accident.
    pub async fn download_content(&self) -> Result<Value> {
        self.client
            .get(&format!("{}/download", self.endpoint()))
            .await
    }

    /// The diff of the file; `intraline` adds intraline differences.
    pub async fn get_diff(&self, intraline: bool) -> Result<Value> {
        let params = if intraline {
            Params::new().push("intraline", "")
        } else {
            Params::new()
        };
        self.client
            .get_with(&format!("{}/diff", self.endpoint()), &params)
            .await
    }

    /// Blame information (`BlameInfo` list).
    pub async fn get_blame(&self) -> Result<Value> {
        self.client
            .get(&format!("{}/blame", self.endpoint()))
            .await
    }

    /// Marks the file as reviewed by the caller.
    pub async fn set_reviewed(&self) -> Result<()> {
        self.client
            .put(&format!("{}/reviewed", self.endpoint()), None)
            .await?;
        Ok(())
    }

    /// Clears the reviewed flag.
    pub async fn delete_reviewed(&self) -> Result<()> {
        self.client
            .delete(&format!("{}/reviewed", self.endpoint()))
            .await
    }
}

/// The files of a revision, fetched at most once.
#[derive(Debug)]
pub struct RevisionFiles {
    client: GerritClient,
    change: String,
    revision: String,
    cache: OnceCell<Vec<Value>>,
}

impl RevisionFiles {
    pub(crate) fn new(client: GerritClient, change: &str, revision: &str) -> Self {
        Self {
            client,
            change: change.to_string(),
            revision: revision.to_string(),
            cache: OnceCell::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/changes/{}/revisions/{}/files", self.change, self.revision)
    }

    /// Lists files without touching the cache.
    ///
    /// The filters are mutually exclusive on the server side.
    ///
    /// # Parameters
    ///
    /// * `reviewed` - Only paths the caller marked as reviewed
    /// * `base` - Compare against another patch set of the change
    /// * `q` - All files (changed or not) whose path contains the substring
    /// * `parent` - For merge commits, compare against this parent
    pub async fn search(
        &self,
        reviewed: bool,
        base: Option<&str>,
        q: Option<&str>,
        parent: Option<u32>,
    ) -> Result<Value> {
        let mut params = Params::new()
            .push_opt("base", base)
            .push_opt("q", q)
            .push_opt("parent", parent);
        if reviewed {
            params = params.push("reviewed", 1);
        }
        self.client.get_with(&self.endpoint(), &params).await
    }

    async fn fetch(&self) -> Result<Vec<Value>> {
        debug!("loading file list of {}", self.endpoint());
        let result = self.client.get(&self.endpoint()).await?;
        Ok(map_to_list(result, "path"))
    }

    async fn files(&self) -> Result<&Vec<Value>> {
        self.cache.get_or_try_init(|| self.fetch()).await
    }

    fn wrap(&self, data: Value) -> RevisionFile {
        RevisionFile {
            client: self.client.clone(),
            change: self.change.clone(),
            revision: self.revision.clone(),
            data,
        }
    }

    /// Paths of all files.
    pub async fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .files()
            .await?
            .iter()
            .map(|f| str_field(f, "path"))
            .collect())
    }

    /// Whether the revision touches `path`.
    pub async fn contains(&self, path: &str) -> Result<bool> {
        Ok(self
            .files()
            .await?
            .iter()
            .any(|f| f.get("path").and_then(Value::as_str) == Some(path)))
    }

    /// Number of files.
    pub async fn len(&self) -> Result<usize> {
        Ok(self.files().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.files().await?.is_empty())
    }

    /// All files as handles.
    pub async fn iter(&self) -> Result<impl Iterator<Item = RevisionFile> + '_> {
        let files = self.files().await?;
        Ok(files.iter().cloned().map(|f| self.wrap(f)))
    }

    /// A single file.
    ///
    /// # Errors
    ///
    /// [`GerritError::UnknownFile`] when the revision does not touch `path`.
    pub async fn get(&self, path: &str) -> Result<RevisionFile> {
        self.files()
            .await?
            .iter()
            .find(|f| f.get("path").and_then(Value::as_str) == Some(path))
            .cloned()
            .map(|f| self.wrap(f))
            .ok_or_else(|| GerritError::UnknownFile(path.to_string()))
    }
}
