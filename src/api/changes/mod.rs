//
//  gerrit-client
//  api/changes/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Changes API
//!
//! Endpoints under `/changes`: searching, creating and deleting changes, plus
//! everything hanging off a [`Change`]: messages, reviewers, the change edit
//! and the revisions (patch sets) with their files, comments and drafts.
//!
//! ## Change Identifiers
//!
//! Any identifier Gerrit accepts works: the legacy numeric id (`4247`), the
//! triplet `project~branch~Change-Id`, or `project~number`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gerrit_client::api::GerritClient;
//! use gerrit_client::api::changes::RevisionId;
//!
//! # async fn run(client: GerritClient) -> gerrit_client::api::Result<()> {
//! let open = client
//!     .changes()
//!     .search(&["status:open", "owner:self"], &["LABELS"], Some(10), None)
//!     .await?;
//! println!("{} open changes", open.as_array().map(Vec::len).unwrap_or(0));
//!
//! let change = client.changes().get("4247", false, &[]).await?;
//! if let Some(previous) = change.revision(RevisionId::Number(-1)).await? {
//!     let files = previous.files();
//!     for path in files.keys().await? {
//!         println!("{}", path);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod change;
pub mod edit;
pub mod messages;
pub mod reviewers;
pub mod revision;

pub use change::{Change, RevisionId};
pub use edit::Edit;
pub use messages::{Message, Messages};
pub use reviewers::{Reviewer, Reviewers};
pub use revision::{Comment, Comments, Draft, Drafts, Revision, RevisionFile, RevisionFiles};

use serde_json::Value;

use super::common::{GerritError, Params, Result};
use super::GerritClient;

/// Client for `/changes`.
#[derive(Debug, Clone)]
pub struct Changes {
    client: GerritClient,
}

impl Changes {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    /// Queries changes.
    ///
    /// Each query is sent as its own `q` parameter; Gerrit then answers with
    /// one result list per query instead of a flat list.
    ///
    /// # Parameters
    ///
    /// * `queries` - Search expressions such as `status:open`
    /// * `options` - Output options (`o`), e.g. `LABELS`, `CURRENT_REVISION`
    /// * `limit` - Maximum number of results (`n`)
    /// * `skip` - Results to skip (`S`)
    pub async fn search(
        &self,
        queries: &[&str],
        options: &[&str],
        limit: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Value> {
        let params = Params::new()
            .push_all("q", queries)
            .push_all("o", options)
            .push_opt("n", limit)
            .push_opt("S", skip);
        self.client.get_with("/changes/", &params).await
    }

    /// Retrieves a change.
    ///
    /// `detailed` selects `/detail`, which adds reviewer and label details.
    ///
    /// # Errors
    ///
    /// [`GerritError::ChangeNotFound`] when the server answers 404.
    pub async fn get(&self, id: &str, detailed: bool, options: &[&str]) -> Result<Change> {
        let endpoint = if detailed {
            format!("/changes/{}/detail", id)
        } else {
            format!("/changes/{}/", id)
        };
        let data = self
            .client
            .get_with(&endpoint, &Params::new().push_all("o", options))
            .await
            .map_err(|e| {
                e.on_not_found(|| GerritError::ChangeNotFound(format!("Change {} does not exist", id)))
            })?;
        Ok(Change::from_json(self.client.clone(), data))
    }

    /// Creates a change (`ChangeInput`).
    pub async fn create(&self, input: &Value) -> Result<Change> {
        let data = self.client.post("/changes/", Some(input)).await?;
        Ok(Change::from_json(self.client.clone(), data))
    }

    /// Deletes a new or abandoned change.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/changes/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;
    use mockito::Matcher;
    use serde_json::json;

    const JSON: &str = "application/json; charset=utf-8";

    #[tokio::test]
    async fn test_search_repeats_query_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/changes/")
            // repeated keys keep their order on the wire
            .match_query(Matcher::Exact(
                "q=status%3Aopen&q=is%3Awip+owner%3Aself&o=LABELS&n=2".into(),
            ))
            .with_header("content-type", JSON)
            .with_body(")]}'\n[[], []]")
            .create_async()
            .await;

        let changes = Changes::new(GerritClient::new(&server.url()).unwrap());
        let result = changes
            .search(&["status:open", "is:wip owner:self"], &["LABELS"], Some(2), None)
            .await
            .unwrap();
        assert_eq!(result, json!([[], []]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_detailed_change() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/changes/4247/detail")
            .match_query(Matcher::UrlEncoded("o".into(), "CURRENT_REVISION".into()))
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"demo~main~I8473b95\", \"project\": \"demo\", \"_number\": 4247}")
            .create_async()
            .await;

        let changes = Changes::new(GerritClient::new(&server.url()).unwrap());
        let change = changes.get("4247", true, &["CURRENT_REVISION"]).await.unwrap();
        assert_eq!(change.id(), "demo~main~I8473b95");
        assert_eq!(change.endpoint(), "/changes/demo~main~I8473b95");
    }

    #[tokio::test]
    async fn test_missing_change() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/changes/999/")
            .with_status(404)
            .create_async()
            .await;

        let changes = Changes::new(GerritClient::new(&server.url()).unwrap());
        let err = changes.get("999", false, &[]).await.unwrap_err();
        assert!(matches!(err, GerritError::ChangeNotFound(_)));
        assert!(err.is_not_found());
    }
}
