//
//  gerrit-client
//  api/changes/revision/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Revisions
//!
//! A revision is one patch set of a change, addressed as
//! `/changes/{change}/revisions/{revision}` where `revision` is a commit
//! SHA-1 or `current`.
//!
//! ## Module Organization
//!
//! - [`files`] - The lazily fetched file list ([`RevisionFiles`])
//! - [`drafts`] - The caller's draft comments
//! - [`comments`] - Published comments

pub mod comments;
pub mod drafts;
pub mod files;

pub use comments::{Comment, Comments};
pub use drafts::{Draft, Drafts};
pub use files::{RevisionFile, RevisionFiles};

use serde_json::{json, Value};

use crate::api::common::{GerritError, Params, Result};
use crate::api::decode::decode_base64;
use crate::api::model::{into_list, str_field};
use crate::api::projects::{Commit, Project};
use crate::api::GerritClient;

/// One patch set of a change.
#[derive(Debug, Clone)]
pub struct Revision {
    client: GerritClient,
    project: String,
    change: String,
    revision: String,
}

impl PartialEq for Revision {
    fn eq(&self, other: &Self) -> bool {
        self.endpoint() == other.endpoint()
    }
}

impl Revision {
    pub(crate) fn new(client: GerritClient, project: &str, change: &str, revision: &str) -> Self {
        Self {
            client,
            project: project.to_string(),
            change: change.to_string(),
            revision: revision.to_string(),
        }
    }

    /// The revision id this handle addresses (SHA-1 or `current`).
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// REST path of the revision.
    pub fn endpoint(&self) -> String {
        format!("/changes/{}/revisions/{}", self.change, self.revision)
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.endpoint(), suffix)
    }

    async fn project_commit(&self, commit: &str) -> Result<Commit> {
        Project::from_json(self.client.clone(), &self.project, json!({}))
            .get_commit(commit)
            .await
    }

    /// The commit of the revision, as a project commit.
    ///
    /// # Errors
    ///
    /// [`GerritError::CommitNotFound`] when the response names no commit.
    pub async fn get_commit(&self) -> Result<Commit> {
        let result = self.client.get(&self.path("/commit")).await?;
        let commit = str_field(&result, "commit");
        if commit.is_empty() {
            return Err(GerritError::CommitNotFound(format!(
                "Revision {} has no commit",
                self.revision
            ))
            .logged());
        }
        self.project_commit(&commit).await
    }

    /// Description of the patch set.
    pub async fn get_description(&self) -> Result<Value> {
        self.client.get(&self.path("/description")).await
    }

    /// Sets the patch set description (`DescriptionInput`).
    pub async fn set_description(&self, input: &Value) -> Result<Value> {
        self.client.put(&self.path("/description"), Some(input)).await
    }

    /// Commits merged by a merge commit revision.
    pub async fn get_merge_list(&self) -> Result<Vec<Commit>> {
        let result = self.client.get(&self.path("/mergelist")).await?;
        let mut commits = Vec::new();
        for item in into_list(result) {
            commits.push(self.project_commit(&str_field(&item, "commit")).await?);
        }
        Ok(commits)
    }

    /// Actions the caller may perform (`ActionInfo` map).
    pub async fn get_revision_actions(&self) -> Result<Value> {
        self.client.get(&self.path("/actions")).await
    }

    /// The change with labels and detailed accounts for this revision.
    pub async fn get_review(&self) -> Result<Value> {
        self.client.get(&self.path("/review")).await
    }

    /// Changes related by ancestry (`RelatedChangesInfo`).
    pub async fn get_related_changes(&self) -> Result<Value> {
        self.client.get(&self.path("/related")).await
    }

    /// Posts a review: votes, comments and a message (`ReviewInput`).
    pub async fn set_review(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/review"), Some(input)).await
    }

    /// Rebases this revision (`RebaseInput`).
    pub async fn rebase(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/rebase"), Some(input)).await
    }

    /// Submits the revision.
    pub async fn submit(&self) -> Result<Value> {
        self.client.post(&self.path("/submit"), None).await
    }

    /// The revision as a patch.
    ///
    /// # Parameters
    ///
    /// * `zip` - Return a zip archive instead of base64
    /// * `download` - Ask for an attachment response
    /// * `path` - Restrict the patch to one file
    /// * `decode` - Base64-decode the returned text
    pub async fn get_patch(
        &self,
        zip: bool,
        download: bool,
        path: Option<&str>,
        decode: bool,
    ) -> Result<Value> {
        let mut params = Params::new();
        if zip {
            params = params.push("zip", "");
        }
        if download {
            params = params.push("download", "");
        }
        let params = params.push_opt("path", path);
        let result = self.client.get_with(&self.path("/patch"), &params).await?;
        if decode {
            return decode_base64(&result).map(Value::String);
        }
        Ok(result)
    }

    /// Changes that would be submitted together with this revision.
    pub async fn submit_preview(&self) -> Result<Value> {
        self.client.get(&self.path("/preview_submit")).await
    }

    /// Mergeability of the revision (`MergeableInfo`).
    pub async fn is_mergeable(&self) -> Result<Value> {
        self.client.get(&self.path("/mergeable")).await
    }

    /// Submit type applied by the project rules.
    pub async fn get_submit_type(&self) -> Result<Value> {
        self.client.get(&self.path("/submit_type")).await
    }

    /// Evaluates a Prolog `submit_type` rule against the revision.
    pub async fn test_submit_type(&self, rule: &str) -> Result<Value> {
        self.client
            .post_text(&self.path("/test.submit_type"), rule)
            .await
    }

    /// Evaluates a Prolog `submit_rule` against the revision.
    pub async fn test_submit_rule(&self, rule: &str) -> Result<Value> {
        self.client
            .post_text(&self.path("/test.submit_rule"), rule)
            .await
    }

    /// Draft comments of the caller on this revision.
    pub fn drafts(&self) -> Drafts {
        Drafts::new(self.client.clone(), &self.change, &self.revision)
    }

    /// Published comments on this revision.
    pub fn comments(&self) -> Comments {
        Comments::new(self.client.clone(), &self.change, &self.revision)
    }

    /// Robot comments, keyed by path.
    pub async fn list_robot_comments(&self) -> Result<Value> {
        self.client.get(&self.path("/robotcomments")).await
    }

    /// A robot comment by id.
    pub async fn get_robot_comment(&self, comment_id: &str) -> Result<Value> {
        self.client
            .get(&self.path(&format!("/robotcomments/{}", comment_id)))
            .await
    }

    /// The files of the revision. The list is fetched on first use.
    pub fn files(&self) -> RevisionFiles {
        RevisionFiles::new(self.client.clone(), &self.change, &self.revision)
    }

    /// Cherry-picks the revision onto a branch (`CherryPickInput`).
    pub async fn cherry_pick(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/cherrypick"), Some(input)).await
    }

    /// Reviewers who voted on this revision.
    pub async fn list_reviewers(&self) -> Result<Value> {
        self.client.get(&self.path("/reviewers")).await
    }

    /// Votes of a reviewer on this revision.
    pub async fn list_votes(&self, account: &str) -> Result<Value> {
        self.client
            .get(&self.path(&format!("/reviewers/{}/votes/", account)))
            .await
    }

    /// Deletes a vote on this revision. With a `DeleteVoteInput` the POST form is used.
    pub async fn delete_vote(&self, account: &str, label: &str, input: Option<&Value>) -> Result<()> {
        let endpoint = self.path(&format!("/reviewers/{}/votes/{}", account, label));
        match input {
            None => self.client.delete(&endpoint).await,
            Some(input) => {
                self.client
                    .post(&format!("{}/delete", endpoint), Some(input))
                    .await?;
                Ok(())
            }
        }
    }
}
