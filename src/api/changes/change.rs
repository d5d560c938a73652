//
//  gerrit-client
//  api/changes/change.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The [`Change`] handle (`/changes/{id}`).

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::OnceCell;

use super::{Edit, Messages, Reviewers, Revision};
use crate::api::accounts::Account;
use crate::api::common::{GerritError, Params, Result};
use crate::api::model::{impl_resource_eq, into_list, is_empty_response, str_field};
use crate::api::{GerritClient, Resource};

/// Selects a revision (patch set) of a change.
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `Current` | The current patch set |
/// | `Id(sha)` | A commit SHA-1 (or any id Gerrit accepts) |
/// | `Number(n)` | Patch set `n`; `0` is current, `-1` the one before, ... |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionId {
    Current,
    Id(String),
    Number(i64),
}

impl From<i64> for RevisionId {
    fn from(n: i64) -> Self {
        RevisionId::Number(n)
    }
}

impl From<&str> for RevisionId {
    fn from(id: &str) -> Self {
        match id {
            "current" => RevisionId::Current,
            other => match other.parse::<i64>() {
                Ok(n) => RevisionId::Number(n),
                Err(_) => RevisionId::Id(other.to_string()),
            },
        }
    }
}

/// Patch set numbers of a change, resolved once per handle.
#[derive(Debug, Default)]
struct RevisionMap {
    current: i64,
    by_number: HashMap<i64, String>,
}

/// A change (`ChangeInfo`).
#[derive(Debug, Clone)]
pub struct Change {
    client: GerritClient,
    id: String,
    data: Value,
    revisions: Arc<OnceCell<RevisionMap>>,
}

impl_resource_eq!(Change);

impl Resource for Change {
    fn endpoint(&self) -> String {
        format!("/changes/{}", self.id)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Change {
    /// Wraps a `ChangeInfo` record.
    pub(crate) fn from_json(client: GerritClient, data: Value) -> Self {
        Self {
            client,
            id: str_field(&data, "id"),
            data,
            revisions: Arc::new(OnceCell::new()),
        }
    }

    /// The change id (`project~branch~Change-Id` or `project~number`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The legacy numeric id (`_number`).
    pub fn number(&self) -> Option<i64> {
        self.data.get("_number").and_then(Value::as_i64)
    }

    /// Project the change belongs to.
    pub fn project(&self) -> String {
        str_field(&self.data, "project")
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.endpoint(), suffix)
    }

    /// Resolves an account record by `username`, falling back to `_account_id`.
    async fn account(&self, record: Value) -> Result<Option<Account>> {
        if is_empty_response(&record) {
            return Ok(None);
        }
        let id = [str_field(&record, "username"), str_field(&record, "_account_id")]
            .into_iter()
            .find(|id| !id.is_empty());
        match id {
            Some(id) => self.client.accounts().get(&id, false).await.map(Some),
            None => Ok(None),
        }
    }

    /// Difference between two meta revisions (`old`, `meta` are SHA-1s).
    pub async fn get_meta_diff(&self, old: Option<&str>, meta: Option<&str>) -> Result<Value> {
        let params = Params::new().push_opt("old", old).push_opt("meta", meta);
        self.client.get_with(&self.path("/meta_diff"), &params).await
    }

    /// Creates a merge patch set (`MergePatchSetInput`).
    pub async fn create_merge_patch_set(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/merge"), Some(input)).await
    }

    /// Creates a new patch set with a new commit message (`CommitMessageInput`).
    pub async fn set_commit_message(&self, input: &Value) -> Result<Value> {
        self.client.put(&self.path("/message"), Some(input)).await
    }

    /// Votes of a reviewer on the current revision.
    pub async fn list_votes(&self, account: &str) -> Result<Value> {
        self.client
            .get(&self.path(&format!("/reviewers/{}/votes", account)))
            .await
    }

    /// Deletes a vote. With an input (`DeleteVoteInput`) the POST form is used,
    /// which allows setting the notification behavior.
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

    /// Topic of the change, empty when unset.
    pub async fn get_topic(&self) -> Result<Value> {
        self.client.get(&self.path("/topic")).await
    }

    /// Sets the topic. An empty topic removes it.
    pub async fn set_topic(&self, topic: &str) -> Result<Value> {
        self.client
            .put(&self.path("/topic"), Some(&json!({ "topic": topic })))
            .await
    }

    /// Removes the topic.
    pub async fn delete_topic(&self) -> Result<()> {
        self.client.delete(&self.path("/topic")).await
    }

    /// The assignee, if any.
    pub async fn get_assignee(&self) -> Result<Option<Account>> {
        let record = self.client.get(&self.path("/assignee")).await?;
        self.account(record).await
    }

    /// Sets the assignee (`AssigneeInput`).
    pub async fn set_assignee(&self, input: &Value) -> Result<Option<Account>> {
        let record = self.client.put(&self.path("/assignee"), Some(input)).await?;
        self.account(record).await
    }

    /// Everyone who was assigned to the change before.
    pub async fn get_past_assignees(&self) -> Result<Vec<Account>> {
        let records = self.client.get(&self.path("/past_assignees")).await?;
        let mut assignees = Vec::new();
        for record in into_list(records) {
            if let Some(account) = self.account(record).await? {
                assignees.push(account);
            }
        }
        Ok(assignees)
    }

    /// Removes the assignee and returns the former one.
    pub async fn delete_assignee(&self) -> Result<Option<Account>> {
        let record = self.client.delete_decoded(&self.path("/assignee")).await?;
        self.account(record).await
    }

    /// Whether the change is a pure revert of `commit`.
    pub async fn get_pure_revert(&self, commit: &str) -> Result<Value> {
        self.client
            .get_with(&self.path("/pure_revert"), &Params::new().push("o", commit))
            .await
    }

    /// Abandons the change and returns the updated `ChangeInfo`.
    pub async fn abandon(&self) -> Result<Value> {
        self.client.post(&self.path("/abandon"), None).await
    }

    /// Restores an abandoned change.
    pub async fn restore(&self) -> Result<Value> {
        self.client.post(&self.path("/restore"), None).await
    }

    /// Rebases the change (`RebaseInput`).
    pub async fn rebase(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/rebase"), Some(input)).await
    }

    /// Moves the change to another branch (`MoveInput`).
    pub async fn move_change(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/move"), Some(input)).await
    }

    /// Reverts the change (`RevertInput`). An empty input is sent when none is given.
    pub async fn revert(&self, input: Option<&Value>) -> Result<Value> {
        let empty = json!({});
        self.client
            .post(&self.path("/revert"), Some(input.unwrap_or(&empty)))
            .await
    }

    /// Reverts every change of the submission the change belongs to.
    pub async fn revert_submission(&self) -> Result<Value> {
        self.client.post(&self.path("/revert_submission"), None).await
    }

    /// Submits the change (`SubmitInput`).
    pub async fn submit(&self, input: Option<&Value>) -> Result<Value> {
        self.client.post(&self.path("/submit"), input).await
    }

    /// Changes that would be submitted together with this one.
    pub async fn list_submitted_together_changes(&self) -> Result<Value> {
        self.client
            .get_with(
                &self.path("/submitted_together"),
                &Params::new().push("o", "NON_VISIBLE_CHANGES"),
            )
            .await
    }

    /// Deletes the change. Only new or abandoned changes can be deleted.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }

    /// Branches and tags the change was merged into.
    pub async fn get_include_in(&self) -> Result<Value> {
        self.client.get(&self.path("/in")).await
    }

    /// Reindexes the change.
    pub async fn index(&self) -> Result<()> {
        self.client.post(&self.path("/index"), None).await?;
        Ok(())
    }

    /// Published comments of all revisions, keyed by path.
    pub async fn list_comments(&self) -> Result<Value> {
        self.client.get(&self.path("/comments")).await
    }

    /// Robot comments of all revisions, keyed by path.
    pub async fn list_robot_comments(&self) -> Result<Value> {
        self.client.get(&self.path("/robotcomments")).await
    }

    /// Draft comments of all revisions, keyed by path.
    pub async fn list_drafts(&self) -> Result<Value> {
        self.client.get(&self.path("/drafts")).await
    }

    /// Runs the consistency check (`ChangeInfo` with `problems`).
    pub async fn consistency_check(&self) -> Result<Value> {
        self.client.get(&self.path("/check")).await
    }

    /// Runs the consistency check and fixes problems (`FixInput`).
    pub async fn fix(&self, input: Option<&Value>) -> Result<Value> {
        self.client.post(&self.path("/check"), input).await
    }

    /// Marks the change work in progress (`WorkInProgressInput`).
    pub async fn set_work_in_progress(&self, input: Option<&Value>) -> Result<()> {
        let empty = json!({});
        self.client
            .post(&self.path("/wip"), Some(input.unwrap_or(&empty)))
            .await?;
        Ok(())
    }

    /// Marks the change ready for review (`WorkInProgressInput`).
    pub async fn set_ready_for_review(&self, input: &Value) -> Result<()> {
        self.client.post(&self.path("/ready"), Some(input)).await?;
        Ok(())
    }

    /// Marks the change private (`PrivateInput`).
    pub async fn mark_private(&self, input: &Value) -> Result<()> {
        self.client.post(&self.path("/private"), Some(input)).await?;
        Ok(())
    }

    /// Unmarks the change private. With an input the POST form is used.
    pub async fn unmark_private(&self, input: Option<&Value>) -> Result<()> {
        match input {
            None => self.client.delete(&self.path("/private")).await,
            Some(input) => {
                self.client
                    .post(&self.path("/private.delete"), Some(input))
                    .await?;
                Ok(())
            }
        }
    }

    /// Ignores the change for the calling user.
    pub async fn ignore(&self) -> Result<()> {
        self.client.put(&self.path("/ignore"), None).await?;
        Ok(())
    }

    /// Stops ignoring the change.
    pub async fn unignore(&self) -> Result<()> {
        self.client.put(&self.path("/unignore"), None).await?;
        Ok(())
    }

    /// Marks the change as reviewed by the caller.
    pub async fn mark_as_reviewed(&self) -> Result<()> {
        self.client.put(&self.path("/reviewed"), None).await?;
        Ok(())
    }

    /// Marks the change as unreviewed by the caller.
    pub async fn mark_as_unreviewed(&self) -> Result<()> {
        self.client.put(&self.path("/unreviewed"), None).await?;
        Ok(())
    }

    /// Hashtags of the change.
    pub async fn get_hashtags(&self) -> Result<Value> {
        self.client.get(&self.path("/hashtags")).await
    }

    /// Adds and removes hashtags (`HashtagsInput`).
    pub async fn set_hashtags(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/hashtags"), Some(input)).await
    }

    /// Change messages.
    pub fn messages(&self) -> Messages {
        Messages::new(self.client.clone(), &self.id)
    }

    /// Evaluates a submit requirement against the change (`SubmitRequirementInput`).
    pub async fn check_submit_requirement(&self, input: &Value) -> Result<Value> {
        self.client
            .post(&self.path("/check.submit_requirement"), Some(input))
            .await
    }

    /// The pending change edit.
    ///
    /// # Errors
    ///
    /// [`GerritError::ChangeEditNotFound`] when the change has no edit.
    pub async fn get_edit(&self) -> Result<Edit> {
        let data = self.client.get(&self.path("/edit")).await?;
        if is_empty_response(&data) {
            return Err(GerritError::ChangeEditNotFound(format!(
                "Change {} has no change edit",
                self.id
            ))
            .logged());
        }
        Ok(Edit::new(self.client.clone(), &self.id, data))
    }

    /// Creates an empty change edit.
    pub async fn create_empty_edit(&self) -> Result<()> {
        self.client.post(&self.path("/edit"), None).await?;
        Ok(())
    }

    /// Reviewers and CCs of the change.
    pub fn reviewers(&self) -> Reviewers {
        Reviewers::new(self.client.clone(), &self.id)
    }

    async fn load_revisions(&self) -> Result<RevisionMap> {
        let number = self
            .number()
            .map(|n| n.to_string())
            .unwrap_or_else(|| self.id.clone());
        let params = Params::new().push("q", number).push("o", "ALL_REVISIONS");
        let result = self.client.get_with("/changes/", &params).await?;
        let record = into_list(result).into_iter().next().ok_or_else(|| {
            GerritError::ChangeNotFound(format!("Change {} does not exist", self.id)).logged()
        })?;

        let current = str_field(&record, "current_revision");
        let mut map = RevisionMap::default();
        if let Some(revisions) = record.get("revisions").and_then(Value::as_object) {
            for (sha, revision) in revisions {
                let Some(n) = revision.get("_number").and_then(Value::as_i64) else {
                    continue;
                };
                if *sha == current {
                    map.current = n;
                }
                map.by_number.insert(n, sha.clone());
            }
        }
        Ok(map)
    }

    /// Returns a revision of the change.
    ///
    /// Patch set numbers are resolved to SHA-1s with one query per handle.
    /// Numbers `<= 0` count back from the current patch set.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when a numbered patch set does not exist.
    pub async fn revision(&self, id: impl Into<RevisionId>) -> Result<Option<Revision>> {
        let revision = match id.into() {
            RevisionId::Current => "current".to_string(),
            RevisionId::Id(sha) => sha,
            RevisionId::Number(n) => {
                let map = self
                    .revisions
                    .get_or_try_init(|| self.load_revisions())
                    .await?;
                let number = if n <= 0 { map.current + n } else { n };
                match map.by_number.get(&number) {
                    Some(sha) => sha.clone(),
                    None => return Ok(None),
                }
            }
        };
        Ok(Some(Revision::new(
            self.client.clone(),
            &self.project(),
            &self.id,
            &revision,
        )))
    }

    /// The current revision.
    pub fn current_revision(&self) -> Revision {
        Revision::new(self.client.clone(), &self.project(), &self.id, "current")
    }

    /// Accounts in the attention set (`AttentionSetInfo` list).
    pub async fn get_attention_set(&self) -> Result<Value> {
        self.client.get(&self.path("/attention")).await
    }

    /// Adds a user to the attention set (`AttentionSetInput`).
    pub async fn add_to_attention_set(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.path("/attention"), Some(input)).await
    }

    /// Removes a user from the attention set. With an input the POST form is used.
    pub async fn remove_from_attention_set(&self, id: &str, input: Option<&Value>) -> Result<Value> {
        let endpoint = self.path(&format!("/attention/{}", id));
        match input {
            None => {
                self.client.delete(&endpoint).await?;
                Ok(Value::Null)
            }
            Some(input) => {
                self.client
                    .post(&format!("{}/delete", endpoint), Some(input))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const JSON: &str = "application/json";

    fn change(url: &str) -> Change {
        Change::from_json(
            GerritClient::new(url).unwrap(),
            json!({"id": "demo~4247", "project": "demo", "_number": 4247}),
        )
    }

    async fn mock_revisions(server: &mut mockito::Server) -> mockito::Mock {
        server
            .mock("GET", "/changes/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "4247".into()),
                Matcher::UrlEncoded("o".into(), "ALL_REVISIONS".into()),
            ]))
            .with_header("content-type", JSON)
            .with_body(
                ")]}'\n[{\"current_revision\": \"ccc\", \"revisions\": {\
                 \"aaa\": {\"_number\": 1}, \"bbb\": {\"_number\": 2}, \"ccc\": {\"_number\": 3}}}]",
            )
            .expect(1)
            .create_async()
            .await
    }

    #[test]
    fn test_revision_id_from_str() {
        assert_eq!(RevisionId::from("current"), RevisionId::Current);
        assert_eq!(RevisionId::from("2"), RevisionId::Number(2));
        assert_eq!(RevisionId::from("abc"), RevisionId::Id("abc".into()));
    }

    #[tokio::test]
    async fn test_revision_numbers_resolve_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = mock_revisions(&mut server).await;
        let change = change(&server.url());

        let first = change.revision(1).await.unwrap().unwrap();
        assert_eq!(first.revision(), "aaa");

        let current = change.revision(0).await.unwrap().unwrap();
        assert_eq!(current.revision(), "ccc");

        let previous = change.revision(-1).await.unwrap().unwrap();
        assert_eq!(previous.revision(), "bbb");

        assert!(change.revision(7).await.unwrap().is_none());
        assert!(change.revision(-5).await.unwrap().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_revision_by_sha_needs_no_request() {
        let change = change("http://unused");
        let revision = change.revision(RevisionId::Id("abc".into())).await.unwrap().unwrap();
        assert_eq!(revision.endpoint(), "/changes/demo~4247/revisions/abc");
        let current = change.revision(RevisionId::Current).await.unwrap().unwrap();
        assert_eq!(current.revision(), "current");
    }

    #[tokio::test]
    async fn test_delete_vote_uses_change_id() {
        let mut server = mockito::Server::new_async().await;
        let delete = server
            .mock("DELETE", "/changes/demo~4247/reviewers/jdoe/votes/Code-Review")
            .with_status(204)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/changes/demo~4247/reviewers/jdoe/votes/Code-Review/delete")
            .match_body(Matcher::Json(json!({"notify": "NONE"})))
            .with_status(204)
            .create_async()
            .await;

        let change = change(&server.url());
        change.delete_vote("jdoe", "Code-Review", None).await.unwrap();
        change
            .delete_vote("jdoe", "Code-Review", Some(&json!({"notify": "NONE"})))
            .await
            .unwrap();
        delete.assert_async().await;
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_revert_sends_empty_input() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/changes/demo~4247/revert")
            .match_body(Matcher::Json(json!({})))
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"id\": \"demo~4248\"}")
            .create_async()
            .await;

        let result = change(&server.url()).revert(None).await.unwrap();
        assert_eq!(result["id"], "demo~4248");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_edit() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/changes/demo~4247/edit")
            .with_status(204)
            .create_async()
            .await;

        let err = change(&server.url()).get_edit().await.unwrap_err();
        assert!(matches!(err, GerritError::ChangeEditNotFound(_)));
    }

    #[tokio::test]
    async fn test_assignee_resolves_account() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/changes/demo~4247/assignee")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"_account_id\": 1000096, \"username\": \"jdoe\"}")
            .create_async()
            .await;
        server
            .mock("GET", "/accounts/jdoe/")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"_account_id\": 1000096, \"username\": \"jdoe\", \"name\": \"John Doe\"}")
            .create_async()
            .await;

        let assignee = change(&server.url()).get_assignee().await.unwrap().unwrap();
        assert_eq!(assignee.field_str("name"), Some("John Doe"));
    }

    #[tokio::test]
    async fn test_assignee_without_username_uses_account_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/changes/demo~4247/assignee")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"_account_id\": 1000096}")
            .create_async()
            .await;
        let account = server
            .mock("GET", "/accounts/1000096/")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"_account_id\": 1000096, \"name\": \"John Doe\"}")
            .create_async()
            .await;

        let assignee = change(&server.url()).get_assignee().await.unwrap().unwrap();
        assert_eq!(assignee.field_str("name"), Some("John Doe"));
        account.assert_async().await;
    }
}
