//
//  gerrit-client
//  api/accounts/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The [`Account`] handle (`/accounts/{username}`).

use serde_json::{json, Value};

use super::{Emails, GpgKeys, SshKeys};
use crate::api::changes::Change;
use crate::api::common::Result;
use crate::api::groups::Group;
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

/// An account (`AccountInfo` / `AccountDetailInfo`).
#[derive(Debug, Clone)]
pub struct Account {
    client: GerritClient,
    username: String,
    data: Value,
}

impl_resource_eq!(Account);

impl Resource for Account {
    fn endpoint(&self) -> String {
        format!("/accounts/{}", self.username)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Account {
    /// Wraps an account record. The handle is addressed by the record's
    /// `username`, then its `_account_id`, then the identifier used to fetch it.
    pub(crate) fn from_json(client: GerritClient, requested: &str, data: Value) -> Self {
        let username = [str_field(&data, "username"), str_field(&data, "_account_id")]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| requested.to_string());
        Self {
            client,
            username,
            data,
        }
    }

    /// Identifier used in account endpoints.
    pub fn username(&self) -> &str {
        &self.username
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.endpoint(), suffix)
    }

    async fn get(&self, suffix: &str) -> Result<Value> {
        self.client.get(&self.path(suffix)).await
    }

    async fn put(&self, suffix: &str, input: Option<&Value>) -> Result<Value> {
        self.client.put(&self.path(suffix), input).await
    }

    async fn post(&self, suffix: &str, input: Option<&Value>) -> Result<Value> {
        self.client.post(&self.path(suffix), input).await
    }

    /// Full name of the account.
    pub async fn get_name(&self) -> Result<Value> {
        self.get("/name").await
    }

    /// Sets the full name (`AccountNameInput`).
    pub async fn set_name(&self, input: &Value) -> Result<Value> {
        self.put("/name", Some(input)).await
    }

    /// Clears the full name.
    pub async fn delete_name(&self) -> Result<()> {
        self.client.delete(&self.path("/name")).await
    }

    /// Status message shown next to the account name.
    pub async fn get_status(&self) -> Result<Value> {
        self.get("/status").await
    }

    /// Sets the status message. An empty string clears it.
    pub async fn set_status(&self, status: &str) -> Result<Value> {
        self.put("/status", Some(&json!({ "status": status }))).await
    }

    /// Sets the username (`UsernameInput`). Only possible while unset.
    pub async fn set_username(&self, input: &Value) -> Result<Value> {
        self.put("/username", Some(input)).await
    }

    /// Sets the display name (`DisplayNameInput`).
    pub async fn set_displayname(&self, input: &Value) -> Result<Value> {
        self.put("/displayname", Some(input)).await
    }

    /// `"ok"` when the account is active, empty otherwise.
    pub async fn get_active(&self) -> Result<Value> {
        self.get("/active").await
    }

    /// Activates the account.
    pub async fn set_active(&self) -> Result<()> {
        self.put("/active", None).await?;
        Ok(())
    }

    /// Deactivates the account.
    pub async fn delete_active(&self) -> Result<()> {
        self.client.delete(&self.path("/active")).await
    }

    /// Sets or generates the HTTP password (`HttpPasswordInput`).
    pub async fn set_http_password(&self, input: &Value) -> Result<Value> {
        self.put("/password.http", Some(input)).await
    }

    /// Removes the HTTP password.
    pub async fn delete_http_password(&self) -> Result<()> {
        self.client.delete(&self.path("/password.http")).await
    }

    /// OAuth access token of the account (`OAuthTokenInfo`).
    pub async fn get_oauth_token(&self) -> Result<Value> {
        self.get("/oauthtoken").await
    }

    /// Email addresses of the account.
    pub fn emails(&self) -> Emails {
        Emails::new(self.client.clone(), &self.username)
    }

    /// SSH keys of the account.
    pub fn ssh_keys(&self) -> SshKeys {
        SshKeys::new(self.client.clone(), &self.username)
    }

    /// GPG keys of the account.
    pub fn gpg_keys(&self) -> GpgKeys {
        GpgKeys::new(self.client.clone(), &self.username)
    }

    /// Global capabilities the account holds.
    pub async fn list_capabilities(&self) -> Result<Value> {
        self.get("/capabilities").await
    }

    /// Checks a single global capability, e.g. `createProject`.
    ///
    /// # Errors
    ///
    /// [`GerritError::NotFound`](crate::api::GerritError::NotFound) when the account lacks the capability.
    pub async fn check_capability(&self, capability: &str) -> Result<Value> {
        self.get(&format!("/capabilities/{}", capability)).await
    }

    /// Groups the account is a direct member of.
    pub async fn groups(&self) -> Result<Vec<Group>> {
        let result = self.get("/groups").await?;
        let groups = self.client.groups();
        let mut resolved = Vec::new();
        for item in into_list(result) {
            resolved.push(groups.get(&str_field(&item, "id"), false).await?);
        }
        Ok(resolved)
    }

    /// Avatar image of the account.
    pub async fn get_avatar(&self) -> Result<Value> {
        self.get("/avatar").await
    }

    /// URL where the avatar can be changed.
    pub async fn get_avatar_change_url(&self) -> Result<Value> {
        self.get("/avatar.change.url").await
    }

    /// General preferences (`PreferencesInfo`).
    pub async fn get_user_preferences(&self) -> Result<Value> {
        self.get("/preferences").await
    }

    /// Updates general preferences (`PreferencesInput`).
    pub async fn set_user_preferences(&self, input: &Value) -> Result<Value> {
        self.put("/preferences", Some(input)).await
    }

    /// Diff preferences (`DiffPreferencesInfo`).
    pub async fn get_diff_preferences(&self) -> Result<Value> {
        self.get("/preferences.diff").await
    }

    /// Updates diff preferences (`DiffPreferencesInput`).
    pub async fn set_diff_preferences(&self, input: &Value) -> Result<Value> {
        self.put("/preferences.diff", Some(input)).await
    }

    /// Edit preferences (`EditPreferencesInfo`).
    pub async fn get_edit_preferences(&self) -> Result<Value> {
        self.get("/preferences.edit").await
    }

    /// Updates edit preferences (`EditPreferencesInfo`).
    pub async fn set_edit_preferences(&self, input: &Value) -> Result<Value> {
        self.put("/preferences.edit", Some(input)).await
    }

    /// Projects the account watches (`ProjectWatchInfo` list).
    pub async fn get_watched_projects(&self) -> Result<Value> {
        self.get("/watched.projects").await
    }

    /// Adds or updates watched projects (list of `ProjectWatchInfo`).
    pub async fn modify_watched_projects(&self, input: &Value) -> Result<Value> {
        self.post("/watched.projects", Some(input)).await
    }

    /// Stops watching projects (list of `ProjectWatchInfo`).
    pub async fn delete_watched_projects(&self, input: &Value) -> Result<()> {
        self.post("/watched.projects:delete", Some(input)).await?;
        Ok(())
    }

    /// External ids linked to the account.
    pub async fn get_external_ids(&self) -> Result<Value> {
        self.get("/external.ids").await
    }

    /// Deletes external ids (list of external id keys).
    pub async fn delete_external_ids(&self, input: &Value) -> Result<()> {
        self.post("/external.ids:delete", Some(input)).await?;
        Ok(())
    }

    /// Contributor agreements signed by the account.
    pub async fn list_contributor_agreements(&self) -> Result<Value> {
        self.get("/agreements").await
    }

    /// Signs a contributor agreement (`ContributorAgreementInput`).
    pub async fn sign_contributor_agreement(&self, input: &Value) -> Result<Value> {
        self.put("/agreements", Some(input)).await
    }

    /// Deletes draft comments matching a query (`DeleteDraftCommentsInput`).
    pub async fn delete_draft_comments(&self, input: &Value) -> Result<Value> {
        self.post("/drafts:delete", Some(input)).await
    }

    /// Reindexes the account.
    pub async fn index(&self) -> Result<()> {
        self.post("/index", None).await?;
        Ok(())
    }

    async fn changes_of(&self, records: Value) -> Result<Vec<Change>> {
        let changes = self.client.changes();
        let mut resolved = Vec::new();
        for item in into_list(records) {
            resolved.push(changes.get(&str_field(&item, "id"), false, &[]).await?);
        }
        Ok(resolved)
    }

    /// Changes starred with the default star.
    pub async fn get_default_starred_changes(&self) -> Result<Vec<Change>> {
        let result = self.get("/starred.changes").await?;
        self.changes_of(result).await
    }

    /// Stars a change with the default label.
    pub async fn put_default_star_on_change(&self, id: &str) -> Result<()> {
        self.put(&format!("/starred.changes/{}", id), None).await?;
        Ok(())
    }

    /// Removes the default star from a change.
    pub async fn remove_default_star_from_change(&self, id: &str) -> Result<()> {
        self.client
            .delete(&self.path(&format!("/starred.changes/{}", id)))
            .await
    }

    /// Changes starred with any star label.
    pub async fn get_starred_changes(&self) -> Result<Vec<Change>> {
        let result = self.get("/stars.changes").await?;
        self.changes_of(result).await
    }

    /// Star labels the account put on a change.
    pub async fn get_star_labels_from_change(&self, id: &str) -> Result<Value> {
        self.get(&format!("/stars.changes/{}", id)).await
    }

    /// Adds and removes star labels (`StarsInput`).
    pub async fn update_star_labels_on_change(&self, id: &str, input: &Value) -> Result<Value> {
        self.post(&format!("/stars.changes/{}", id), Some(input))
            .await
    }
}
