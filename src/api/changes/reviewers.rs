//
//  gerrit-client
//  api/changes/reviewers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Reviewers of a change (`/changes/{change}/reviewers`).

use serde_json::Value;

use crate::api::common::{GerritError, Result};
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

/// A reviewer (`ReviewerInfo`), addressed by username.
#[derive(Debug, Clone)]
pub struct Reviewer {
    client: GerritClient,
    change: String,
    data: Value,
}

impl_resource_eq!(Reviewer);

impl Resource for Reviewer {
    fn endpoint(&self) -> String {
        format!("/changes/{}/reviewers/{}", self.change, self.username())
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Reviewer {
    /// The reviewer's username, or the account id when there is none.
    pub fn username(&self) -> String {
        match str_field(&self.data, "username") {
            u if u.is_empty() => str_field(&self.data, "_account_id"),
            u => u,
        }
    }

    /// Removes the reviewer. With a `DeleteReviewerInput` the POST form is used.
    pub async fn delete(&self, input: Option<&Value>) -> Result<()> {
        match input {
            None => self.client.delete(&self.endpoint()).await,
            Some(input) => {
                self.client
                    .post(&format!("{}/delete", self.endpoint()), Some(input))
                    .await?;
                Ok(())
            }
        }
    }

    /// Votes of the reviewer, keyed by label.
    pub async fn list_votes(&self) -> Result<Value> {
        self.client
            .get(&format!("{}/votes/", self.endpoint()))
            .await
    }

    /// Deletes one vote. With a `DeleteVoteInput` the POST form is used.
    pub async fn delete_vote(&self, label: &str, input: Option<&Value>) -> Result<()> {
        let endpoint = format!("{}/votes/{}", self.endpoint(), label);
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

/// Client for the reviewers of one change.
#[derive(Debug, Clone)]
pub struct Reviewers {
    client: GerritClient,
    change: String,
}

impl Reviewers {
    pub(crate) fn new(client: GerritClient, change: &str) -> Self {
        Self {
            client,
            change: change.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/changes/{}/reviewers", self.change)
    }

    fn wrap(&self, data: Value) -> Reviewer {
        Reviewer {
            client: self.client.clone(),
            change: self.change.clone(),
            data,
        }
    }

    /// Reviewers of the change (`ReviewerInfo`).
    pub async fn list(&self) -> Result<Vec<Reviewer>> {
        let result = self.client.get(&format!("{}/", self.endpoint())).await?;
        Ok(into_list(result).into_iter().map(|r| self.wrap(r)).collect())
    }

    /// Retrieves a reviewer by account (username, email or id).
    ///
    /// # Errors
    ///
    /// [`GerritError::ReviewerNotFound`] when the account is not a reviewer.
    pub async fn get(&self, account: &str) -> Result<Reviewer> {
        let result = self
            .client
            .get(&format!("{}/{}", self.endpoint(), account))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::ReviewerNotFound(format!("Reviewer {} does not exist", account))
                })
            })?;
        match into_list(result).into_iter().next() {
            Some(data) => Ok(self.wrap(data)),
            None => Err(GerritError::ReviewerNotFound(format!(
                "Reviewer {} does not exist",
                account
            ))
            .logged()),
        }
    }

    /// Adds a reviewer or CC (`ReviewerInput`). Returns the `AddReviewerResult`.
    pub async fn add(&self, input: &Value) -> Result<Value> {
        self.client.post(&self.endpoint(), Some(input)).await
    }
}
