//
//  gerrit-client
//  api/accounts/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Accounts API
//!
//! Endpoints under `/accounts`. Accounts are addressed by username, but Gerrit
//! also accepts `self`, an email address or the numeric account id wherever
//! an account identifier is expected.
//!
//! ## Module Organization
//!
//! - [`account`] - The [`Account`] handle: profile, preferences, stars, ...
//! - [`emails`] - Registered email addresses
//! - [`ssh_keys`] - SSH public keys
//! - [`gpg_keys`] - GPG public keys

pub mod account;
pub mod emails;
pub mod gpg_keys;
pub mod ssh_keys;

pub use account::Account;
pub use emails::{Email, Emails};
pub use gpg_keys::{GpgKey, GpgKeys};
pub use ssh_keys::{SshKey, SshKeys};

use serde_json::Value;

use super::common::{GerritError, Params, Result};
use super::GerritClient;

/// Options for [`Accounts::search`].
#[derive(Debug, Clone, Default)]
pub struct AccountSearchOptions {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    /// Include `DETAILS` (full name, email, username, avatars)
    pub detailed: bool,
    /// Use the suggest mode intended for reviewer pickers
    pub suggested: bool,
    /// Include `ALL_EMAILS` (secondary emails)
    pub all_emails: bool,
}

/// Client for `/accounts`.
#[derive(Debug, Clone)]
pub struct Accounts {
    client: GerritClient,
}

impl Accounts {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    /// Queries accounts, e.g. `name:John email:example.com`.
    pub async fn search(&self, query: &str, options: &AccountSearchOptions) -> Result<Value> {
        let mut params = Params::new();
        if options.suggested {
            params = params.push("suggest", "");
        }
        let mut params = params
            .push("q", query)
            .push_opt("n", options.limit)
            .push_opt("S", options.skip);
        if options.detailed {
            params = params.push("o", "DETAILS");
        }
        if options.all_emails {
            params = params.push("o", "ALL_EMAILS");
        }
        self.client.get_with("/accounts/", &params).await
    }

    /// Retrieves an account.
    ///
    /// # Errors
    ///
    /// [`GerritError::AccountNotFound`] when the server answers 404.
    pub async fn get(&self, username: &str, detailed: bool) -> Result<Account> {
        let endpoint = if detailed {
            format!("/accounts/{}/detail", username)
        } else {
            format!("/accounts/{}/", username)
        };
        let data = self.client.get(&endpoint).await.map_err(|e| {
            e.on_not_found(|| {
                GerritError::AccountNotFound(format!("Account {} does not exist", username))
            })
        })?;
        Ok(Account::from_json(self.client.clone(), username, data))
    }

    /// Creates an account (`AccountInput`). Administrators only.
    ///
    /// # Errors
    ///
    /// [`GerritError::AccountAlreadyExists`] when the username is taken.
    pub async fn create(&self, username: &str, input: &Value) -> Result<Account> {
        match self.get(username, false).await {
            Ok(_) => Err(GerritError::AccountAlreadyExists(format!(
                "Account {} already exists",
                username
            ))
            .logged()),
            Err(GerritError::AccountNotFound(_)) => {
                let data = self
                    .client
                    .put(&format!("/accounts/{}", username), Some(input))
                    .await?;
                Ok(Account::from_json(self.client.clone(), username, data))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;
    use mockito::Matcher;
    use serde_json::json;

    const JSON: &str = "application/json";

    #[tokio::test]
    async fn test_search_options() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/accounts/")
            .match_query(Matcher::Exact(
                "q=name%3AJohn&n=3&o=DETAILS&o=ALL_EMAILS".into(),
            ))
            .with_header("content-type", JSON)
            .with_body(")]}'\n[{\"_account_id\": 1000096}]")
            .create_async()
            .await;

        let accounts = Accounts::new(GerritClient::new(&server.url()).unwrap());
        let options = AccountSearchOptions {
            limit: Some(3),
            detailed: true,
            all_emails: true,
            ..Default::default()
        };
        let result = accounts.search("name:John", &options).await.unwrap();
        assert_eq!(result[0]["_account_id"], 1000096);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_account() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts/self/detail")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"_account_id\": 1000096, \"username\": \"jdoe\", \"registered_on\": \"2015-07-23 07:01:09.296000000\"}")
            .create_async()
            .await;

        let accounts = Accounts::new(GerritClient::new(&server.url()).unwrap());
        let account = accounts.get("self", true).await.unwrap();
        assert_eq!(account.username(), "jdoe");
        assert_eq!(account.endpoint(), "/accounts/jdoe");
    }

    #[tokio::test]
    async fn test_create_existing_account() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts/jdoe/")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"username\": \"jdoe\"}")
            .create_async()
            .await;

        let accounts = Accounts::new(GerritClient::new(&server.url()).unwrap());
        let err = accounts.create("jdoe", &json!({"name": "John"})).await.unwrap_err();
        assert!(matches!(err, GerritError::AccountAlreadyExists(_)));
    }
}
