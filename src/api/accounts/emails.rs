//
//  gerrit-client
//  api/accounts/emails.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Email addresses of an account (`/accounts/{username}/emails`).

use serde_json::Value;

use crate::api::common::{GerritError, Result};
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

/// An email address (`EmailInfo`).
#[derive(Debug, Clone)]
pub struct Email {
    client: GerritClient,
    username: String,
    data: Value,
}

impl_resource_eq!(Email);

impl Resource for Email {
    fn endpoint(&self) -> String {
        format!("/accounts/{}/emails/{}", self.username, self.email())
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Email {
    /// The address.
    pub fn email(&self) -> String {
        str_field(&self.data, "email")
    }

    /// Removes the address from the account.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }

    /// Makes this the preferred address.
    pub async fn set_preferred(&self) -> Result<()> {
        self.client
            .put(&format!("{}/preferred", self.endpoint()), None)
            .await?;
        Ok(())
    }
}

/// Client for the emails of one account.
#[derive(Debug, Clone)]
pub struct Emails {
    client: GerritClient,
    username: String,
}

impl Emails {
    pub(crate) fn new(client: GerritClient, username: &str) -> Self {
        Self {
            client,
            username: username.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("/accounts/{}/emails", self.username)
    }

    fn wrap(&self, data: Value) -> Email {
        Email {
            client: self.client.clone(),
            username: self.username.clone(),
            data,
        }
    }

    /// Registered addresses (`EmailInfo`).
    pub async fn list(&self) -> Result<Vec<Email>> {
        let result = self.client.get(&self.endpoint()).await?;
        Ok(into_list(result).into_iter().map(|e| self.wrap(e)).collect())
    }

    /// Retrieves one email address of the account.
    ///
    /// # Errors
    ///
    /// [`GerritError::AccountEmailNotFound`] when the server answers 404.
    pub async fn get(&self, email: &str) -> Result<Email> {
        let data = self
            .client
            .get(&format!("{}/{}", self.endpoint(), email))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::AccountEmailNotFound(format!(
                        "Account Email {} does not exist",
                        email
                    ))
                })
            })?;
        Ok(self.wrap(data))
    }

    /// Registers a new email address. Gerrit sends a confirmation mail.
    ///
    /// # Errors
    ///
    /// [`GerritError::AccountEmailAlreadyExists`] when the address is registered.
    pub async fn create(&self, email: &str) -> Result<Email> {
        match self.get(email).await {
            Ok(_) => Err(GerritError::AccountEmailAlreadyExists(format!(
                "Account Email {} already exists",
                email
            ))
            .logged()),
            Err(GerritError::AccountEmailNotFound(_)) => {
                let data = self
                    .client
                    .put(&format!("{}/{}", self.endpoint(), email), None)
                    .await?;
                Ok(self.wrap(data))
            }
            Err(e) => Err(e),
        }
    }

    /// Makes an address the preferred one.
    pub async fn set_preferred(&self, email: &str) -> Result<()> {
        self.client
            .put(&format!("{}/{}/preferred", self.endpoint(), email), None)
            .await?;
        Ok(())
    }

    /// Removes an address from the account.
    pub async fn delete(&self, email: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", self.endpoint(), email))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = "application/json";

    #[tokio::test]
    async fn test_missing_email() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts/jdoe/emails/nobody@example.com")
            .with_status(404)
            .create_async()
            .await;

        let emails = Emails::new(GerritClient::new(&server.url()).unwrap(), "jdoe");
        let err = emails.get("nobody@example.com").await.unwrap_err();
        assert!(matches!(err, GerritError::AccountEmailNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_and_prefer() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts/jdoe/emails/john@example.com")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("PUT", "/accounts/jdoe/emails/john@example.com")
            .with_status(201)
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"email\": \"john@example.com\", \"pending_confirmation\": true}")
            .create_async()
            .await;
        let preferred = server
            .mock("PUT", "/accounts/jdoe/emails/john@example.com/preferred")
            .with_status(201)
            .create_async()
            .await;

        let emails = Emails::new(GerritClient::new(&server.url()).unwrap(), "jdoe");
        let email = emails.create("john@example.com").await.unwrap();
        assert_eq!(email.email(), "john@example.com");
        email.set_preferred().await.unwrap();
        preferred.assert_async().await;
    }
}
