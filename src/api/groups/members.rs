//
//  gerrit-client
//  api/groups/members.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct members of an internal group (`/groups/{id}/members`).

use crate::api::accounts::Account;
use crate::api::common::{GerritError, Result};
use crate::api::model::into_list;
use crate::api::GerritClient;

#[derive(Debug, Clone)]
pub struct Members {
    client: GerritClient,
    group_id: String,
}

impl Members {
    pub(crate) fn new(client: GerritClient, group_id: &str) -> Self {
        Self {
            client,
            group_id: group_id.to_string(),
        }
    }

    fn endpoint(&self, username: &str) -> String {
        format!("/groups/{}/members/{}", self.group_id, username)
    }

    /// The direct members, as account handles built from the member records.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let result = self.client.get(&self.endpoint("")).await?;
        Ok(into_list(result)
            .into_iter()
            .map(|item| Account::from_json(self.client.clone(), "", item))
            .collect())
    }

    /// Retrieves a member.
    ///
    /// # Errors
    ///
    /// [`GerritError::GroupMemberNotFound`] when the account is not a member.
    pub async fn get(&self, username: &str) -> Result<Account> {
        let data = self
            .client
            .get(&self.endpoint(username))
            .await
            .map_err(|e| {
                e.on_not_found(|| {
                    GerritError::GroupMemberNotFound(format!(
                        "Group member {} does not exist",
                        username
                    ))
                })
            })?;
        Ok(Account::from_json(self.client.clone(), username, data))
    }

    /// Adds an account to the group.
    ///
    /// # Errors
    ///
    /// [`GerritError::GroupMemberAlreadyExists`] when the account is a member.
    pub async fn add(&self, username: &str) -> Result<Account> {
        match self.get(username).await {
            Ok(_) => Err(GerritError::GroupMemberAlreadyExists(format!(
                "Group member {} already exists",
                username
            ))
            .logged()),
            Err(GerritError::GroupMemberNotFound(_)) => {
                let data = self.client.put(&self.endpoint(username), None).await?;
                Ok(Account::from_json(self.client.clone(), username, data))
            }
            Err(e) => Err(e),
        }
    }

    /// Removes a member.
    pub async fn remove(&self, username: &str) -> Result<()> {
        self.client.delete(&self.endpoint(username)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;

    const JSON: &str = "application/json";

    #[tokio::test]
    async fn test_list_members() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/groups/abc/members/")
            .with_header("content-type", JSON)
            .with_body(")]}'\n[{\"_account_id\": 1000097, \"username\": \"jroe\"}, {\"_account_id\": 1000098}]")
            .create_async()
            .await;

        let members = Members::new(GerritClient::new(&server.url()).unwrap(), "abc");
        let list = members.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].endpoint(), "/accounts/jroe");
        assert_eq!(list[1].endpoint(), "/accounts/1000098");
    }

    #[tokio::test]
    async fn test_add_existing_member() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/groups/abc/members/jroe")
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"username\": \"jroe\"}")
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/groups/abc/members/jroe")
            .expect(0)
            .create_async()
            .await;

        let members = Members::new(GerritClient::new(&server.url()).unwrap(), "abc");
        let err = members.add("jroe").await.unwrap_err();
        assert!(matches!(err, GerritError::GroupMemberAlreadyExists(_)));
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_member() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/groups/abc/members/jroe")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("PUT", "/groups/abc/members/jroe")
            .with_status(201)
            .with_header("content-type", JSON)
            .with_body(")]}'\n{\"_account_id\": 1000097, \"username\": \"jroe\"}")
            .create_async()
            .await;

        let members = Members::new(GerritClient::new(&server.url()).unwrap(), "abc");
        let account = members.add("jroe").await.unwrap();
        assert_eq!(account.username(), "jroe");
    }
}
