//
//  gerrit-client
//  api/server/tasks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Background tasks (`/config/server/tasks`).

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

const ENDPOINT: &str = "/config/server/tasks";

/// A queued or running task (`TaskInfo`).
#[derive(Debug, Clone)]
pub struct Task {
    client: GerritClient,
    id: String,
    data: Value,
}

impl_resource_eq!(Task);

impl Resource for Task {
    fn endpoint(&self) -> String {
        format!("{}/{}", ENDPOINT, self.id)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Task {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kills the task.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.endpoint()).await
    }
}

/// Client for the task queue.
#[derive(Debug, Clone)]
pub struct Tasks {
    client: GerritClient,
}

impl Tasks {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    fn wrap(&self, requested: &str, data: Value) -> Task {
        let id = match str_field(&data, "id") {
            id if id.is_empty() => requested.to_string(),
            id => id,
        };
        Task {
            client: self.client.clone(),
            id,
            data,
        }
    }

    /// Tasks in the work queue (`TaskInfo`).
    pub async fn list(&self) -> Result<Vec<Task>> {
        let result = self.client.get(ENDPOINT).await?;
        Ok(into_list(result)
            .into_iter()
            .map(|data| self.wrap("", data))
            .collect())
    }

    /// A task by id.
    pub async fn get(&self, id: &str) -> Result<Task> {
        let data = self.client.get(&format!("{}/{}", ENDPOINT, id)).await?;
        Ok(self.wrap(id, data))
    }

    /// Kills a task by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("{}/{}", ENDPOINT, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_and_delete() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/config/server/tasks")
            .with_header("content-type", "application/json")
            .with_body(")]}'\n[{\"id\": \"1e688bea\", \"state\": \"SLEEPING\", \"command\": \"Log File Compressor\"}]")
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/config/server/tasks/1e688bea")
            .with_status(204)
            .create_async()
            .await;

        let tasks = Tasks::new(GerritClient::new(&server.url()).unwrap());
        let list = tasks.list().await.unwrap();
        assert_eq!(list[0].id(), "1e688bea");
        assert_eq!(list[0].field_str("state"), Some("SLEEPING"));
        list[0].delete().await.unwrap();
        delete.assert_async().await;
    }
}
