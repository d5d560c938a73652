//
//  gerrit-client
//  api/changes/messages.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Change messages (`/changes/{change}/messages`).

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{impl_resource_eq, into_list, str_field};
use crate::api::{GerritClient, Resource};

/// A change message (`ChangeMessageInfo`).
#[derive(Debug, Clone)]
pub struct Message {
    client: GerritClient,
    change: String,
    data: Value,
}

impl_resource_eq!(Message);

impl Resource for Message {
    fn endpoint(&self) -> String {
        format!("/changes/{}/messages/{}", self.change, self.id())
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Message {
    pub fn id(&self) -> String {
        str_field(&self.data, "id")
    }

    /// Deletes the message content.
    ///
    /// Without input a plain DELETE is sent and `None` returned. With a
    /// `DeleteChangeMessageInput` (carrying a `reason`) the POST form is used
    /// and the rewritten message is returned.
    pub async fn delete(&self, input: Option<&Value>) -> Result<Option<Message>> {
        match input {
            None => {
                self.client.delete(&self.endpoint()).await?;
                Ok(None)
            }
            Some(input) => {
                let result = self
                    .client
                    .post(&format!("{}/delete", self.endpoint()), Some(input))
                    .await?;
                let message = Messages::new(self.client.clone(), &self.change)
                    .get(&str_field(&result, "id"))
                    .await?;
                Ok(Some(message))
            }
        }
    }
}

/// Client for the messages of one change.
#[derive(Debug, Clone)]
pub struct Messages {
    client: GerritClient,
    change: String,
}

impl Messages {
    pub(crate) fn new(client: GerritClient, change: &str) -> Self {
        Self {
            client,
            change: change.to_string(),
        }
    }

    fn wrap(&self, data: Value) -> Message {
        Message {
            client: self.client.clone(),
            change: self.change.clone(),
            data,
        }
    }

    /// All messages of the change (`ChangeMessageInfo`).
    pub async fn list(&self) -> Result<Vec<Message>> {
        let result = self
            .client
            .get(&format!("/changes/{}/messages", self.change))
            .await?;
        Ok(into_list(result).into_iter().map(|m| self.wrap(m)).collect())
    }

    /// A single message by id.
    pub async fn get(&self, id: &str) -> Result<Message> {
        let data = self
            .client
            .get(&format!("/changes/{}/messages/{}", self.change, id))
            .await?;
        Ok(self.wrap(data))
    }
}
