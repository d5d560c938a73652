//
//  gerrit-client
//  api/server/caches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server caches (`/config/server/caches`).

use serde_json::Value;

use crate::api::common::Result;
use crate::api::model::{impl_resource_eq, map_to_list, str_field};
use crate::api::{GerritClient, Resource};

const ENDPOINT: &str = "/config/server/caches";

/// A cache (`CacheInfo`).
#[derive(Debug, Clone)]
pub struct Cache {
    client: GerritClient,
    name: String,
    data: Value,
}

impl_resource_eq!(Cache);

impl Resource for Cache {
    fn endpoint(&self) -> String {
        format!("{}/{}", ENDPOINT, self.name)
    }

    fn json(&self) -> &Value {
        &self.data
    }
}

impl Cache {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flushes the cache.
    pub async fn flush(&self) -> Result<()> {
        self.client
            .post(&format!("{}/flush", self.endpoint()), None)
            .await?;
        Ok(())
    }
}

/// Client for the server caches.
#[derive(Debug, Clone)]
pub struct Caches {
    client: GerritClient,
}

impl Caches {
    pub(crate) fn new(client: GerritClient) -> Self {
        Self { client }
    }

    fn wrap(&self, name: &str, data: Value) -> Cache {
        Cache {
            client: self.client.clone(),
            name: name.to_string(),
            data,
        }
    }

    /// All caches. The server keys them by name, which is added to each record.
    pub async fn list(&self) -> Result<Vec<Cache>> {
        let result = self.client.get(ENDPOINT).await?;
        Ok(map_to_list(result, "name")
            .into_iter()
            .map(|data| {
                let name = str_field(&data, "name");
                self.wrap(&name, data)
            })
            .collect())
    }

    /// A cache by name (`CacheInfo`).
    pub async fn get(&self, name: &str) -> Result<Cache> {
        let data = self.client.get(&format!("{}/{}", ENDPOINT, name)).await?;
        Ok(self.wrap(name, data))
    }

    /// Flushes a cache by name.
    pub async fn flush(&self, name: &str) -> Result<()> {
        self.client
            .post(&format!("{}/{}/flush", ENDPOINT, name), None)
            .await?;
        Ok(())
    }

    /// Runs a cache operation (`CacheOperationInput`), e.g. `FLUSH_ALL`.
    pub async fn operation(&self, input: &Value) -> Result<()> {
        self.client.post(ENDPOINT, Some(input)).await?;
        Ok(())
    }
}
