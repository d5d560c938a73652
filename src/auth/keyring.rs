//
//  gerrit-client
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Secure storage for Gerrit HTTP passwords.
//!
//! Entries live under the `gerrit-client` service with the normalized host as
//! the account name, so `https://Review.example.com/` and `review.example.com`
//! share one entry.

use anyhow::{Context, Result};
use keyring::Entry;
use tracing::debug;

use crate::config::normalize_host;

const SERVICE_NAME: &str = "gerrit-client";

/// Per-host password store backed by the system keychain.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self, host: &str) -> Result<Entry> {
        let account = account_name(host);
        Entry::new(&self.service, &account)
            .with_context(|| format!("Failed to open keyring entry for {}", account))
    }

    pub fn store(&self, host: &str, password: &str) -> Result<()> {
        debug!("storing password for {} in the keyring", account_name(host));
        self.entry(host)?
            .set_password(password)
            .context("Failed to store password in the keyring")
    }

    pub fn get(&self, host: &str) -> Result<Option<String>> {
        match self.entry(host)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read password from the keyring"),
        }
    }

    /// Removes the password. A missing entry is not an error.
    pub fn delete(&self, host: &str) -> Result<()> {
        match self.entry(host)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete password from the keyring"),
        }
    }
}

fn account_name(host: &str) -> String {
    normalize_host(host)
}
