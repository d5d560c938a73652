//
//  gerrit-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Gerrit authenticates REST calls with HTTP Basic credentials (the user's
//! generated HTTP password) on the `/a` prefixed endpoints. Some deployments
//! front Gerrit with an OAuth provider and accept bearer tokens instead.
//!
//! ## Credential Sources
//!
//! Passwords are resolved in this order by [`resolve_password`]:
//!
//! 1. An explicit value (flag or `GERRIT_PASSWORD`)
//! 2. The system keyring ([`KeyringStore`])
//! 3. The user's `.netrc` file ([`netrc`]), when enabled for the host
//!
//! ## Module Structure
//!
//! - [`keyring`]: Secure password storage using the system keyring
//! - [`netrc`]: `.netrc` parsing and lookup

mod keyring;
pub mod netrc;

pub use keyring::*;

use reqwest::RequestBuilder;
use tracing::debug;

use crate::api::common::Result;

/// Credentials attached to every authenticated request.
///
/// # Example
///
/// ```rust
/// use gerrit_client::auth::AuthCredential;
///
/// let cred = AuthCredential::basic("jdoe", "http-password");
/// assert_eq!(cred.username(), Some("jdoe"));
/// ```
#[derive(Debug, Clone)]
pub enum AuthCredential {
    /// HTTP Basic authentication with the Gerrit HTTP password.
    Basic {
        /// The Gerrit username.
        username: String,
        /// The generated HTTP password.
        password: String,
    },
    /// Bearer token for OAuth-fronted deployments.
    Bearer {
        /// The access token.
        token: String,
    },
}

impl AuthCredential {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Adds the authorization header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Basic { username, .. } => Some(username),
            Self::Bearer { .. } => None,
        }
    }
}

/// Resolves the password for `host` from the configured sources.
///
/// # Parameters
///
/// * `host` - Normalized host name, used as the keyring and netrc key
/// * `explicit` - A password given on the command line or in the environment
/// * `use_netrc` - Whether the `.netrc` file may be consulted
///
/// # Returns
///
/// `Ok(None)` when no source has a password. Keyring backend failures are
/// logged and treated as "no entry" so that netrc still gets a chance.
pub fn resolve_password(
    host: &str,
    explicit: Option<String>,
    use_netrc: bool,
) -> Result<Option<String>> {
    if let Some(password) = explicit.filter(|p| !p.is_empty()) {
        return Ok(Some(password));
    }

    match KeyringStore::new().get(host) {
        Ok(Some(password)) => return Ok(Some(password)),
        Ok(None) => {}
        Err(e) => debug!("keyring lookup for {} failed: {}", host, e),
    }

    if use_netrc {
        return netrc::password_for(host).map(Some);
    }

    Ok(None)
}
