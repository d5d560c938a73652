//
//  gerrit-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit Client Library
//!
//! An async client for the Gerrit Code Review REST API, plus the `gerrit`
//! command-line tool built on top of it.
//!
//! ## Module Structure
//!
//! - [`api`]: The REST client and its resource handles (projects, changes,
//!   accounts, groups, plugins, server config, Gitiles)
//! - [`auth`]: Credentials, keyring storage and `.netrc` lookup
//! - [`config`]: The CLI configuration file
//! - [`output`]: Table, JSON and YAML rendering
//! - [`cli`]: Command definitions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gerrit_client::api::{ClientOptions, GerritClient};
//!
//! # async fn run() -> gerrit_client::api::Result<()> {
//! let client = GerritClient::with_options(
//!     ClientOptions::new("https://review.example.com")
//!         .username("jdoe")
//!         .password("secret"),
//! )?;
//! let change = client.changes().get("12345", false, &[]).await?;
//! println!("{}", change.id());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// Gerrit REST API client.
///
/// [`api::GerritClient`] owns the HTTP transport; every other type is a
/// lightweight handle that borrows a clone of it.
pub mod api;

/// Credential handling.
pub mod auth;

/// Configuration file management.
///
/// The file lives in the platform config directory:
/// - Linux: `~/.config/gerrit/config.toml`
/// - macOS: `~/Library/Application Support/gerrit/config.toml`
/// - Windows: `%APPDATA%\gerrit\config.toml`
pub mod config;

/// Output formatting.
pub mod output;

pub use cli::Cli;
pub use config::Config;

/// Name of the binary, also used for the configuration directory.
pub const APP_NAME: &str = "gerrit";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4`: Authentication issues
/// - `8`: Missing resources
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;

    /// Unspecified failure; details are on stderr.
    pub const ERROR: i32 = 1;

    /// Invalid arguments.
    pub const USAGE: i32 = 2;

    /// The server rejected the credentials (401/403).
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// Exit code for an error returned by a command.
    pub fn for_error(error: &anyhow::Error) -> i32 {
        use crate::api::GerritError;

        match error.downcast_ref::<GerritError>() {
            Some(e) if e.is_not_found() => NOT_FOUND,
            Some(GerritError::Unauthorized(_) | GerritError::Auth(_)) => AUTH_ERROR,
            Some(GerritError::InvalidArgument(_)) => USAGE,
            _ => ERROR,
        }
    }

}
