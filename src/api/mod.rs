//
//  gerrit-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Async bindings for the Gerrit Code Review REST API, plus a small client for
//! standalone Gitiles servers.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and request handling
//! - [`projects`], [`changes`], [`accounts`], [`groups`], [`plugins`],
//!   [`server`]: One module per top-level REST collection
//! - [`gitiles`]: Gitiles plugin endpoints and the standalone client
//! - [`model`]: The [`Resource`] trait shared by resource handles
//! - [`common`]: Errors and query parameters
//! - [`decode`]: Response decoding (`)]}'` prefix, base64 content)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gerrit_client::api::{ClientOptions, GerritClient, Pattern, Resource};
//!
//! # async fn run() -> gerrit_client::api::Result<()> {
//! let client = GerritClient::with_options(
//!     ClientOptions::new("https://review.example.com")
//!         .username("jdoe")
//!         .password("http-password"),
//! )?;
//!
//! let project = client.projects().get("platform/build").await?;
//! let branches = project
//!     .branches()
//!     .list(Some(&Pattern::Regex("release-.*".into())), 25, 0)
//!     .await?;
//! println!("{} on {}", branches, project.endpoint());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`], whose error is a [`GerritError`]:
//!
//! - `Validation`: 400 Bad Request
//! - `Unauthorized`: 401 Unauthorized
//! - `Auth`: 403 Forbidden
//! - `NotFound`: 404 Not Found, refined to e.g. `ProjectNotFound` by `get` calls
//! - `NotAllowed`: 405 Method Not Allowed
//! - `Conflict`: 409 Conflict

/// Core HTTP client wrapper for the Gerrit REST API.
pub mod client;

/// `/accounts`: accounts, emails, SSH and GPG keys.
pub mod accounts;

/// `/changes`: changes, revisions, files, comments, reviewers and edits.
pub mod changes;

/// Shared error type and query parameters.
pub mod common;

pub mod decode;

/// Gitiles, through the Gerrit plugin or standalone.
pub mod gitiles;

/// `/groups`: groups, members and subgroups.
pub mod groups;

pub mod model;

/// `/plugins`: plugin listing and management.
pub mod plugins;

/// `/projects`: projects, branches, tags, dashboards, labels and webhooks.
pub mod projects;

/// `/config/server`: version, info, caches and tasks.
pub mod server;

pub use client::{Body, ClientOptions, GerritClient};
pub use common::{GerritError, Params, Pattern, Result};
pub use model::Resource;
