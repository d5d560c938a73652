//
//  gerrit-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Gerrit REST API
//!
//! This module provides the shared error type and query-parameter helpers used by
//! every resource client.
//!
//! # Overview
//!
//! - [`GerritError`] - Unified error type for all API operations
//! - [`Result`] - Crate-wide result alias
//! - [`Params`] / [`Pattern`] - Query-parameter building (re-exported from [`params`])
//!
//! # Example
//!
//! ```rust
//! use gerrit_client::api::common::GerritError;
//!
//! fn handle<T>(result: Result<T, GerritError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(GerritError::Unauthorized(msg)) => println!("Check your HTTP password: {}", msg),
//!         Err(e) if e.is_not_found() => println!("Nothing there: {}", e),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

mod params;

pub use params::*;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GerritError>;

/// Unified error type for all Gerrit API operations.
///
/// Status-driven variants are produced by [`GerritError::from_status`] for every
/// non-2xx response. The resource-specific variants are layered on top of a 404
/// (or of a local existence check) by the resource clients.
///
/// # Status Variants
///
/// | Variant | HTTP Status |
/// |---------|-------------|
/// | `Validation` | 400 |
/// | `Unauthorized` | 401 |
/// | `Auth` | 403 |
/// | `NotFound` | 404 |
/// | `NotAllowed` | 405 |
/// | `Conflict` | 409 |
/// | `Client` | other 4xx |
/// | `Server` | 5xx |
///
/// # Example
///
/// ```rust
/// use gerrit_client::api::common::GerritError;
/// use reqwest::StatusCode;
///
/// let err = GerritError::from_status(StatusCode::CONFLICT, "http://review/a/changes/1/submit");
/// assert!(matches!(err, GerritError::Conflict(_)));
/// assert_eq!(err.status_code(), Some(409));
/// ```
#[derive(Error, Debug)]
pub enum GerritError {
    /// The server rejected the request input (HTTP 400).
    #[error("{0}")]
    Validation(String),

    /// The credentials were missing or rejected (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks permission (HTTP 403).
    #[error("{0}")]
    Auth(String),

    /// The endpoint or resource does not exist (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// The HTTP method is not allowed on the endpoint (HTTP 405).
    #[error("{0}")]
    NotAllowed(String),

    /// The request conflicts with the current resource state (HTTP 409).
    #[error("{0}")]
    Conflict(String),

    /// Any other 4xx response.
    #[error("{message}")]
    Client {
        /// The HTTP status code
        status: u16,
        /// Formatted error message
        message: String,
    },

    /// Any 5xx response.
    #[error("{message}")]
    Server {
        /// The HTTP status code
        status: u16,
        /// Formatted error message
        message: String,
    },

    #[error("{0}")]
    ProjectNotFound(String),

    #[error("{0}")]
    ProjectAlreadyExists(String),

    #[error("{0}")]
    BranchNotFound(String),

    #[error("{0}")]
    BranchAlreadyExists(String),

    #[error("{0}")]
    TagNotFound(String),

    #[error("{0}")]
    TagAlreadyExists(String),

    #[error("{0}")]
    CommitNotFound(String),

    #[error("{0}")]
    GroupNotFound(String),

    #[error("{0}")]
    GroupAlreadyExists(String),

    #[error("{0}")]
    GroupMemberNotFound(String),

    #[error("{0}")]
    GroupMemberAlreadyExists(String),

    #[error("{0}")]
    ChangeNotFound(String),

    #[error("{0}")]
    ReviewerNotFound(String),

    #[error("{0}")]
    AccountNotFound(String),

    #[error("{0}")]
    AccountAlreadyExists(String),

    #[error("{0}")]
    AccountEmailNotFound(String),

    #[error("{0}")]
    AccountEmailAlreadyExists(String),

    #[error("{0}")]
    SshKeyNotFound(String),

    #[error("{0}")]
    GpgKeyNotFound(String),

    #[error("{0}")]
    ChangeEditNotFound(String),

    #[error("{0}")]
    FileContentNotFound(String),

    /// A path looked up in a revision's file list is not part of it.
    ///
    /// Raised from the cached list, never from a server response.
    #[error("Unknown file: {0}")]
    UnknownFile(String),

    /// A response declared as JSON could not be parsed.
    #[error("Invalid json content: {0}")]
    InvalidJson(String),

    /// A caller-supplied argument combination is not accepted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The `.netrc` lookup failed.
    #[error("netrc: {0}")]
    Netrc(String),

    /// A base64 payload could not be decoded.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded base64 content was not valid UTF-8.
    #[error("Decoded content is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The base URL or an endpoint could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Reading a local file (certificate, netrc) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection, TLS or body transfer failure.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GerritError {
    /// Maps a non-success status to its error kind.
    ///
    /// The message follows `"{code} Client Error: {reason} for url: {url}"`
    /// (`Server Error` for 5xx).
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status of the response
    /// * `url` - The final request URL
    pub fn from_status(status: StatusCode, url: &str) -> Self {
        let code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("");
        let kind = if status.is_server_error() {
            "Server Error"
        } else {
            "Client Error"
        };
        let message = format!("{} {}: {} for url: {}", code, kind, reason, url);

        match code {
            400 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Auth(message),
            404 => Self::NotFound(message),
            405 => Self::NotAllowed(message),
            409 => Self::Conflict(message),
            c if c < 500 => Self::Client { status: c, message },
            c => Self::Server { status: c, message },
        }
    }

    /// Returns the HTTP status code carried by status-driven variants.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Auth(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::NotAllowed(_) => Some(405),
            Self::Conflict(_) => Some(409),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for the generic 404 and every resource-specific not-found kind.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::ProjectNotFound(_)
                | Self::BranchNotFound(_)
                | Self::TagNotFound(_)
                | Self::CommitNotFound(_)
                | Self::GroupNotFound(_)
                | Self::GroupMemberNotFound(_)
                | Self::ChangeNotFound(_)
                | Self::ReviewerNotFound(_)
                | Self::AccountNotFound(_)
                | Self::AccountEmailNotFound(_)
                | Self::SshKeyNotFound(_)
                | Self::GpgKeyNotFound(_)
                | Self::ChangeEditNotFound(_)
                | Self::FileContentNotFound(_)
                | Self::UnknownFile(_)
        )
    }

    /// Replaces a generic 404 with a resource-specific error.
    ///
    /// Every other error is returned untouched.
    pub(crate) fn on_not_found(self, f: impl FnOnce() -> GerritError) -> Self {
        match self {
            Self::NotFound(_) => {
                let err = f();
                tracing::error!("{}", err);
                err
            }
            other => other,
        }
    }

    /// Logs the error and returns it, for errors raised from local checks.
    pub(crate) fn logged(self) -> Self {
        tracing::error!("{}", self);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://review.example.com/a/projects/x";

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, "Validation"),
            (401, "Unauthorized"),
            (403, "Auth"),
            (404, "NotFound"),
            (405, "NotAllowed"),
            (409, "Conflict"),
        ];
        for (code, name) in cases {
            let err = GerritError::from_status(StatusCode::from_u16(code).unwrap(), URL);
            let debug = format!("{:?}", err);
            assert!(debug.starts_with(name), "{} mapped to {}", code, debug);
            assert_eq!(err.status_code(), Some(code));
        }
    }

    #[test]
    fn test_other_4xx_is_client_error() {
        let err = GerritError::from_status(StatusCode::IM_A_TEAPOT, URL);
        assert!(matches!(err, GerritError::Client { status: 418, .. }));
    }

    #[test]
    fn test_5xx_is_server_error() {
        let err = GerritError::from_status(StatusCode::BAD_GATEWAY, URL);
        assert!(matches!(err, GerritError::Server { status: 502, .. }));
        assert_eq!(
            err.to_string(),
            format!("502 Server Error: Bad Gateway for url: {}", URL)
        );
    }

    #[test]
    fn test_client_error_message() {
        let err = GerritError::from_status(StatusCode::NOT_FOUND, URL);
        assert_eq!(
            err.to_string(),
            format!("404 Client Error: Not Found for url: {}", URL)
        );
    }

    #[test]
    fn test_on_not_found_replaces_only_404() {
        let err = GerritError::NotFound("x".into())
            .on_not_found(|| GerritError::ProjectNotFound("Project x does not exist".into()));
        assert!(matches!(err, GerritError::ProjectNotFound(_)));
        assert!(err.is_not_found());

        let err = GerritError::Conflict("x".into())
            .on_not_found(|| GerritError::ProjectNotFound("unused".into()));
        assert!(matches!(err, GerritError::Conflict(_)));
    }
}
