//
//  gerrit-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Gerrit REST API
//!
//! This module provides [`GerritClient`], the transport every resource client
//! goes through. It owns the pooled `reqwest` client and the credentials, and
//! it turns status codes into [`GerritError`] kinds.
//!
//! ## Features
//!
//! - Base URL normalization (trailing slashes removed)
//! - `/a` auth prefix applied only when credentials are configured
//! - Basic or bearer authentication, optional `.netrc` password lookup
//! - TLS verification toggle, client certificate and cookies
//! - Connection-level retries
//! - Magic-prefix stripping via [`decode_body`]

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Identity, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::accounts::Accounts;
use super::changes::Changes;
use super::common::{GerritError, Params, Result};
use super::decode::decode_body;
use super::gitiles::GerritGitiles;
use super::groups::Groups;
use super::plugins::Plugins;
use super::projects::Projects;
use super::server::{parse_version, ServerConfig};
use crate::auth::{netrc, AuthCredential};

/// Content type sent with JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Content type Gerrit expects for raw text bodies (SSH keys, edit content, prolog rules).
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "plain/text";

/// Path prefix for authenticated REST endpoints.
pub const DEFAULT_AUTH_SUFFIX: &str = "/a";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Request body variants.
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    /// No body
    Empty,
    /// JSON body with `application/json; charset=UTF-8`
    Json(&'a Value),
    /// Raw text with `plain/text`
    Text(&'a str),
}

/// Connection settings for a [`GerritClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use gerrit_client::api::{ClientOptions, GerritClient};
///
/// let options = ClientOptions::new("https://review.example.com/")
///     .username("jdoe")
///     .password("http-password")
///     .timeout(Duration::from_secs(30))
///     .max_retries(3);
/// let client = GerritClient::with_options(options)?;
/// assert_eq!(client.get_endpoint_url("/changes/"), "https://review.example.com/a/changes/");
/// # Ok::<(), gerrit_client::api::GerritError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Look the password up in `.netrc` by host.
    pub use_netrc: bool,
    pub ssl_verify: bool,
    /// PEM file with a client certificate and its private key.
    pub cert: Option<PathBuf>,
    pub cookies: Vec<(String, String)>,
    pub timeout: Duration,
    /// Extra attempts after a connection failure.
    pub max_retries: Option<u32>,
    pub auth_suffix: String,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
            use_netrc: false,
            ssl_verify: true,
            cert: None,
            cookies: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: None,
            auth_suffix: DEFAULT_AUTH_SUFFIX.to_string(),
        }
    }

    /// Username for basic auth.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// HTTP password for basic auth.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Reads the password from `.netrc` when none is given.
    pub fn use_netrc(mut self, enabled: bool) -> Self {
        self.use_netrc = enabled;
        self
    }

    /// Disables certificate verification when `false`.
    pub fn ssl_verify(mut self, enabled: bool) -> Self {
        self.ssl_verify = enabled;
        self
    }

    /// PEM file with a client certificate and key.
    pub fn cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.cert = Some(path.into());
        self
    }

    /// Adds a cookie sent with every request.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries for failed connections.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Path prefix of authenticated endpoints, `/a` by default.
    pub fn auth_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.auth_suffix = suffix.into();
        self
    }
}

/// Removes every trailing `/` from a URL.
pub fn strip_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// The main HTTP client for the Gerrit REST API.
///
/// Cloning is cheap: the connection pool is shared, so resource handles keep
/// their own clone.
///
/// # Example
///
/// ```rust,no_run
/// use gerrit_client::api::{GerritClient, Resource};
/// use gerrit_client::auth::AuthCredential;
///
/// # async fn run() -> gerrit_client::api::Result<()> {
/// let client = GerritClient::new("https://review.example.com")?
///     .with_auth(AuthCredential::basic("jdoe", "http-password"));
///
/// println!("Gerrit {}", client.version().await?);
/// let change = client.changes().get("myProject~main~I8473b95934b5732ac55d26311a706c9c2bde9940", false, &[]).await?;
/// println!("{}", change.field_str("subject").unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GerritClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
    /// Prefix inserted between base URL and endpoint when authenticated
    auth_suffix: String,
    /// Pre-rendered `Cookie` header
    cookie: Option<HeaderValue>,
    max_retries: u32,
}

impl GerritClient {
    /// Creates an anonymous client with default settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(ClientOptions::new(base_url))
    }

    /// Creates a client from explicit options.
    ///
    /// When `use_netrc` is set and no password was given, the password is read
    /// from `.netrc` using the host of `base_url`. An explicit password always
    /// wins. Credentials are attached only when both a username and a password
    /// are available.
    ///
    /// # Errors
    ///
    /// - [`GerritError::Netrc`] when `.netrc` has no entry for the host
    /// - an I/O or TLS error when `cert` cannot be read or parsed
    /// - [`GerritError::InvalidArgument`] for a cookie that is not a valid header value
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let base_url = strip_trailing_slash(&options.base_url);

        let mut password = options.password.clone();
        if options.use_netrc && password.is_none() {
            let host = Url::parse(&base_url)?
                .host_str()
                .map(str::to_string)
                .unwrap_or_else(|| base_url.clone());
            password = Some(netrc::password_for(&host)?);
        }

        let auth = match (options.username.as_deref(), password) {
            (Some(user), Some(pw)) if !user.is_empty() && !pw.is_empty() => {
                Some(AuthCredential::basic(user, pw))
            }
            _ => None,
        };

        let mut builder = Client::builder()
            .user_agent(format!("gerrit-client/{}", crate::VERSION))
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.ssl_verify);
        if let Some(path) = &options.cert {
            let pem = std::fs::read(path)?;
            builder = builder.identity(Identity::from_pem(&pem)?);
        }

        let cookie = if options.cookies.is_empty() {
            None
        } else {
            let rendered = options
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            Some(HeaderValue::from_str(&rendered).map_err(|e| {
                GerritError::InvalidArgument(format!("invalid cookie value: {}", e))
            })?)
        };

        Ok(Self {
            http: builder.build()?,
            base_url,
            auth,
            auth_suffix: options.auth_suffix,
            cookie,
            max_retries: options.max_retries.unwrap_or(0),
        })
    }

    /// Sets (or replaces) the credentials.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Server URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when credentials are attached to requests.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Returns the complete URL for an endpoint.
    ///
    /// `{base_url}{auth_suffix}{endpoint}`, where the suffix is empty for
    /// anonymous clients.
    pub fn get_endpoint_url(&self, endpoint: &str) -> String {
        let suffix = if self.auth.is_some() {
            self.auth_suffix.as_str()
        } else {
            ""
        };
        format!("{}{}{}", self.base_url, suffix, endpoint)
    }

    // ---------------------------------------------------------------------
    // Verbs
    // ---------------------------------------------------------------------

    /// Sends GET and decodes the response.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::GET, endpoint, &Params::new(), Body::Empty)
            .await
    }

    /// Sends GET with query parameters.
    ///
    /// Repeated keys in `params` go on the wire in order, e.g.
    /// `?q=status:open&q=is:wip&o=LABELS`.
    pub async fn get_with(&self, endpoint: &str, params: &Params) -> Result<Value> {
        self.request(Method::GET, endpoint, params, Body::Empty).await
    }

    /// Sends POST with an optional JSON body.
    pub async fn post(&self, endpoint: &str, json: Option<&Value>) -> Result<Value> {
        let body = json.map(Body::Json).unwrap_or(Body::Empty);
        self.request(Method::POST, endpoint, &Params::new(), body).await
    }

    /// Sends POST with a raw text body.
    pub async fn post_text(&self, endpoint: &str, text: &str) -> Result<Value> {
        self.request(Method::POST, endpoint, &Params::new(), Body::Text(text))
            .await
    }

    /// Sends PUT with an optional JSON body.
    pub async fn put(&self, endpoint: &str, json: Option<&Value>) -> Result<Value> {
        let body = json.map(Body::Json).unwrap_or(Body::Empty);
        self.request(Method::PUT, endpoint, &Params::new(), body).await
    }

    /// Sends PUT with a raw text body.
    pub async fn put_text(&self, endpoint: &str, text: &str) -> Result<Value> {
        self.request(Method::PUT, endpoint, &Params::new(), Body::Text(text))
            .await
    }

    /// Sends DELETE. The response body is discarded.
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        self.request(Method::DELETE, endpoint, &Params::new(), Body::Empty)
            .await
            .map(|_| ())
    }

    /// Sends DELETE and decodes the response body.
    pub async fn delete_decoded(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::DELETE, endpoint, &Params::new(), Body::Empty)
            .await
    }

    /// Sends an arbitrary request to a Gerrit endpoint.
    ///
    /// # Parameters
    ///
    /// - `endpoint`: path relative to the server, e.g. `/changes/`. The auth
    ///   suffix is added for authenticated clients.
    /// - `params`: query string pairs
    /// - `body`: request body; the content type follows the variant
    ///
    /// # Returns
    ///
    /// The decoded JSON with the `)]}'` prefix removed. Empty and non-JSON
    /// bodies come back as a string.
    ///
    /// A JSON content type with a body that fails to parse is
    /// [`GerritError::InvalidJson`].
    ///
    /// # Errors
    ///
    /// Non-2xx statuses map through [`GerritError::from_status`]: 400 is
    /// `Validation`, 401 `Unauthorized`, 403 `Auth`, 404 `NotFound`, 405
    /// `NotAllowed` and 409 `Conflict`. Connection failures are retried up to
    /// `max_retries` times before the transport error is returned.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &Params,
        body: Body<'_>,
    ) -> Result<Value> {
        let url = self.get_endpoint_url(endpoint);
        self.execute(method, &url, params, body).await
    }

    /// Sends a request to an absolute URL and decodes the response.
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: &str,
        params: &Params,
        body: Body<'_>,
    ) -> Result<Value> {
        let response = self.send(method, url, params, body).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;
        decode_body(content_type.as_deref(), &text)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        params: &Params,
        body: Body<'_>,
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            debug!("{} {}", method, url);
            let request = self.build(method.clone(), url, params, body);
            match request.send().await {
                Ok(response) => return confirm_status(response),
                Err(e) if e.is_connect() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "connection to {} failed ({}), retry {}/{}",
                        url, e, attempt, self.max_retries
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn build(&self, method: Method, url: &str, params: &Params, body: Body<'_>) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &self.cookie {
            headers.insert(COOKIE, cookie.clone());
        }

        let mut request = self.http.request(method, url).headers(headers);
        if !params.is_empty() {
            request = request.query(params.as_slice());
        }
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        match body {
            Body::Empty => request,
            Body::Json(value) => request
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(value.to_string()),
            Body::Text(text) => request
                .header(CONTENT_TYPE, PLAIN_TEXT_CONTENT_TYPE)
                .body(text.to_string()),
        }
    }

    // ---------------------------------------------------------------------
    // Resource APIs
    // ---------------------------------------------------------------------

    /// Server configuration endpoints (`/config/server`).
    pub fn config(&self) -> ServerConfig {
        ServerConfig::new(self.clone())
    }

    /// Project endpoints (`/projects`).
    pub fn projects(&self) -> Projects {
        Projects::new(self.clone())
    }

    /// Change endpoints (`/changes`).
    pub fn changes(&self) -> Changes {
        Changes::new(self.clone())
    }

    /// Account endpoints (`/accounts`).
    pub fn accounts(&self) -> Accounts {
        Accounts::new(self.clone())
    }

    /// Group endpoints (`/groups`).
    pub fn groups(&self) -> Groups {
        Groups::new(self.clone())
    }

    /// Plugin endpoints (`/plugins`).
    pub fn plugins(&self) -> Plugins {
        Plugins::new(self.clone())
    }

    /// Gitiles plugin endpoints (`/plugins/gitiles`).
    pub fn gitiles(&self) -> GerritGitiles {
        GerritGitiles::new(self.clone())
    }

    /// The Gerrit server version, e.g. `"3.9.1"`.
    pub async fn version(&self) -> Result<String> {
        self.config().version().await
    }

    /// The server configuration summary (`/config/server/info`).
    pub async fn server(&self) -> Result<Value> {
        self.config().server_info().await
    }

    /// True when the server reports a version lower than `major.minor.patch`.
    ///
    /// Unparseable versions are treated as current.
    pub(crate) async fn version_before(&self, major: u32, minor: u32, patch: u32) -> Result<bool> {
        let version = self.version().await?;
        Ok(parse_version(&version)
            .map(|v| v < (major, minor, patch))
            .unwrap_or(false))
    }
}

/// Checks the response status, mapping non-2xx to [`GerritError`].
///
/// 3xx responses that were not followed are reported as client errors.
pub fn confirm_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.as_u16() < 300 {
        return Ok(response);
    }
    Err(GerritError::from_status(status, response.url().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn authed(url: &str) -> GerritClient {
        GerritClient::with_options(ClientOptions::new(url).username("jdoe").password("pw")).unwrap()
    }

    #[test]
    fn test_netrc_only_fills_a_missing_password() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netrc");
        std::fs::write(&path, "machine other.example.com login jdoe password other\n").unwrap();
        std::env::set_var("NETRC", &path);

        let explicit = GerritClient::with_options(
            ClientOptions::new("https://review.example.com")
                .username("jdoe")
                .password("explicit")
                .use_netrc(true),
        )
        .unwrap();
        assert!(explicit.is_authenticated());

        let from_netrc = GerritClient::with_options(
            ClientOptions::new("https://other.example.com")
                .username("jdoe")
                .use_netrc(true),
        )
        .unwrap();
        assert!(from_netrc.is_authenticated());

        let missing = GerritClient::with_options(
            ClientOptions::new("https://review.example.com")
                .username("jdoe")
                .use_netrc(true),
        );
        std::env::remove_var("NETRC");
        assert!(matches!(missing, Err(GerritError::Netrc(_))));
    }

    #[test]
    fn test_strip_trailing_slash() {
        assert_eq!(strip_trailing_slash("https://r.example.com///"), "https://r.example.com");
        assert_eq!(strip_trailing_slash("https://r.example.com"), "https://r.example.com");
    }

    #[test]
    fn test_endpoint_url_with_and_without_auth() {
        let anon = GerritClient::new("https://review.example.com/").unwrap();
        assert_eq!(
            anon.get_endpoint_url("/changes/"),
            "https://review.example.com/changes/"
        );

        let client = authed("https://review.example.com/");
        assert_eq!(
            client.get_endpoint_url("/changes/"),
            "https://review.example.com/a/changes/"
        );

        let custom = GerritClient::with_options(
            ClientOptions::new("https://review.example.com")
                .username("u")
                .password("p")
                .auth_suffix(""),
        )
        .unwrap();
        assert_eq!(custom.get_endpoint_url("/x"), "https://review.example.com/x");
    }

    #[test]
    fn test_username_without_password_is_anonymous() {
        let client =
            GerritClient::with_options(ClientOptions::new("https://r.example.com").username("u"))
                .unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_get_strips_magic_prefix() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/a/projects/demo")
            .match_header("authorization", Matcher::Regex("^Basic ".into()))
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body(")]}'\n{\"id\": \"demo\", \"state\": \"ACTIVE\"}")
            .create_async()
            .await;

        let client = authed(&server.url());
        let value = client.get("/projects/demo").await.unwrap();
        assert_eq!(value, json!({"id": "demo", "state": "ACTIVE"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_sends_json_content_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/a/changes/1/abandon")
            .match_header("content-type", JSON_CONTENT_TYPE)
            .match_body(Matcher::Json(json!({"message": "bye"})))
            .with_header("content-type", "application/json")
            .with_body(")]}'\n{\"status\": \"ABANDONED\"}")
            .create_async()
            .await;

        let client = authed(&server.url());
        let value = client
            .post("/changes/1/abandon", Some(&json!({"message": "bye"})))
            .await
            .unwrap();
        assert_eq!(value["status"], "ABANDONED");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_text_body_uses_plain_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/a/changes/1/edit/README")
            .match_header("content-type", PLAIN_TEXT_CONTENT_TYPE)
            .match_body("new content")
            .with_status(204)
            .create_async()
            .await;

        let client = authed(&server.url());
        client.put_text("/changes/1/edit/README", "new content").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_params_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/changes/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "status:open".into()),
                Matcher::UrlEncoded("n".into(), "2".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(")]}'\n[]")
            .create_async()
            .await;

        let client = GerritClient::new(&server.url()).unwrap();
        let params = Params::new().push("q", "status:open").push("n", 2);
        let value = client.get_with("/changes/", &params).await.unwrap();
        assert_eq!(value, json!([]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_codes_map_to_errors() {
        let mut server = mockito::Server::new_async().await;
        for (code, path) in [(400, "/v"), (401, "/u"), (403, "/f"), (404, "/n"), (405, "/m"), (409, "/c"), (422, "/x"), (503, "/s")] {
            server
                .mock("GET", path)
                .with_status(code)
                .create_async()
                .await;
        }

        let client = GerritClient::new(&server.url()).unwrap();
        assert!(matches!(client.get("/v").await, Err(GerritError::Validation(_))));
        assert!(matches!(client.get("/u").await, Err(GerritError::Unauthorized(_))));
        assert!(matches!(client.get("/f").await, Err(GerritError::Auth(_))));
        assert!(matches!(client.get("/n").await, Err(GerritError::NotFound(_))));
        assert!(matches!(client.get("/m").await, Err(GerritError::NotAllowed(_))));
        assert!(matches!(client.get("/c").await, Err(GerritError::Conflict(_))));
        assert!(matches!(client.get("/x").await, Err(GerritError::Client { status: 422, .. })));
        assert!(matches!(client.get("/s").await, Err(GerritError::Server { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_error_message_contains_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/projects/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = authed(&server.url());
        let err = client.get("/projects/missing").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("404 Client Error: Not Found for url: {}/a/projects/missing", server.url())
        );
    }

    #[tokio::test]
    async fn test_cookies_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/config/server/version")
            .match_header("cookie", "GerritAccount=abc; XSRF_TOKEN=def")
            .with_header("content-type", "application/json")
            .with_body(")]}'\n\"3.9.1\"")
            .create_async()
            .await;

        let client = GerritClient::with_options(
            ClientOptions::new(server.url())
                .cookie("GerritAccount", "abc")
                .cookie("XSRF_TOKEN", "def"),
        )
        .unwrap();
        assert_eq!(client.version().await.unwrap(), "3.9.1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_discards_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/a/changes/1/topic")
            .with_status(204)
            .create_async()
            .await;

        let client = authed(&server.url());
        client.delete("/changes/1/topic").await.unwrap();
    }
}
