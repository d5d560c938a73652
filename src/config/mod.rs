//
//  gerrit-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the `gerrit` CLI, stored as TOML in the platform config
//! directory:
//!
//! - **Linux**: `~/.config/gerrit/config.toml`
//! - **macOS**: `~/Library/Application Support/gerrit/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\gerrit\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! default_host = "review.example.com"
//! output = "table"
//!
//! [hosts."review.example.com"]
//! url = "https://review.example.com"
//! username = "jdoe"
//! use_netrc = false
//! ssl_verify = true
//! timeout = 60
//! max_retries = 3
//! ```
//!
//! Passwords are never written here; see [`crate::auth::resolve_password`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gerrit_client::config::Config;
//!
//! # fn run() -> anyhow::Result<()> {
//! let mut config = Config::load()?;
//! config.set("output", "json".to_string())?;
//! config.save()?;
//! # Ok(())
//! # }
//! ```

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::ClientOptions;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    /// Per-host settings keyed by normalized host name
    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,
}

/// General CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// Host used when `--host` is not given
    #[serde(default)]
    pub default_host: Option<String>,

    /// Default output format (`json`, `yaml` or `table`)
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_output() -> String {
    "table".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_host: None,
            output: default_output(),
        }
    }
}

/// Settings for one Gerrit server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// Base URL, e.g. `https://review.example.com/gerrit`
    pub url: String,

    #[serde(default)]
    pub username: Option<String>,

    /// Read the password from `~/.netrc`
    #[serde(default)]
    pub use_netrc: bool,

    #[serde(default = "default_true")]
    pub ssl_verify: bool,

    /// PEM file holding a client certificate and key
    #[serde(default)]
    pub cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,

    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Overrides the `/a` prefix of authenticated endpoints
    #[serde(default)]
    pub auth_suffix: Option<String>,
}

fn default_true() -> bool {
    true
}

impl HostConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            use_netrc: false,
            ssl_verify: true,
            cert: None,
            timeout: None,
            max_retries: None,
            auth_suffix: None,
        }
    }

    /// Builds client options for this host. The password is resolved by the
    /// caller; `.netrc` lookup is left to the client when enabled.
    pub fn client_options(&self, password: Option<String>) -> ClientOptions {
        let mut options = ClientOptions::new(self.url.as_str())
            .ssl_verify(self.ssl_verify)
            .use_netrc(self.use_netrc && password.is_none());
        if let Some(username) = &self.username {
            options = options.username(username.as_str());
        }
        if let Some(password) = password {
            options = options.password(password);
        }
        if let Some(cert) = &self.cert {
            options = options.cert(cert.clone());
        }
        if let Some(secs) = self.timeout {
            options = options.timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.max_retries {
            options = options.max_retries(retries);
        }
        if let Some(suffix) = &self.auth_suffix {
            options = options.auth_suffix(suffix.as_str());
        }
        options
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match read_config_file(path)? {
            Some(content) => toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Path of `config.toml` in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(&normalize_host(host))
    }

    /// Adds or replaces the settings of a host.
    pub fn set_host(&mut self, host: &str, config: HostConfig) {
        self.hosts.insert(normalize_host(host), config);
    }

    pub fn remove_host(&mut self, host: &str) -> Option<HostConfig> {
        self.hosts.remove(&normalize_host(host))
    }

    /// The host to talk to: the explicit one, else `core.default_host`, else
    /// the only configured host.
    pub fn resolve_host(&self, explicit: Option<&str>) -> Option<String> {
        if let Some(host) = explicit {
            return Some(normalize_host(host));
        }
        if let Some(host) = &self.core.default_host {
            return Some(normalize_host(host));
        }
        if self.hosts.len() == 1 {
            return self.hosts.keys().next().cloned();
        }
        None
    }

    /// Reads a `core` setting.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_host" => self.core.default_host.clone(),
            "output" => Some(self.core.output.clone()),
            _ => None,
        }
    }

    /// Writes a `core` setting.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "default_host" => self.core.default_host = Some(normalize_host(&value)),
            "output" => {
                if !matches!(value.as_str(), "json" | "yaml" | "table") {
                    bail!("Invalid output format '{}': expected json, yaml or table", value);
                }
                self.core.output = value;
            }
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// Known `core` keys, for listing.
    pub fn keys() -> &'static [&'static str] {
        &["default_host", "output"]
    }
}
