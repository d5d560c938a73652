//
//  gerrit-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `gerrit config`: read and write `config.toml`.
//!
//! Without `--host` the `core` keys are addressed; with it, the keys of that
//! host's section.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::config::{host_url, Config, HostConfig};

use super::GlobalOptions;

const HOST_KEYS: &[&str] = &[
    "url",
    "username",
    "use_netrc",
    "ssl_verify",
    "cert",
    "timeout",
    "max_retries",
    "auth_suffix",
];

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print all settings
    #[command(visible_alias = "ls")]
    List,

    /// Print one setting
    Get(GetArgs),

    /// Change one setting
    Set(SetArgs),

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub key: String,

    /// Read from this host's section
    #[arg(long = "for-host", short = 'H')]
    pub host: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,
    pub value: String,

    /// Write to this host's section, creating it if needed
    #[arg(long = "for-host", short = 'H')]
    pub host: Option<String>,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::List => {
                let config = Config::load()?;
                let value = serde_json::to_value(&config)?;
                global.writer(&config).write_value(&value, &[])
            }
            ConfigSubcommand::Get(args) => {
                let config = Config::load()?;
                let value = match &args.host {
                    Some(host) => {
                        let host_config = config
                            .host_config(host)
                            .with_context(|| format!("Host {} is not configured", host))?;
                        get_host_value(host_config, &args.key)?
                    }
                    None => {
                        if !Config::keys().contains(&args.key.as_str()) {
                            bail!(
                                "Unknown configuration key '{}'. Valid keys: {}",
                                args.key,
                                Config::keys().join(", ")
                            );
                        }
                        config.get(&args.key).map(Value::String).unwrap_or(Value::Null)
                    }
                };
                match value {
                    Value::Null => {}
                    Value::String(s) => println!("{}", s),
                    other => println!("{}", other),
                }
                Ok(())
            }
            ConfigSubcommand::Set(args) => {
                let mut config = Config::load()?;
                match &args.host {
                    Some(host) => {
                        let mut host_config = config
                            .host_config(host)
                            .cloned()
                            .unwrap_or_else(|| HostConfig::new(host_url(host)));
                        set_host_value(&mut host_config, &args.key, &args.value)?;
                        config.set_host(host, host_config);
                    }
                    None => config.set(&args.key, args.value.clone())?,
                }
                config.save()?;
                global
                    .writer(&config)
                    .write_success(&format!("Set {} to {}", args.key, args.value));
                Ok(())
            }
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}

fn get_host_value(host: &HostConfig, key: &str) -> Result<Value> {
    Ok(match key {
        "url" => json!(host.url),
        "username" => json!(host.username),
        "use_netrc" => json!(host.use_netrc),
        "ssl_verify" => json!(host.ssl_verify),
        "cert" => json!(host.cert),
        "timeout" => json!(host.timeout),
        "max_retries" => json!(host.max_retries),
        "auth_suffix" => json!(host.auth_suffix),
        _ => bail!(
            "Unknown host key '{}'. Valid keys: {}",
            key,
            HOST_KEYS.join(", ")
        ),
    })
}

fn set_host_value(host: &mut HostConfig, key: &str, value: &str) -> Result<()> {
    let flag = || -> Result<bool> {
        value
            .parse::<bool>()
            .with_context(|| format!("{} expects true or false", key))
    };
    match key {
        "url" => host.url = host_url(value),
        "username" => host.username = Some(value.to_string()),
        "use_netrc" => host.use_netrc = flag()?,
        "ssl_verify" => host.ssl_verify = flag()?,
        "cert" => host.cert = Some(PathBuf::from(value)),
        "timeout" => {
            host.timeout = Some(value.parse().context("timeout expects seconds")?)
        }
        "max_retries" => {
            host.max_retries = Some(value.parse().context("max_retries expects a number")?)
        }
        "auth_suffix" => host.auth_suffix = Some(value.to_string()),
        _ => bail!(
            "Unknown host key '{}'. Valid keys: {}",
            key,
            HOST_KEYS.join(", ")
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_host_values() {
        let mut host = HostConfig::new("https://review.example.com");
        set_host_value(&mut host, "use_netrc", "true").unwrap();
        set_host_value(&mut host, "timeout", "15").unwrap();
        set_host_value(&mut host, "url", "gerrit.example.org/").unwrap();
        assert!(host.use_netrc);
        assert_eq!(host.timeout, Some(15));
        assert_eq!(host.url, "https://gerrit.example.org");

        assert!(set_host_value(&mut host, "ssl_verify", "maybe").is_err());
        assert!(set_host_value(&mut host, "editor", "vim").is_err());
    }

    #[test]
    fn test_get_host_values() {
        let mut host = HostConfig::new("https://review.example.com");
        host.max_retries = Some(2);
        assert_eq!(get_host_value(&host, "max_retries").unwrap(), json!(2));
        assert_eq!(get_host_value(&host, "username").unwrap(), Value::Null);
        assert!(get_host_value(&host, "nope").is_err());
    }
}
