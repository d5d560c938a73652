//
//  gerrit-client
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Passwords are Gerrit HTTP passwords (Settings > HTTP Credentials). They are
//! kept in the system keyring, keyed by the normalized host; only the URL and
//! username land in `config.toml`.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use dialoguer::{Input, Password};

use crate::api::{GerritClient, Resource};
use crate::auth::{resolve_password, KeyringStore};
use crate::config::{host_url, normalize_host, Config, HostConfig};
use crate::output::print_field;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in to a Gerrit server
    Login(LoginArgs),

    /// Log out of a Gerrit server
    Logout(LogoutArgs),

    /// Show configured hosts
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Server URL, e.g. https://review.example.com/gerrit
    #[arg(long = "url")]
    pub url: Option<String>,

    /// Account username
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Read the password from ~/.netrc instead of storing it
    #[arg(long)]
    pub netrc: bool,

    /// Read the password from stdin
    #[arg(long)]
    pub with_password: bool,
}

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Host to log out of (defaults to the selected host)
    pub host: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(global, args).await,
            AuthSubcommand::Logout(args) => logout(global, args),
            AuthSubcommand::Status => status(),
        }
    }
}

async fn login(global: &GlobalOptions, args: &LoginArgs) -> Result<()> {
    let url = match args.url.as_ref().or(global.host.as_ref()) {
        Some(url) => url.clone(),
        None => Input::new()
            .with_prompt("Gerrit URL")
            .interact_text()
            .context("Failed to read URL")?,
    };
    let url = host_url(&url);
    let host = normalize_host(&url);

    let username = match &args.username {
        Some(username) => username.clone(),
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = if args.netrc {
        None
    } else if args.with_password {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Some(line.trim().to_string())
    } else {
        println!("Use the HTTP password from Settings > HTTP Credentials in {}", url);
        Some(
            Password::new()
                .with_prompt("HTTP password")
                .interact()
                .context("Failed to read password")?,
        )
    };
    if password.as_deref().is_some_and(str::is_empty) {
        bail!("Password must not be empty");
    }

    let mut host_config = HostConfig::new(url);
    host_config.username = Some(username.clone());
    host_config.use_netrc = args.netrc;

    let options = match &password {
        Some(password) => host_config.client_options(Some(password.clone())),
        None => host_config.client_options(resolve_password(&host, None, true)?),
    };
    let client = GerritClient::with_options(options)?;
    let account = client
        .accounts()
        .get("self", false)
        .await
        .context("Could not verify the credentials")?;

    if let Some(password) = &password {
        KeyringStore::new().store(&host, password)?;
    }

    let mut config = Config::load()?;
    config.set_host(&host, host_config);
    if config.core.default_host.is_none() {
        config.core.default_host = Some(host.clone());
    }
    config.save()?;

    let name = account
        .field_str("name")
        .map(str::to_string)
        .unwrap_or(username);
    println!("Logged in to {} as {}", host, name);
    Ok(())
}

fn logout(global: &GlobalOptions, args: &LogoutArgs) -> Result<()> {
    let mut config = Config::load()?;
    let host = args
        .host
        .as_deref()
        .or(global.host.as_deref())
        .map(normalize_host)
        .or_else(|| config.resolve_host(None))
        .context("No host to log out of")?;

    KeyringStore::new().delete(&host)?;
    if config.remove_host(&host).is_none() {
        bail!("Not logged in to {}", host);
    }
    if config.core.default_host.as_deref() == Some(host.as_str()) {
        config.core.default_host = None;
    }
    config.save()?;

    println!("Logged out of {}", host);
    Ok(())
}

fn status() -> Result<()> {
    let config = Config::load()?;
    if config.hosts.is_empty() {
        println!("Not logged in to any Gerrit hosts");
        println!("Run 'gerrit auth login' to authenticate");
        return Ok(());
    }

    let keyring = KeyringStore::new();
    let color = console::colors_enabled();
    for (host, host_config) in &config.hosts {
        let default = config.core.default_host.as_deref() == Some(host.as_str());
        println!("{}{}", host, if default { " (default)" } else { "" });
        print_field("  url", &host_config.url, color);
        if let Some(username) = &host_config.username {
            print_field("  username", username, color);
        }
        let source = if host_config.use_netrc {
            "netrc"
        } else if keyring.get(host)?.is_some() {
            "keyring"
        } else {
            "none"
        };
        print_field("  password", source, color);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    #[test]
    fn test_parse_login() {
        let cli = Cli::parse_from([
            "gerrit",
            "auth",
            "login",
            "--url",
            "https://review.example.com",
            "-u",
            "jdoe",
            "--netrc",
        ]);
        let Commands::Auth(AuthCommand {
            command: AuthSubcommand::Login(args),
        }) = cli.command
        else {
            panic!("expected auth login");
        };
        assert_eq!(args.username.as_deref(), Some("jdoe"));
        assert!(args.netrc);
        assert!(!args.with_password);
    }

    #[test]
    fn test_parse_logout_host() {
        let cli = Cli::parse_from(["gerrit", "auth", "logout", "review.example.com"]);
        assert!(matches!(
            cli.command,
            Commands::Auth(AuthCommand {
                command: AuthSubcommand::Logout(LogoutArgs { host: Some(_) })
            })
        ));
    }
}
