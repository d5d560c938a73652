//
//  gerrit-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod change;
mod completion;
mod config;
mod project;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use change::ChangeCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use project::ProjectCommand;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::GerritClient;
use crate::auth::resolve_password;
use crate::config::{host_url, Config, HostConfig};
use crate::output::{OutputFormat, OutputWriter};

/// gerrit - Work with Gerrit Code Review from the command line
#[derive(Parser, Debug)]
#[command(
    name = "gerrit",
    version,
    about = "Work with Gerrit Code Review from the command line",
    long_about = "gerrit is a CLI for the Gerrit Code Review REST API.\n\n\
                  It brings projects, changes and raw API access to your terminal.",
    propagate_version = true,
    after_help = "Use 'gerrit <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Gerrit host, e.g. review.example.com
    #[arg(long, global = true, env = "GERRIT_HOST")]
    pub host: Option<String>,

    /// Output format (defaults to core.output)
    #[arg(long, short = 'o', global = true, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with a Gerrit server
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Work with projects
    #[command(visible_alias = "p")]
    Project(ProjectCommand),

    /// Work with changes
    #[command(visible_alias = "c")]
    Change(ChangeCommand),

    /// Make raw REST API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print the Gerrit server version
    Version,
}

impl GlobalOptions {
    /// Output writer for the selected or configured format.
    pub fn writer(&self, config: &Config) -> OutputWriter {
        let format = self
            .output
            .or_else(|| config.core.output.parse().ok())
            .unwrap_or_default();
        OutputWriter::new(format)
    }
}

/// Builds a client for the selected host.
///
/// The password comes from `GERRIT_PASSWORD`, the keyring or `.netrc`, in
/// that order. Unconfigured hosts are reached anonymously over HTTPS, and
/// `GERRIT_USERNAME` overrides the configured username.
pub async fn connect(global: &GlobalOptions, config: &Config) -> Result<GerritClient> {
    let host = config.resolve_host(global.host.as_deref()).context(
        "No Gerrit host selected. Pass --host, set GERRIT_HOST or run 'gerrit auth login'",
    )?;
    let mut host_config = config
        .host_config(&host)
        .cloned()
        .unwrap_or_else(|| HostConfig::new(host_url(&host)));
    if let Ok(username) = std::env::var("GERRIT_USERNAME") {
        host_config.username = Some(username);
    }

    let password = match &host_config.username {
        Some(_) => resolve_password(
            &host,
            std::env::var("GERRIT_PASSWORD").ok(),
            host_config.use_netrc,
        )?,
        None => None,
    };
    debug!(
        "connecting to {} ({})",
        host_config.url,
        if password.is_some() { "authenticated" } else { "anonymous" }
    );

    Ok(GerritClient::with_options(
        host_config.client_options(password),
    )?)
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let global = &self.global;
        match &self.command {
            Commands::Auth(cmd) => cmd.run(global).await,
            Commands::Project(cmd) => cmd.run(global).await,
            Commands::Change(cmd) => cmd.run(global).await,
            Commands::Api(cmd) => cmd.run(global).await,
            Commands::Config(cmd) => cmd.run(global).await,
            Commands::Completion(cmd) => cmd.run(global).await,
            Commands::Version => {
                let config = Config::load()?;
                let client = connect(global, &config).await?;
                println!("{}", client.version().await?);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_output() {
        let cli = Cli::parse_from(["gerrit", "--output", "json", "version"]);
        assert_eq!(cli.global.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_writer_falls_back_to_config() {
        let mut config = Config::default();
        config.core.output = "yaml".into();
        let global = GlobalOptions::default();
        assert_eq!(global.writer(&config).format(), OutputFormat::Yaml);
        let global = GlobalOptions {
            output: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert_eq!(global.writer(&config).format(), OutputFormat::Json);
    }

    #[tokio::test]
    async fn test_connect_anonymous_host() {
        let global = GlobalOptions {
            host: Some("review.example.com".into()),
            ..Default::default()
        };
        let client = connect(&global, &Config::default()).await.unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.base_url(), "https://review.example.com");
    }

    #[tokio::test]
    async fn test_connect_without_host_fails() {
        let err = connect(&GlobalOptions::default(), &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No Gerrit host selected"));
    }
}
