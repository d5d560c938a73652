//
//  gerrit-client
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::api::projects::ProjectListOptions;
use crate::api::{Pattern, Resource};
use crate::config::Config;

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a project
    #[command(visible_alias = "view")]
    Get(NameArgs),

    /// Create a project
    Create(CreateArgs),

    /// List branches of a project
    Branches(RefListArgs),

    /// List tags of a project
    Tags(RefListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Names starting with this prefix
    #[arg(long, conflicts_with_all = ["matching", "regex"])]
    pub prefix: Option<String>,

    /// Names containing this substring
    #[arg(long = "match", conflicts_with = "regex")]
    pub matching: Option<String>,

    /// Names matching this regular expression
    #[arg(long)]
    pub regex: Option<String>,

    /// ACTIVE, READ_ONLY or HIDDEN
    #[arg(long)]
    pub state: Option<String>,

    /// Include hidden projects
    #[arg(long)]
    pub all: bool,

    #[arg(long, short = 'L', default_value_t = 25)]
    pub limit: u32,

    #[arg(long, short = 'S', default_value_t = 0)]
    pub skip: u32,
}

impl ListArgs {
    fn pattern(&self) -> Option<Pattern> {
        if let Some(prefix) = &self.prefix {
            Some(Pattern::Prefix(prefix.clone()))
        } else if let Some(substring) = &self.matching {
            Some(Pattern::Match(substring.clone()))
        } else {
            self.regex.clone().map(Pattern::Regex)
        }
    }

    fn options(&self) -> ProjectListOptions {
        ProjectListOptions {
            is_all: self.all,
            limit: self.limit,
            skip: self.skip,
            pattern: self.pattern(),
            description: true,
            state: self.state.clone(),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Project name, e.g. platform/build
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Parent project to inherit access rights from
    #[arg(long)]
    pub parent: Option<String>,

    /// Create an empty initial commit
    #[arg(long)]
    pub empty_commit: bool,
}

#[derive(Args, Debug)]
pub struct RefListArgs {
    pub name: String,

    /// Ref names matching this regular expression
    #[arg(long)]
    pub regex: Option<String>,

    #[arg(long, short = 'L', default_value_t = 25)]
    pub limit: u32,

    #[arg(long, short = 'S', default_value_t = 0)]
    pub skip: u32,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = connect(global, &config).await?;
        let writer = global.writer(&config);

        match &self.command {
            ProjectSubcommand::List(args) => {
                if args.all && args.state.is_some() {
                    bail!("--all can not be combined with --state");
                }
                let projects = client.projects().list(&args.options()).await?;
                writer.write_value(&projects, &["state", "description"])
            }
            ProjectSubcommand::Get(args) => {
                let project = client.projects().get(&args.name).await?;
                writer.write_value(project.json(), &[])
            }
            ProjectSubcommand::Create(args) => {
                let mut input = json!({ "create_empty_commit": args.empty_commit });
                if let Some(description) = &args.description {
                    input["description"] = json!(description);
                }
                if let Some(parent) = &args.parent {
                    input["parent"] = json!(parent);
                }
                let project = client.projects().create(&args.name, &input).await?;
                writer.write_success(&format!("Created project {}", project.id()));
                Ok(())
            }
            ProjectSubcommand::Branches(args) => {
                let pattern = args.regex.clone().map(Pattern::Regex);
                let branches = client
                    .projects()
                    .get(&args.name)
                    .await?
                    .branches()
                    .list(pattern.as_ref(), args.limit, args.skip)
                    .await?;
                writer.write_value(&branches, &["ref", "revision"])
            }
            ProjectSubcommand::Tags(args) => {
                let pattern = args.regex.clone().map(Pattern::Regex);
                let tags = client
                    .projects()
                    .get(&args.name)
                    .await?
                    .tags()
                    .list(pattern.as_ref(), Some(args.limit), Some(args.skip))
                    .await?;
                writer.write_value(&tags, &["ref", "revision", "message"])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    fn list_args(argv: &[&str]) -> ListArgs {
        let mut full = vec!["gerrit", "project", "list"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Project(ProjectCommand {
                command: ProjectSubcommand::List(args),
            }) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_list_pattern_selection() {
        assert_eq!(
            list_args(&["--prefix", "platform/"]).pattern(),
            Some(Pattern::Prefix("platform/".into()))
        );
        assert_eq!(
            list_args(&["--match", "build"]).pattern(),
            Some(Pattern::Match("build".into()))
        );
        assert_eq!(list_args(&[]).pattern(), None);
    }

    #[test]
    fn test_list_options() {
        let options = list_args(&["--regex", "core.*", "-L", "10", "--all"]).options();
        assert_eq!(options.limit, 10);
        assert!(options.is_all);
        assert_eq!(options.pattern, Some(Pattern::Regex("core.*".into())));
    }

    #[test]
    fn test_conflicting_patterns_rejected() {
        let result = Cli::try_parse_from([
            "gerrit", "project", "list", "--prefix", "a", "--regex", "b",
        ]);
        assert!(result.is_err());
    }
}
