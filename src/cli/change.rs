//
//  gerrit-client
//  cli/change.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Change commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::api::changes::RevisionId;
use crate::api::Resource;
use crate::config::Config;

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct ChangeCommand {
    #[command(subcommand)]
    pub command: ChangeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChangeSubcommand {
    /// Search changes, e.g. `gerrit change search status:open owner:self`
    #[command(visible_alias = "ls")]
    Search(SearchArgs),

    /// Show a change
    #[command(visible_alias = "view")]
    Get(GetArgs),

    /// List the files of a revision
    Files(FilesArgs),

    /// Vote on and comment the current revision
    Review(ReviewArgs),

    /// Abandon a change
    Abandon(IdArgs),

    /// Restore an abandoned change
    Restore(IdArgs),

    /// Submit a change
    Submit(IdArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query terms, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    #[arg(long, short = 'L', default_value_t = 25)]
    pub limit: u32,

    /// Additional output options, e.g. LABELS
    #[arg(long = "option", short = 'O')]
    pub options: Vec<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Change number, Change-Id or project~number
    pub id: String,

    /// Include reviewers and label details
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    pub id: String,

    /// Patch set number or commit; current when omitted
    #[arg(long, short = 'r')]
    pub revision: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReviewArgs {
    pub id: String,

    /// Vote as LABEL=SCORE, e.g. Code-Review=+1
    #[arg(long, short = 'l')]
    pub label: Vec<String>,

    #[arg(long, short = 'm')]
    pub message: Option<String>,
}

impl ReviewArgs {
    fn input(&self) -> Result<Value> {
        let mut labels = serde_json::Map::new();
        for vote in &self.label {
            let (label, score) = vote
                .split_once('=')
                .with_context(|| format!("Invalid vote {}. Expected LABEL=SCORE", vote))?;
            let score: i64 = score
                .trim_start_matches('+')
                .parse()
                .with_context(|| format!("Invalid score in {}", vote))?;
            labels.insert(label.to_string(), json!(score));
        }

        let mut input = json!({ "labels": labels });
        if let Some(message) = &self.message {
            input["message"] = json!(message);
        }
        Ok(input)
    }
}

impl ChangeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = connect(global, &config).await?;
        let writer = global.writer(&config);
        let changes = client.changes();

        match &self.command {
            ChangeSubcommand::Search(args) => {
                let query = args.query.join(" ");
                let options: Vec<&str> = args.options.iter().map(String::as_str).collect();
                let result = changes
                    .search(&[query.as_str()], &options, Some(args.limit), None)
                    .await?;
                writer.write_value(&result, &["_number", "project", "subject", "status", "owner"])
            }
            ChangeSubcommand::Get(args) => {
                let change = changes.get(&args.id, args.detailed, &[]).await?;
                writer.write_value(change.json(), &[])
            }
            ChangeSubcommand::Files(args) => {
                let change = changes.get(&args.id, false, &[]).await?;
                let revision = match &args.revision {
                    Some(id) => change
                        .revision(RevisionId::from(id.as_str()))
                        .await?
                        .with_context(|| format!("Patch set {} does not exist", id))?,
                    None => change.current_revision(),
                };
                let files: Vec<Value> = revision
                    .files()
                    .iter()
                    .await?
                    .map(|file| file.json().clone())
                    .collect();
                writer.write_value(
                    &Value::Array(files),
                    &["path", "status", "lines_inserted", "lines_deleted"],
                )
            }
            ChangeSubcommand::Review(args) => {
                let change = changes.get(&args.id, false, &[]).await?;
                let result = change.current_revision().set_review(&args.input()?).await?;
                writer.write_value(&result, &[])
            }
            ChangeSubcommand::Abandon(args) => {
                changes.get(&args.id, false, &[]).await?.abandon().await?;
                writer.write_success(&format!("Abandoned change {}", args.id));
                Ok(())
            }
            ChangeSubcommand::Restore(args) => {
                changes.get(&args.id, false, &[]).await?.restore().await?;
                writer.write_success(&format!("Restored change {}", args.id));
                Ok(())
            }
            ChangeSubcommand::Submit(args) => {
                changes.get(&args.id, false, &[]).await?.submit(None).await?;
                writer.write_success(&format!("Submitted change {}", args.id));
                Ok(())
            }
        }
    }
}
