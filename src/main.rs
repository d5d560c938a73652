//
//  gerrit-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gerrit_client::exit_codes;
use gerrit_client::Cli;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match cli.run().await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

/// Logging goes to stderr; `GERRIT_DEBUG` takes an env-filter directive.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("GERRIT_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
