//
//  cms-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cms_client::api::ApiError;
use cms_client::cli::{Cli, Commands};
use cms_client::exit_codes;
use cms_client::output::OutputWriter;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();
    let writer = cli.global.writer();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            report(&writer, &e);
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("CMS_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ApiError>()
        .map(exit_codes::for_error)
        .unwrap_or(exit_codes::ERROR)
}

/// Prints an error, with field-level details for validation failures.
fn report(writer: &OutputWriter, error: &anyhow::Error) {
    writer.write_error(&format!("{error:#}"));

    let Some(api) = error.downcast_ref::<ApiError>() else {
        return;
    };
    if let Some(details) = api.details().and_then(|d| d.as_array()) {
        for item in details {
            match (item.get("field"), item.get("message")) {
                (Some(field), Some(message)) => eprintln!(
                    "  {}: {}",
                    field.as_str().unwrap_or_default(),
                    message.as_str().unwrap_or_default()
                ),
                _ => eprintln!("  {}", item),
            }
        }
    }
    if let Some(context) = api.context() {
        tracing::debug!("Failed request: {} {}", context.method, context.url);
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::Collection(cmd) => cmd.run(&cli.global).await,
        Commands::Entry(cmd) => cmd.run(&cli.global).await,
        Commands::Asset(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("cms version {}", cms_client::VERSION);
            Ok(())
        }
    }
}
