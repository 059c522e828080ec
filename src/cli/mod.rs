//
//  cms-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod asset;
mod collection;
mod config;
mod entry;
mod project;

pub use asset::AssetCommand;
pub use collection::CollectionCommand;
pub use config::ConfigCommand;
pub use entry::EntryCommand;
pub use project::ProjectCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::common::Paginated;
use crate::api::CmsClient;
use crate::config::{ClientConfig, Config, ProfileConfig};
use crate::output::{OutputFormat, OutputWriter};

/// CMS CLI - Work with content from the command line
#[derive(Parser, Debug)]
#[command(
    name = "cms",
    version,
    about = "Work with a headless CMS from the command line",
    long_about = "cms is a client for the content-management REST API.\n\n\
                  It reads projects and collections, and manages entries and assets.",
    propagate_version = true,
    after_help = "Use 'cms <command> --help' for more information about a command."
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
    /// API base URL, e.g. https://cms.example.com/api
    #[arg(long, global = true, env = "CMS_BASE_PATH")]
    pub base_path: Option<String>,

    /// Project identifier sent with every request
    #[arg(long, short = 'p', global = true, env = "CMS_PROJECT_ID")]
    pub project_id: Option<String>,

    /// API token
    #[arg(long, global = true, env = "CMS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "CMS_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Configuration profile to use
    #[arg(long, global = true, env = "CMS_PROFILE")]
    pub profile: Option<String>,

    /// Path of the configuration file
    #[arg(long, global = true, env = "CMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View the project
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// View collections
    #[command(visible_alias = "col")]
    Collection(CollectionCommand),

    /// Manage entries
    Entry(EntryCommand),

    /// Manage assets
    Asset(AssetCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

impl GlobalOptions {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.output_format())
    }

    /// Settings given as flags or environment variables.
    pub fn overrides(&self) -> ProfileConfig {
        ProfileConfig {
            base_path: self.base_path.clone(),
            project_id: self.project_id.clone(),
            token: self.token.clone(),
            timeout_ms: self.timeout_ms,
        }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// Resolves the client configuration: flags and environment over the
    /// selected profile.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = self.load_config()?;
        let profile = config.resolve_profile(self.profile.as_deref())?;
        let resolved = profile.overlay(&self.overrides());
        tracing::debug!(
            "Resolved profile '{}' (base_path: {:?})",
            config.profile_name(self.profile.as_deref()),
            resolved.base_path
        );
        Ok(resolved.to_client_config())
    }

    pub fn client(&self) -> Result<CmsClient> {
        Ok(CmsClient::new(self.client_config()?)?)
    }
}

/// Prints the page position under a list table.
pub(crate) fn print_page_footer<T>(page: &Paginated<T>, global: &GlobalOptions) {
    if global.json || page.data.is_empty() {
        return;
    }
    let position = page.meta.as_ref().and_then(|m| m.current_page.zip(m.last_page));
    match (position, page.total()) {
        (Some((current, last)), Some(total)) => {
            println!("Page {} of {} ({} total)", current, last, total)
        }
        (Some((current, last)), None) => println!("Page {} of {}", current, last),
        (None, Some(total)) => println!("Showing {} of {}", page.data.len(), total),
        (None, None) => println!("Showing {} item(s)", page.data.len()),
    }
    if let Some(next) = page.next_page() {
        println!("Use --page {} for more.", next);
    }
}
