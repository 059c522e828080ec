//
//  cms-client
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands
//!
//! The client is bound to a single project, so the only operation is
//! viewing it.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;

/// View the project
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// View project details
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Relations to include, comma-separated (e.g. collections)
    #[arg(long)]
    pub with: Option<String>,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let project = client.get_project(args.with.as_deref()).await?;
        global.writer().write(&project)
    }
}
