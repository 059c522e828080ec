//
//  cms-client
//  cli/collection.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Collection commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;

/// View collections
#[derive(Args, Debug)]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionSubcommand {
    /// List collections
    #[command(visible_alias = "ls")]
    List,

    /// View a collection and its fields
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Collection slug
    pub slug: String,
}

impl CollectionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CollectionSubcommand::List => self.list(global).await,
            CollectionSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let collections = client.get_collections().await?;
        global
            .writer()
            .write_list(&collections, "No collections found.")
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let collection = client.get_collection(&args.slug).await?;
        global.writer().write(&collection)
    }
}
