//
//  cms-client
//  cli/entry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Entry commands
//!
//! Entry field values are given as a JSON object, either inline with
//! `--data` or from a file with `--data-file`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use crate::api::content::{EntryInput, EntryPatch, EntryQuery, EntryState};
use crate::api::common::PageParams;

use super::{print_page_footer, GlobalOptions};

/// Manage entries
#[derive(Args, Debug)]
pub struct EntryCommand {
    #[command(subcommand)]
    pub command: EntrySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EntrySubcommand {
    /// List entries of a collection
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View an entry
    View(ViewArgs),

    /// Create an entry
    Create(CreateArgs),

    /// Replace an entry
    Update(UpdateArgs),

    /// Update some fields of an entry
    Patch(PatchArgs),

    /// Delete an entry
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection slug
    pub collection: String,

    /// Only entries in this locale
    #[arg(long, short = 'l')]
    pub locale: Option<String>,

    /// Only entries in this state (draft, published, scheduled)
    #[arg(long, short = 's')]
    pub state: Option<EntryState>,

    /// Sort field, prefixed with '-' for descending order
    #[arg(long)]
    pub sort: Option<String>,

    /// Full-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Relations to include, comma-separated
    #[arg(long)]
    pub with: Option<String>,

    /// Field filter as FIELD=VALUE, repeatable
    #[arg(long = "filter", short = 'f', value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Entries per page
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Collection slug
    pub collection: String,

    /// Entry UUID
    pub uuid: String,
}

/// Body options shared by create, update and patch.
#[derive(Args, Debug)]
pub struct BodyArgs {
    /// Field values as a JSON object
    #[arg(long, short = 'd', conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read field values from a JSON file
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Entry locale
    #[arg(long, short = 'l')]
    pub locale: Option<String>,

    /// Entry state (draft, published, scheduled)
    #[arg(long, short = 's')]
    pub state: Option<EntryState>,

    /// Publication time, RFC 3339 (e.g. 2026-03-01T09:00:00Z)
    #[arg(long)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Collection slug
    pub collection: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Collection slug
    pub collection: String,

    /// Entry UUID
    pub uuid: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args, Debug)]
pub struct PatchArgs {
    /// Collection slug
    pub collection: String,

    /// Entry UUID
    pub uuid: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Collection slug
    pub collection: String,

    /// Entry UUID
    pub uuid: String,

    /// Delete permanently instead of moving to trash
    #[arg(long)]
    pub force: bool,
}

fn parse_filter(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((field, v)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), v.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{}'", value)),
    }
}

/// Parses entry field values from inline JSON or a file.
fn read_data(inline: Option<&str>, file: Option<&Path>) -> Result<Option<Map<String, Value>>> {
    let text = match (inline, file) {
        (Some(inline), _) => inline.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => return Ok(None),
    };

    match serde_json::from_str::<Value>(&text).context("Entry data is not valid JSON")? {
        Value::Object(map) => Ok(Some(map)),
        _ => bail!("Entry data must be a JSON object"),
    }
}

impl BodyArgs {
    fn to_input(&self) -> Result<EntryInput> {
        let data = read_data(self.data.as_deref(), self.data_file.as_deref())?
            .ok_or_else(|| anyhow::anyhow!("Entry data is required. Use --data or --data-file."))?;
        Ok(EntryInput {
            locale: self.locale.clone(),
            state: self.state,
            published_at: self.published_at,
            data,
        })
    }

    fn to_patch(&self) -> Result<EntryPatch> {
        let patch = EntryPatch {
            locale: self.locale.clone(),
            state: self.state,
            published_at: self.published_at,
            data: read_data(self.data.as_deref(), self.data_file.as_deref())?,
        };
        if patch == EntryPatch::default() {
            bail!("Nothing to update. Use --data, --locale, --state or --published-at.");
        }
        Ok(patch)
    }
}

impl ListArgs {
    fn to_query(&self) -> EntryQuery {
        EntryQuery {
            locale: self.locale.clone(),
            state: self.state,
            sort: self.sort.clone(),
            search: self.search.clone(),
            with: self.with.clone(),
            page: PageParams {
                page: self.page,
                limit: self.limit,
            },
            filters: self.filters.clone(),
        }
    }
}

impl EntryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            EntrySubcommand::List(args) => self.list(args, global).await,
            EntrySubcommand::View(args) => self.view(args, global).await,
            EntrySubcommand::Create(args) => self.create(args, global).await,
            EntrySubcommand::Update(args) => self.update(args, global).await,
            EntrySubcommand::Patch(args) => self.patch(args, global).await,
            EntrySubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let page = client.get_entries(&args.collection, &args.to_query()).await?;

        global.writer().write_list(
            &page.data,
            &format!("No entries found in '{}'.", args.collection),
        )?;
        print_page_footer(&page, global);
        Ok(())
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let entry = client.get_entry(&args.collection, &args.uuid).await?;
        global.writer().write(&entry)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let input = args.body.to_input()?;
        let client = global.client()?;
        let entry = client.create_entry(&args.collection, &input).await?;

        let writer = global.writer();
        writer.write_success(&format!(
            "Created entry {} in '{}'",
            entry.uuid.as_deref().unwrap_or("-"),
            args.collection
        ));
        writer.write(&entry)
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let input = args.body.to_input()?;
        let client = global.client()?;
        let entry = client
            .update_entry(&args.collection, &args.uuid, &input)
            .await?;

        let writer = global.writer();
        writer.write_success(&format!("Updated entry {}", args.uuid));
        writer.write(&entry)
    }

    async fn patch(&self, args: &PatchArgs, global: &GlobalOptions) -> Result<()> {
        let patch = args.body.to_patch()?;
        let client = global.client()?;
        let entry = client
            .patch_entry(&args.collection, &args.uuid, &patch)
            .await?;

        let writer = global.writer();
        writer.write_success(&format!("Updated entry {}", args.uuid));
        writer.write(&entry)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        client
            .delete_entry(&args.collection, &args.uuid, args.force)
            .await?;

        let writer = global.writer();
        if global.json {
            writer.write_value(&serde_json::json!({
                "deleted": args.uuid,
                "force": args.force,
            }))?;
        } else if args.force {
            writer.write_success(&format!("Permanently deleted entry {}", args.uuid));
        } else {
            writer.write_success(&format!("Deleted entry {}", args.uuid));
        }
        Ok(())
    }
}
