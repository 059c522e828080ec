//
//  cms-client
//  cli/asset.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Asset commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::common::PageParams;
use crate::api::content::{AssetQuery, AssetUpload};

use super::{print_page_footer, GlobalOptions};

/// Manage assets
#[derive(Args, Debug)]
pub struct AssetCommand {
    #[command(subcommand)]
    pub command: AssetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AssetSubcommand {
    /// List assets
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View an asset by id
    View(ViewArgs),

    /// View an asset by file name
    #[command(name = "view-by-name")]
    ViewByName(ViewByNameArgs),

    /// Upload a file
    Upload(UploadArgs),

    /// Delete an asset
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Search in file names
    #[arg(long)]
    pub search: Option<String>,

    /// Asset type (e.g. image, document)
    #[arg(long = "type", short = 't')]
    pub asset_type: Option<String>,

    /// Sort field, prefixed with '-' for descending order
    #[arg(long)]
    pub sort: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Assets per page
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Asset id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ViewByNameArgs {
    /// Stored file name
    pub filename: String,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub path: PathBuf,

    /// File name to upload as, defaults to the local name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// MIME type of the file (e.g. image/png)
    #[arg(long, short = 'm')]
    pub mime_type: Option<String>,

    /// Metadata as a JSON value
    #[arg(long)]
    pub metadata: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Asset id
    pub id: String,

    /// Delete permanently instead of moving to trash
    #[arg(long)]
    pub force: bool,
}

impl ListArgs {
    fn to_query(&self) -> AssetQuery {
        AssetQuery {
            search: self.search.clone(),
            asset_type: self.asset_type.clone(),
            sort: self.sort.clone(),
            page: PageParams {
                page: self.page,
                limit: self.limit,
            },
        }
    }
}

impl UploadArgs {
    async fn to_upload(&self) -> Result<AssetUpload> {
        let mut upload = AssetUpload::from_path(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if let Some(name) = &self.name {
            upload.file_name = name.clone();
        }
        if let Some(mime) = &self.mime_type {
            upload = upload.with_mime_type(mime.clone());
        }
        if let Some(metadata) = &self.metadata {
            let metadata: Value =
                serde_json::from_str(metadata).context("Metadata is not valid JSON")?;
            upload = upload.with_metadata(metadata);
        }
        Ok(upload)
    }
}

impl AssetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AssetSubcommand::List(args) => self.list(args, global).await,
            AssetSubcommand::View(args) => self.view(args, global).await,
            AssetSubcommand::ViewByName(args) => self.view_by_name(args, global).await,
            AssetSubcommand::Upload(args) => self.upload(args, global).await,
            AssetSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let page = client.get_assets(&args.to_query()).await?;

        global.writer().write_list(&page.data, "No assets found.")?;
        print_page_footer(&page, global);
        Ok(())
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let asset = client.get_asset(&args.id).await?;
        global.writer().write(&asset)
    }

    async fn view_by_name(&self, args: &ViewByNameArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let asset = client.get_asset_by_filename(&args.filename).await?;
        global.writer().write(&asset)
    }

    async fn upload(&self, args: &UploadArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let upload = args.to_upload().await?;
        let file_name = upload.file_name.clone();
        let asset = client.upload_asset(upload).await?;

        let writer = global.writer();
        writer.write_success(&format!(
            "Uploaded {} as asset {}",
            file_name,
            asset.id.as_deref().unwrap_or("-")
        ));
        writer.write(&asset)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        client.delete_asset(&args.id, args.force).await?;

        let writer = global.writer();
        if global.json {
            writer.write_value(&serde_json::json!({
                "deleted": args.id,
                "force": args.force,
            }))?;
        } else if args.force {
            writer.write_success(&format!("Permanently deleted asset {}", args.id));
        } else {
            writer.write_success(&format!("Deleted asset {}", args.id));
        }
        Ok(())
    }
}
