//
//  cms-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes connection settings of the profiles stored in the
//! configuration file. `--profile` selects the profile; without it the
//! file's `default_profile` (or `default`) is used.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::auth::ApiToken;
use crate::config::{ProfileConfig, PROFILE_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all profiles and their values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key (base_path, project_id, token, timeout_ms)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (base_path, project_id, token, timeout_ms)
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Profile values with the token redacted.
fn redacted(profile: &ProfileConfig) -> ProfileConfig {
    ProfileConfig {
        token: profile
            .token
            .as_deref()
            .map(|t| ApiToken::new(t).redacted()),
        ..profile.clone()
    }
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        if !PROFILE_KEYS.contains(&args.key.as_str()) {
            anyhow::bail!(
                "Unknown config key '{}'. Valid keys: {}",
                args.key,
                PROFILE_KEYS.join(", ")
            );
        }

        let config = global.load_config()?;
        let value = config.get(global.profile.as_deref(), &args.key);

        if global.json {
            let result = serde_json::json!({
                "profile": config.profile_name(global.profile.as_deref()),
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = global.load_config()?;
        config.set(global.profile.as_deref(), &args.key, &args.value)?;
        config.save_to(&path)?;

        let profile = config.profile_name(global.profile.as_deref()).to_string();
        if global.json {
            let result = serde_json::json!({
                "success": true,
                "profile": profile,
                "key": args.key,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} for profile '{}'",
                style("✓").green(),
                args.key,
                profile
            );
        }
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let active = config.profile_name(global.profile.as_deref()).to_string();

        if global.json {
            let profiles: std::collections::BTreeMap<_, _> = config
                .profiles
                .iter()
                .map(|(name, profile)| (name.clone(), redacted(profile)))
                .collect();
            let result = serde_json::json!({
                "default_profile": config.default_profile,
                "profiles": profiles,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        if config.profiles.is_empty() {
            println!("No profiles configured. Use 'cms config set <key> <value>' to add one.");
            return Ok(());
        }

        for (name, profile) in &config.profiles {
            let marker = if *name == active { " (active)" } else { "" };
            println!("{}{}", style(format!("[{}]", name)).bold(), marker);
            let profile = redacted(profile);
            let values = [
                profile.base_path,
                profile.project_id,
                profile.token,
                profile.timeout_ms.map(|t| t.to_string()),
            ];
            for (key, value) in PROFILE_KEYS.iter().zip(values) {
                if let Some(value) = value {
                    println!("  {} = {}", key, value);
                }
            }
            println!();
        }
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        if global.json {
            let result = serde_json::json!({ "path": path.display().to_string() });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}
