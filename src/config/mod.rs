//
//  cms-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module provides configuration for the content API client: the
//! in-memory [`ClientConfig`] consumed by the client, and the on-disk
//! [`Config`] file holding named connection profiles for the CLI.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/cms/config.toml`
//! - **macOS**: `~/Library/Application Support/cms/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\cms\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! default_profile = "prod"
//!
//! [profiles.prod]
//! base_path = "https://cms.example.com/api"
//! project_id = "p-123"
//! token = "cms_live_3f9a"
//! timeout_ms = 30000
//!
//! [profiles.local]
//! base_path = "http://localhost:8000/api"
//! project_id = "p-dev"
//! ```
//!
//! ## Precedence
//!
//! The CLI resolves each setting from, in order: command-line flags,
//! environment variables (`CMS_BASE_PATH`, `CMS_PROJECT_ID`, `CMS_TOKEN`,
//! `CMS_TIMEOUT_MS`), then the selected profile. See [`ProfileConfig::overlay`].
//!
//! ## Submodules
//!
//! - [`client`]: The immutable [`ClientConfig`] and its validation

mod client;

pub use client::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Name of the profile used when none is selected or set as default.
pub const DEFAULT_PROFILE: &str = "default";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const PROFILE_KEYS: [&str; 4] = ["base_path", "project_id", "token", "timeout_ms"];

/// On-disk configuration of the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Named connection profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

/// One named set of connection settings.
///
/// Every field is optional so that partial profiles can be completed by
/// flags or environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ProfileConfig {
    /// Returns a profile where every field set in `overrides` wins.
    pub fn overlay(&self, overrides: &ProfileConfig) -> ProfileConfig {
        ProfileConfig {
            base_path: overrides.base_path.clone().or_else(|| self.base_path.clone()),
            project_id: overrides
                .project_id
                .clone()
                .or_else(|| self.project_id.clone()),
            token: overrides.token.clone().or_else(|| self.token.clone()),
            timeout_ms: overrides.timeout_ms.or(self.timeout_ms),
        }
    }

    /// Converts the profile into a client configuration.
    ///
    /// Missing values become empty strings so that
    /// [`ClientConfig::validate`] reports them.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::new(
            self.base_path.clone().unwrap_or_default(),
            self.project_id.clone().unwrap_or_default(),
        )
        .with_optional_token(self.token.clone())
        .with_timeout_ms(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Returns the path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolves which profile name applies.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// Returns the requested profile, or the default one.
    pub fn profile(&self, requested: Option<&str>) -> Option<&ProfileConfig> {
        self.profiles.get(self.profile_name(requested))
    }

    /// Returns the profile commands should connect with.
    ///
    /// A profile named by `requested` or by `default_profile` must exist.
    /// When neither names one, a missing `default` profile resolves to an
    /// empty profile so flags and environment variables can supply every
    /// setting.
    pub fn resolve_profile(&self, requested: Option<&str>) -> Result<ProfileConfig> {
        if let Some(profile) = self.profile(requested) {
            return Ok(profile.clone());
        }
        if requested.is_none() && self.default_profile.is_none() {
            return Ok(ProfileConfig::default());
        }
        bail!("Profile '{}' not found", self.profile_name(requested))
    }

    /// Reads one key of a profile.
    pub fn get(&self, profile: Option<&str>, key: &str) -> Option<String> {
        let profile = self.profile(profile)?;
        match key {
            "base_path" => profile.base_path.clone(),
            "project_id" => profile.project_id.clone(),
            "token" => profile.token.clone(),
            "timeout_ms" => profile.timeout_ms.map(|t| t.to_string()),
            _ => None,
        }
    }

    /// Sets one key of a profile, creating the profile if needed.
    pub fn set(&mut self, profile: Option<&str>, key: &str, value: &str) -> Result<()> {
        let name = self.profile_name(profile).to_string();
        let mut entry = self.profiles.get(&name).cloned().unwrap_or_default();

        match key {
            "base_path" => entry.base_path = Some(value.to_string()),
            "project_id" => entry.project_id = Some(value.to_string()),
            "token" => entry.token = Some(value.to_string()),
            "timeout_ms" => {
                let timeout = value
                    .parse::<u64>()
                    .with_context(|| format!("timeout_ms must be a number, got '{}'", value))?;
                entry.timeout_ms = Some(timeout);
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                PROFILE_KEYS.join(", ")
            ),
        }

        self.profiles.insert(name, entry);
        Ok(())
    }
}
