//
//  bitbucket-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration
//!
//! Client configuration stored as TOML in the platform config directory:
//!
//! - Linux: `~/.config/bbc/config.toml`
//! - macOS: `~/Library/Application Support/bbc/config.toml`
//! - Windows: `%APPDATA%\bbc\config.toml`
//!
//! ## Example file
//!
//! ```toml
//! api_url = "https://api.bitbucket.org/2.0"
//! timeout_secs = 30
//! default_workspace = "my-team"
//!
//! [auth]
//! username = "johnd"
//! app_password = "..."
//! ```
//!
//! ## Environment overrides
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `BBC_API_URL` | `api_url` |
//! | `BBC_WORKSPACE` | `default_workspace` |
//! | `BBC_USERNAME` | `auth.username` |
//! | `BBC_APP_PASSWORD` | `auth.app_password` |
//! | `BBC_TOKEN` | `auth.token` |

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::AuthCredential;

/// Bitbucket Cloud API root.
pub const DEFAULT_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the REST API, without a trailing slash.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout. `None` leaves requests without a deadline.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Workspace used when a command does not name one.
    #[serde(default)]
    pub default_workspace: Option<String>,

    /// Overrides the `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Credentials.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// The `[auth]` table.
///
/// A `token` wins over `username` + `app_password` when both are set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bitbucket username, for app password authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// App password paired with `username`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_password: Option<String>,

    /// OAuth or access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: None,
            default_workspace: None,
            user_agent: None,
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration file, then applies environment overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads the configuration file at `path`, without environment overrides.
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

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "bbc")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies overrides from `lookup`, normally `std::env::var`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BBC_API_URL") {
            self.api_url = url;
        }
        if let Some(workspace) = lookup("BBC_WORKSPACE") {
            self.default_workspace = Some(workspace);
        }
        if let Some(username) = lookup("BBC_USERNAME") {
            self.auth.username = Some(username);
        }
        if let Some(password) = lookup("BBC_APP_PASSWORD") {
            self.auth.app_password = Some(password);
        }
        if let Some(token) = lookup("BBC_TOKEN") {
            self.auth.token = Some(token);
        }
    }

    /// The credential described by the `[auth]` table, if complete.
    pub fn credential(&self) -> Option<AuthCredential> {
        if let Some(token) = &self.auth.token {
            return Some(AuthCredential::bearer(token.clone()));
        }
        match (&self.auth.username, &self.auth.app_password) {
            (Some(username), Some(password)) => {
                Some(AuthCredential::app_password(username.clone(), password.clone()))
            }
            _ => None,
        }
    }

    /// The request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Gets a setting by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_url" => Some(self.api_url.clone()),
            "timeout_secs" => self.timeout_secs.map(|t| t.to_string()),
            "default_workspace" => self.default_workspace.clone(),
            "user_agent" => self.user_agent.clone(),
            "auth.username" => self.auth.username.clone(),
            _ => None,
        }
    }

    /// Sets a setting by key.
    ///
    /// Returns `false` for unknown keys or values that do not parse.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "api_url" => {
                self.api_url = value.trim_end_matches('/').to_string();
                true
            }
            "timeout_secs" => match value.parse() {
                Ok(secs) => {
                    self.timeout_secs = Some(secs);
                    true
                }
                Err(_) => false,
            },
            "default_workspace" => {
                self.default_workspace = Some(value);
                true
            }
            "user_agent" => {
                self.user_agent = Some(value);
                true
            }
            "auth.username" => {
                self.auth.username = Some(value);
                true
            }
            "auth.app_password" => {
                self.auth.app_password = Some(value);
                true
            }
            "auth.token" => {
                self.auth.token = Some(value);
                true
            }
            _ => false,
        }
    }
}
