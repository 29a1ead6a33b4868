//
//  bitbucket-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod commit;
mod config;
mod pr;
mod repo;

pub use commit::CommitCommand;
pub use config::ConfigCommand;
pub use pr::PrCommand;
pub use repo::RepoCommand;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::api::BitbucketClient;
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// bbc - Query Bitbucket Cloud from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bbc",
    version,
    about = "Query Bitbucket Cloud from the command line",
    long_about = "bbc reads and updates repositories, commits and pull requests \
                  through the Bitbucket Cloud REST API v2.0.",
    propagate_version = true,
    after_help = "Use 'bbc <command> --help' for more information about a command."
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
    /// Workspace used when a repository is given without one
    #[arg(long, short = 'w', global = true, env = "BBC_WORKSPACE")]
    pub workspace: Option<String>,

    /// Root of the REST API
    #[arg(long, global = true, env = "BBC_API_URL")]
    pub api_url: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "BBC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Path of the configuration file in effect.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// Loads configuration, then applies environment and flag overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_from(&self.config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        if let Some(url) = &self.api_url {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(workspace) = &self.workspace {
            config.default_workspace = Some(workspace.clone());
        }
        Ok(config)
    }

    /// Builds a client and returns it with the configuration it came from.
    pub fn client(&self) -> Result<(BitbucketClient, Config)> {
        let config = self.load_config()?;
        let client = BitbucketClient::from_config(&config)?;
        tracing::debug!("Using API at {}", client.base_url());
        Ok((client, config))
    }

    /// Output writer for the selected format.
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Work with commits, approvals and build statuses
    #[command(visible_alias = "c")]
    Commit(CommitCommand),

    /// Work with pull requests
    Pr(PrCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

/// A repository named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub workspace: String,
    pub repo_slug: String,
}

/// Parses `WORKSPACE/REPO`, or `REPO` with the default workspace.
pub fn parse_repo_arg(arg: &str, default_workspace: Option<&str>) -> Result<RepoTarget> {
    let arg = arg.trim().trim_matches('/');
    match arg.split_once('/') {
        Some((workspace, repo_slug)) => {
            if workspace.is_empty() || repo_slug.is_empty() || repo_slug.contains('/') {
                bail!("Invalid repository '{}'. Expected WORKSPACE/REPO", arg);
            }
            Ok(RepoTarget {
                workspace: workspace.to_string(),
                repo_slug: repo_slug.to_string(),
            })
        }
        None if arg.is_empty() => bail!("Repository required. Expected WORKSPACE/REPO"),
        None => match default_workspace {
            Some(workspace) => Ok(RepoTarget {
                workspace: workspace.to_string(),
                repo_slug: arg.to_string(),
            }),
            None => bail!(
                "No workspace for '{}'. Use WORKSPACE/REPO, --workspace or set default_workspace",
                arg
            ),
        },
    }
}

/// The workspace from flags or configuration.
pub fn require_workspace(config: &Config) -> Result<String> {
    match &config.default_workspace {
        Some(workspace) => Ok(workspace.clone()),
        None => bail!("Workspace required. Use --workspace or set default_workspace"),
    }
}
