//
//  bitbucket-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands
//!
//! Reads and writes keys of the TOML configuration file. Environment
//! overrides are not applied here, so `get` shows what the file holds.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use super::GlobalOptions;
use crate::config::Config;

/// Keys accepted by `config get` and `config set`
const VALID_KEYS: &[&str] = &[
    "api_url",
    "timeout_secs",
    "default_workspace",
    "user_agent",
    "auth.username",
    "auth.app_password",
    "auth.token",
];

/// Keys whose values are never printed
const SECRET_KEYS: &[&str] = &["auth.app_password", "auth.token"];

/// Manage configuration
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

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Value to set
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Path => {
                println!("{}", global.config_path()?.display());
                Ok(())
            }
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        validate_key(&args.key)?;
        if SECRET_KEYS.contains(&args.key.as_str()) {
            bail!("'{}' is a secret and is not printed", args.key);
        }

        let config = Config::load_from(&global.config_path()?)?;
        match config.get(&args.key) {
            Some(value) => println!("{}", value),
            None => println!("{}", style("(not set)").dim()),
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        validate_key(&args.key)?;

        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        if !config.set(&args.key, args.value.clone()) {
            bail!("Invalid value '{}' for '{}'", args.value, args.key);
        }
        config.save_to(&path)?;

        println!("{} Set {}", style("✓").green(), args.key);
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    if !VALID_KEYS.contains(&key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            VALID_KEYS.join(", ")
        );
    }
    Ok(())
}
