//
//  bitbucket-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Client Library
//!
//! A typed async client for the Bitbucket Cloud REST API v2.0, and the
//! library behind the `bbc` command-line tool.
//!
//! ## Overview
//!
//! Bitbucket returns collections one page at a time, each page linking to
//! the next. This library walks those links for you, stops as soon as a
//! caller-supplied maximum is reached, and decides per operation whether a
//! missing resource is an error or an empty value.
//!
//! ## Features
//!
//! - **Repositories**: get, create, update and delete; watchers, forks and branches
//! - **Commits**: filtered history, approvals and build statuses
//! - **Pull Requests**: activity, comments, commits, diff, review actions
//! - **Pagination**: bounded, strictly sequential traversal of `next` links
//! - **Authentication**: OAuth 2.0 access tokens and app passwords
//!
//! ## Module Structure
//!
//! - [`api`]: client, transport, resources, errors and pagination
//! - [`auth`]: credentials and how they are attached to requests
//! - [`config`]: configuration file and environment overrides
//! - [`cli`]: command-line interface definitions using clap
//! - [`output`]: output formatting (Table, JSON)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_client::api::cloud::CommitsFilter;
//! use bitbucket_client::{BitbucketClient, Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = BitbucketClient::from_config(&config)?;
//!
//! // Commits on the feature branch that are not yet on master
//! let filter = CommitsFilter::new().exclude("master");
//! let commits = client
//!     .repository("my-team", "my-repo")
//!     .list_commits(Some("feature"), &filter, Some(100))
//!     .await?;
//! println!("{} commits ahead", commits.len());
//! # Ok(())
//! # }
//! ```

/// API client for Bitbucket Cloud.
///
/// Contains the [`BitbucketClient`], the HTTP transport seam, the paged
/// collection walker and the typed resources for repositories, commits,
/// pull requests and users.
pub mod api;

/// Authentication credentials.
///
/// Handles OAuth 2.0 bearer tokens and app passwords (HTTP Basic).
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Configuration file management.
///
/// Manages the configuration stored in platform-specific locations:
/// - Linux: `~/.config/bbc/config.toml`
/// - macOS: `~/Library/Application Support/bbc/config.toml`
/// - Windows: `%APPDATA%\bbc\config.toml`
pub mod config;

/// Output formatting for the CLI.
///
/// - Table format: Human-readable tables for interactive use
/// - JSON format: Structured output for scripting and automation
pub mod output;

/// Re-export of the API client.
pub use api::BitbucketClient;

/// Re-export of the API error type.
pub use api::ApiError;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use bitbucket_client::Cli;
///
/// let cli = Cli::parse();
/// // Handle cli.command...
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_client::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// if let Some(workspace) = config.get("default_workspace") {
///     println!("Default workspace: {}", workspace);
/// }
/// ```
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "bbc";

/// Application version constant.
///
/// Derived from Cargo.toml at compile time. Also sent in the `User-Agent`
/// header as `bbc/<version>`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_client::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::NOT_FOUND);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// Use `--help` to see correct usage.
    pub const USAGE: i32 = 2;

    /// Authentication required, failed, expired, or not permitted (HTTP 401 or 403).
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested repository, commit or build status does not exist
    /// or is not visible to the authenticated user.
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded.
    ///
    /// Wait before retrying.
    pub const RATE_LIMIT: i32 = 32;

    /// Exit code for a failed command.
    ///
    /// Looks for an [`ApiError`] in the error chain; anything else is
    /// [`ERROR`].
    pub fn for_error(err: &anyhow::Error) -> i32 {
        match err.chain().find_map(|e| e.downcast_ref::<ApiError>()) {
            Some(ApiError::AuthFailed(_))
            | Some(ApiError::Forbidden(_))
            | Some(ApiError::CredentialExpired) => AUTH_ERROR,
            Some(ApiError::NotFound(_)) => NOT_FOUND,
            Some(ApiError::RateLimited(_)) => RATE_LIMIT,
            _ => ERROR,
        }
    }

}
