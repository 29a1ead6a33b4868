//
//  bitbucket-client
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands.
//!
//! - Listing repositories in a workspace
//! - Viewing, creating and deleting a repository
//! - Listing watchers, forks and branches

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use super::{parse_repo_arg, require_workspace, GlobalOptions};
use crate::api::cloud::{Branch, CreateRepositoryRequest, ProjectKey, Repository};
use crate::api::common::UserRef;
use crate::output::{print_field, print_header, TableOutput, TableRow};

/// Work with repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories in a workspace
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View repository details
    View(RepoArg),

    /// Create a new repository
    Create(CreateArgs),

    /// Delete a repository
    Delete(DeleteArgs),

    /// List users watching a repository
    Watchers(ListRepoArgs),

    /// List forks of a repository
    Forks(ListRepoArgs),

    /// List branches of a repository
    Branches(ListRepoArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of repositories to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct RepoArg {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,
}

#[derive(Args, Debug)]
pub struct ListRepoArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Maximum number of entries to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Make the repository private
    #[arg(long)]
    pub private: bool,

    /// Repository description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Primary language
    #[arg(long)]
    pub language: Option<String>,

    /// Fork policy
    #[arg(long, value_parser = ["allow_forks", "no_public_forks", "no_forks"])]
    pub fork_policy: Option<String>,

    /// Project key to create the repository in
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::List(args) => self.list(args, global).await,
            RepoSubcommand::View(args) => self.view(args, global).await,
            RepoSubcommand::Create(args) => self.create(args, global).await,
            RepoSubcommand::Delete(args) => self.delete(args, global).await,
            RepoSubcommand::Watchers(args) => self.watchers(args, global).await,
            RepoSubcommand::Forks(args) => self.forks(args, global).await,
            RepoSubcommand::Branches(args) => self.branches(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.client()?;
        let workspace = require_workspace(&config)?;

        let repos = client
            .repositories(&workspace)
            .list_repositories(Some(args.limit))
            .await?;
        global.output().write_list(&repos)
    }

    async fn view(&self, args: &RepoArg, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.client()?;
        let target = parse_repo_arg(&args.repo, config.default_workspace.as_deref())?;

        let repo = client
            .repository(&target.workspace, &target.repo_slug)
            .get_repository()
            .await?;
        global.output().write(&repo)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.client()?;
        let target = parse_repo_arg(&args.repo, config.default_workspace.as_deref())?;

        let request = CreateRepositoryRequest {
            is_private: Some(args.private),
            description: args.description.clone(),
            language: args.language.clone(),
            fork_policy: args.fork_policy.clone(),
            project: args.project.clone().map(|key| ProjectKey { key }),
            ..CreateRepositoryRequest::git()
        };

        let repo = client
            .repository(&target.workspace, &target.repo_slug)
            .post_repository(&request)
            .await?;

        let output = global.output();
        output.write_success(&format!("Created repository {}", repo.full_name));
        output.write(&repo)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.client()?;
        let target = parse_repo_arg(&args.repo, config.default_workspace.as_deref())?;

        if !args.yes {
            bail!(
                "Refusing to delete {}/{} without --yes",
                target.workspace,
                target.repo_slug
            );
        }

        client
            .repository(&target.workspace, &target.repo_slug)
            .delete_repository()
            .await?;

        global.output().write_success(&format!(
            "Deleted repository {}/{}",
            target.workspace, target.repo_slug
        ));
        Ok(())
    }

    async fn watchers(&self, args: &ListRepoArgs, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.client()?;
        let target = parse_repo_arg(&args.repo, config.default_workspace.as_deref())?;

        let watchers = client
            .repository(&target.workspace, &target.repo_slug)
            .list_watchers(Some(args.limit))
            .await?;
        global.output().write_list(&watchers)
    }

    async fn forks(&self, args: &ListRepoArgs, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.client()?;
        let target = parse_repo_arg(&args.repo, config.default_workspace.as_deref())?;

        let forks = client
            .repository(&target.workspace, &target.repo_slug)
            .list_forks(Some(args.limit))
            .await?;
        global.output().write_list(&forks)
    }

    async fn branches(&self, args: &ListRepoArgs, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.client()?;
        let target = parse_repo_arg(&args.repo, config.default_workspace.as_deref())?;

        let branches = client
            .repository(&target.workspace, &target.repo_slug)
            .list_branches(Some(args.limit))
            .await?;
        global.output().write_list(&branches)
    }
}

impl TableRow for Repository {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "LANGUAGE", "VISIBILITY", "UPDATED"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.language.clone().unwrap_or_default(),
            visibility(self).to_string(),
            self.updated_on.clone().unwrap_or_default(),
        ]
    }
}

impl TableOutput for Repository {
    fn print_table(&self, color: bool) {
        print_header(&self.full_name);
        println!();

        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            println!("{}\n", desc);
        }

        print_field("UUID", &self.uuid, color);
        print_field("Visibility", visibility(self), color);
        if let Some(scm) = &self.scm {
            print_field("SCM", scm, color);
        }
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            print_field("Language", language, color);
        }
        if let Some(branch) = &self.mainbranch {
            print_field("Main branch", &branch.name, color);
        }
        if let Some(owner) = &self.owner {
            print_field("Owner", owner.label(), color);
        }
        if let Some(parent) = self.parent.as_ref().and_then(|p| p.full_name.as_deref()) {
            print_field("Forked from", parent, color);
        }
        if let Some(created) = &self.created_on {
            print_field("Created", created, color);
        }
        if let Some(updated) = &self.updated_on {
            print_field("Updated", updated, color);
        }
    }
}

impl TableRow for UserRef {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "NICKNAME", "UUID"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.label().to_string(),
            self.nickname.clone().unwrap_or_default(),
            self.uuid.clone().unwrap_or_default(),
        ]
    }
}

impl TableRow for Branch {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "COMMIT"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let hash = self
            .target
            .as_ref()
            .map(|c| c.hash.chars().take(12).collect())
            .unwrap_or_default();
        vec![self.name.clone(), hash]
    }
}

fn visibility(repo: &Repository) -> &'static str {
    if repo.is_private {
        "private"
    } else {
        "public"
    }
}
