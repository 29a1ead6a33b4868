//
//  bitbucket-client
//  cli/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit commands: history, approvals and build statuses

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{parse_repo_arg, GlobalOptions, RepoTarget};
use crate::api::cloud::{BuildInfo, BuildState, Commit, CommitsFilter};
use crate::api::BitbucketClient;
use crate::output::{
    format_status, print_field, print_header, truncate, OutputFormat, TableOutput, TableRow,
};

/// Work with commits, approvals and build statuses
#[derive(Args, Debug)]
pub struct CommitCommand {
    #[command(subcommand)]
    pub command: CommitSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CommitSubcommand {
    /// List commits, newest first
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View one commit
    View(CommitArg),

    /// Approve a commit
    Approve(CommitArg),

    /// Withdraw your approval of a commit
    Unapprove(CommitArg),

    /// List build statuses reported against a commit
    Statuses(StatusesArgs),

    /// View one build status
    Status(StatusArgs),

    /// Report a build status against a commit
    SetStatus(SetStatusArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Branch whose history to list
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Include commits reachable from this branch (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude commits reachable from this branch (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Only commits touching this path
    #[arg(long)]
    pub path: Option<String>,

    /// Maximum number of commits to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct CommitArg {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Commit hash
    pub hash: String,
}

#[derive(Args, Debug)]
pub struct StatusesArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Commit hash
    pub hash: String,

    /// Maximum number of statuses to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Commit hash
    pub hash: String,

    /// Build key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Commit hash
    pub hash: String,

    /// Build key, unique per commit
    #[arg(long)]
    pub key: String,

    /// INPROGRESS, SUCCESSFUL, FAILED or STOPPED
    #[arg(long)]
    pub state: BuildState,

    /// Link to the build
    #[arg(long)]
    pub url: String,

    /// Build name
    #[arg(long)]
    pub name: Option<String>,

    /// Build description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Replace an existing status instead of reporting a new one
    #[arg(long)]
    pub update: bool,
}

impl CommitCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CommitSubcommand::List(args) => self.list(args, global).await,
            CommitSubcommand::View(args) => self.view(args, global).await,
            CommitSubcommand::Approve(args) => self.approve(args, global).await,
            CommitSubcommand::Unapprove(args) => self.unapprove(args, global).await,
            CommitSubcommand::Statuses(args) => self.statuses(args, global).await,
            CommitSubcommand::Status(args) => self.status(args, global).await,
            CommitSubcommand::SetStatus(args) => self.set_status(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let filter = build_filter(args);
        let commits = client
            .repository(&target.workspace, &target.repo_slug)
            .list_commits(args.branch.as_deref(), &filter, Some(args.limit))
            .await?;
        global.output().write_list(&commits)
    }

    async fn view(&self, args: &CommitArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let commit = client
            .repository(&target.workspace, &target.repo_slug)
            .get_commit(&args.hash)
            .await?;
        global.output().write(&commit)
    }

    async fn approve(&self, args: &CommitArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let participant = client
            .repository(&target.workspace, &target.repo_slug)
            .approve_commit(&args.hash)
            .await?;

        let output = global.output();
        output.write_success(&format!(
            "{} approved {}",
            participant.user.label(),
            short_hash(&args.hash)
        ));
        if output.format() == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&participant)?);
        }
        Ok(())
    }

    async fn unapprove(&self, args: &CommitArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        client
            .repository(&target.workspace, &target.repo_slug)
            .delete_commit_approval(&args.hash)
            .await?;
        global
            .output()
            .write_success(&format!("Removed approval of {}", short_hash(&args.hash)));
        Ok(())
    }

    async fn statuses(&self, args: &StatusesArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let statuses = client
            .repository(&target.workspace, &target.repo_slug)
            .list_build_statuses(&args.hash, Some(args.limit))
            .await?;
        global.output().write_list(&statuses)
    }

    async fn status(&self, args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let build = client
            .repository(&target.workspace, &target.repo_slug)
            .get_build_status(&args.hash, &args.key)
            .await?;
        global.output().write(&build)
    }

    async fn set_status(&self, args: &SetStatusArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let mut build = BuildInfo::new(&args.key, args.state, &args.url);
        if let Some(name) = &args.name {
            build = build.name(name);
        }
        if let Some(description) = &args.description {
            build = build.description(description);
        }

        let repo = client.repository(&target.workspace, &target.repo_slug);
        let build = if args.update {
            repo.change_build_status(&args.hash, &args.key, &build).await?
        } else {
            repo.add_build_status(&args.hash, &build).await?
        };

        let output = global.output();
        output.write_success(&format!(
            "Build {} is {} on {}",
            build.key,
            build.state.as_str(),
            short_hash(&args.hash)
        ));
        output.write(&build)
    }
}

fn connect(global: &GlobalOptions, repo: &str) -> Result<(BitbucketClient, RepoTarget)> {
    let (client, config) = global.client()?;
    let target = parse_repo_arg(repo, config.default_workspace.as_deref())?;
    Ok((client, target))
}

fn build_filter(args: &ListArgs) -> CommitsFilter {
    let mut filter = CommitsFilter::new();
    for branch in &args.include {
        filter = filter.include(branch);
    }
    for branch in &args.exclude {
        filter = filter.exclude(branch);
    }
    if let Some(path) = &args.path {
        filter = filter.path(path);
    }
    filter
}

fn short_hash(hash: &str) -> String {
    hash.chars().take(12).collect()
}

impl TableRow for Commit {
    fn headers() -> Vec<&'static str> {
        vec!["HASH", "AUTHOR", "DATE", "MESSAGE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            short_hash(&self.hash),
            author_label(self).to_string(),
            self.date.clone().unwrap_or_default(),
            truncate(self.title(), 60),
        ]
    }
}

impl TableOutput for Commit {
    fn print_table(&self, color: bool) {
        print_header(&format!("commit {}", self.hash));
        println!();

        print_field("Author", author_label(self), color);
        if let Some(date) = &self.date {
            print_field("Date", date, color);
        }
        if !self.parents.is_empty() {
            let parents: Vec<String> = self.parents.iter().map(|p| short_hash(&p.hash)).collect();
            print_field("Parents", &parents.join(", "), color);
        }
        let approvers: Vec<&str> = self
            .participants
            .iter()
            .filter(|p| p.approved)
            .map(|p| p.user.label())
            .collect();
        if !approvers.is_empty() {
            print_field("Approved by", &approvers.join(", "), color);
        }

        if let Some(message) = &self.message {
            println!();
            for line in message.lines() {
                println!("    {}", line);
            }
        }
    }
}

impl TableRow for BuildInfo {
    fn headers() -> Vec<&'static str> {
        vec!["KEY", "STATE", "NAME", "URL"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.key.clone(),
            format_status(self.state.as_str(), color),
            self.name.clone().unwrap_or_default(),
            self.url.clone(),
        ]
    }
}

impl TableOutput for BuildInfo {
    fn print_table(&self, color: bool) {
        print_header(self.name.as_deref().unwrap_or(&self.key));
        println!();

        print_field("Key", &self.key, color);
        print_field("State", &format_status(self.state.as_str(), color), color);
        print_field("URL", &self.url, color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
        if let Some(refname) = &self.refname {
            print_field("Ref", refname, color);
        }
        if let Some(updated) = &self.updated_on {
            print_field("Updated", updated, color);
        }
    }
}

fn author_label(commit: &Commit) -> &str {
    commit
        .author
        .as_ref()
        .and_then(|a| a.user.as_ref().map(|u| u.label()).or(a.raw.as_deref()))
        .unwrap_or("unknown")
}
