//
//  bitbucket-client
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request commands.
//!
//! Viewing a pull request and its activity, comments, commits and diff,
//! plus the review actions: approve, decline and merge.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use super::{parse_repo_arg, GlobalOptions, RepoTarget};
use crate::api::cloud::{
    Activity, BranchSpec, Comment, CreatePullRequestRequest, MergePullRequestRequest, PullRequest,
};
use crate::api::BitbucketClient;
use crate::output::{format_status, print_field, print_header, truncate, TableOutput, TableRow};

/// Work with pull requests
#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a pull request
    View(PrArg),

    /// Open a pull request
    Create(CreateArgs),

    /// List comments on a pull request
    Comments(PrListArgs),

    /// View one comment
    Comment(CommentArgs),

    /// List the activity log of a pull request
    Activity(PrListArgs),

    /// List commits in a pull request
    Commits(PrListArgs),

    /// Print the diff of a pull request
    Diff(PrArg),

    /// Approve a pull request
    Approve(PrArg),

    /// Withdraw your approval of a pull request
    Unapprove(PrArg),

    /// Decline a pull request
    Decline(PrArg),

    /// Merge a pull request
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Filter by state (repeatable; OPEN when omitted)
    #[arg(long, short = 's', value_parser = ["OPEN", "MERGED", "DECLINED", "SUPERSEDED"])]
    pub state: Vec<String>,

    /// Maximum number of pull requests to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct PrArg {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Pull request ID
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct PrListArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Pull request ID
    pub id: u64,

    /// Maximum number of entries to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Pull request ID
    pub id: u64,

    /// Comment ID
    pub comment_id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Title
    #[arg(long, short = 't')]
    pub title: String,

    /// Source branch
    #[arg(long)]
    pub source: String,

    /// Destination branch (the main branch when omitted)
    #[arg(long)]
    pub destination: Option<String>,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Delete the source branch after merging
    #[arg(long)]
    pub close_source_branch: bool,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Repository (WORKSPACE/REPO, or REPO with --workspace)
    pub repo: String,

    /// Pull request ID
    pub id: u64,

    /// Merge commit message
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Merge strategy
    #[arg(long, value_parser = ["merge_commit", "squash", "fast_forward"])]
    pub strategy: Option<String>,

    /// Delete the source branch after merging
    #[arg(long)]
    pub close_source_branch: bool,
}

impl PrCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PrSubcommand::List(args) => self.list(args, global).await,
            PrSubcommand::View(args) => self.view(args, global).await,
            PrSubcommand::Create(args) => self.create(args, global).await,
            PrSubcommand::Comments(args) => self.comments(args, global).await,
            PrSubcommand::Comment(args) => self.comment(args, global).await,
            PrSubcommand::Activity(args) => self.activity(args, global).await,
            PrSubcommand::Commits(args) => self.commits(args, global).await,
            PrSubcommand::Diff(args) => self.diff(args, global).await,
            PrSubcommand::Approve(args) => self.approve(args, global).await,
            PrSubcommand::Unapprove(args) => self.unapprove(args, global).await,
            PrSubcommand::Decline(args) => self.decline(args, global).await,
            PrSubcommand::Merge(args) => self.merge(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let states: Vec<&str> = args.state.iter().map(String::as_str).collect();
        let prs = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .list_pull_requests(&states, Some(args.limit))
            .await?;
        global.output().write_list(&prs)
    }

    async fn view(&self, args: &PrArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let pr = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .get_pull_request()
            .await?;

        match pr {
            Some(pr) => global.output().write(&pr),
            None => bail!(
                "Pull request #{} not found in {}/{}",
                args.id,
                target.workspace,
                target.repo_slug
            ),
        }
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let request = CreatePullRequestRequest {
            title: args.title.clone(),
            description: args.description.clone(),
            source: BranchSpec::named(&args.source),
            destination: args.destination.as_deref().map(BranchSpec::named),
            reviewers: Vec::new(),
            close_source_branch: Some(args.close_source_branch),
        };

        let pr = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .post_pull_request(&request)
            .await?;

        let output = global.output();
        output.write_success(&format!("Created pull request #{}", pr.id));
        output.write(&pr)
    }

    async fn comments(&self, args: &PrListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let comments = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .list_comments(Some(args.limit))
            .await?;
        global.output().write_list(&comments)
    }

    async fn comment(&self, args: &CommentArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let comment = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .get_comment(args.comment_id)
            .await?;

        if !comment.exists() {
            bail!(
                "Comment {} not found on pull request #{}",
                args.comment_id,
                args.id
            );
        }
        global.output().write(&comment)
    }

    async fn activity(&self, args: &PrListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let activity = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .list_activity(Some(args.limit))
            .await?;
        global.output().write_list(&activity)
    }

    async fn commits(&self, args: &PrListArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let commits = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .list_commits(Some(args.limit))
            .await?;
        global.output().write_list(&commits)
    }

    async fn diff(&self, args: &PrArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let diff = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .get_diff()
            .await?;
        global.output().write_text(&diff)
    }

    async fn approve(&self, args: &PrArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let participant = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .approve()
            .await?;
        global.output().write_success(&format!(
            "{} approved pull request #{}",
            participant.user.label(),
            args.id
        ));
        Ok(())
    }

    async fn unapprove(&self, args: &PrArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .remove_approval()
            .await?;
        global
            .output()
            .write_success(&format!("Removed approval of pull request #{}", args.id));
        Ok(())
    }

    async fn decline(&self, args: &PrArg, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let pr = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .decline()
            .await?;

        let output = global.output();
        output.write_success(&format!("Declined pull request #{}", pr.id));
        output.write(&pr)
    }

    async fn merge(&self, args: &MergeArgs, global: &GlobalOptions) -> Result<()> {
        let (client, target) = connect(global, &args.repo)?;

        let request = MergePullRequestRequest {
            message: args.message.clone(),
            close_source_branch: Some(args.close_source_branch),
            merge_strategy: args.strategy.clone(),
        };
        let pr = client
            .pull_requests(&target.workspace, &target.repo_slug)
            .pull_request(args.id)
            .merge(&request)
            .await?;

        let output = global.output();
        output.write_success(&format!("Merged pull request #{}", pr.id));
        output.write(&pr)
    }
}

fn connect(global: &GlobalOptions, repo: &str) -> Result<(BitbucketClient, RepoTarget)> {
    let (client, config) = global.client()?;
    let target = parse_repo_arg(repo, config.default_workspace.as_deref())?;
    Ok((client, target))
}

fn branch_name(pr: &PullRequest, destination: bool) -> &str {
    let side = if destination {
        pr.destination.as_ref()
    } else {
        pr.source.as_ref()
    };
    side.map(|b| b.branch.name.as_str()).unwrap_or("")
}

impl TableRow for PullRequest {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "BRANCH", "AUTHOR", "STATE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            format!("#{}", self.id),
            truncate(&self.title, 50),
            format!("{} → {}", branch_name(self, false), branch_name(self, true)),
            self.author
                .as_ref()
                .map(|a| a.label().to_string())
                .unwrap_or_default(),
            format_status(&self.state, color),
        ]
    }
}

impl TableOutput for PullRequest {
    fn print_table(&self, color: bool) {
        print_header(&format!("#{} {}", self.id, self.title));
        println!();

        print_field("State", &format_status(&self.state, color), color);
        if let Some(author) = &self.author {
            print_field("Author", author.label(), color);
        }
        print_field(
            "Branch",
            &format!("{} → {}", branch_name(self, false), branch_name(self, true)),
            color,
        );
        let approvers: Vec<&str> = self
            .participants
            .iter()
            .filter(|p| p.approved)
            .map(|p| p.user.label())
            .collect();
        if !approvers.is_empty() {
            print_field("Approved by", &approvers.join(", "), color);
        }
        print_field("Comments", &self.comment_count.to_string(), color);
        if let Some(created) = &self.created_on {
            print_field("Created", created, color);
        }
        if let Some(updated) = &self.updated_on {
            print_field("Updated", updated, color);
        }

        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            println!();
            println!("{}", desc);
        }
    }
}

impl TableRow for Comment {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "AUTHOR", "CREATED", "CONTENT"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.user
                .as_ref()
                .map(|u| u.label().to_string())
                .unwrap_or_default(),
            self.created_on.clone().unwrap_or_default(),
            truncate(self.raw().lines().next().unwrap_or(""), 60),
        ]
    }
}

impl TableOutput for Comment {
    fn print_table(&self, color: bool) {
        let id = self.id.map(|id| id.to_string()).unwrap_or_default();
        print_header(&format!("Comment {}", id));
        println!();

        if let Some(user) = &self.user {
            print_field("Author", user.label(), color);
        }
        if let Some(inline) = &self.inline {
            let line = inline.to.or(inline.from).map(|l| format!(":{}", l)).unwrap_or_default();
            print_field("File", &format!("{}{}", inline.path, line), color);
        }
        if let Some(parent) = &self.parent {
            print_field("Reply to", &parent.id.to_string(), color);
        }
        if let Some(created) = &self.created_on {
            print_field("Created", created, color);
        }

        println!();
        println!("{}", self.raw());
    }
}

impl TableRow for Activity {
    fn headers() -> Vec<&'static str> {
        vec!["KIND", "USER", "DATE", "DETAIL"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let (user, date, detail) = if let Some(update) = &self.update {
            (
                update.author.as_ref(),
                update.date.clone(),
                format_status(update.state.as_deref().unwrap_or(""), color),
            )
        } else if let Some(approval) = &self.approval {
            (approval.user.as_ref(), approval.date.clone(), String::new())
        } else if let Some(comment) = &self.comment {
            (
                comment.user.as_ref(),
                comment.created_on.clone(),
                truncate(comment.raw().lines().next().unwrap_or(""), 50),
            )
        } else {
            (None, None, String::new())
        };

        vec![
            self.kind().to_string(),
            user.map(|u| u.label().to_string()).unwrap_or_default(),
            date.unwrap_or_default(),
            detail,
        ]
    }
}
