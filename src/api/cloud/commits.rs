//
//  bitbucket-client
//  api/cloud/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud commit API types and the commit listing filter.
//!
//! # Overview
//!
//! Commits are listed through `/repositories/{workspace}/{repo_slug}/commits`.
//! Bitbucket narrows the listing with repeated query keys:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `include` | Commits reachable from this branch (repeatable) |
//! | `exclude` | Commits *not* reachable from this branch (repeatable) |
//! | `path` | Commits touching this path prefix |
//!
//! The server returns the union of everything reachable from the included
//! branches (or the whole history when nothing is included) minus everything
//! reachable from the excluded branches.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_client::api::cloud::CommitsFilter;
//!
//! let filter = CommitsFilter::new()
//!     .include("branchToAccept")
//!     .exclude("master")
//!     .path("src/");
//!
//! assert_eq!(
//!     filter.to_query(None).to_query_string(),
//!     "include=branchToAccept&exclude=master&path=src%2F"
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::api::common::{Links, QueryParams, Rendered, UserRef};

use super::repositories::RepositoryRef;

/// A commit in a Bitbucket Cloud repository.
///
/// # Fields
///
/// * `hash` - Full 40-character SHA-1 hash
/// * `date` - ISO 8601 commit date
/// * `message` - Full commit message
/// * `author` - Raw author line plus the linked Bitbucket user, if any
/// * `parents` - Parent commits (empty for a root commit)
/// * `repository` - The repository the commit belongs to
/// * `summary` - Rendered first paragraph of the message
/// * `participants` - Users who approved or commented on the commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// The full SHA-1 hash.
    pub hash: String,

    /// ISO 8601 commit date.
    #[serde(default)]
    pub date: Option<String>,

    /// The full commit message.
    #[serde(default)]
    pub message: Option<String>,

    /// Commit author.
    #[serde(default)]
    pub author: Option<CommitAuthor>,

    /// Parent commits, first parent first.
    #[serde(default)]
    pub parents: Vec<CommitRef>,

    /// The repository containing the commit.
    #[serde(default)]
    pub repository: Option<RepositoryRef>,

    /// Rendered summary of the message.
    #[serde(default)]
    pub summary: Option<Rendered>,

    /// Approvers and commenters.
    #[serde(default)]
    pub participants: Vec<Participant>,

    /// Links to the commit, its diff, approvals and statuses.
    #[serde(default)]
    pub links: Option<Links>,
}

impl Commit {
    /// Checks whether the user with `nickname` currently approves this commit.
    pub fn is_approved_by(&self, nickname: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.approved && p.user.nickname.as_deref() == Some(nickname))
    }

    /// The first line of the message.
    pub fn title(&self) -> &str {
        self.message
            .as_deref()
            .and_then(|m| m.lines().next())
            .unwrap_or("")
    }
}

/// Author of a commit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// Raw author line, e.g. `Jane Doe <jane@example.com>`.
    #[serde(default)]
    pub raw: Option<String>,

    /// The Bitbucket account matched to the author, if any.
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Minimal reference to a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRef {
    /// The full SHA-1 hash.
    pub hash: String,

    /// Links to the commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// A user taking part in a commit or pull request review.
///
/// Returned by the approve endpoints and embedded in commits and pull
/// requests.
///
/// # Fields
///
/// * `user` - The participating user
/// * `role` - `PARTICIPANT` or `REVIEWER`
/// * `approved` - Whether the user currently approves
/// * `participated_on` - ISO 8601 timestamp of the last participation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// The participating user.
    pub user: UserRef,

    /// The user's role.
    #[serde(default)]
    pub role: Option<String>,

    /// Whether this user approves.
    #[serde(default)]
    pub approved: bool,

    /// Review state: `approved`, `changes_requested` or absent.
    #[serde(default)]
    pub state: Option<String>,

    /// ISO 8601 timestamp of the user's last participation.
    #[serde(default)]
    pub participated_on: Option<String>,
}

/// Filter for commit listings.
///
/// Branch names are kept in insertion order. Adding the same name twice has
/// no effect; names are compared exactly, without case folding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitsFilter {
    includes: Vec<String>,
    excludes: Vec<String>,
    path: Option<String>,
}

impl CommitsFilter {
    /// An empty filter: every commit of the repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a branch whose reachable commits are listed.
    pub fn include(mut self, branch: impl Into<String>) -> Self {
        push_unique(&mut self.includes, branch.into());
        self
    }

    /// Adds a branch whose reachable commits are left out.
    pub fn exclude(mut self, branch: impl Into<String>) -> Self {
        push_unique(&mut self.excludes, branch.into());
        self
    }

    /// Restricts the listing to commits touching `path`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Included branches, in insertion order.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Excluded branches, in insertion order.
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// The path prefix, if any.
    pub fn path_filter(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Builds the listing query.
    ///
    /// `branch` is an extra inclusion that comes first. The output order is
    /// always: `include` pairs, `exclude` pairs, then `path`, so the same
    /// filter always yields the same request.
    pub fn to_query(&self, branch: Option<&str>) -> QueryParams {
        let mut includes: Vec<&str> = Vec::with_capacity(self.includes.len() + 1);
        for name in branch.into_iter().chain(self.includes.iter().map(String::as_str)) {
            if !includes.contains(&name) {
                includes.push(name);
            }
        }

        QueryParams::new()
            .with_repeated("include", includes)
            .with_repeated("exclude", self.excludes.iter().map(String::as_str))
            .with_opt("path", self.path.as_deref())
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

/// State of a build reported against a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildState {
    /// The build is running.
    Inprogress,
    /// The build passed.
    Successful,
    /// The build failed.
    Failed,
    /// The build was stopped before finishing.
    Stopped,
}

impl BuildState {
    /// The wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inprogress => "INPROGRESS",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Stopped => "STOPPED",
        }
    }
}

impl std::str::FromStr for BuildState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INPROGRESS" | "IN_PROGRESS" => Ok(Self::Inprogress),
            "SUCCESSFUL" => Ok(Self::Successful),
            "FAILED" => Ok(Self::Failed),
            "STOPPED" => Ok(Self::Stopped),
            other => Err(format!("unknown build state '{}'", other)),
        }
    }
}

/// A build status reported against a commit.
///
/// Used both as the request body of the build status endpoints and as their
/// response. `key` identifies the build; posting the same key again updates
/// the existing status.
///
/// # Example
///
/// ```rust
/// use bitbucket_client::api::cloud::{BuildInfo, BuildState};
///
/// let build = BuildInfo::new("FooBuild42", BuildState::Inprogress, "https://ci.example.com/builds/42")
///     .name("Foo Build #42")
///     .description("nightly");
/// assert_eq!(build.state, BuildState::Inprogress);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Unique key of the build for this commit.
    pub key: String,

    /// Current state.
    pub state: BuildState,

    /// Link to the build on the CI server.
    pub url: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Branch or tag the build ran for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,

    /// ISO 8601 creation timestamp, set by Bitbucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    /// ISO 8601 update timestamp, set by Bitbucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
}

impl BuildInfo {
    /// Creates a build status.
    pub fn new(key: impl Into<String>, state: BuildState, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state,
            url: url.into(),
            name: None,
            description: None,
            refname: None,
            created_on: None,
            updated_on: None,
        }
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
