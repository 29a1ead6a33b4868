//
//  bitbucket-client
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository API: types and resources.
//!
//! # Overview
//!
//! Repositories live under `/repositories/{workspace}/{repo_slug}`. The
//! [`RepositoryResource`] covers the repository itself and everything keyed
//! by it that is not a pull request: watchers, forks, branches, commits,
//! commit approvals and build statuses.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_client::api::BitbucketClient;
//! use bitbucket_client::api::cloud::CommitsFilter;
//!
//! # async fn example() -> Result<(), bitbucket_client::api::ApiError> {
//! let client = BitbucketClient::cloud(None)?;
//! let repo = client.repository("my-team", "backend");
//!
//! let info = repo.get_repository().await?;
//! println!("{} ({})", info.full_name, info.scm.as_deref().unwrap_or("git"));
//!
//! // Commits on a feature branch that are not yet on master
//! let commits = repo
//!     .list_commits(Some("feature/login"), &CommitsFilter::new().exclude("master"), None)
//!     .await?;
//! println!("{} commits to merge", commits.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - `get_repository`, `get_commit` and `get_build_status` fail with
//!   [`ApiError::NotFound`] when the target does not exist
//! - Every listing returns an empty `Vec` when the repository does not exist

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::commits::{BuildInfo, Commit, CommitRef, CommitsFilter, Participant};
use crate::api::client::BitbucketClient;
use crate::api::common::{encode_segment, ApiError, Links, QueryParams, UserRef};

/// Represents a Bitbucket Cloud repository.
///
/// # Fields
///
/// * `uuid` - Unique identifier (includes curly braces)
/// * `name` - Human-readable name
/// * `full_name` - `{workspace_slug}/{repo_slug}`
/// * `slug` - URL-safe identifier derived from the name
/// * `scm` - Always `git` on current Bitbucket Cloud
/// * `parent` - The repository this one was forked from, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Unique identifier for the repository (e.g., `{123e4567-e89b-...}`).
    pub uuid: String,

    /// Human-readable name of the repository.
    pub name: String,

    /// Full path in format `{workspace_slug}/{repo_slug}`.
    pub full_name: String,

    /// URL-safe identifier.
    #[serde(default)]
    pub slug: Option<String>,

    /// Version control system.
    #[serde(default)]
    pub scm: Option<String>,

    /// Description of the repository.
    #[serde(default)]
    pub description: Option<String>,

    /// Project website.
    #[serde(default)]
    pub website: Option<String>,

    /// Primary language tag.
    #[serde(default)]
    pub language: Option<String>,

    /// Whether the repository is private.
    #[serde(default)]
    pub is_private: bool,

    /// Fork policy: `allow_forks`, `no_public_forks` or `no_forks`.
    #[serde(default)]
    pub fork_policy: Option<String>,

    /// Whether the issue tracker is enabled.
    #[serde(default)]
    pub has_issues: bool,

    /// Whether the wiki is enabled.
    #[serde(default)]
    pub has_wiki: bool,

    /// Size of the repository in bytes.
    #[serde(default)]
    pub size: Option<u64>,

    /// The main branch.
    #[serde(default)]
    pub mainbranch: Option<Branch>,

    /// The user or team that owns this repository.
    #[serde(default)]
    pub owner: Option<UserRef>,

    /// The workspace containing this repository.
    #[serde(default)]
    pub workspace: Option<WorkspaceRef>,

    /// The project grouping this repository.
    #[serde(default)]
    pub project: Option<ProjectRef>,

    /// The repository this one is a fork of.
    #[serde(default)]
    pub parent: Option<RepositoryRef>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_on: Option<String>,

    /// ISO 8601 last update timestamp.
    #[serde(default)]
    pub updated_on: Option<String>,

    /// Links to the repository, its clone URLs and sub-resources.
    #[serde(default)]
    pub links: Option<Links>,
}

/// Minimal repository reference embedded in commits, forks and pull requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Unique identifier for the repository.
    #[serde(default)]
    pub uuid: Option<String>,

    /// Human-readable name of the repository.
    #[serde(default)]
    pub name: Option<String>,

    /// Full path in format `{workspace_slug}/{repo_slug}`.
    #[serde(default)]
    pub full_name: Option<String>,

    /// Links to the repository.
    #[serde(default)]
    pub links: Option<Links>,
}

/// A branch, as listed by `/refs/branches` or embedded as `mainbranch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// The name of the branch.
    pub name: String,

    /// `branch` or `named_branch`.
    #[serde(default, rename = "type")]
    pub branch_type: Option<String>,

    /// The commit at the head of the branch.
    #[serde(default)]
    pub target: Option<CommitRef>,
}

/// A lightweight reference to a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    /// Unique identifier for the workspace.
    #[serde(default)]
    pub uuid: Option<String>,

    /// URL-safe identifier for the workspace.
    pub slug: String,

    /// Human-readable name of the workspace.
    #[serde(default)]
    pub name: Option<String>,
}

/// A lightweight reference to a project within a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Unique identifier for the project.
    #[serde(default)]
    pub uuid: Option<String>,

    /// Short alphanumeric key for the project (typically uppercase).
    pub key: String,

    /// Human-readable name of the project.
    #[serde(default)]
    pub name: Option<String>,
}

/// Request payload for creating or updating a repository.
///
/// Only set fields are sent. The slug comes from the URL, not from `name`.
///
/// # Example
///
/// ```rust
/// use bitbucket_client::api::cloud::CreateRepositoryRequest;
///
/// let request = CreateRepositoryRequest {
///     name: Some("backend-api".to_string()),
///     language: Some("rust".to_string()),
///     is_private: Some(true),
///     ..CreateRepositoryRequest::git()
/// };
/// assert_eq!(request.scm.as_deref(), Some("git"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateRepositoryRequest {
    /// Version control system; Bitbucket only accepts `git`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm: Option<String>,

    /// Display name for the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description of the repository's purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the repository should be private.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    /// Primary programming language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Project website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Fork policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork_policy: Option<String>,

    /// Project to organize the repository under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectKey>,
}

impl CreateRepositoryRequest {
    /// A git repository with every other field left to the workspace default.
    pub fn git() -> Self {
        Self {
            scm: Some("git".to_string()),
            ..Self::default()
        }
    }
}

/// Project key for assigning a repository to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectKey {
    /// The short alphanumeric key identifying the project.
    pub key: String,
}

/// Repositories of one workspace: `/repositories/{workspace}`.
pub struct RepositoriesResource<'a> {
    client: &'a BitbucketClient,
    workspace: String,
}

impl<'a> RepositoriesResource<'a> {
    /// Creates the resource for `workspace`.
    pub fn new(client: &'a BitbucketClient, workspace: &str) -> Self {
        Self {
            client,
            workspace: workspace.to_string(),
        }
    }

    /// Lists the repositories of the workspace visible to the caller.
    pub async fn list_repositories(&self, max: Option<usize>) -> Result<Vec<Repository>, ApiError> {
        self.client
            .list(
                &format!("/repositories/{}", encode_segment(&self.workspace)),
                QueryParams::new(),
                max,
            )
            .await
    }

    /// One repository of the workspace.
    pub fn repository(&self, repo_slug: &str) -> RepositoryResource<'a> {
        RepositoryResource::new(self.client, &self.workspace, repo_slug)
    }
}

/// One repository: `/repositories/{workspace}/{repo_slug}`.
pub struct RepositoryResource<'a> {
    client: &'a BitbucketClient,
    path: String,
}

impl<'a> RepositoryResource<'a> {
    /// Creates the resource for `workspace/repo_slug`.
    pub fn new(client: &'a BitbucketClient, workspace: &str, repo_slug: &str) -> Self {
        Self {
            client,
            path: format!(
                "/repositories/{}/{}",
                encode_segment(workspace),
                encode_segment(repo_slug)
            ),
        }
    }

    /// The API path of the repository.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn commit_path(&self, hash: &str, suffix: &str) -> String {
        format!("{}/commit/{}{}", self.path, encode_segment(hash), suffix)
    }

    fn build_path(&self, hash: &str, key: &str) -> String {
        format!(
            "{}/commit/{}/statuses/build/{}",
            self.path,
            encode_segment(hash),
            encode_segment(key)
        )
    }

    /// Fetches the repository.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the repository does not exist.
    pub async fn get_repository(&self) -> Result<Repository, ApiError> {
        self.client.get(&self.path, QueryParams::new()).await
    }

    /// Creates the repository at this path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the caller may not create
    /// repositories in the workspace, with Bitbucket's message attached.
    pub async fn post_repository(&self, request: &CreateRepositoryRequest) -> Result<Repository, ApiError> {
        debug!(path = %self.path, "creating repository");
        self.client.post(&self.path, request).await
    }

    /// Updates the repository's settings.
    pub async fn put_repository(&self, request: &CreateRepositoryRequest) -> Result<Repository, ApiError> {
        self.client.put(&self.path, request).await
    }

    /// Deletes the repository.
    pub async fn delete_repository(&self) -> Result<(), ApiError> {
        debug!(path = %self.path, "deleting repository");
        self.client.delete(&self.path).await
    }

    /// Lists the users watching the repository.
    pub async fn list_watchers(&self, max: Option<usize>) -> Result<Vec<UserRef>, ApiError> {
        self.client
            .list(&format!("{}/watchers", self.path), QueryParams::new(), max)
            .await
    }

    /// Lists the forks of the repository.
    pub async fn list_forks(&self, max: Option<usize>) -> Result<Vec<Repository>, ApiError> {
        self.client
            .list(&format!("{}/forks", self.path), QueryParams::new(), max)
            .await
    }

    /// Lists the branches of the repository.
    pub async fn list_branches(&self, max: Option<usize>) -> Result<Vec<Branch>, ApiError> {
        self.client
            .list(&format!("{}/refs/branches", self.path), QueryParams::new(), max)
            .await
    }

    /// Lists commits, newest first.
    ///
    /// # Parameters
    ///
    /// * `branch` - Extra branch to include, on top of `filter`'s includes
    /// * `filter` - Included/excluded branches and path prefix
    /// * `max` - Upper bound on the number of commits
    pub async fn list_commits(
        &self,
        branch: Option<&str>,
        filter: &CommitsFilter,
        max: Option<usize>,
    ) -> Result<Vec<Commit>, ApiError> {
        self.client
            .list(&format!("{}/commits", self.path), filter.to_query(branch), max)
            .await
    }

    /// Fetches one commit.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when no commit has this hash.
    pub async fn get_commit(&self, hash: &str) -> Result<Commit, ApiError> {
        self.client
            .get(&self.commit_path(hash, ""), QueryParams::new())
            .await
    }

    /// Approves a commit as the authenticated user.
    pub async fn approve_commit(&self, hash: &str) -> Result<Participant, ApiError> {
        self.client
            .post_empty(&self.commit_path(hash, "/approve"))
            .await
    }

    /// Withdraws the authenticated user's approval of a commit.
    pub async fn delete_commit_approval(&self, hash: &str) -> Result<(), ApiError> {
        self.client
            .delete(&self.commit_path(hash, "/approve"))
            .await
    }

    /// Reports a new build status against a commit.
    pub async fn add_build_status(&self, hash: &str, build: &BuildInfo) -> Result<BuildInfo, ApiError> {
        self.client
            .post(&self.commit_path(hash, "/statuses/build"), build)
            .await
    }

    /// Fetches the build status with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when no build with this key was reported.
    pub async fn get_build_status(&self, hash: &str, key: &str) -> Result<BuildInfo, ApiError> {
        self.client
            .get(
                &self.build_path(hash, key),
                QueryParams::new(),
            )
            .await
    }

    /// Replaces the build status with `key`.
    pub async fn change_build_status(
        &self,
        hash: &str,
        key: &str,
        build: &BuildInfo,
    ) -> Result<BuildInfo, ApiError> {
        self.client
            .put(
                &self.build_path(hash, key),
                build,
            )
            .await
    }

    /// Lists every status reported against a commit.
    pub async fn list_build_statuses(&self, hash: &str, max: Option<usize>) -> Result<Vec<BuildInfo>, ApiError> {
        self.client
            .list(
                &self.commit_path(hash, "/statuses"),
                QueryParams::new(),
                max,
            )
            .await
    }
}
