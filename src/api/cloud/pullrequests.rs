//
//  bitbucket-client
//  api/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pull request API: types and resources.
//!
//! # Pull Request Lifecycle
//!
//! 1. **OPEN** - Initial state when created
//! 2. **MERGED** - Successfully merged into the destination branch
//! 3. **DECLINED** - Rejected and closed without merging
//! 4. **SUPERSEDED** - Replaced by another pull request
//!
//! # Missing pull requests
//!
//! A [`PullRequestResource`] for an id that does not exist never fails with
//! a 404:
//!
//! - [`get_pull_request`](PullRequestResource::get_pull_request) returns `None`
//! - every listing (activity, comments, commits) returns an empty `Vec`
//! - [`get_diff`](PullRequestResource::get_diff) returns an empty string
//! - [`get_comment`](PullRequestResource::get_comment) for a missing comment
//!   returns a [`Comment`] whose `id` is `None`
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_client::api::BitbucketClient;
//!
//! # async fn example() -> Result<(), bitbucket_client::api::ApiError> {
//! let client = BitbucketClient::cloud(None)?;
//! let pr = client.pull_requests("mercurial", "mercurial").pull_request(2);
//!
//! match pr.get_pull_request().await? {
//!     Some(info) => println!("#{} {} [{}]", info.id, info.title, info.state),
//!     None => println!("no such pull request"),
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::commits::{Commit, CommitRef, Participant};
use super::repositories::{Branch, RepositoryRef};
use crate::api::client::BitbucketClient;
use crate::api::common::{encode_segment, ApiError, Links, QueryParams, Rendered, UserRef};

/// Represents a pull request in Bitbucket Cloud.
///
/// # Fields
///
/// * `id` - Numeric identifier within the repository
/// * `title` - Short summary of the changes
/// * `state` - `OPEN`, `MERGED`, `DECLINED` or `SUPERSEDED`
/// * `author` - The user who created the pull request
/// * `source` / `destination` - Branches being merged
/// * `participants` - Reviewers and commenters with their approval state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Numeric identifier within the repository.
    pub id: u64,

    /// Short summary of the changes.
    pub title: String,

    /// Detailed description. Supports Markdown.
    #[serde(default)]
    pub description: Option<String>,

    /// Current state.
    pub state: String,

    /// The user who created this pull request.
    #[serde(default)]
    pub author: Option<UserRef>,

    /// The branch containing the proposed changes.
    #[serde(default)]
    pub source: Option<PrBranchRef>,

    /// The branch the changes will be merged into.
    #[serde(default)]
    pub destination: Option<PrBranchRef>,

    /// Users assigned to review.
    #[serde(default)]
    pub reviewers: Vec<UserRef>,

    /// Users who reviewed, commented or approved.
    #[serde(default)]
    pub participants: Vec<Participant>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_on: Option<String>,

    /// ISO 8601 last update timestamp.
    #[serde(default)]
    pub updated_on: Option<String>,

    /// The user who merged or declined this pull request.
    #[serde(default)]
    pub closed_by: Option<UserRef>,

    /// The merge commit, once merged.
    #[serde(default)]
    pub merge_commit: Option<CommitRef>,

    /// Why the pull request was declined, if it was.
    #[serde(default)]
    pub reason: Option<String>,

    /// Number of comments.
    #[serde(default)]
    pub comment_count: u32,

    /// Number of open tasks.
    #[serde(default)]
    pub task_count: u32,

    /// Whether the source branch is deleted on merge.
    #[serde(default)]
    pub close_source_branch: bool,

    /// Links to the pull request and its sub-resources.
    #[serde(default)]
    pub links: Option<Links>,
}

impl PullRequest {
    /// Checks whether the user with `nickname` currently approves.
    pub fn is_approved_by(&self, nickname: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.approved && p.user.nickname.as_deref() == Some(nickname))
    }
}

/// Branch reference within a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrBranchRef {
    /// The branch.
    pub branch: Branch,

    /// The repository containing the branch.
    #[serde(default)]
    pub repository: Option<RepositoryRef>,

    /// The commit at the head of the branch.
    #[serde(default)]
    pub commit: Option<CommitRef>,
}

/// A comment on a pull request.
///
/// The soft-404 fetch returns `Comment::default()`, so every field is
/// optional and `id == None` means "no such comment".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier. `None` for a comment that does not exist.
    #[serde(default)]
    pub id: Option<u64>,

    /// Comment text.
    #[serde(default)]
    pub content: Option<Rendered>,

    /// The author.
    #[serde(default)]
    pub user: Option<UserRef>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_on: Option<String>,

    /// ISO 8601 last edit timestamp.
    #[serde(default)]
    pub updated_on: Option<String>,

    /// Whether the comment was deleted.
    #[serde(default)]
    pub deleted: bool,

    /// Location, for inline comments on the diff.
    #[serde(default)]
    pub inline: Option<InlineAnchor>,

    /// The comment this one replies to.
    #[serde(default)]
    pub parent: Option<CommentRef>,

    /// Links to the comment.
    #[serde(default)]
    pub links: Option<Links>,
}

impl Comment {
    /// Checks whether this comment exists.
    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    /// The raw comment text, or `""`.
    pub fn raw(&self) -> &str {
        self.content
            .as_ref()
            .and_then(|c| c.raw.as_deref())
            .unwrap_or("")
    }
}

/// Location of an inline comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineAnchor {
    /// File path.
    pub path: String,

    /// Line in the old version of the file.
    #[serde(default)]
    pub from: Option<u32>,

    /// Line in the new version of the file.
    #[serde(default)]
    pub to: Option<u32>,
}

/// Reference to a parent comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRef {
    /// Identifier of the parent comment.
    pub id: u64,
}

/// One entry of a pull request's activity log.
///
/// Exactly one of `update`, `approval` and `comment` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Activity {
    /// A change to the pull request itself.
    #[serde(default)]
    pub update: Option<ActivityUpdate>,

    /// An approval.
    #[serde(default)]
    pub approval: Option<Approval>,

    /// A comment.
    #[serde(default)]
    pub comment: Option<Comment>,
}

impl Activity {
    /// `update`, `approval`, `comment` or `unknown`.
    pub fn kind(&self) -> &'static str {
        if self.update.is_some() {
            "update"
        } else if self.approval.is_some() {
            "approval"
        } else if self.comment.is_some() {
            "comment"
        } else {
            "unknown"
        }
    }
}

/// A state, title or description change recorded in the activity log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityUpdate {
    /// State after the update.
    #[serde(default)]
    pub state: Option<String>,

    /// Title after the update.
    #[serde(default)]
    pub title: Option<String>,

    /// Description after the update.
    #[serde(default)]
    pub description: Option<String>,

    /// Why the pull request was declined, if this update declined it.
    #[serde(default)]
    pub reason: Option<String>,

    /// Who made the update.
    #[serde(default)]
    pub author: Option<UserRef>,

    /// ISO 8601 timestamp.
    #[serde(default)]
    pub date: Option<String>,
}

/// An approval recorded in the activity log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Approval {
    /// Who approved.
    #[serde(default)]
    pub user: Option<UserRef>,

    /// ISO 8601 timestamp.
    #[serde(default)]
    pub date: Option<String>,
}

/// Request payload for creating a new pull request.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePullRequestRequest {
    /// The title of the pull request.
    pub title: String,

    /// Detailed description. Supports Markdown formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The source branch containing the proposed changes.
    pub source: BranchSpec,

    /// The destination branch. Defaults to the repository's main branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<BranchSpec>,

    /// Reviewers, identified by UUID.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<UserUuid>,

    /// Whether to delete the source branch after a successful merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,
}

/// Branch specification for pull request creation.
#[derive(Debug, Clone, Serialize)]
pub struct BranchSpec {
    /// The branch name specification.
    pub branch: BranchName,
}

impl BranchSpec {
    /// Spec for the branch called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            branch: BranchName { name: name.into() },
        }
    }
}

/// Branch name wrapper for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct BranchName {
    /// The name of the branch.
    pub name: String,
}

/// User identification by UUID.
#[derive(Debug, Clone, Serialize)]
pub struct UserUuid {
    /// The unique identifier for the user (includes curly braces).
    pub uuid: String,
}

/// Request payload for merging a pull request.
///
/// # Merge Strategies
///
/// * `merge_commit` - Creates a merge commit (default)
/// * `squash` - Squashes all commits into a single commit
/// * `fast_forward` - Fast-forward merge if possible
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergePullRequestRequest {
    /// Custom message for the merge commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Whether to delete the source branch after a successful merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,

    /// The merge strategy to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_strategy: Option<String>,
}

/// Pull requests of a repository: `/repositories/{workspace}/{repo_slug}/pullrequests`.
pub struct PullRequestsResource<'a> {
    client: &'a BitbucketClient,
    path: String,
}

impl<'a> PullRequestsResource<'a> {
    /// Creates the resource for `workspace/repo_slug`.
    pub fn new(client: &'a BitbucketClient, workspace: &str, repo_slug: &str) -> Self {
        Self {
            client,
            path: format!(
                "/repositories/{}/{}/pullrequests",
                encode_segment(workspace),
                encode_segment(repo_slug)
            ),
        }
    }

    /// Lists pull requests.
    ///
    /// # Parameters
    ///
    /// * `states` - States to include; Bitbucket lists only `OPEN` when empty
    /// * `max` - Upper bound on the number of pull requests
    pub async fn list_pull_requests(
        &self,
        states: &[&str],
        max: Option<usize>,
    ) -> Result<Vec<PullRequest>, ApiError> {
        let query = QueryParams::new().with_repeated("state", states.iter().copied());
        self.client.list(&self.path, query, max).await
    }

    /// Opens a pull request.
    pub async fn post_pull_request(&self, request: &CreatePullRequestRequest) -> Result<PullRequest, ApiError> {
        self.client.post(&self.path, request).await
    }

    /// One pull request of the repository.
    pub fn pull_request(&self, id: u64) -> PullRequestResource<'a> {
        PullRequestResource {
            client: self.client,
            path: format!("{}/{}", self.path, id),
        }
    }
}

/// One pull request: `/repositories/{workspace}/{repo_slug}/pullrequests/{id}`.
pub struct PullRequestResource<'a> {
    client: &'a BitbucketClient,
    path: String,
}

impl<'a> PullRequestResource<'a> {
    /// The API path of the pull request.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetches the pull request, or `None` if it does not exist.
    pub async fn get_pull_request(&self) -> Result<Option<PullRequest>, ApiError> {
        self.client.get_optional(&self.path).await
    }

    /// Lists the activity log, oldest entries last.
    pub async fn list_activity(&self, max: Option<usize>) -> Result<Vec<Activity>, ApiError> {
        self.client
            .list(&format!("{}/activity", self.path), QueryParams::new(), max)
            .await
    }

    /// Lists the comments.
    pub async fn list_comments(&self, max: Option<usize>) -> Result<Vec<Comment>, ApiError> {
        self.client
            .list(&format!("{}/comments", self.path), QueryParams::new(), max)
            .await
    }

    /// Fetches one comment.
    ///
    /// A missing comment yields `Comment::default()`, whose `id` is `None`.
    pub async fn get_comment(&self, comment_id: u64) -> Result<Comment, ApiError> {
        let comment = self
            .client
            .get_optional(&format!("{}/comments/{}", self.path, comment_id))
            .await?;

        if comment.is_none() {
            debug!(path = %self.path, comment_id, "comment absent");
        }
        Ok(comment.unwrap_or_default())
    }

    /// Lists the commits of the pull request.
    pub async fn list_commits(&self, max: Option<usize>) -> Result<Vec<Commit>, ApiError> {
        self.client
            .list(&format!("{}/commits", self.path), QueryParams::new(), max)
            .await
    }

    /// Fetches the unified diff. Empty when the pull request does not exist.
    pub async fn get_diff(&self) -> Result<String, ApiError> {
        Ok(self
            .client
            .get_text_optional(&format!("{}/diff", self.path))
            .await?
            .unwrap_or_default())
    }

    /// Approves the pull request as the authenticated user.
    pub async fn approve(&self) -> Result<Participant, ApiError> {
        self.client
            .post_empty(&format!("{}/approve", self.path))
            .await
    }

    /// Withdraws the authenticated user's approval.
    pub async fn remove_approval(&self) -> Result<(), ApiError> {
        self.client.delete(&format!("{}/approve", self.path)).await
    }

    /// Declines the pull request.
    pub async fn decline(&self) -> Result<PullRequest, ApiError> {
        self.client
            .post_empty(&format!("{}/decline", self.path))
            .await
    }

    /// Merges the pull request.
    pub async fn merge(&self, request: &MergePullRequestRequest) -> Result<PullRequest, ApiError> {
        self.client
            .post(&format!("{}/merge", self.path), request)
            .await
    }
}
