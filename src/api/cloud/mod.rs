//
//  bitbucket-client
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 resources.
//!
//! Each resource struct borrows a [`BitbucketClient`](crate::api::BitbucketClient),
//! holds the path of one endpoint family, and exposes that family's
//! operations as async methods.
//!
//! # Module Organization
//!
//! - [`repositories`] - Repositories, watchers, forks, branches, commits, build statuses
//! - [`commits`] - Commit types, commit listing filter, build status types
//! - [`pullrequests`] - Pull requests, their activity, comments, commits and diff
//! - [`users`] - The authenticated user
//!
//! # Missing resources
//!
//! Bitbucket answers some lookups for a missing entity with a 404 and others
//! in a way this client reports as an empty value. Which one applies is fixed
//! per operation:
//!
//! | Operation | Missing target yields |
//! |-----------|-----------------------|
//! | [`RepositoryResource::get_repository`] | `Err(ApiError::NotFound)` |
//! | [`RepositoryResource::get_commit`] | `Err(ApiError::NotFound)` |
//! | [`RepositoryResource::get_build_status`] | `Err(ApiError::NotFound)` |
//! | [`PullRequestResource::get_pull_request`] | `Ok(None)` |
//! | [`PullRequestResource::get_comment`] | `Ok(Comment { id: None, .. })` |
//! | [`PullRequestResource::get_diff`] | `Ok(String::new())` |
//! | every `list_*` operation | `Ok(vec![])` |
//!
//! A missing target is a 404, or a 2xx response with an empty body.
//!
//! [`ApiError::NotFound`]: crate::api::ApiError::NotFound
//!
//! # Notes
//!
//! - All timestamps are ISO 8601 strings, passed through unparsed
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)
//! - Listings follow `next` links; see [`PageWalker`](crate::api::common::PageWalker)

pub mod commits;
pub mod pullrequests;
pub mod repositories;
pub mod users;

pub use commits::*;
pub use pullrequests::*;
pub use repositories::*;
pub use users::*;
