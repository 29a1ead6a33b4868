//
//  bitbucket-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Bitbucket Cloud
//!
//! This module provides shared types used by every resource in the client:
//! error handling, the Bitbucket error payload, and the small reference types
//! (users, links, rendered text) that show up inside most entities.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`RemoteFailure`] - Status code and parsed payload of a non-2xx response
//! - [`ErrorResponse`] - Bitbucket's `{"type": "error", "error": {...}}` body
//! - [`UserRef`] - Lightweight user reference
//! - [`Link`] / [`Links`] - HATEOAS-style links
//! - Pagination and query types (re-exported from [`pagination`] and [`query`])
//!
//! # Example
//!
//! ```rust
//! use bitbucket_client::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::NotFound(failure)) => println!("Not found: {}", failure),
//!         Err(ApiError::Forbidden(failure)) => println!("No access: {}", failure.message),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;
mod path;
mod query;

pub use pagination::*;
pub use path::*;
pub use query::*;

/// Unified error type for all Bitbucket API operations.
///
/// Non-2xx responses are classified by status code so callers can tell an
/// authorization failure from a missing resource from a validation failure.
/// Every remote variant carries a [`RemoteFailure`] with the exact status
/// code and, when the body could be parsed, Bitbucket's error payload.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `AuthFailed` | Missing, invalid or expired credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `BadRequest` | Invalid request parameters | 400, 422 |
/// | `RateLimited` | Too many requests | 429 |
/// | `ServerError` | Internal server error | 5xx |
/// | `Remote` | Any other non-success status | other |
/// | `Network` | Transport failure | N/A |
/// | `Json` | A success body that is not the expected JSON | N/A |
/// | `InvalidUrl` | Malformed base URL or `next` link | N/A |
/// | `Config` | Missing or invalid client configuration | N/A |
/// | `CredentialExpired` | Access token past its known expiry, not sent | N/A |
/// | `RepeatedPage` | A `next` link points at a page already fetched | N/A |
///
/// # Notes
///
/// - The `Network` variant converts from `reqwest::Error` and is never retried
/// - Soft-404 operations never surface `NotFound`; see [`crate::api::cloud`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed or was not provided (HTTP 401).
    #[error("Authentication failed: {0}")]
    AuthFailed(RemoteFailure),

    /// The authenticated user may not perform this operation (HTTP 403).
    #[error("Permission denied: {0}")]
    Forbidden(RemoteFailure),

    /// The requested resource does not exist or is not visible (HTTP 404).
    #[error("Resource not found: {0}")]
    NotFound(RemoteFailure),

    /// The request was rejected as malformed (HTTP 400 or 422).
    #[error("Bad request: {0}")]
    BadRequest(RemoteFailure),

    /// Bitbucket's rate limit has been exceeded (HTTP 429).
    #[error("Rate limit exceeded: {0}")]
    RateLimited(RemoteFailure),

    /// Bitbucket failed to process the request (HTTP 5xx).
    #[error("Server error: {0}")]
    ServerError(RemoteFailure),

    /// Any other non-success response.
    #[error("API error: {0}")]
    Remote(RemoteFailure),

    /// A network-level error occurred during the request.
    ///
    /// Covers connection failures, timeouts and DNS errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body could not be decoded, or a request body encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be built or a `next` link was not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The client configuration is incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The access token is past its known expiry; nothing was sent.
    #[error("Access token expired; supply a new one")]
    CredentialExpired,

    /// A `next` link led back to a page this listing already fetched.
    #[error("Pagination loop: {0} was already fetched")]
    RepeatedPage(url::Url),
}

impl ApiError {
    /// Builds the error for a non-success response.
    ///
    /// Bitbucket Cloud returns errors in the format:
    /// ```json
    /// {"type": "error", "error": {"message": "Human readable message", "detail": "..."}}
    /// ```
    ///
    /// The message is taken from `error.message`, then `error.detail`, then a
    /// top-level `message`. When the body is not JSON the raw body is kept as
    /// the message so nothing the server said is lost.
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status code
    /// * `body` - The raw error response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let failure = RemoteFailure::parse(status, body);

        match status {
            401 => Self::AuthFailed(failure),
            403 => Self::Forbidden(failure),
            404 => Self::NotFound(failure),
            400 | 422 => Self::BadRequest(failure),
            429 => Self::RateLimited(failure),
            500..=599 => Self::ServerError(failure),
            _ => Self::Remote(failure),
        }
    }

    /// Returns the remote failure details, if this error came from a response.
    pub fn remote(&self) -> Option<&RemoteFailure> {
        match self {
            Self::AuthFailed(f)
            | Self::Forbidden(f)
            | Self::NotFound(f)
            | Self::BadRequest(f)
            | Self::RateLimited(f)
            | Self::ServerError(f)
            | Self::Remote(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        self.remote().map(|f| f.status)
    }

    /// Checks whether this is a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Details of a non-success response.
///
/// # Fields
///
/// * `status` - The HTTP status code
/// * `message` - The most specific human readable message available
/// * `payload` - The parsed Bitbucket error body, when it could be parsed
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFailure {
    /// HTTP status code of the response.
    pub status: u16,

    /// Human readable message extracted from the body.
    pub message: String,

    /// Parsed error body.
    pub payload: Option<ErrorResponse>,
}

impl RemoteFailure {
    fn parse(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<ErrorResponse>(body).ok();

        let message = payload
            .as_ref()
            .and_then(ErrorResponse::message)
            .map(str::to_string)
            .or_else(|| {
                serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|json| json.get("message")?.as_str().map(str::to_string))
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        Self {
            status,
            message,
            payload,
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (HTTP {})", self.message, self.status)
    }
}

/// Bitbucket Cloud error body.
///
/// ```json
/// {"type": "error", "error": {"message": "Repository not found", "detail": "..."}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"` for Bitbucket error bodies.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// The error details.
    pub error: ErrorDetail,
}

impl ErrorResponse {
    /// The most specific message: `error.message`, falling back to `error.detail`.
    pub fn message(&self) -> Option<&str> {
        self.error
            .message
            .as_deref()
            .or(self.error.detail.as_deref())
    }
}

/// The `error` object inside an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Short human readable message.
    #[serde(default)]
    pub message: Option<String>,

    /// Longer explanation, when Bitbucket provides one.
    #[serde(default)]
    pub detail: Option<String>,

    /// Per-field validation messages.
    #[serde(default)]
    pub fields: Option<serde_json::Value>,
}

/// HATEOAS-style link for API resource navigation.
///
/// # Example
///
/// ```rust
/// use bitbucket_client::api::common::Link;
///
/// let link = Link {
///     href: "https://api.bitbucket.org/2.0/repositories/owner/repo".to_string(),
///     name: None,
/// };
/// println!("Navigate to: {}", link.href);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The fully-qualified URL of the linked resource.
    pub href: String,

    /// Optional descriptive name for the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The `links` object found on most Bitbucket entities.
///
/// Only the links this client reads are named; everything else is kept in
/// `other` so nothing is dropped when an entity is re-serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Links {
    /// Link to the entity itself in the API.
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    /// Link to the entity in the web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    /// Avatar image, for users and repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Link>,

    /// Any remaining links, keyed by name.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Lightweight user reference.
///
/// Bitbucket embeds this shape in repositories (owner), commits (author
/// user), pull requests (author, reviewers) and watcher listings.
///
/// # Example
///
/// ```rust
/// use bitbucket_client::api::common::UserRef;
///
/// let json = r#"{
///     "uuid": "{12345678-1234-1234-1234-123456789012}",
///     "display_name": "John Doe",
///     "nickname": "johnd"
/// }"#;
///
/// let user: UserRef = serde_json::from_str(json).unwrap();
/// assert_eq!(user.nickname.as_deref(), Some("johnd"));
/// ```
///
/// # Notes
///
/// - Every field is optional: deleted accounts come back with only a display name
/// - UUIDs include curly braces as returned by the Bitbucket API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRef {
    /// UUID of the user, with curly braces.
    #[serde(default)]
    pub uuid: Option<String>,

    /// Atlassian account id.
    #[serde(default)]
    pub account_id: Option<String>,

    /// Display name as configured in the user's profile.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Short name used in mentions.
    #[serde(default)]
    pub nickname: Option<String>,

    /// Links to the user's profile and avatar.
    #[serde(default)]
    pub links: Option<Links>,
}

impl UserRef {
    /// Best name for display: display name, then nickname, then uuid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.nickname.as_deref())
            .or(self.uuid.as_deref())
            .unwrap_or("unknown")
    }
}

/// Text rendered by Bitbucket, used for commit summaries and comment content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rendered {
    /// The raw text as written.
    #[serde(default)]
    pub raw: Option<String>,

    /// Markup language, usually `markdown`.
    #[serde(default)]
    pub markup: Option<String>,

    /// HTML rendering of `raw`.
    #[serde(default)]
    pub html: Option<String>,
}
