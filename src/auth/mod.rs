//
//  bitbucket-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication
//!
//! Credentials used to authenticate requests against Bitbucket Cloud.
//!
//! The client does not acquire credentials itself. Tokens and app passwords
//! are obtained out of band (Bitbucket settings, an OAuth consumer, a CI
//! secret) and handed over through configuration or the environment.
//!
//! ## Supported Methods
//!
//! - **OAuth 2.0 / access token**: sent as a `Bearer` token
//! - **App password**: username plus app password, sent as HTTP Basic
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_client::auth::AuthCredential;
//!
//! let credential = AuthCredential::app_password("johnd", "app-password");
//! assert!(!credential.is_expired());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;

/// Authentication credentials for Bitbucket Cloud.
///
/// # Variants
///
/// - `OAuth`: access token with an optional expiry. Recommended.
/// - `AppPassword`: Bitbucket username and an app password.
///
/// # Notes
///
/// - The `Debug` implementation never prints secrets.
#[derive(Clone)]
pub enum AuthCredential {
    /// OAuth 2.0 (or repository/workspace access token) authentication.
    OAuth {
        /// The access token sent as `Authorization: Bearer <token>`.
        access_token: String,
        /// When the token stops being valid, if known.
        expires_at: Option<DateTime<Utc>>,
    },
    /// App password authentication.
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        password: String,
    },
}

impl AuthCredential {
    /// Bearer token credential with no known expiry.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::OAuth {
            access_token: token.into(),
            expires_at: None,
        }
    }

    /// App password credential.
    pub fn app_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::AppPassword {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Adds the matching `Authorization` header to `request`.
    ///
    /// - OAuth uses Bearer token authentication
    /// - AppPassword uses HTTP Basic authentication
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::OAuth { access_token, .. } => request.bearer_auth(access_token),
            Self::AppPassword { username, password } => request.basic_auth(username, Some(password)),
        }
    }

    /// Checks whether an OAuth token is past its known expiry.
    ///
    /// Credentials without an expiry never report as expired.
    pub fn is_expired(&self) -> bool {
        match self {
            Self::OAuth {
                expires_at: Some(exp),
                ..
            } => *exp < Utc::now(),
            _ => false,
        }
    }

    /// The username, for credentials that carry one.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::OAuth { .. } => None,
            Self::AppPassword { username, .. } => Some(username),
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OAuth { expires_at, .. } => f
                .debug_struct("OAuth")
                .field("access_token", &"***")
                .field("expires_at", expires_at)
                .finish(),
            Self::AppPassword { username, .. } => f
                .debug_struct("AppPassword")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry() {
        let expired = AuthCredential::OAuth {
            access_token: "t".to_string(),
            expires_at: Some(Utc::now() - Duration::minutes(5)),
        };
        assert!(expired.is_expired());
        assert!(!AuthCredential::bearer("t").is_expired());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let printed = format!("{:?}", AuthCredential::app_password("johnd", "s3cret"));
        assert!(printed.contains("johnd"));
        assert!(!printed.contains("s3cret"));
    }

    #[test]
    fn test_apply_basic_header() {
        let request = reqwest::Client::new().get("https://api.bitbucket.org/2.0/user");
        let request = AuthCredential::app_password("johnd", "pw")
            .apply_to_request(request)
            .build()
            .unwrap();

        let header = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert!(header.to_str().unwrap().starts_with("Basic "));
    }
}
