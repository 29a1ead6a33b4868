//
//  bitbucket-client
//  api/cloud/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud user API.

use crate::api::client::BitbucketClient;
use crate::api::common::{encode_segment, ApiError, QueryParams, UserRef};

/// Users: `/user` and `/users/{selected_user}`.
pub struct UsersResource<'a> {
    client: &'a BitbucketClient,
}

impl<'a> UsersResource<'a> {
    /// Creates the resource.
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// The authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthFailed`] when the client has no valid credential.
    pub async fn get_current_user(&self) -> Result<UserRef, ApiError> {
        self.client.get("/user", QueryParams::new()).await
    }

    /// A user by UUID or account id.
    pub async fn get_user(&self, selected_user: &str) -> Result<UserRef, ApiError> {
        self.client
            .get(&format!("/users/{}", encode_segment(selected_user)), QueryParams::new())
            .await
    }
}
