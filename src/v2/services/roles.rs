//! Role management (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::Value;

/// Role endpoints (`roles/...`).
pub struct RolesService<'a> {
    client: &'a V2Client,
}

impl<'a> RolesService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches roles.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("roles/search", request).await
    }

    /// Creates a role.
    pub async fn create(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("roles/create", request).await
    }

    /// Updates a role.
    pub async fn update(&self, role_identifier: &str, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(&format!("roles/{role_identifier}/update"), request)
            .await
    }

    /// Deletes a role.
    pub async fn delete(&self, role_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!("roles/{role_identifier}/delete"))
            .await
    }
}
