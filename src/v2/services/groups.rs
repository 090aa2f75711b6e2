//! Group management (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::Value;

/// Group endpoints (`groups/...`).
pub struct GroupsService<'a> {
    client: &'a V2Client,
}

impl<'a> GroupsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches groups.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("groups/search", request).await
    }

    /// Creates a group.
    pub async fn create(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("groups/create", request).await
    }

    /// Updates a group.
    pub async fn update(
        &self,
        group_identifier: &str,
        request: Value,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(&format!("groups/{group_identifier}/update"), request)
            .await
    }

    /// Deletes a group.
    pub async fn delete(&self, group_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!("groups/{group_identifier}/delete"))
            .await
    }

    /// Bulk-imports groups.
    pub async fn import(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("groups/import", request).await
    }
}
