//! Connection management (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// Connection endpoints (`connection/...`, `connections/...`).
pub struct ConnectionsService<'a> {
    client: &'a V2Client,
}

impl<'a> ConnectionsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches connections.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("connection/search", request).await
    }

    /// Creates a connection.
    pub async fn create(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("connection/create", request).await
    }

    /// Updates a connection (body-addressed variant).
    pub async fn update(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("connection/update", request).await
    }

    /// Deletes a connection (body-addressed variant).
    pub async fn delete(&self, connection_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "connection/delete",
                json!({ "connection_identifier": connection_identifier }),
            )
            .await
    }

    /// Deletes a connection (path-addressed variant on newer releases).
    pub async fn delete_by_id(&self, connection_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!("connection/{connection_identifier}/delete"))
            .await
    }

    /// Updates a connection (path-addressed variant on newer releases).
    pub async fn update_by_id(
        &self,
        connection_identifier: &str,
        request: Value,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                &format!("connection/{connection_identifier}/update"),
                request,
            )
            .await
    }

    /// Downloads pending external metadata changes for a connection.
    pub async fn download_metadata_changes(
        &self,
        connection_identifier: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!(
                "connections/download-connection-metadata-changes/{connection_identifier}"
            ))
            .await
    }

    /// Diff status between the connection and the external source.
    pub async fn fetch_diff_status(
        &self,
        connection_identifier: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!(
                "connections/fetch-connection-diff-status/{connection_identifier}"
            ))
            .await
    }
}
