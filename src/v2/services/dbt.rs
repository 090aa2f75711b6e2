//! dbt integration (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::Value;

/// dbt endpoints (`dbt/...`).
pub struct DbtService<'a> {
    client: &'a V2Client,
}

impl<'a> DbtService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Creates a dbt connection.
    pub async fn connection(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("dbt/dbt-connection", request).await
    }

    /// Generates TML from dbt models.
    pub async fn generate_tml(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("dbt/generate-tml", request).await
    }

    /// Generates sync TML for changed dbt models.
    pub async fn generate_sync_tml(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("dbt/generate-sync-tml", request).await
    }

    /// Lists dbt connections.
    pub async fn search(&self) -> ThoughtSpotResult<Value> {
        self.client.post_empty("dbt/search").await
    }

    /// Updates a dbt connection.
    pub async fn connection_update(
        &self,
        dbt_connection_identifier: &str,
        request: Value,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(&format!("dbt/{dbt_connection_identifier}"), request)
            .await
    }
}
