//! Sharing and permission fetching (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::Value;

/// Security endpoints (`security/...`).
pub struct SecurityService<'a> {
    client: &'a V2Client,
}

impl<'a> SecurityService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Permissions granted to principals.
    pub async fn principals_fetch_permissions(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("security/principals/fetch-permissions", request)
            .await
    }

    /// Permissions on metadata objects.
    pub async fn metadata_fetch_permissions(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("security/metadata/fetch-permissions", request)
            .await
    }

    /// Transfers ownership of metadata objects.
    pub async fn metadata_assign(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("security/metadata/assign", request).await
    }

    /// Shares metadata objects with principals.
    pub async fn metadata_share(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("security/metadata/share", request).await
    }
}
