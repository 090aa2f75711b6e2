//! Org (tenant partition) management (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// Org endpoints (`orgs/...`).
pub struct OrgsService<'a> {
    client: &'a V2Client,
}

impl<'a> OrgsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches orgs.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("orgs/search", request).await
    }

    /// Creates an org.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({ "name": name });
        if let Some(description) = description {
            request["description"] = Value::from(description);
        }
        self.client.post_json("orgs/create", request).await
    }

    /// Updates an org.
    pub async fn update(&self, org_identifier: &str, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(&format!("orgs/{org_identifier}/update"), request)
            .await
    }

    /// Deletes an org.
    pub async fn delete(&self, org_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!("orgs/{org_identifier}/delete"))
            .await
    }
}
