//! Custom action management (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::Value;

/// Custom action endpoints (`customization/custom-actions/...`).
pub struct CustomActionsService<'a> {
    client: &'a V2Client,
}

impl<'a> CustomActionsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches custom actions.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("customization/custom-actions/search", request)
            .await
    }

    /// Creates a custom action.
    pub async fn create(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("customization/custom-actions/create", request)
            .await
    }

    /// Updates a custom action.
    pub async fn update(
        &self,
        custom_action_identifier: &str,
        request: Value,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                &format!("customization/custom-actions/{custom_action_identifier}/update"),
                request,
            )
            .await
    }

    /// Deletes a custom action.
    pub async fn delete(&self, custom_action_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!(
                "customization/custom-actions/{custom_action_identifier}/delete"
            ))
            .await
    }
}
