//! User management (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// User endpoints (`users/...`).
pub struct UsersService<'a> {
    client: &'a V2Client,
}

impl<'a> UsersService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches users. The request schema is the documented open-ended
    /// search contract, passed through as-is.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("users/search", request).await
    }

    /// Creates a user.
    pub async fn create(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("users/create", request).await
    }

    /// Updates a user.
    pub async fn update(&self, user_identifier: &str, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(&format!("users/{user_identifier}/update"), request)
            .await
    }

    /// Deletes a user.
    pub async fn delete(&self, user_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!("users/{user_identifier}/delete"))
            .await
    }

    /// Bulk-imports users.
    pub async fn import(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("users/import", request).await
    }

    /// Changes a user's password.
    pub async fn change_password(
        &self,
        user_identifier: &str,
        current_password: &str,
        new_password: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "users/change-password",
                json!({
                    "user_identifier": user_identifier,
                    "current_password": current_password,
                    "new_password": new_password,
                }),
            )
            .await
    }

    /// Resets a user's password (admin operation).
    pub async fn reset_password(
        &self,
        user_identifier: &str,
        new_password: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "users/reset-password",
                json!({
                    "user_identifier": user_identifier,
                    "new_password": new_password,
                }),
            )
            .await
    }

    /// Force-logs-out users.
    pub async fn force_logout(&self, user_identifiers: &[String]) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "users/force-logout",
                json!({ "user_identifiers": user_identifiers }),
            )
            .await
    }

    /// Activates a user from an activation token.
    pub async fn activate(
        &self,
        user_identifier: &str,
        auth_token: &str,
        password: &str,
        properties: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({
            "user_identifier": user_identifier,
            "auth_token": auth_token,
            "password": password,
        });
        if let Some(properties) = properties {
            request["properties"] = Value::from(properties);
        }
        self.client.post_json("users/activate", request).await
    }

    /// Deactivates a user. `base_url` goes into the reactivation link.
    pub async fn deactivate(
        &self,
        user_identifier: &str,
        base_url: &str,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "users/deactivate",
                json!({
                    "user_identifier": user_identifier,
                    "base_url": base_url,
                }),
            )
            .await
    }
}
