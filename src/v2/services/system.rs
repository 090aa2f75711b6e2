//! System information and configuration (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// System endpoints (`system/...`).
pub struct SystemService<'a> {
    client: &'a V2Client,
}

impl<'a> SystemService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Cluster information (release, license, time zone).
    pub async fn info(&self) -> ThoughtSpotResult<Value> {
        self.client.get_json("system").await
    }

    /// Current configuration.
    pub async fn config(&self) -> ThoughtSpotResult<Value> {
        self.client.get_json("system/config").await
    }

    /// Configuration values overridden from defaults.
    pub async fn config_overrides(&self) -> ThoughtSpotResult<Value> {
        self.client.get_json("system/config-overrides").await
    }

    /// Applies configuration changes.
    pub async fn config_update(&self, configuration: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("system/config-update", json!({ "configuration": configuration }))
            .await
    }
}
