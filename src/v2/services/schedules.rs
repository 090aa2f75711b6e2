//! Liveboard schedule management (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// Schedule endpoints (`schedules/...`).
pub struct SchedulesService<'a> {
    client: &'a V2Client,
}

impl<'a> SchedulesService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches schedules.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("schedules/search", request).await
    }

    /// Creates a schedule.
    pub async fn create(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("schedules", request).await
    }

    /// Updates a schedule.
    pub async fn update(
        &self,
        schedule_identifier: &str,
        request: Value,
    ) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(&format!("schedules/{schedule_identifier}/update"), request)
            .await
    }

    /// Deletes a schedule.
    pub async fn delete(&self, schedule_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                &format!("schedules/{schedule_identifier}/delete"),
                json!({ "schedule_identifier": schedule_identifier }),
            )
            .await
    }
}
