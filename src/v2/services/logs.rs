//! Audit log fetching (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// Log endpoints (`logs/...`).
pub struct LogsService<'a> {
    client: &'a V2Client,
}

impl<'a> LogsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Fetches log entries of one type, optionally bounded by epoch
    /// millisecond timestamps.
    pub async fn fetch(
        &self,
        log_type: &str,
        start_epoch_time_in_millis: Option<i64>,
        end_epoch_time_in_millis: Option<i64>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({ "log_type": log_type });
        if let Some(start) = start_epoch_time_in_millis {
            request["start_epoch_time_in_millis"] = Value::from(start);
        }
        if let Some(end) = end_epoch_time_in_millis {
            request["end_epoch_time_in_millis"] = Value::from(end);
        }
        self.client.post_json("logs/fetch", request).await
    }
}
