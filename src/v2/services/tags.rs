//! Tag management and assignment (V2).

use crate::errors::ThoughtSpotResult;
use crate::v2::V2Client;
use serde_json::{json, Value};

/// Tag endpoints (`tags/...`).
pub struct TagsService<'a> {
    client: &'a V2Client,
}

impl<'a> TagsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches tags by identifier, name pattern or color.
    pub async fn search(
        &self,
        tag_identifier: Option<&str>,
        name_pattern: Option<&str>,
        color: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({});
        if let Some(identifier) = tag_identifier {
            request["tag_identifier"] = Value::from(identifier);
        }
        if let Some(color) = color {
            request["color"] = Value::from(color);
        }
        if let Some(pattern) = name_pattern {
            request["name_pattern"] = Value::from(pattern);
        }
        self.client.post_json("tags/search", request).await
    }

    /// Creates a tag.
    pub async fn create(&self, name: &str, color: Option<&str>) -> ThoughtSpotResult<Value> {
        let mut request = json!({ "name": name });
        if let Some(color) = color {
            request["color"] = Value::from(color);
        }
        self.client.post_json("tags/create", request).await
    }

    /// Updates a tag.
    pub async fn update(
        &self,
        tag_identifier: &str,
        name: &str,
        color: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({ "name": name });
        if let Some(color) = color {
            request["color"] = Value::from(color);
        }
        self.client
            .post_json(&format!("tags/{tag_identifier}/update"), request)
            .await
    }

    /// Deletes a tag.
    pub async fn delete(&self, tag_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_empty(&format!("tags/{tag_identifier}/delete"))
            .await
    }

    /// Assigns tags to metadata objects. The request carries `metadata`
    /// (identifier/type pairs) and `tag_identifiers` lists.
    pub async fn assign(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("tags/assign", request).await
    }

    /// Removes tags from metadata objects.
    pub async fn unassign(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("tags/unassign", request).await
    }
}
