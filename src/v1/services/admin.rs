//! Cluster configuration, embed custom actions, audit logs, and the odd
//! endpoints that fit nowhere else.

use super::json_param;
use crate::errors::ThoughtSpotResult;
use crate::transport::RequestSpec;
use crate::v1::V1Client;
use serde_json::Value;

/// Admin endpoints (`admin/...`, `logs/...`, `materialization/...`,
/// `partner/...`).
pub struct AdminService<'a> {
    client: &'a V1Client,
}

impl<'a> AdminService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Cluster configuration.
    pub async fn config_info(&self) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("admin/configinfo"));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Configuration values overridden from defaults.
    pub async fn config_info_overrides(&self) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("admin/configinfo/overrides"));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Applies configuration changes.
    pub async fn config_info_update(&self, config_changes: &Value) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("admin/configinfo/update")).form(vec![(
            "configchanges".to_string(),
            config_changes.to_string(),
        )]);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Embed custom actions, optionally filtered by tags.
    pub async fn embed_actions(&self, tags: Option<&[String]>) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("admin/embed/actions"))
            .query_opt("tags", tags.map(|tags| json_param(&tags)));
        self.client.dispatch(spec).await?.into_json()
    }

    /// One embed custom action.
    pub async fn embed_action(&self, action_guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(
            self.client
                .v1_path(&format!("admin/embed/actions/{action_guid}")),
        );
        self.client.dispatch(spec).await?.into_json()
    }

    /// Creates an embed custom action.
    pub async fn create_embed_action(&self, definition: &Value) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("admin/embed/actions"))
            .form(vec![("embedaction".to_string(), definition.to_string())]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Updates an embed custom action.
    pub async fn update_embed_action(
        &self,
        action_guid: &str,
        definition: &Value,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(
            self.client
                .v1_path(&format!("admin/embed/actions/{action_guid}")),
        )
        .form(vec![("embedaction".to_string(), definition.to_string())]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Deletes an embed custom action.
    pub async fn delete_embed_action(&self, action_guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::delete(
            self.client
                .v1_path(&format!("admin/embed/actions/{action_guid}")),
        );
        self.client.dispatch(spec).await?.into_json()
    }

    /// Associations of an embed custom action.
    pub async fn embed_action_associations(&self, action_guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(
            self.client
                .v1_path(&format!("admin/embed/actions/{action_guid}/associations")),
        );
        self.client.dispatch(spec).await?.into_json()
    }

    /// Adds an association to an embed custom action.
    pub async fn add_embed_action_association(
        &self,
        action_guid: &str,
        association: &Value,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(
            self.client
                .v1_path(&format!("admin/embed/actions/{action_guid}/associations")),
        )
        .form(vec![(
            "actionassociation".to_string(),
            association.to_string(),
        )]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Removes an association from an embed custom action.
    pub async fn delete_embed_action_association(
        &self,
        action_guid: &str,
        association: &Value,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::delete(
            self.client
                .v1_path(&format!("admin/embed/actions/{action_guid}/associations")),
        )
        .form(vec![(
            "actionassociation".to_string(),
            association.to_string(),
        )]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Streams an audit log topic, optionally bounded by epoch
    /// timestamps (millis, as strings).
    pub async fn logs_topic(
        &self,
        topic: &str,
        from_epoch: Option<&str>,
        to_epoch: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path(&format!("logs/topics/{topic}")))
            .query_opt("fromEpoch", from_epoch)
            .query_opt("toEpoch", to_epoch);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Refreshes a materialized view.
    pub async fn refresh_materialized_view(&self, guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(
            self.client
                .v1_path(&format!("materialization/refreshview/{guid}")),
        );
        self.client.dispatch(spec).await?.into_json()
    }

    /// Provisions a Snowflake partner user.
    pub async fn partner_snowflake_user(&self, body: &Value) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("partner/snowflake/user"))
            .form(vec![("body".to_string(), body.to_string())]);
        self.client.dispatch(spec).await?.into_json()
    }
}
