//! Sharing and permission inspection.
//!
//! Content belongs to its author; access is granted by sharing it to
//! users and groups with a [`SharePermissions`] set.

use super::{bool_param, json_param};
use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use crate::transport::RequestSpec;
use crate::types::{PermissionType, SharePermissions, TsObjectType};
use crate::v1::V1Client;
use serde_json::Value;

/// Options for `security/share` and `security/shareviz`.
#[derive(Debug, Clone, Default)]
pub struct ShareOptions {
    /// Send notification emails to the principals.
    pub notify_users: bool,
    /// Message included in the notification.
    pub message: Option<String>,
    /// Additional plain-email shares.
    pub email_shares: Vec<String>,
    /// Use custom embed URLs in the notification links.
    pub use_custom_embed_urls: bool,
}

/// Security endpoints (`security/...`).
pub struct SecurityService<'a> {
    client: &'a V1Client,
}

impl<'a> SecurityService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Shares objects with the principals in `permissions`.
    pub async fn share(
        &self,
        object_type: TsObjectType,
        object_guids: &[String],
        permissions: &SharePermissions,
        options: &ShareOptions,
    ) -> ThoughtSpotResult<()> {
        let permissions_json = serde_json::to_string(permissions)
            .map_err(|e| ThoughtSpotError::decode(format!("permissions serialization: {e}")))?;

        let mut form = vec![
            // Subtypes fold into LOGICAL_TABLE for sharing.
            (
                "type".to_string(),
                object_type.metadata_type().to_string(),
            ),
            ("id".to_string(), json_param(&object_guids)),
            ("permission".to_string(), permissions_json),
            ("notify".to_string(), bool_param(options.notify_users)),
            ("emailshares".to_string(), json_param(&options.email_shares)),
            (
                "useCustomEmbedUrls".to_string(),
                bool_param(options.use_custom_embed_urls),
            ),
        ];
        if let Some(ref message) = options.message {
            form.push(("message".to_string(), message.clone()));
        }

        let spec = RequestSpec::post(self.client.v1_path("security/share")).form(form);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Shares a single visualization of a liveboard, read-only.
    pub async fn share_viz(
        &self,
        object_type: TsObjectType,
        liveboard_guid: &str,
        viz_guid: &str,
        principal_guids: &[String],
        options: &ShareOptions,
    ) -> ThoughtSpotResult<()> {
        let mut form = vec![
            (
                "type".to_string(),
                object_type.metadata_type().to_string(),
            ),
            ("pinboardId".to_string(), liveboard_guid.to_string()),
            ("principalids".to_string(), json_param(&principal_guids)),
            ("vizid".to_string(), viz_guid.to_string()),
            ("notify".to_string(), bool_param(options.notify_users)),
            ("emailshares".to_string(), json_param(&options.email_shares)),
            (
                "useCustomEmbedUrls".to_string(),
                bool_param(options.use_custom_embed_urls),
            ),
        ];
        if let Some(ref message) = options.message {
            form.push(("message".to_string(), message.clone()));
        }

        let spec = RequestSpec::post(self.client.v1_path("security/shareviz")).form(form);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Permissions on a set of objects.
    pub async fn metadata_permissions(
        &self,
        object_type: TsObjectType,
        object_guids: &[String],
        dependent_share: bool,
        permission_type: PermissionType,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("security/metadata/permissions"))
            .query("type", object_type.metadata_type())
            .query("id", json_param(&object_guids))
            .query("dependentshare", bool_param(dependent_share))
            .query("permissiontype", permission_type.as_str());
        self.client.dispatch(spec).await?.into_json()
    }

    /// Permissions on a single object.
    pub async fn metadata_permissions_by_id(
        &self,
        object_type: TsObjectType,
        object_guid: &str,
        dependent_share: bool,
        permission_type: PermissionType,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(
            self.client
                .v1_path(&format!("security/metadata/{object_guid}/permissions")),
        )
        .query("type", object_type.metadata_type())
        .query("dependentshare", bool_param(dependent_share))
        .query("permissiontype", permission_type.as_str());
        self.client.dispatch(spec).await?.into_json()
    }

    /// Effective permissions for a batch of objects grouped by type.
    /// `ids_by_type` maps a metadata type to its GUID list.
    pub async fn effective_permission_bulk(
        &self,
        ids_by_type: &Value,
        dependent_share: bool,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("security/effectivepermissionbulk"))
            .form(vec![
                ("idsbytype".to_string(), ids_by_type.to_string()),
                ("dependentshare".to_string(), bool_param(dependent_share)),
            ]);
        self.client.dispatch(spec).await?.into_json()
    }
}
