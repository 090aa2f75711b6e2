//! Group management.

use super::json_param;
use crate::errors::ThoughtSpotResult;
use crate::transport::{MultipartField, RequestSpec};
use crate::types::{GroupVisibility, Privilege};
use crate::v1::V1Client;
use serde_json::Value;

/// Group endpoints (`group/...`).
pub struct GroupsService<'a> {
    client: &'a V1Client,
}

impl<'a> GroupsService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Fetches a group by GUID or name; with neither filter, lists all
    /// groups.
    pub async fn get(
        &self,
        group_guid: Option<&str>,
        name: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("group"))
            .query_opt("groupid", group_guid)
            .query_opt("name", name);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Creates a local group.
    pub async fn create(
        &self,
        group_name: &str,
        display_name: &str,
        privileges: Option<&[Privilege]>,
        visibility: GroupVisibility,
        tenant_id: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let mut form = vec![
            ("name".to_string(), group_name.to_string()),
            ("display_name".to_string(), display_name.to_string()),
            ("grouptype".to_string(), "LOCAL_GROUP".to_string()),
            ("visibility".to_string(), visibility.as_str().to_string()),
        ];
        if let Some(privileges) = privileges {
            let wire: Vec<&str> = privileges.iter().map(|p| p.as_str()).collect();
            form.push(("privileges".to_string(), json_param(&wire)));
        }
        if let Some(tenant_id) = tenant_id {
            form.push(("tenantid".to_string(), tenant_id.to_string()));
        }
        let spec = RequestSpec::post(self.client.v1_path("group")).form(form);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Deletes a group.
    pub async fn delete(&self, group_guid: &str) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::delete(self.client.v1_path(&format!("group/{group_guid}")));
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Updates a group from a serialized content blob.
    pub async fn update(&self, group_guid: &str, content: Option<&str>) -> ThoughtSpotResult<Value> {
        let mut form = Vec::new();
        if let Some(content) = content {
            form.push(("content".to_string(), content.to_string()));
        }
        let spec =
            RequestSpec::put(self.client.v1_path(&format!("group/{group_guid}"))).form(form);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Adds one user to a group.
    pub async fn add_user(&self, group_guid: &str, user_guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(
            self.client
                .v1_path(&format!("group/{group_guid}/user/{user_guid}")),
        );
        self.client.dispatch(spec).await?.into_json()
    }

    /// Removes one user from a group.
    pub async fn remove_user(&self, group_guid: &str, user_guid: &str) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::delete(
            self.client
                .v1_path(&format!("group/{group_guid}/user/{user_guid}")),
        );
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Users of a group.
    pub async fn users(&self, group_guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path(&format!("group/{group_guid}/users")));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Replaces the users of a group. 204 on success.
    pub async fn set_users(
        &self,
        group_guid: &str,
        user_guids: &[String],
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path(&format!("group/{group_guid}/users")))
            .query("userids", json_param(&user_guids));
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Removes users from a group.
    pub async fn remove_users(
        &self,
        group_guid: &str,
        user_guids: &[String],
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::delete(self.client.v1_path(&format!("group/{group_guid}/users")))
            .query("userids", json_param(&user_guids));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Grants a privilege to groups by name. This endpoint insists on
    /// multipart/form-data.
    pub async fn add_privilege(
        &self,
        privilege: Privilege,
        group_names: &[String],
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("group/addprivilege")).multipart(vec![
            MultipartField::text("privilege", privilege.as_str()),
            MultipartField::text("groupNames", json_param(&group_names)),
        ]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Revokes a privilege from groups by name. Multipart, like
    /// `add_privilege`.
    pub async fn remove_privilege(
        &self,
        privilege: Privilege,
        group_names: &[String],
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("group/removeprivilege")).multipart(vec![
            MultipartField::text("privilege", privilege.as_str()),
            MultipartField::text("groupNames", json_param(&group_names)),
        ]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Users of a group, via the listuser endpoint.
    pub async fn list_users(&self, group_guid: &str) -> ThoughtSpotResult<Value> {
        let spec =
            RequestSpec::get(self.client.v1_path(&format!("group/listuser/{group_guid}")));
        self.client.dispatch(spec).await?.into_json()
    }
}
