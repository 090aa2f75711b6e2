//! User management.

use super::{bool_param, json_param};
use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use crate::transport::{MultipartField, RequestSpec};
use crate::v1::V1Client;
use serde_json::{Map, Value};

/// Parameters for creating a user (`POST user`).
#[derive(Debug, Clone)]
pub struct UserCreateRequest {
    /// Login name.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub display_name: String,
    /// Email address, stored in the properties blob.
    pub email: Option<String>,
    /// Extra properties merged with the email.
    pub properties: Option<Map<String, Value>>,
    /// Group GUIDs to assign.
    pub groups: Option<Vec<String>>,
    /// `LOCAL_USER` unless federated.
    pub user_type: String,
    /// Tenant id, for multi-tenant deployments.
    pub tenant_id: Option<String>,
    /// Share-dialog visibility.
    pub visibility: String,
}

impl UserCreateRequest {
    /// A local user with the default visibility.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            display_name: display_name.into(),
            email: None,
            properties: None,
            groups: None,
            user_type: "LOCAL_USER".to_string(),
            tenant_id: None,
            visibility: "DEFAULT".to_string(),
        }
    }

    /// Sets the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Assigns groups at creation.
    pub fn groups(mut self, groups: Vec<String>) -> Self {
        self.groups = Some(groups);
        self
    }
}

/// User preference flags for `user/updatepreference`.
#[derive(Debug, Clone, Default)]
pub struct UserPreferences {
    /// Preferred locale, e.g. `en_US`.
    pub preferred_locale: Option<String>,
    /// Email notification on share.
    pub notify_on_share: Option<bool>,
    /// Onboarding walkthrough completed.
    pub analyst_onboarding_complete: Option<bool>,
    /// Show the guided walkthrough.
    pub show_walk_me: Option<bool>,
}

impl UserPreferences {
    fn to_value(&self) -> Value {
        let mut preferences = Map::new();
        if let Some(ref locale) = self.preferred_locale {
            preferences.insert("preferredLocale".to_string(), Value::from(locale.clone()));
        }
        if let Some(notify) = self.notify_on_share {
            preferences.insert("notifyOnShare".to_string(), Value::from(notify));
        }
        if let Some(complete) = self.analyst_onboarding_complete {
            preferences.insert(
                "analystOnboardingComplete".to_string(),
                Value::from(complete),
            );
        }
        if let Some(show) = self.show_walk_me {
            preferences.insert("showWalkMe".to_string(), Value::from(show));
        }
        Value::Object(preferences)
    }
}

/// User endpoints (`user/...`).
pub struct UsersService<'a> {
    client: &'a V1Client,
}

impl<'a> UsersService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Fetches a user by GUID or name; with neither filter, lists all
    /// users.
    pub async fn get(
        &self,
        user_guid: Option<&str>,
        name: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("user/"))
            .query_opt("userid", user_guid)
            .query_opt("name", name);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Creates a user.
    pub async fn create(&self, request: &UserCreateRequest) -> ThoughtSpotResult<Value> {
        let mut properties = request.properties.clone().unwrap_or_default();
        if let Some(ref email) = request.email {
            properties.insert("mail".to_string(), Value::from(email.clone()));
        }

        let mut form = vec![
            ("name".to_string(), request.username.clone()),
            ("password".to_string(), request.password.clone()),
            ("displayname".to_string(), request.display_name.clone()),
            ("usertype".to_string(), request.user_type.clone()),
            ("visibility".to_string(), request.visibility.clone()),
            (
                "properties".to_string(),
                Value::Object(properties).to_string(),
            ),
        ];
        if let Some(ref groups) = request.groups {
            form.push(("groups".to_string(), json_param(groups)));
        }
        if let Some(ref tenant_id) = request.tenant_id {
            form.push(("tenantid".to_string(), tenant_id.clone()));
        }

        let spec = RequestSpec::post(self.client.v1_path("user")).form(form);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Deletes a user.
    pub async fn delete(&self, user_guid: &str) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::delete(self.client.v1_path(&format!("user/{user_guid}")));
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Updates a user. `content` is the full serialized user content
    /// blob, as returned by `get`.
    pub async fn update(
        &self,
        user_guid: &str,
        content: Option<&str>,
        password: Option<&str>,
    ) -> ThoughtSpotResult<()> {
        let mut form = vec![("userid".to_string(), user_guid.to_string())];
        if let Some(content) = content {
            form.push(("content".to_string(), content.to_string()));
        }
        if let Some(password) = password {
            form.push(("password".to_string(), password.to_string()));
        }
        let spec = RequestSpec::put(self.client.v1_path(&format!("user/{user_guid}"))).form(form);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Changes a user's own password.
    pub async fn update_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("user/updatepassword")).form(vec![
            ("name".to_string(), username.to_string()),
            ("currentpassword".to_string(), current_password.to_string()),
            ("newpassword".to_string(), new_password.to_string()),
        ]);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// All USER and USER_GROUP objects.
    pub async fn list(&self) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("user/list"));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Bulk-synchronizes users and groups from a principals document
    /// (multipart upload). `remove_deleted` deletes principals missing
    /// from the document — dangerous, keep `apply_changes` off until the
    /// dry-run output looks right.
    pub async fn sync(
        &self,
        principals_json: &str,
        password: &str,
        apply_changes: bool,
        remove_deleted: bool,
    ) -> ThoughtSpotResult<Value> {
        let fields = vec![
            // The principals part must carry an application/json content type.
            MultipartField::file(
                "principals",
                "principals.json",
                "application/json",
                principals_json,
            ),
            MultipartField::text("applyChanges", bool_param(apply_changes)),
            MultipartField::text("removeDelete", bool_param(remove_deleted)),
            MultipartField::text("password", password),
        ];
        let spec = RequestSpec::post(self.client.v1_path("user/sync")).multipart(fields);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Transfers ownership of all (or selected) objects between users.
    pub async fn transfer_ownership(
        &self,
        from_username: &str,
        to_username: &str,
        object_guids: Option<&[String]>,
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("user/transfer/ownership"))
            .query("fromUserName", from_username)
            .query("toUserName", to_username)
            .query_opt("objectid", object_guids.map(|guids| json_param(&guids)));
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Updates a user's preference blob.
    pub async fn update_preference(
        &self,
        user_guid: &str,
        username: &str,
        preferences: &UserPreferences,
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("user/updatepreference")).form(vec![
            ("userid".to_string(), user_guid.to_string()),
            ("username".to_string(), username.to_string()),
            ("preferences".to_string(), preferences.to_value().to_string()),
        ]);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Sets a user's email address.
    pub async fn set_email(&self, user_guid: &str, email: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::put(self.client.v1_path("user/email")).form(vec![
            ("userid".to_string(), user_guid.to_string()),
            ("emailid".to_string(), email.to_string()),
        ]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Groups a user belongs to.
    pub async fn groups(&self, user_guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path(&format!("user/{user_guid}/groups")));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Replaces a user's group membership.
    pub async fn set_groups(
        &self,
        user_guid: &str,
        group_guids: &[String],
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path(&format!("user/{user_guid}/groups")))
            .query("groupids", json_param(&group_guids));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Adds to a user's group membership.
    pub async fn add_groups(
        &self,
        user_guid: &str,
        group_guids: &[String],
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::put(self.client.v1_path(&format!("user/{user_guid}/groups")))
            .query("groupids", json_param(&group_guids));
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Removes groups from a user's membership.
    pub async fn remove_groups(
        &self,
        user_guid: &str,
        group_guids: &[String],
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::delete(self.client.v1_path(&format!("user/{user_guid}/groups")))
            .query("groupids", json_param(&group_guids));
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Invalidates live sessions of the named users. One of `usernames` /
    /// `user_guids` is required.
    pub async fn invalidate_sessions(
        &self,
        usernames: Option<&[String]>,
        user_guids: Option<&[String]>,
    ) -> ThoughtSpotResult<()> {
        if usernames.is_none() && user_guids.is_none() {
            return Err(ThoughtSpotError::config(
                "either usernames or user_guids is required",
            ));
        }
        let mut form = Vec::new();
        if let Some(usernames) = usernames {
            form.push(("username".to_string(), json_param(&usernames)));
        }
        if let Some(guids) = user_guids {
            form.push(("userid".to_string(), json_param(&guids)));
        }
        let spec =
            RequestSpec::post(self.client.v1_path("user/session/invalidate")).form(form);
        self.client.dispatch(spec).await?;
        Ok(())
    }
}
