//! Session lifecycle: cookie login, trusted-auth tokens, org context,
//! home liveboard.

use super::{bool_param, json_param};
use crate::auth::{Credential, TrustedTokenRequest};
use crate::errors::ThoughtSpotResult;
use crate::transport::{Expect, RequestSpec};
use crate::v1::V1Client;
use serde_json::Value;

/// Session operations (`session/...`).
pub struct SessionService<'a> {
    client: &'a V1Client,
}

impl<'a> SessionService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Logs in with a username and password (cookie flow). On success the
    /// session cookie lands in the jar and is sent on every subsequent
    /// call; the client records a [`Credential::SessionCookie`].
    ///
    /// Failures surface as [`crate::ThoughtSpotError::Auth`] with the
    /// reason classified from the underlying cause.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("session/login")).form(vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
            ("rememberme".to_string(), bool_param(remember_me)),
        ]);
        // HTTP 204 on success, no content.
        self.client
            .dispatch(spec)
            .await
            .map_err(|e| e.into_auth())?;
        self.client.install_credential(Credential::SessionCookie)
    }

    /// Logs the session out and drops the local credential.
    pub async fn logout(&self) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("session/logout"));
        self.client.dispatch(spec).await?;
        self.client.clear_credential();
        Ok(())
    }

    /// Requests a trusted-authentication token. Only call this from an
    /// authenticator service holding the secret key; the token comes back
    /// as plain text.
    pub async fn auth_token(&self, request: TrustedTokenRequest) -> ThoughtSpotResult<String> {
        let mut form = vec![
            ("secret_key".to_string(), request.secret_key.clone()),
            ("username".to_string(), request.username.clone()),
            ("access_level".to_string(), request.access_level.clone()),
        ];
        if let Some(ref object_guid) = request.object_guid {
            form.push(("id".to_string(), object_guid.clone()));
        }
        if let Some(org_id) = request.org_id {
            form.push(("orgid".to_string(), org_id.to_string()));
        }
        if let Some(auto_create) = request.auto_create_user {
            form.push(("autocreate".to_string(), bool_param(auto_create)));
        }
        if let Some(ref groups) = request.groups {
            form.push(("groups".to_string(), json_param(groups)));
        }

        let spec = RequestSpec::post(self.client.v1_path("session/auth/token"))
            .form(form)
            .expect(Expect::Text);
        self.client
            .dispatch(spec)
            .await
            .map_err(|e| e.into_auth())?
            .into_text()
    }

    /// Exchanges a trusted-auth token for a session cookie
    /// (`session/login/token`). Mostly exercised by embed flows; provided
    /// for testing trusted auth end to end.
    pub async fn login_with_token(
        &self,
        username: &str,
        auth_token: &str,
        redirect_url: &str,
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("session/login/token"))
            .form(vec![
                ("username".to_string(), username.to_string()),
                ("auth_token".to_string(), auth_token.to_string()),
                ("redirect_url".to_string(), redirect_url.to_string()),
            ])
            .expect(Expect::Text);
        self.client
            .dispatch(spec)
            .await
            .map_err(|e| e.into_auth())?;
        self.client.install_credential(Credential::SessionCookie)
    }

    /// Details of the logged-in session (user, privileges, release).
    pub async fn info(&self) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("session/info"));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Whether the current session is live. Answers `false` on any HTTP
    /// error rather than raising — this is a probe, not an operation.
    pub async fn is_active(&self) -> ThoughtSpotResult<bool> {
        let spec = RequestSpec::get(self.client.internal_path("session/isactive"))
            .accept("*/*")
            .expect(Expect::Text);
        match self.client.dispatch(spec).await {
            Ok(_) => Ok(true),
            Err(crate::ThoughtSpotError::Api(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Orgs visible to the current session.
    pub async fn orgs(&self, batchsize: i64, offset: i64) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("session/orgs"))
            .query("batchsize", batchsize)
            .query("offset", offset);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Switches the session's active org context.
    pub async fn switch_org(&self, org_id: i64) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::put(self.client.v1_path("session/orgs"))
            .form(vec![("orgid".to_string(), org_id.to_string())]);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Orgs a user belongs to.
    pub async fn orgs_for_user(
        &self,
        user_guid: &str,
        org_scope: &str,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(
            self.client
                .v1_path(&format!("session/orgs/users/{user_guid}")),
        )
        .query("orgScope", org_scope);
        self.client.dispatch(spec).await?.into_json()
    }

    /// The home liveboard of the logged-in user.
    pub async fn home_liveboard(&self) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("session/homepinboard"));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Sets a user's home liveboard.
    pub async fn set_home_liveboard(
        &self,
        liveboard_guid: &str,
        user_guid: &str,
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.v1_path("session/homepinboard")).form(vec![
            ("id".to_string(), liveboard_guid.to_string()),
            ("userid".to_string(), user_guid.to_string()),
        ]);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Clears the logged-in user's home liveboard.
    pub async fn clear_home_liveboard(&self) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::delete(self.client.v1_path("session/homepinboard"));
        self.client.dispatch(spec).await?;
        Ok(())
    }
}
