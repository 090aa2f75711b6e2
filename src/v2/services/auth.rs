//! Session and token lifecycle for the V2.0 API.
//!
//! A V2 bearer token works three ways: installed on this client for
//! direct calls, exchanged for a session cookie via
//! [`AuthService::session_login`], or handed to the V1
//! `session/login/token` trusted-auth flow.

use crate::auth::{CustomTokenRequest, ObjectTokenRequest, SessionLoginRequest, TokenRequest, TokenResponse};
use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use crate::transport::RequestSpec;
use crate::v2::V2Client;
use serde_json::Value;

/// Auth endpoints (`auth/...`).
pub struct AuthService<'a> {
    client: &'a V2Client,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Creates a cookie session. The cookie lands in the jar; the client
    /// records a [`crate::auth::Credential::SessionCookie`]. For the
    /// bearer-handoff variant build the request with
    /// [`SessionLoginRequest::from_bearer`] after installing the token.
    pub async fn session_login(&self, request: &SessionLoginRequest) -> ThoughtSpotResult<()> {
        let body = to_body(request)?;
        let spec = RequestSpec::post(self.client.api_path("auth/session/login")).json(body);
        // HTTP 204 on success, no content.
        self.client
            .dispatch(spec)
            .await
            .map_err(|e| e.into_auth())?;
        self.client
            .install_credential(crate::auth::Credential::SessionCookie)
    }

    /// Ends the cookie session.
    pub async fn session_logout(&self) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.api_path("auth/session/logout"));
        self.client.dispatch(spec).await?;
        self.client.clear_credential();
        Ok(())
    }

    /// Issues a full-access bearer token. The token is returned, not
    /// installed — pass it to
    /// [`V2Client::install_credential`](crate::V2Client::install_credential)
    /// to use it.
    pub async fn token_full(&self, request: &TokenRequest) -> ThoughtSpotResult<TokenResponse> {
        self.token_request("auth/token/full", to_body(request)?).await
    }

    /// Issues a bearer token scoped to one object.
    pub async fn token_object(
        &self,
        request: &ObjectTokenRequest,
    ) -> ThoughtSpotResult<TokenResponse> {
        self.token_request("auth/token/object", to_body(request)?)
            .await
    }

    /// Issues a bearer token carrying custom persisted attributes.
    pub async fn token_custom(
        &self,
        request: &CustomTokenRequest,
    ) -> ThoughtSpotResult<TokenResponse> {
        self.token_request("auth/token/custom", to_body(request)?)
            .await
    }

    /// Issues a token from a raw request body, for token parameters this
    /// binding does not model. `token_type` is `full`, `object` or
    /// `custom`.
    pub async fn token_direct(
        &self,
        token_type: &str,
        request: Value,
    ) -> ThoughtSpotResult<TokenResponse> {
        let endpoint = format!("auth/token/{}", token_type.to_lowercase());
        self.token_request(&endpoint, request).await
    }

    async fn token_request(
        &self,
        endpoint: &str,
        body: Value,
    ) -> ThoughtSpotResult<TokenResponse> {
        let spec = RequestSpec::post(self.client.api_path(endpoint)).json(body);
        let response = self
            .client
            .dispatch(spec)
            .await
            .map_err(|e| e.into_auth())?
            .into_json()?;
        serde_json::from_value(response)
            .map_err(|e| ThoughtSpotError::decode(format!("token response: {e}")))
    }

    /// Revokes the current token server-side (best effort) — the local
    /// credential is dropped either way.
    pub async fn token_revoke(&self) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.api_path("auth/token/revoke"));
        let result = self.client.dispatch(spec).await;
        self.client.clear_credential();
        result.map(|_| ())
    }

    /// Validates a token.
    pub async fn token_validate(&self, token: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("auth/token/validate", serde_json::json!({ "token": token }))
            .await
    }

    /// The user behind the current session or token.
    pub async fn session_user(&self) -> ThoughtSpotResult<Value> {
        self.client.get_json("auth/session/user").await
    }

    /// Details of the current session token.
    pub async fn session_token(&self) -> ThoughtSpotResult<Value> {
        self.client.get_json("auth/session/token").await
    }
}

fn to_body<S: serde::Serialize>(request: &S) -> ThoughtSpotResult<Value> {
    serde_json::to_value(request)
        .map_err(|e| ThoughtSpotError::decode(format!("request serialization: {e}")))
}
