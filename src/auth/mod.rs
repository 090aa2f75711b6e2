//! Credentials and the request/response types of the login handshakes.
//!
//! Token acquisition and credential installation are two explicit steps:
//! `auth().token_full(...)` returns the token, and the caller decides
//! whether to pass it to `install_credential`. Nothing mutates the
//! session's headers behind the caller's back.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The one credential slot of a client instance.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Cookie-based session auth; the underlying cookie jar carries the
    /// cookie set by the login response.
    SessionCookie,
    /// Bearer token auth; installs `Authorization: Bearer <token>` into
    /// the default header set.
    Bearer(SecretString),
}

impl Credential {
    /// Creates a bearer credential from a token string.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(SecretString::new(token.into()))
    }

    /// The `Authorization` header value for this credential, if it uses one.
    pub fn authorization_value(&self) -> Option<String> {
        match self {
            Self::SessionCookie => None,
            Self::Bearer(token) => Some(format!("Bearer {}", token.expose_secret())),
        }
    }
}

/// Request body for `auth/token/full` (V2).
///
/// Constructors enforce the wire contract: either a password or a secret
/// key authenticates the request, and just-in-time provisioning requires a
/// display name and email.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    username: String,
    validity_time_in_sec: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    org_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_create: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_identifiers: Option<Vec<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Default token validity, in seconds.
pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 300;

impl TokenRequest {
    /// Token request authenticated with a username and password.
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            validity_time_in_sec: DEFAULT_TOKEN_VALIDITY_SECS,
            password: Some(password.into()),
            secret_key: None,
            org_id: None,
            auto_create: None,
            display_name: None,
            email: None,
            group_identifiers: None,
            extra: Map::new(),
        }
    }

    /// Token request authenticated with the cluster secret key
    /// (trusted authentication).
    pub fn with_secret_key(username: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            validity_time_in_sec: DEFAULT_TOKEN_VALIDITY_SECS,
            password: None,
            secret_key: Some(secret_key.into()),
            org_id: None,
            auto_create: None,
            display_name: None,
            email: None,
            group_identifiers: None,
            extra: Map::new(),
        }
    }

    /// Sets the token validity in seconds.
    pub fn validity_secs(mut self, seconds: u64) -> Self {
        self.validity_time_in_sec = seconds;
        self
    }

    /// Scopes the token to an org.
    pub fn org_id(mut self, org_id: i64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Enables just-in-time user provisioning.
    pub fn auto_create(
        mut self,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.auto_create = Some(true);
        self.display_name = Some(display_name.into());
        self.email = Some(email.into());
        self
    }

    /// Group assignments for a just-in-time provisioned user.
    pub fn group_identifiers(mut self, groups: Vec<String>) -> Self {
        self.group_identifiers = Some(groups);
        self
    }

    /// Appends an arbitrary request parameter. Newer server releases add
    /// token parameters faster than this binding tracks them.
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The username this request authenticates.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Request body for `auth/token/object` (V2): a token scoped to a single
/// visualization or answer.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectTokenRequest {
    object_id: String,
    #[serde(flatten)]
    inner: TokenRequest,
}

impl ObjectTokenRequest {
    /// Scopes a token request to one object.
    pub fn new(object_id: impl Into<String>, request: TokenRequest) -> Self {
        Self {
            object_id: object_id.into(),
            inner: request,
        }
    }
}

/// Request body for `auth/token/custom` (V2): a token carrying custom
/// persisted attributes (ABAC-style claims).
#[derive(Debug, Clone, Serialize)]
pub struct CustomTokenRequest {
    persist_option: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<GroupIdentifier>>,
    #[serde(flatten)]
    inner: TokenRequest,
}

#[derive(Debug, Clone, Serialize)]
struct GroupIdentifier {
    identifier: String,
}

impl CustomTokenRequest {
    /// Wraps a token request with a persist option (`NONE`, `APPEND`,
    /// `REPLACE`, `RESET`).
    pub fn new(request: TokenRequest) -> Self {
        Self {
            persist_option: "NONE".to_string(),
            groups: None,
            inner: request,
        }
    }

    /// Sets the attribute persist option.
    pub fn persist_option(mut self, option: impl Into<String>) -> Self {
        self.persist_option = option.into();
        self
    }

    /// Group assignments, serialized in the `{"identifier": ...}` wrapper
    /// shape this endpoint wants.
    pub fn groups(mut self, groups: Vec<String>) -> Self {
        self.groups = Some(
            groups
                .into_iter()
                .map(|identifier| GroupIdentifier { identifier })
                .collect(),
        );
        self
    }
}

/// Response of the V2 token-issuance endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The bearer token. Pass to `install_credential` to use it on
    /// subsequent calls.
    pub token: String,
    /// Remaining response fields (creation/expiration timestamps, user id,
    /// ...), kept as-is since they vary across releases.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for `auth/session/login` (V2).
///
/// `remember_me` goes over the wire as the *string* `"true"`/`"false"`,
/// not a JSON boolean.
#[derive(Debug, Clone, Serialize)]
pub struct SessionLoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    remember_me: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    org_identifier: Option<i64>,
}

impl SessionLoginRequest {
    /// Login with a username and password.
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            remember_me: "true".to_string(),
            org_identifier: None,
        }
    }

    /// Login that converts an already-issued bearer token into a session
    /// cookie. The token itself travels in the `Authorization` header, so
    /// the body carries only the session options.
    pub fn from_bearer() -> Self {
        Self {
            username: None,
            password: None,
            remember_me: "true".to_string(),
            org_identifier: None,
        }
    }

    /// Sets the remember-me flag.
    pub fn remember_me(mut self, remember: bool) -> Self {
        self.remember_me = remember.to_string();
        self
    }

    /// Scopes the session to an org.
    pub fn org_identifier(mut self, org: i64) -> Self {
        self.org_identifier = Some(org);
        self
    }
}

/// Request parameters for the V1 trusted-authentication endpoint
/// (`session/auth/token`), form-encoded on the wire.
#[derive(Debug, Clone)]
pub struct TrustedTokenRequest {
    /// Cluster secret key. Keep this on the authenticator server only.
    pub secret_key: String,
    /// User the token impersonates.
    pub username: String,
    /// `FULL` or `REPORT_BOOK_VIEW`.
    pub access_level: String,
    /// Object GUID, required for `REPORT_BOOK_VIEW` access.
    pub object_guid: Option<String>,
    /// Org scope.
    pub org_id: Option<i64>,
    /// Groups for just-in-time provisioning.
    pub groups: Option<Vec<String>>,
    /// Create the user if missing.
    pub auto_create_user: Option<bool>,
}

impl TrustedTokenRequest {
    /// Full-access trusted token for a user.
    pub fn full_access(secret_key: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            username: username.into(),
            access_level: "FULL".to_string(),
            object_guid: None,
            org_id: None,
            groups: None,
            auto_create_user: None,
        }
    }

    /// Restricts the token to viewing a single object.
    pub fn object_scoped(mut self, object_guid: impl Into<String>) -> Self {
        self.access_level = "REPORT_BOOK_VIEW".to_string();
        self.object_guid = Some(object_guid.into());
        self
    }

    /// Scopes the token to an org.
    pub fn org_id(mut self, org_id: i64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Groups for just-in-time provisioning.
    pub fn groups(mut self, groups: Vec<String>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Creates the user on first sight.
    pub fn auto_create_user(mut self, auto_create: bool) -> Self {
        self.auto_create_user = Some(auto_create);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bearer_authorization_value() {
        let credential = Credential::bearer("tok-123");
        assert_eq!(
            credential.authorization_value().as_deref(),
            Some("Bearer tok-123")
        );
        assert_eq!(Credential::SessionCookie.authorization_value(), None);
    }

    #[test]
    fn token_request_password_shape() {
        let request = TokenRequest::with_password("alice", "hunter2").validity_secs(600);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "username": "alice",
                "password": "hunter2",
                "validity_time_in_sec": 600
            })
        );
    }

    #[test]
    fn token_request_secret_key_omits_password() {
        let request = TokenRequest::with_secret_key("svc", "sk-abc").org_id(4);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body.get("password"), None);
        assert_eq!(body["secret_key"], "sk-abc");
        assert_eq!(body["org_id"], 4);
    }

    #[test]
    fn auto_create_carries_profile_fields() {
        let request = TokenRequest::with_secret_key("svc", "sk")
            .auto_create("New User", "new@example.com")
            .group_identifiers(vec!["analysts".to_string()]);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["auto_create"], true);
        assert_eq!(body["display_name"], "New User");
        assert_eq!(body["email"], "new@example.com");
        assert_eq!(body["group_identifiers"], serde_json::json!(["analysts"]));
    }

    #[test]
    fn custom_token_wraps_groups() {
        let request = CustomTokenRequest::new(TokenRequest::with_secret_key("svc", "sk"))
            .persist_option("APPEND")
            .groups(vec!["g1".to_string(), "g2".to_string()]);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["persist_option"], "APPEND");
        assert_eq!(
            body["groups"],
            serde_json::json!([{"identifier": "g1"}, {"identifier": "g2"}])
        );
    }

    #[test]
    fn session_login_remember_me_is_a_string() {
        let request = SessionLoginRequest::with_password("alice", "pw").remember_me(false);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["remember_me"], "false");
    }
}
