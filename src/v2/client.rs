//! V2.0 API client.

use crate::auth::Credential;
use crate::config::ThoughtSpotConfig;
use crate::errors::ThoughtSpotResult;
use crate::transport::{Expect, RequestSpec, ResponsePayload, RestSession};
use crate::v2::services::*;
use bytes::Bytes;
use serde_json::Value;

/// Client for the V2.0 REST API.
///
/// Endpoint bindings are grouped into services
/// (`client.users().search(...)`, `client.metadata().tml_export(...)`).
/// The generic [`V2Client::get`]/[`V2Client::post`] wrappers reach any
/// endpoint this binding does not name — with a bearer token installed,
/// every V2 call is one `post(endpoint, request)` away.
#[derive(Debug)]
pub struct V2Client {
    session: RestSession,
}

impl V2Client {
    /// Creates a client from a configuration. The V2 API defaults
    /// `Accept-Language` to `en_US` when the config does not set one.
    pub fn new(mut config: ThoughtSpotConfig) -> ThoughtSpotResult<Self> {
        if config.accept_language.is_none() {
            config.accept_language = Some("en_US".to_string());
        }
        Ok(Self {
            session: RestSession::new(&config)?,
        })
    }

    /// Creates a client for a deployment with default configuration.
    pub fn from_server_url(server_url: impl Into<String>) -> ThoughtSpotResult<Self> {
        Self::new(ThoughtSpotConfig::new(server_url)?)
    }

    /// The underlying HTTP session.
    pub fn transport(&self) -> &RestSession {
        &self.session
    }

    /// Installs a credential — usually the bearer token returned by
    /// `auth().token_full(...)`.
    pub fn install_credential(&self, credential: Credential) -> ThoughtSpotResult<()> {
        self.session.install_credential(credential)
    }

    /// Drops the current credential.
    pub fn clear_credential(&self) {
        self.session.clear_credential()
    }

    // Service accessors

    /// Session and token lifecycle.
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// User management.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// System information and configuration.
    pub fn system(&self) -> SystemService<'_> {
        SystemService::new(self)
    }

    /// Org management.
    pub fn orgs(&self) -> OrgsService<'_> {
        OrgsService::new(self)
    }

    /// Tag management and assignment.
    pub fn tags(&self) -> TagsService<'_> {
        TagsService::new(self)
    }

    /// Group management.
    pub fn groups(&self) -> GroupsService<'_> {
        GroupsService::new(self)
    }

    /// Metadata search, TML transfer, data retrieval.
    pub fn metadata(&self) -> MetadataService<'_> {
        MetadataService::new(self)
    }

    /// Report exports (PDF/PNG/CSV/XLSX).
    pub fn reports(&self) -> ReportsService<'_> {
        ReportsService::new(self)
    }

    /// Sharing and permission fetching.
    pub fn security(&self) -> SecurityService<'_> {
        SecurityService::new(self)
    }

    /// Git version-control integration.
    pub fn vcs(&self) -> VcsService<'_> {
        VcsService::new(self)
    }

    /// Connection management.
    pub fn connections(&self) -> ConnectionsService<'_> {
        ConnectionsService::new(self)
    }

    /// Role management.
    pub fn roles(&self) -> RolesService<'_> {
        RolesService::new(self)
    }

    /// Custom action management.
    pub fn custom_actions(&self) -> CustomActionsService<'_> {
        CustomActionsService::new(self)
    }

    /// Schedule management.
    pub fn schedules(&self) -> SchedulesService<'_> {
        SchedulesService::new(self)
    }

    /// Audit log fetching.
    pub fn logs(&self) -> LogsService<'_> {
        LogsService::new(self)
    }

    /// dbt integration.
    pub fn dbt(&self) -> DbtService<'_> {
        DbtService::new(self)
    }

    /// Natural-language (Spotter) endpoints.
    pub fn ai(&self) -> AiService<'_> {
        AiService::new(self)
    }

    // Generic wrappers: any endpoint, bearer token already in the headers.

    /// GET an arbitrary V2 endpoint.
    pub async fn get(&self, endpoint: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.api_path(endpoint));
        self.dispatch(spec).await?.into_json()
    }

    /// POST an arbitrary V2 endpoint with an optional JSON request body.
    /// Returns `Value::Null` for empty (204) responses.
    pub async fn post(&self, endpoint: &str, request: Option<Value>) -> ThoughtSpotResult<Value> {
        let mut spec = RequestSpec::post(self.api_path(endpoint));
        if let Some(request) = request {
            spec = spec.json(request);
        }
        self.dispatch(spec).await?.into_json()
    }

    /// POST an arbitrary V2 endpoint and return the raw response bytes.
    pub async fn post_binary(
        &self,
        endpoint: &str,
        request: Option<Value>,
    ) -> ThoughtSpotResult<Bytes> {
        let mut spec = RequestSpec::post(self.api_path(endpoint)).expect(Expect::Bytes);
        if let Some(request) = request {
            spec = spec.json(request);
        }
        self.dispatch(spec).await?.into_bytes()
    }

    // Internal plumbing shared by the services.

    pub(crate) fn api_path(&self, endpoint: &str) -> String {
        format!("api/rest/2.0/{endpoint}")
    }

    pub(crate) async fn dispatch(&self, spec: RequestSpec) -> ThoughtSpotResult<ResponsePayload> {
        self.session.dispatch(spec).await
    }

    /// The standard V2 binding shape: POST a JSON body, parse JSON out,
    /// `Value::Null` for 204s.
    pub(crate) async fn post_json(
        &self,
        endpoint: &str,
        request: Value,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.api_path(endpoint)).json(request);
        self.dispatch(spec).await?.into_json()
    }

    /// POST with no body.
    pub(crate) async fn post_empty(&self, endpoint: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.api_path(endpoint));
        self.dispatch(spec).await?.into_json()
    }

    /// GET, parse JSON out.
    pub(crate) async fn get_json(&self, endpoint: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.api_path(endpoint));
        self.dispatch(spec).await?.into_json()
    }
}
