//! V1 API client.

use crate::auth::Credential;
use crate::config::ThoughtSpotConfig;
use crate::errors::ThoughtSpotResult;
use crate::transport::{RequestSpec, ResponsePayload, RestSession};
use crate::v1::services::*;

/// Client for the V1 REST API.
///
/// Owns one [`RestSession`]: one cookie jar, one credential slot, one
/// base URL. Endpoint bindings are grouped into services
/// (`client.metadata().list(...)`, `client.tml().export(...)`). For
/// concurrent work under different identities, construct one client per
/// identity — the credential is shared across everything dispatched here.
#[derive(Debug)]
pub struct V1Client {
    session: RestSession,
}

impl V1Client {
    /// Creates a client from a configuration.
    pub fn new(config: ThoughtSpotConfig) -> ThoughtSpotResult<Self> {
        Ok(Self {
            session: RestSession::new(&config)?,
        })
    }

    /// Creates a client for a deployment with default configuration.
    pub fn from_server_url(server_url: impl Into<String>) -> ThoughtSpotResult<Self> {
        Self::new(ThoughtSpotConfig::new(server_url)?)
    }

    /// The underlying HTTP session, for calls this binding does not cover.
    pub fn transport(&self) -> &RestSession {
        &self.session
    }

    /// Installs a credential on the session. The V1 API accepts both the
    /// cookie set by `session().login(...)` and a V2-issued bearer token.
    pub fn install_credential(&self, credential: Credential) -> ThoughtSpotResult<()> {
        self.session.install_credential(credential)
    }

    /// Drops the current credential.
    pub fn clear_credential(&self) {
        self.session.clear_credential()
    }

    // Service accessors

    /// Session lifecycle and org-context operations.
    pub fn session(&self) -> SessionService<'_> {
        SessionService::new(self)
    }

    /// Liveboard and search data retrieval.
    pub fn data(&self) -> DataService<'_> {
        DataService::new(self)
    }

    /// Metadata listing, details, tagging and favorites.
    pub fn metadata(&self) -> MetadataService<'_> {
        MetadataService::new(self)
    }

    /// TML export and import.
    pub fn tml(&self) -> TmlService<'_> {
        TmlService::new(self)
    }

    /// Sharing and permission inspection.
    pub fn security(&self) -> SecurityService<'_> {
        SecurityService::new(self)
    }

    /// User management.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Group management.
    pub fn groups(&self) -> GroupsService<'_> {
        GroupsService::new(self)
    }

    /// Connection management.
    pub fn connections(&self) -> ConnectionsService<'_> {
        ConnectionsService::new(self)
    }

    /// Dependency listing.
    pub fn dependencies(&self) -> DependenciesService<'_> {
        DependenciesService::new(self)
    }

    /// Report exports (PDF).
    pub fn exports(&self) -> ExportsService<'_> {
        ExportsService::new(self)
    }

    /// Cluster configuration, embed actions, logs and partner endpoints.
    pub fn admin(&self) -> AdminService<'_> {
        AdminService::new(self)
    }

    // Internal plumbing shared by the services.

    /// Path under the public V1 namespace.
    pub(crate) fn v1_path(&self, endpoint: &str) -> String {
        format!("callosum/v1/tspublic/v1/{endpoint}")
    }

    /// Path under the non-public callosum namespace. No stability
    /// guarantees from the vendor for these.
    pub(crate) fn internal_path(&self, endpoint: &str) -> String {
        format!("callosum/v1/{endpoint}")
    }

    pub(crate) async fn dispatch(&self, spec: RequestSpec) -> ThoughtSpotResult<ResponsePayload> {
        self.session.dispatch(spec).await
    }
}
