//! # ThoughtSpot REST API Client
//!
//! A client for the ThoughtSpot analytics platform REST API, covering
//! both API generations:
//! - **V1** (`callosum/v1/tspublic/v1/...`) via [`V1Client`] — cookie
//!   login, metadata listing/details, TML transfer, sharing, user/group
//!   management, PDF export.
//! - **V2.0** (`api/rest/2.0/...`) via [`V2Client`] — bearer tokens,
//!   orgs, tags, git integration, report exports, and a generic
//!   `get`/`post` escape hatch for anything newer than this binding.
//!
//! Every binding issues exactly one HTTP round trip: no retries, no rate
//! limiting, no background work. Errors carry the HTTP status and raw
//! body; the TML family's 200-with-embedded-error responses surface as
//! [`ThoughtSpotError::Api`] with `embedded` set.
//!
//! A client instance holds one credential — for concurrent work under
//! different identities (per-org automation, migrations), construct one
//! client per identity.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use thoughtspot_client::{Credential, TokenRequest, V2Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = V2Client::from_server_url("https://mycompany.thoughtspot.cloud")?;
//!
//!     // Token acquisition and installation are two explicit steps.
//!     let token = client
//!         .auth()
//!         .token_full(&TokenRequest::with_password("alice", "hunter2"))
//!         .await?;
//!     client.install_credential(Credential::bearer(token.token))?;
//!
//!     let liveboards = client
//!         .metadata()
//!         .search(serde_json::json!({"metadata": [{"type": "LIVEBOARD"}]}))
//!         .await?;
//!     println!("{liveboards:#}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod auth;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Details-response views
pub mod details;

// API generations
pub mod v1;
pub mod v2;

// Re-exports for convenience
pub use auth::{
    Credential, CustomTokenRequest, ObjectTokenRequest, SessionLoginRequest, TokenRequest,
    TokenResponse, TrustedTokenRequest,
};
pub use config::{ThoughtSpotConfig, ThoughtSpotConfigBuilder};
pub use errors::{ApiError, AuthFailureReason, ThoughtSpotError, ThoughtSpotResult};
pub use transport::{RequestSpec, ResponsePayload, RestSession};
pub use types::*;
pub use v1::V1Client;
pub use v2::V2Client;
