//! V1 endpoint bindings, one service per resource family.
//!
//! Naming follows the endpoint paths: `user/list` becomes
//! `users().list()`, `metadata/listobjectheaders` becomes
//! `metadata().list_object_headers(...)`. Each binding translates typed
//! parameters into the wire shape (query params, form fields, multipart)
//! and funnels through the shared session dispatch.

mod admin;
mod connections;
mod data;
mod dependencies;
mod exports;
mod groups;
mod metadata;
mod security;
mod session;
mod tml;
mod users;

pub use admin::AdminService;
pub use connections::{
    databases_and_schemas_from_connection, databases_from_connection,
    selected_tables_from_connection, ConnectionsService,
};
pub use data::{DataFormat, DataService};
pub use dependencies::DependenciesService;
pub use exports::{ExportsService, PdfExportOptions, PdfOrientation};
pub use groups::GroupsService;
pub use metadata::{MetadataListOptions, MetadataService};
pub use security::{SecurityService, ShareOptions};
pub use session::SessionService;
pub use tml::{TmlImportOptions, TmlService};
pub use users::{UserCreateRequest, UserPreferences, UsersService};

use serde::Serialize;

/// Encodes a value as the JSON-string parameter format the V1 endpoints
/// expect for list and object arguments (`id=["g1","g2"]`).
pub(crate) fn json_param<S: Serialize>(value: &S) -> String {
    // Serializing strings and string lists cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}

/// Form/query encoding of booleans: the V1 endpoints want lowercase
/// `"true"`/`"false"` strings.
pub(crate) fn bool_param(value: bool) -> String {
    value.to_string()
}
