//! V2.0 endpoint bindings, one service per resource family.
//!
//! Method naming follows the endpoint paths with `/` becoming `_`:
//! `users/search` is `users().search(...)`, `vcs/git/commits/deploy` is
//! `vcs().commits_deploy(...)`. Operations the platform documents as
//! open-ended search/update requests take a `serde_json::Value`
//! passthrough body; operations with a stable small contract take typed
//! parameters.

mod ai;
mod auth;
mod connections;
mod custom_actions;
mod dbt;
mod groups;
mod logs;
mod metadata;
mod orgs;
mod reports;
mod roles;
mod schedules;
mod security;
mod system;
mod tags;
mod users;
mod vcs;

pub use ai::AiService;
pub use auth::AuthService;
pub use connections::ConnectionsService;
pub use custom_actions::CustomActionsService;
pub use dbt::DbtService;
pub use groups::GroupsService;
pub use logs::LogsService;
pub use metadata::{MetadataService, TmlExportOptions, TmlImportRequest};
pub use orgs::OrgsService;
pub use reports::ReportsService;
pub use roles::RolesService;
pub use schedules::SchedulesService;
pub use security::SecurityService;
pub use system::SystemService;
pub use tags::TagsService;
pub use users::UsersService;
pub use vcs::VcsService;
