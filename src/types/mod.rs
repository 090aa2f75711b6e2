//! Wire vocabulary shared by the endpoint bindings.
//!
//! The platform's reference guide uses internal names (`PINBOARD_ANSWER_BOOK`,
//! `LOGICAL_TABLE`, ...) that rarely match the product vocabulary. These
//! enums translate the friendly names to the wire values, replacing what
//! would otherwise be stringly-typed parameters.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Object identity merging the V1 `type` and `subtypes` parameters.
///
/// Tables, worksheets, views and SQL views all share the `LOGICAL_TABLE`
/// metadata type and differ only by subtype; [`TsObjectType::wire_parts`]
/// resolves each variant to the `(type, subtype)` pair the listing
/// endpoints want. Liveboard is the renamed pinboard — one variant, one
/// wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsObjectType {
    /// A user account.
    User,
    /// A user group.
    Group,
    /// A liveboard (formerly pinboard).
    Liveboard,
    /// A saved answer.
    Answer,
    /// A worksheet data model.
    Worksheet,
    /// A physical table.
    Table,
    /// An aggregated view.
    View,
    /// A SQL view.
    SqlView,
    /// A connection (data source).
    Connection,
    /// A tag.
    Tag,
    /// A logical column.
    Column,
    /// A join (logical relationship).
    Join,
}

impl TsObjectType {
    /// The `(type, subtype)` pair for the V1 metadata endpoints.
    pub fn wire_parts(self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::User => ("USER", None),
            Self::Group => ("USER_GROUP", None),
            Self::Liveboard => ("PINBOARD_ANSWER_BOOK", None),
            Self::Answer => ("QUESTION_ANSWER_BOOK", None),
            Self::Worksheet => ("LOGICAL_TABLE", Some("WORKSHEET")),
            Self::Table => ("LOGICAL_TABLE", Some("ONE_TO_ONE_LOGICAL")),
            Self::View => ("LOGICAL_TABLE", Some("AGGR_WORKSHEET")),
            Self::SqlView => ("LOGICAL_TABLE", Some("SQL_VIEW")),
            Self::Connection => ("DATA_SOURCE", None),
            Self::Tag => ("TAG", None),
            Self::Column => ("LOGICAL_COLUMN", None),
            Self::Join => ("LOGICAL_RELATIONSHIP", None),
        }
    }

    /// The metadata `type` value alone.
    pub fn metadata_type(self) -> &'static str {
        self.wire_parts().0
    }
}

// Display prints the metadata type, which is what error messages and log
// lines want to show.
impl fmt::Display for TsObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metadata_type())
    }
}

/// Sort order for listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Server-side default ordering.
    #[default]
    Default,
    /// By internal name.
    Name,
    /// By display name.
    DisplayName,
    /// By author.
    Author,
    /// By creation time.
    Created,
    /// By last-modified time.
    Modified,
}

impl SortOrder {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Name => "NAME",
            Self::DisplayName => "DISPLAY_NAME",
            Self::Author => "AUTHOR",
            Self::Created => "CREATED",
            Self::Modified => "MODIFIED",
        }
    }
}

/// Listing category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Everything visible to the caller.
    All,
    /// Objects authored by the caller.
    My,
    /// The caller's favorites.
    Favorite,
    /// Objects requested by the caller.
    Requested,
}

impl Category {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::My => "MY",
            Self::Favorite => "FAVORITE",
            Self::Requested => "REQUESTED",
        }
    }
}

/// Access level granted by a share call. `Modify` is what the product UI
/// labels "Can edit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    /// Read-only access.
    ReadOnly,
    /// Edit access.
    Modify,
    /// Revokes access.
    NoAccess,
}

impl ShareMode {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "READ_ONLY",
            Self::Modify => "MODIFY",
            Self::NoAccess => "NO_ACCESS",
        }
    }
}

/// Group privileges, translated from the product vocabulary to the
/// reference-guide values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Can author content.
    Innate,
    /// Full administration.
    CanAdminister,
    /// Can upload user data.
    CanUploadUserData,
    /// Can download data.
    CanDownloadData,
    /// Can manage data.
    CanManageData,
    /// Can share with all users.
    CanShareWithAllUsers,
    /// Has SpotIQ analysis.
    HasSpotIq,
    /// Can use experimental features.
    CanUseExperimentalFeatures,
    /// Bypasses row-level security.
    CanBypassRls,
    /// Can invoke custom R analysis.
    CanInvokeCustomRAnalysis,
    /// Blocked from creating or deleting liveboards.
    CannotCreateOrDeleteLiveboards,
}

impl Privilege {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Innate => "AUTHORING",
            Self::CanAdminister => "ADMINISTRATION",
            Self::CanUploadUserData => "USERDATAUPLOADING",
            Self::CanDownloadData => "DATADOWNLOADING",
            Self::CanManageData => "DATAMANAGEMENT",
            Self::CanShareWithAllUsers => "SHAREWITHALL",
            Self::HasSpotIq => "A3ANALYSIS",
            Self::CanUseExperimentalFeatures => "EXPERIMENTALFEATUREPRIVILEG",
            Self::CanBypassRls => "BYPASSRLS",
            Self::CanInvokeCustomRAnalysis => "RANALYSIS",
            Self::CannotCreateOrDeleteLiveboards => "DISABLE_PINBOARD_CREATION",
        }
    }
}

/// Permission resolution mode for the security endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionType {
    /// Effective permissions after group inheritance.
    Effective,
    /// Directly defined permissions only.
    Defined,
}

impl PermissionType {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Effective => "EFFECTIVE",
            Self::Defined => "DEFINED",
        }
    }
}

/// Group visibility for sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupVisibility {
    /// Sharable (the default).
    Default,
    /// Hidden from share dialogs.
    NonSharable,
}

impl GroupVisibility {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::NonSharable => "NON_SHARABLE",
        }
    }
}

/// Output format of the V2 report-export endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// PDF document.
    Pdf,
    /// Excel workbook.
    Xlsx,
    /// CSV file.
    Csv,
    /// PNG image.
    Png,
}

impl ReportType {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Xlsx => "XLSX",
            Self::Csv => "CSV",
            Self::Png => "PNG",
        }
    }
}

/// Object types of the V2 API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTypeV2 {
    /// A liveboard.
    Liveboard,
    /// A saved answer.
    Answer,
    /// A data object (table, worksheet, view).
    DataObject,
    /// A column.
    Column,
}

impl ObjectTypeV2 {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Liveboard => "LIVEBOARD",
            Self::Answer => "ANSWER",
            Self::DataObject => "DATAOBJECT",
            Self::Column => "COLUMN",
        }
    }
}

/// TML import conflict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Import what validates, report the rest.
    Partial,
    /// Import everything or nothing.
    AllOrNone,
    /// Validate without importing.
    ValidateOnly,
}

impl ImportPolicy {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Partial => "PARTIAL",
            Self::AllOrNone => "ALL_OR_NONE",
            Self::ValidateOnly => "VALIDATE_ONLY",
        }
    }
}

/// TML document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TmlFormat {
    /// YAML text, as seen in the product UI.
    Yaml,
    /// JSON text.
    Json,
}

impl TmlFormat {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct PermissionEntry {
    #[serde(rename = "shareMode")]
    share_mode: &'static str,
}

/// The `{"permissions": {guid: {"shareMode": mode}}}` structure the
/// `security/share` endpoint wants, built one principal at a time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SharePermissions {
    permissions: BTreeMap<String, PermissionEntry>,
}

impl SharePermissions {
    /// Empty permission set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `mode` to a user or group GUID.
    pub fn add(mut self, guid: impl Into<String>, mode: ShareMode) -> Self {
        self.permissions.insert(
            guid.into(),
            PermissionEntry {
                share_mode: mode.as_str(),
            },
        );
        self
    }

    /// Grants read-only access to each GUID.
    pub fn read_only<I, S>(self, guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        guids
            .into_iter()
            .fold(self, |acc, guid| acc.add(guid, ShareMode::ReadOnly))
    }

    /// Grants edit access to each GUID.
    pub fn edit<I, S>(self, guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        guids
            .into_iter()
            .fold(self, |acc, guid| acc.add(guid, ShareMode::Modify))
    }

    /// Revokes access for each GUID.
    pub fn remove<I, S>(self, guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        guids
            .into_iter()
            .fold(self, |acc, guid| acc.add(guid, ShareMode::NoAccess))
    }

    /// True when no principal has been added.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(TsObjectType::Liveboard, "PINBOARD_ANSWER_BOOK", None; "liveboard")]
    #[test_case(TsObjectType::Worksheet, "LOGICAL_TABLE", Some("WORKSHEET"); "worksheet")]
    #[test_case(TsObjectType::Table, "LOGICAL_TABLE", Some("ONE_TO_ONE_LOGICAL"); "table")]
    #[test_case(TsObjectType::View, "LOGICAL_TABLE", Some("AGGR_WORKSHEET"); "view")]
    #[test_case(TsObjectType::Connection, "DATA_SOURCE", None; "connection")]
    fn wire_parts_resolution(
        object_type: TsObjectType,
        expected_type: &str,
        expected_subtype: Option<&str>,
    ) {
        assert_eq!(object_type.wire_parts(), (expected_type, expected_subtype));
    }

    #[test]
    fn share_permissions_wire_shape() {
        let permissions = SharePermissions::new()
            .read_only(["u1", "u2"])
            .edit(["g1"])
            .remove(["u3"]);
        let body = serde_json::to_value(&permissions).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "permissions": {
                    "u1": {"shareMode": "READ_ONLY"},
                    "u2": {"shareMode": "READ_ONLY"},
                    "g1": {"shareMode": "MODIFY"},
                    "u3": {"shareMode": "NO_ACCESS"}
                }
            })
        );
    }

    #[test]
    fn privilege_wire_values() {
        assert_eq!(Privilege::CanAdminister.as_str(), "ADMINISTRATION");
        // The truncated spelling is what the server actually accepts.
        assert_eq!(
            Privilege::CanUseExperimentalFeatures.as_str(),
            "EXPERIMENTALFEATUREPRIVILEG"
        );
    }
}
