//! Read-only views over `metadata/details` responses.
//!
//! The details payloads are deeply nested and vary by object type and
//! release; these wrappers borrow the parsed JSON and expose the fields
//! automation actually reaches for, returning `Option` instead of
//! panicking when a release moves something.

use serde_json::Value;

/// View over one element of a `metadata/details` response for a USER.
#[derive(Debug, Clone, Copy)]
pub struct UserDetails<'a> {
    details: &'a Value,
}

impl<'a> UserDetails<'a> {
    /// Wraps one element of the `storables` array.
    pub fn new(details: &'a Value) -> Self {
        Self { details }
    }

    /// The raw details object.
    pub fn as_value(&self) -> &'a Value {
        self.details
    }

    /// Privileges assigned to the user.
    pub fn privileges(&self) -> Vec<&'a str> {
        string_array(self.details.get("privileges"))
    }

    /// GUIDs of groups the user is directly assigned to.
    pub fn assigned_groups(&self) -> Vec<&'a str> {
        string_array(self.details.get("assignedGroups"))
    }

    /// GUIDs of groups the user inherits through group membership.
    pub fn inherited_groups(&self) -> Vec<&'a str> {
        string_array(self.details.get("inheritedGroups"))
    }

    /// Account state (`ACTIVE`, ...).
    pub fn state(&self) -> Option<&'a str> {
        self.details.get("state").and_then(Value::as_str)
    }

    /// True for cluster administrators.
    pub fn is_superuser(&self) -> Option<bool> {
        self.details.get("isSuperUser").and_then(Value::as_bool)
    }

    /// The header block with name/id/timestamps.
    pub fn header(&self) -> Option<&'a Value> {
        self.details.get("header")
    }

    /// Display name.
    pub fn display_name(&self) -> Option<&'a str> {
        self.header()?.get("displayName").and_then(Value::as_str)
    }

    /// Login name.
    pub fn username(&self) -> Option<&'a str> {
        self.header()?.get("name").and_then(Value::as_str)
    }

    /// Creation timestamp (epoch millis).
    pub fn created(&self) -> Option<i64> {
        self.header()?.get("created").and_then(Value::as_i64)
    }

    /// Last-modified timestamp (epoch millis).
    pub fn modified(&self) -> Option<i64> {
        self.header()?.get("modified").and_then(Value::as_i64)
    }
}

/// View over one element of a `metadata/details` response for a USER_GROUP.
#[derive(Debug, Clone, Copy)]
pub struct GroupDetails<'a> {
    details: &'a Value,
}

impl<'a> GroupDetails<'a> {
    /// Wraps one element of the `storables` array.
    pub fn new(details: &'a Value) -> Self {
        Self { details }
    }

    /// The raw details object.
    pub fn as_value(&self) -> &'a Value {
        self.details
    }

    /// Privileges granted by the group.
    pub fn privileges(&self) -> Vec<&'a str> {
        string_array(self.details.get("privileges"))
    }

    /// Groups this group is assigned to.
    pub fn assigned_groups(&self) -> Vec<&'a str> {
        string_array(self.details.get("assignedGroups"))
    }

    /// Groups inherited through nesting.
    pub fn inherited_groups(&self) -> Vec<&'a str> {
        string_array(self.details.get("inheritedGroups"))
    }
}

/// Pulls the connection configuration block from a `metadata/details`
/// response for a DATA_SOURCE object.
pub fn connection_config(details_response: &Value) -> Option<&Value> {
    storable(details_response)?
        .get("dataSourceContent")?
        .get("configuration")
}

/// Connection name from a `metadata/details` response.
pub fn connection_name(details_response: &Value) -> Option<&str> {
    storable(details_response)?
        .get("header")?
        .get("name")
        .and_then(Value::as_str)
}

/// Connection type from a `metadata/details` response.
pub fn connection_type(details_response: &Value) -> Option<&str> {
    storable(details_response)?.get("type").and_then(Value::as_str)
}

/// The `sheets` array of a liveboard/answer details response.
pub fn sheets(details_response: &Value) -> Option<&Value> {
    storable(details_response)?.get("reportContent")?.get("sheets")
}

fn storable(details_response: &Value) -> Option<&Value> {
    details_response.get("storables")?.get(0)
}

fn string_array(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_details() -> Value {
        json!({
            "privileges": ["AUTHORING", "DATADOWNLOADING"],
            "assignedGroups": ["g-1"],
            "inheritedGroups": ["g-1", "g-2"],
            "state": "ACTIVE",
            "isSuperUser": false,
            "header": {
                "name": "alice",
                "displayName": "Alice A.",
                "created": 1700000000000_i64,
                "modified": 1700000001000_i64
            }
        })
    }

    #[test]
    fn user_accessors() {
        let details = user_details();
        let user = UserDetails::new(&details);
        assert_eq!(user.privileges(), vec!["AUTHORING", "DATADOWNLOADING"]);
        assert_eq!(user.username(), Some("alice"));
        assert_eq!(user.display_name(), Some("Alice A."));
        assert_eq!(user.state(), Some("ACTIVE"));
        assert_eq!(user.is_superuser(), Some(false));
        assert_eq!(user.created(), Some(1700000000000));
    }

    #[test]
    fn missing_fields_are_none_not_panics() {
        let details = json!({});
        let user = UserDetails::new(&details);
        assert!(user.privileges().is_empty());
        assert_eq!(user.username(), None);
        assert_eq!(user.is_superuser(), None);
    }

    #[test]
    fn connection_extraction() {
        let response = json!({
            "storables": [{
                "type": "RDBMS_SNOWFLAKE",
                "header": {"name": "Main warehouse"},
                "dataSourceContent": {"configuration": {"accountName": "acme"}}
            }]
        });
        assert_eq!(connection_name(&response), Some("Main warehouse"));
        assert_eq!(connection_type(&response), Some("RDBMS_SNOWFLAKE"));
        assert_eq!(
            connection_config(&response).unwrap()["accountName"],
            "acme"
        );
    }
}
