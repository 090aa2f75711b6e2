//! Metadata listing, details, tagging and favorites.

use super::{bool_param, json_param};
use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use crate::transport::RequestSpec;
use crate::types::{Category, SortOrder, TsObjectType};
use crate::v1::V1Client;
use serde_json::Value;

/// Optional filters shared by `metadata/list` and
/// `metadata/listobjectheaders`.
#[derive(Debug, Clone, Default)]
pub struct MetadataListOptions {
    /// Sort column.
    pub sort: SortOrder,
    /// Ascending or descending.
    pub sort_ascending: bool,
    /// Name pattern filter (server-side, case-insensitive substring).
    pub pattern: Option<String>,
    /// Restrict to these GUIDs.
    pub fetch_guids: Option<Vec<String>>,
    /// Exclude these GUIDs.
    pub skip_guids: Option<Vec<String>>,
    /// Restrict to objects carrying one of these tag names.
    pub tag_names: Option<Vec<String>>,
    /// Category filter (ALL/MY/FAVORITE/REQUESTED).
    pub category: Option<Category>,
    /// Page size; `-1` for the server default.
    pub batchsize: i64,
    /// Page offset; `-1` for the server default.
    pub offset: i64,
    /// Filter on system-generated objects.
    pub auto_created: Option<bool>,
    /// Include hidden objects (`metadata/list` only).
    pub show_hidden: Option<bool>,
    /// Restrict to one author (`metadata/list` only).
    pub author_guid: Option<String>,
}

impl MetadataListOptions {
    /// Defaults matching the server's (`DEFAULT` sort, no filters, server
    /// paging).
    pub fn new() -> Self {
        Self {
            sort_ascending: true,
            batchsize: -1,
            offset: -1,
            ..Self::default()
        }
    }

    fn base_query(&self, object_type: TsObjectType) -> Vec<(String, String)> {
        let (wire_type, subtype) = object_type.wire_parts();
        let mut query = vec![
            ("type".to_string(), wire_type.to_string()),
            ("sort".to_string(), self.sort.as_str().to_string()),
            (
                "sortascending".to_string(),
                bool_param(self.sort_ascending),
            ),
            ("offset".to_string(), self.offset.to_string()),
            ("batchsize".to_string(), self.batchsize.to_string()),
        ];
        if let Some(subtype) = subtype {
            query.push(("subtypes".to_string(), json_param(&vec![subtype])));
        }
        if let Some(ref pattern) = self.pattern {
            query.push(("pattern".to_string(), pattern.clone()));
        }
        if let Some(ref guids) = self.fetch_guids {
            query.push(("fetchids".to_string(), json_param(guids)));
        }
        if let Some(ref guids) = self.skip_guids {
            query.push(("skipids".to_string(), json_param(guids)));
        }
        if let Some(ref tags) = self.tag_names {
            query.push(("tagname".to_string(), json_param(tags)));
        }
        if let Some(category) = self.category {
            query.push(("category".to_string(), category.as_str().to_string()));
        }
        if let Some(auto_created) = self.auto_created {
            query.push(("auto_created".to_string(), bool_param(auto_created)));
        }
        query
    }
}

/// Metadata endpoints (`metadata/...`).
pub struct MetadataService<'a> {
    client: &'a V1Client,
}

impl<'a> MetadataService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Full details of one or more objects. The response is the deeply
    /// nested internal representation; the [`crate::details`] views help
    /// with the common fields.
    pub async fn details(
        &self,
        object_type: TsObjectType,
        object_guids: &[String],
        show_hidden: bool,
        drop_question_details: bool,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("metadata/details"))
            .query("type", object_type.metadata_type())
            .query("id", json_param(&object_guids))
            .query("showhidden", bool_param(show_hidden))
            .query("dropquestiondetails", bool_param(drop_question_details))
            .query("version", "-1");
        self.client.dispatch(spec).await?.into_json()
    }

    /// Listing-page view of objects of one type, scoped to the logged-in
    /// user's visibility.
    pub async fn list(
        &self,
        object_type: TsObjectType,
        options: &MetadataListOptions,
    ) -> ThoughtSpotResult<Value> {
        let mut query = options.base_query(object_type);
        if let Some(show_hidden) = options.show_hidden {
            query.push(("showhidden".to_string(), bool_param(show_hidden)));
        }
        if let Some(ref author) = options.author_guid {
            query.push(("author_guid".to_string(), author.clone()));
        }
        let mut spec = RequestSpec::get(self.client.v1_path("metadata/list"));
        spec.query = query;
        self.client.dispatch(spec).await?.into_json()
    }

    /// Header records of objects of one type.
    pub async fn list_object_headers(
        &self,
        object_type: TsObjectType,
        options: &MetadataListOptions,
    ) -> ThoughtSpotResult<Value> {
        let mut spec = RequestSpec::get(self.client.v1_path("metadata/listobjectheaders"));
        spec.query = options.base_query(object_type);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Visualization headers of a liveboard.
    pub async fn list_viz_headers(&self, liveboard_guid: &str) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("metadata/listvizheaders"))
            .query("id", liveboard_guid);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Objects a user or group can access at a minimum access level.
    /// `principal_type` is `USER` or `USER_GROUP`.
    pub async fn list_as(
        &self,
        principal_guid: &str,
        principal_type: &str,
        minimum_access_level: &str,
        pattern: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("metadata/listas"))
            .query("type", principal_type)
            .query("principalid", principal_guid)
            .query("minimumaccesslevel", minimum_access_level)
            .query_opt("pattern", pattern);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Finds the GUID of an object by exact name. The server-side pattern
    /// filter is a case-insensitive wildcard, so the exact match happens
    /// client-side over the returned headers.
    pub async fn find_guid(
        &self,
        object_type: TsObjectType,
        name: &str,
    ) -> ThoughtSpotResult<String> {
        let mut options = MetadataListOptions::new();
        options.pattern = Some(name.to_string());
        let listing = self.list(object_type, &options).await?;

        listing
            .get("headers")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .find(|header| header.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|header| header.get("id").and_then(Value::as_str))
            .map(String::from)
            .ok_or_else(|| {
                ThoughtSpotError::decode(format!("no {object_type} object named '{name}'"))
            })
    }

    /// Assigns tags to objects. `object_guids` and `object_types` are
    /// parallel lists — one type entry per GUID. At least one of
    /// `tag_guids` / `tag_names` is mandatory.
    pub async fn assign_tag(
        &self,
        object_guids: &[String],
        object_types: &[String],
        tag_guids: Option<&[String]>,
        tag_names: Option<&[String]>,
    ) -> ThoughtSpotResult<()> {
        if tag_guids.is_none() && tag_names.is_none() {
            return Err(ThoughtSpotError::config(
                "either tag_guids or tag_names is mandatory",
            ));
        }

        let mut form = vec![
            ("id".to_string(), json_param(&object_guids)),
            ("type".to_string(), json_param(&object_types)),
        ];
        if let Some(guids) = tag_guids {
            form.push(("tagid".to_string(), json_param(&guids)));
        }
        if let Some(names) = tag_names {
            form.push(("tagname".to_string(), json_param(&names)));
        }

        let spec = RequestSpec::post(self.client.v1_path("metadata/assigntag")).form(form);
        // 204 on success.
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Marks objects as favorites for a user.
    pub async fn mark_favorite_for(
        &self,
        user_guid: &str,
        object_guids: &[String],
        object_type: TsObjectType,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("metadata/markunmarkfavoritefor")).form(
            vec![
                ("type".to_string(), object_type.metadata_type().to_string()),
                ("ids".to_string(), json_param(&object_guids)),
                ("userid".to_string(), user_guid.to_string()),
            ],
        );
        self.client.dispatch(spec).await?.into_json()
    }

    /// Removes objects from a user's favorites.
    pub async fn unmark_favorite_for(
        &self,
        user_guid: &str,
        object_guids: &[String],
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::delete(self.client.v1_path("metadata/markunmarkfavoritefor"))
            .form(vec![
                ("ids".to_string(), json_param(&object_guids)),
                ("userid".to_string(), user_guid.to_string()),
            ]);
        self.client.dispatch(spec).await?;
        Ok(())
    }

    /// Deletes objects. Non-public endpoint — returns 204 on success.
    pub async fn delete(
        &self,
        object_type: TsObjectType,
        object_guids: &[String],
        include_disabled: bool,
    ) -> ThoughtSpotResult<()> {
        let spec = RequestSpec::post(self.client.internal_path("metadata/delete")).form(vec![
            ("type".to_string(), object_type.metadata_type().to_string()),
            ("id".to_string(), json_param(&object_guids)),
            ("includeddisabled".to_string(), bool_param(include_disabled)),
        ]);
        self.client.dispatch(spec).await?;
        Ok(())
    }
}
