//! Metadata search, TML transfer and data retrieval (V2).

use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use crate::transport::check_embedded_status;
use crate::types::ImportPolicy;
use crate::v2::V2Client;
use serde::Serialize;
use serde_json::{json, Value};

/// Request body for `metadata/tml/import` and its async variant.
#[derive(Debug, Clone, Serialize)]
pub struct TmlImportRequest {
    metadata_tmls: Vec<String>,
    import_policy: &'static str,
    create_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    all_orgs_context: Option<bool>,
    #[serde(
        rename = "cdw_validation_for_tables",
        skip_serializing_if = "Option::is_none"
    )]
    skip_cdw_validation_for_tables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_diff_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_large_metadata_validation: Option<bool>,
}

impl TmlImportRequest {
    /// Imports the given TML documents (YAML or JSON text) under a
    /// conflict policy.
    pub fn new(metadata_tmls: Vec<String>, import_policy: ImportPolicy) -> Self {
        Self {
            metadata_tmls,
            import_policy: import_policy.as_str(),
            create_new: false,
            all_orgs_context: None,
            skip_cdw_validation_for_tables: None,
            skip_diff_check: None,
            enable_large_metadata_validation: None,
        }
    }

    /// Creates new objects instead of updating by GUID.
    pub fn create_new(mut self, create_new: bool) -> Self {
        self.create_new = create_new;
        self
    }

    /// Imports in the all-orgs context.
    pub fn all_orgs_context(mut self, all_orgs: bool) -> Self {
        self.all_orgs_context = Some(all_orgs);
        self
    }

    /// Skips cloud-data-warehouse validation for tables.
    pub fn skip_cdw_validation_for_tables(mut self, skip: bool) -> Self {
        self.skip_cdw_validation_for_tables = Some(skip);
        self
    }

    /// Skips the diff check.
    pub fn skip_diff_check(mut self, skip: bool) -> Self {
        self.skip_diff_check = Some(skip);
        self
    }

    /// Enables large-metadata validation.
    pub fn enable_large_metadata_validation(mut self, enable: bool) -> Self {
        self.enable_large_metadata_validation = Some(enable);
        self
    }
}

/// Options for `metadata/tml/export`.
#[derive(Debug, Clone, Default)]
pub struct TmlExportOptions {
    /// Export associated objects too.
    pub export_associated: bool,
    /// Add fully-qualified names to references.
    pub export_fqn: bool,
    /// `YAML` to get YAML edocs; the server default is JSON-ish text.
    pub edoc_format: Option<String>,
    /// Pin the export schema version.
    pub export_schema_version: Option<String>,
    /// Export dependent objects.
    pub export_dependent: Option<bool>,
    /// Export connections as dependents.
    pub export_connection_as_dependent: Option<bool>,
    /// Export across all orgs.
    pub all_orgs_override: Option<bool>,
    /// Raw `export_options` block.
    pub export_options: Option<Value>,
}

/// Metadata endpoints (`metadata/...`, `searchdata`).
pub struct MetadataService<'a> {
    client: &'a V2Client,
}

impl<'a> MetadataService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Searches metadata objects.
    pub async fn search(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("metadata/search", request).await
    }

    /// SQL queries behind a liveboard's visualizations.
    pub async fn liveboard_sql(
        &self,
        liveboard_identifier: &str,
        visualization_identifiers: Option<&[String]>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({ "metadata_identifier": liveboard_identifier });
        if let Some(viz) = visualization_identifiers {
            request["visualization_identifiers"] = json!(viz);
        }
        self.client.post_json("metadata/liveboard/sql", request).await
    }

    /// SQL query behind an answer.
    pub async fn answer_sql(&self, answer_identifier: &str) -> ThoughtSpotResult<Value> {
        self.client
            .post_json(
                "metadata/answer/sql",
                json!({ "metadata_identifier": answer_identifier }),
            )
            .await
    }

    /// Imports TML documents. Per-object validation failures arrive
    /// embedded in a 2xx body and surface as
    /// [`ThoughtSpotError::Api`](crate::ThoughtSpotError::Api) with
    /// `embedded` set; the full response stays on the error payload.
    pub async fn tml_import(&self, request: &TmlImportRequest) -> ThoughtSpotResult<Value> {
        let body = self
            .client
            .post_json("metadata/tml/import", to_body(request)?)
            .await?;
        check_embedded_status(&body)?;
        Ok(body)
    }

    /// Queues an async TML import.
    pub async fn tml_async_import(&self, request: &TmlImportRequest) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("metadata/tml/async/import", to_body(request)?)
            .await
    }

    /// Status of queued async TML imports.
    pub async fn tml_async_status(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client
            .post_json("metadata/tml/async/status", request)
            .await
    }

    /// Exports TML for objects by GUID.
    pub async fn tml_export(
        &self,
        metadata_ids: &[String],
        options: &TmlExportOptions,
    ) -> ThoughtSpotResult<Value> {
        let metadata: Vec<Value> = metadata_ids
            .iter()
            .map(|id| json!({ "identifier": id }))
            .collect();
        self.tml_export_request(json!(metadata), options).await
    }

    /// Exports TML with a raw `metadata` request block, for name/type
    /// addressing beyond plain GUIDs.
    pub async fn tml_export_request(
        &self,
        metadata: Value,
        options: &TmlExportOptions,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({
            "export_associated": options.export_associated,
            "export_fqn": options.export_fqn,
            "metadata": metadata,
        });
        if let Some(ref format) = options.edoc_format {
            if format.eq_ignore_ascii_case("yaml") {
                request["edoc_format"] = Value::from("YAML");
            }
        }
        if let Some(ref version) = options.export_schema_version {
            request["export_schema_version"] = Value::from(version.clone());
        }
        if let Some(dependent) = options.export_dependent {
            request["export_dependent"] = Value::from(dependent);
        }
        if let Some(as_dependent) = options.export_connection_as_dependent {
            request["export_connection_as_dependent"] = Value::from(as_dependent);
        }
        if let Some(all_orgs) = options.all_orgs_override {
            request["all_orgs_override"] = Value::from(all_orgs);
        }
        if let Some(ref export_options) = options.export_options {
            request["export_options"] = export_options.clone();
        }

        let body = self.client.post_json("metadata/tml/export", request).await?;
        check_embedded_status(&body)?;
        Ok(body)
    }

    /// Batched TML export with a raw request body.
    pub async fn tml_export_batch(&self, request: Value) -> ThoughtSpotResult<Value> {
        let body = self
            .client
            .post_json("metadata/tml/export/batch", request)
            .await?;
        check_embedded_status(&body)?;
        Ok(body)
    }

    /// Deletes metadata objects by GUID.
    pub async fn delete(
        &self,
        metadata_ids: &[String],
        delete_disabled_objects: bool,
    ) -> ThoughtSpotResult<Value> {
        let metadata: Vec<Value> = metadata_ids
            .iter()
            .map(|id| json!({ "identifier": id }))
            .collect();
        self.client
            .post_json(
                "metadata/delete",
                json!({
                    "delete_disabled_objects": delete_disabled_objects,
                    "metadata": metadata,
                }),
            )
            .await
    }

    /// Copies an object, optionally renaming the copy.
    pub async fn copy_object(
        &self,
        identifier: &str,
        object_type: Option<&str>,
        title: Option<&str>,
        description: Option<&str>,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({ "identifier": identifier });
        if let Some(object_type) = object_type {
            request["type"] = Value::from(object_type);
        }
        if let Some(title) = title {
            request["title"] = Value::from(title);
        }
        if let Some(description) = description {
            request["description"] = Value::from(description);
        }
        self.client.post_json("metadata/copyobject", request).await
    }

    /// Converts worksheets to models.
    pub async fn worksheets_convert(
        &self,
        worksheet_ids: Option<&[String]>,
        exclude_worksheet_ids: Option<&[String]>,
        convert_all: bool,
        apply_changes: bool,
    ) -> ThoughtSpotResult<Value> {
        let mut request = json!({
            "convert_all": convert_all,
            "apply_changes": apply_changes,
        });
        if let Some(ids) = worksheet_ids {
            request["worksheet_ids"] = json!(ids);
        }
        if let Some(ids) = exclude_worksheet_ids {
            request["exclude_worksheet_ids"] = json!(ids);
        }
        self.client
            .post_json("metadata/worksheets/convert", request)
            .await
    }

    /// Updates metadata headers (obj_id assignment).
    pub async fn headers_update(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("metadata/headers/update", request).await
    }

    /// Data behind a liveboard.
    pub async fn liveboard_data(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("metadata/liveboard/data", request).await
    }

    /// Data behind an answer.
    pub async fn answer_data(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("metadata/answer/data", request).await
    }

    /// Runs a search query against a data source.
    pub async fn search_data(&self, request: Value) -> ThoughtSpotResult<Value> {
        self.client.post_json("searchdata", request).await
    }
}

fn to_body<S: Serialize>(request: &S) -> ThoughtSpotResult<Value> {
    serde_json::to_value(request)
        .map_err(|e| ThoughtSpotError::decode(format!("request serialization: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn import_request_shape() {
        let request = TmlImportRequest::new(
            vec!["guid: g1".to_string()],
            ImportPolicy::Partial,
        )
        .create_new(true)
        .skip_diff_check(true);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "metadata_tmls": ["guid: g1"],
                "import_policy": "PARTIAL",
                "create_new": true,
                "skip_diff_check": true
            })
        );
    }

    #[test]
    fn export_options_defaults_are_minimal() {
        let options = TmlExportOptions::default();
        assert!(!options.export_associated);
        assert!(options.edoc_format.is_none());
    }
}
