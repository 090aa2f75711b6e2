//! TML export and import (V1).
//!
//! These endpoints are the odd ones out: requests go form-encoded with an
//! `Accept: text/plain` header, the response is JSON anyway, and
//! per-object failures ride inside HTTP 200 bodies. Every binding here
//! runs the parsed response through the embedded-status check before
//! touching the payload.

use super::{bool_param, json_param};
use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use crate::transport::{check_embedded_status, RequestSpec};
use crate::types::{ImportPolicy, TmlFormat};
use crate::v1::V1Client;
use serde_json::Value;
use std::collections::BTreeMap;

/// Options for `metadata/tml/import`.
#[derive(Debug, Clone, Default)]
pub struct TmlImportOptions {
    /// Create new objects instead of updating by GUID.
    pub create_new_on_server: bool,
    /// Validate without importing.
    pub validate_only: bool,
    /// Block the metadata sync that normally follows an import.
    pub block_metadata_sync: Option<bool>,
}

/// TML endpoints (`metadata/tml/...`).
pub struct TmlService<'a> {
    client: &'a V1Client,
}

impl<'a> TmlService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    async fn export_raw(
        &self,
        guids: &[String],
        format: TmlFormat,
        export_associated: bool,
        export_fqn: bool,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("metadata/tml/export"))
            .form(vec![
                ("export_ids".to_string(), json_param(&guids)),
                ("formattype".to_string(), format.as_str().to_string()),
                (
                    "export_associated".to_string(),
                    bool_param(export_associated),
                ),
                ("export_fqn".to_string(), bool_param(export_fqn)),
            ])
            .accept("text/plain");
        let body = self.client.dispatch(spec).await?.into_json()?;
        check_embedded_status(&body)?;
        Ok(body)
    }

    /// Exports one object's TML as a parsed JSON document (the `edoc`
    /// content).
    pub async fn export(&self, guid: &str, export_fqn: bool) -> ThoughtSpotResult<Value> {
        let body = self
            .export_raw(&[guid.to_string()], TmlFormat::Json, false, export_fqn)
            .await?;
        let edoc = first_edoc(&body)?;
        serde_json::from_str(edoc)
            .map_err(|e| ThoughtSpotError::decode(format!("edoc is not valid JSON: {e}")))
    }

    /// Exports one object with its associated objects and returns the
    /// requested object's parsed TML plus a name→GUID map of everything
    /// in the response. The map is what GUID-remapping migrations feed on.
    pub async fn export_with_associations_map(
        &self,
        guid: &str,
        export_fqn: bool,
    ) -> ThoughtSpotResult<(Value, BTreeMap<String, String>)> {
        let body = self
            .export_raw(&[guid.to_string()], TmlFormat::Json, true, export_fqn)
            .await?;
        let edoc = first_edoc(&body)?;
        let tml = serde_json::from_str(edoc)
            .map_err(|e| ThoughtSpotError::decode(format!("edoc is not valid JSON: {e}")))?;
        Ok((tml, name_guid_map(&body)))
    }

    /// Exports one object's TML as a string, in YAML (the format the
    /// product UI shows) or JSON.
    pub async fn export_string(
        &self,
        guid: &str,
        format: TmlFormat,
        export_fqn: bool,
    ) -> ThoughtSpotResult<String> {
        let body = self
            .export_raw(&[guid.to_string()], format, false, export_fqn)
            .await?;
        first_edoc(&body).map(String::from)
    }

    /// String-format export with the name→GUID associations map.
    pub async fn export_string_with_associations_map(
        &self,
        guid: &str,
        format: TmlFormat,
        export_fqn: bool,
    ) -> ThoughtSpotResult<(String, BTreeMap<String, String>)> {
        let body = self
            .export_raw(&[guid.to_string()], format, true, export_fqn)
            .await?;
        let edoc = first_edoc(&body)?.to_string();
        Ok((edoc, name_guid_map(&body)))
    }

    /// Imports TML documents. Each entry of `tml_documents` is one
    /// document, already serialized (YAML text or JSON text).
    ///
    /// The V1 wire format stringifies the document list into the
    /// `import_objects` form field.
    pub async fn import(
        &self,
        tml_documents: &[String],
        options: &TmlImportOptions,
    ) -> ThoughtSpotResult<Value> {
        let import_policy = if options.validate_only {
            ImportPolicy::ValidateOnly
        } else {
            ImportPolicy::AllOrNone
        };

        let mut form = vec![
            ("import_objects".to_string(), json_param(&tml_documents)),
            (
                "import_policy".to_string(),
                import_policy.as_str().to_string(),
            ),
            (
                "force_create".to_string(),
                bool_param(options.create_new_on_server),
            ),
        ];
        if let Some(block) = options.block_metadata_sync {
            form.push((
                "enable_block_tml_metadata_sync".to_string(),
                bool_param(block),
            ));
        }

        let spec = RequestSpec::post(self.client.v1_path("metadata/tml/import"))
            .form(form)
            .accept("text/plain");
        let body = self.client.dispatch(spec).await?.into_json()?;
        check_embedded_status(&body)?;
        Ok(body)
    }

    /// GUIDs of the objects created or updated by an import, in response
    /// order.
    pub fn guids_from_import_response(&self, import_response: &Value) -> Vec<String> {
        import_response
            .get("object")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|object| {
                object
                    .get("response")?
                    .get("header")?
                    .get("id_guid")?
                    .as_str()
                    .map(String::from)
            })
            .collect()
    }
}

fn first_edoc(body: &Value) -> ThoughtSpotResult<&str> {
    body.get("object")
        .and_then(Value::as_array)
        .and_then(|objects| objects.first())
        .and_then(|object| object.get("edoc"))
        .and_then(Value::as_str)
        .ok_or_else(|| ThoughtSpotError::decode("TML response has no edoc"))
}

fn name_guid_map(body: &Value) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    if let Some(objects) = body.get("object").and_then(Value::as_array) {
        for object in objects {
            let info = object.get("info");
            let name = info
                .and_then(|i| i.get("name"))
                .and_then(Value::as_str);
            let id = info.and_then(|i| i.get("id")).and_then(Value::as_str);
            if let (Some(name), Some(id)) = (name, id) {
                map.insert(name.to_string(), id.to_string());
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edoc_extraction() {
        let body = json!({
            "object": [{"edoc": "{\"guid\": \"g1\"}", "info": {"name": "Sales", "id": "g1"}}]
        });
        assert_eq!(first_edoc(&body).unwrap(), "{\"guid\": \"g1\"}");
    }

    #[test]
    fn missing_edoc_is_a_decode_error() {
        let body = json!({"object": []});
        assert!(first_edoc(&body).is_err());
    }

    #[test]
    fn associations_map_covers_every_object() {
        let body = json!({
            "object": [
                {"edoc": "...", "info": {"name": "Sales", "id": "g1"}},
                {"info": {"name": "Sales WS", "id": "g2"}},
                {"info": {"name": "Orders", "id": "g3"}}
            ]
        });
        let map = name_guid_map(&body);
        assert_eq!(map.len(), 3);
        assert_eq!(map["Sales WS"], "g2");
    }
}
