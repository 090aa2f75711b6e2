//! Connection (data source) management.
//!
//! Besides the CRUD endpoints, this carries the helpers that compose the
//! `externalDatabases` structure a connection update wants: the update
//! must re-state every already-imported table or the server drops it.

use super::{bool_param, json_param};
use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use crate::transport::RequestSpec;
use crate::types::{Category, SortOrder};
use crate::v1::V1Client;
use serde_json::{Map, Value};

/// Connection endpoints (`connection/...`).
pub struct ConnectionsService<'a> {
    client: &'a V1Client,
}

impl<'a> ConnectionsService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Available connection types on the cluster.
    pub async fn types(&self) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("connection/types"));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Lists connections.
    pub async fn list(
        &self,
        category: Category,
        sort: SortOrder,
        sort_ascending: bool,
        pattern: Option<&str>,
        tag_names: Option<&[String]>,
        batchsize: i64,
        offset: i64,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("connection/list"))
            .query("category", category.as_str())
            .query("sort", sort.as_str())
            .query("sortascending", bool_param(sort_ascending))
            .query("offset", offset)
            .query("batchsize", batchsize)
            .query_opt("pattern", pattern)
            .query_opt("tagname", tag_names.map(|tags| json_param(&tags)));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Creates a connection. `metadata_json` is the serialized
    /// configuration+tables document for the connection type.
    pub async fn create(
        &self,
        name: &str,
        connection_type: &str,
        metadata_json: &str,
        description: &str,
        create_without_tables: bool,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("connection/create")).form(vec![
            ("name".to_string(), name.to_string()),
            ("description".to_string(), description.to_string()),
            ("type".to_string(), connection_type.to_string()),
            ("metadata".to_string(), metadata_json.to_string()),
            (
                "createEmpty".to_string(),
                bool_param(create_without_tables),
            ),
        ]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Updates a connection.
    pub async fn update(
        &self,
        connection_guid: &str,
        name: &str,
        connection_type: &str,
        metadata_json: &str,
        description: &str,
        create_without_tables: bool,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("connection/update")).form(vec![
            ("id".to_string(), connection_guid.to_string()),
            ("name".to_string(), name.to_string()),
            ("description".to_string(), description.to_string()),
            ("type".to_string(), connection_type.to_string()),
            ("metadata".to_string(), metadata_json.to_string()),
            (
                "createEmpty".to_string(),
                bool_param(create_without_tables),
            ),
        ]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Tables/worksheets/views under a connection, as shown in the UI.
    /// Non-public endpoint.
    pub async fn detail(
        &self,
        connection_guid: &str,
        sort: SortOrder,
        sort_ascending: bool,
        pattern: Option<&str>,
        tag_names: Option<&[String]>,
        show_hidden: bool,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(
            self.client
                .internal_path(&format!("connection/detail/{connection_guid}")),
        )
        .query("sort", sort.as_str())
        .query("sortascending", bool_param(sort_ascending))
        .query("showhidden", bool_param(show_hidden))
        .query_opt("pattern", pattern)
        .query_opt("tagname", tag_names.map(|tags| json_param(&tags)));
        self.client.dispatch(spec).await?.into_json()
    }

    /// The external databases visible through a connection. With
    /// `use_internal_endpoint` the call goes to the non-public variant,
    /// which requires the serialized connection config.
    pub async fn fetch_connection(
        &self,
        connection_guid: &str,
        include_columns: bool,
        authentication_type: &str,
        config_json: Option<&str>,
        use_internal_endpoint: bool,
    ) -> ThoughtSpotResult<Value> {
        let path = if use_internal_endpoint {
            if config_json.is_none() {
                return Err(ThoughtSpotError::config(
                    "the internal fetchConnection endpoint requires config_json",
                ));
            }
            self.client.internal_path("connection/fetchConnection")
        } else {
            self.client.v1_path("connection/fetchConnection")
        };

        let mut form = vec![
            ("id".to_string(), connection_guid.to_string()),
            ("includeColumns".to_string(), bool_param(include_columns)),
            (
                "authentication_type".to_string(),
                authentication_type.to_string(),
            ),
        ];
        if let Some(config) = config_json {
            form.push(("config".to_string(), config.to_string()));
        }

        let spec = RequestSpec::post(path).form(form);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Composes the `externalDatabases` update document that imports the
    /// tables named by `tables_to_add` (the `{database: {schema:
    /// [tables]}}` selection map; an empty table list selects the whole
    /// schema). Marks each new table selected and pulls its columns via
    /// [`ConnectionsService::fetch_live_columns`]. Start from
    /// [`selected_tables_from_connection`] so already-imported tables
    /// survive the update.
    pub async fn add_new_tables_to_connection(
        &self,
        selected_external_databases: Vec<Value>,
        tables_to_add: &Map<String, Value>,
        connection_guid: &str,
        config_json: &Value,
    ) -> ThoughtSpotResult<Value> {
        let mut external_databases = selected_external_databases;
        let config_string = config_json.to_string();

        for db in &mut external_databases {
            let Some(db_name) = db.get("name").and_then(Value::as_str).map(String::from) else {
                continue;
            };
            let Some(schema_map) = tables_to_add.get(&db_name).and_then(Value::as_object) else {
                continue;
            };
            let Some(schemas) = db.get_mut("schemas").and_then(Value::as_array_mut) else {
                continue;
            };

            for schema in schemas {
                let Some(schema_name) =
                    schema.get("name").and_then(Value::as_str).map(String::from)
                else {
                    continue;
                };
                let Some(wanted_tables) = schema_map.get(&schema_name).and_then(Value::as_array)
                else {
                    continue;
                };
                let wanted: Vec<&str> = wanted_tables.iter().filter_map(Value::as_str).collect();

                let Some(tables) = schema.get_mut("tables").and_then(Value::as_array_mut) else {
                    continue;
                };
                for table in tables {
                    let Some(table_name) =
                        table.get("name").and_then(Value::as_str).map(String::from)
                    else {
                        continue;
                    };
                    // An empty list selects every table of the schema.
                    if !wanted.is_empty() && !wanted.contains(&table_name.as_str()) {
                        continue;
                    }
                    table["selected"] = Value::from(true);
                    table["linked"] = Value::from(true);

                    let live_columns = self
                        .fetch_live_columns(
                            connection_guid,
                            &db_name,
                            &schema_name,
                            &table_name,
                            "SERVICE_ACCOUNT",
                            Some(&config_string),
                            false,
                        )
                        .await?;

                    if let Some(column_lists) = live_columns.as_object() {
                        for columns in column_lists.values() {
                            let mut selected_columns = Vec::new();
                            for column in columns.as_array().into_iter().flatten() {
                                if !column.is_object() {
                                    continue;
                                }
                                let mut column = column.clone();
                                column["selected"] = Value::from(true);
                                column["isImported"] = Value::from(false);
                                column["tableName"] = Value::from(table_name.clone());
                                column["schemaName"] = Value::from(schema_name.clone());
                                column["dbName"] = Value::from(db_name.clone());
                                selected_columns.push(column);
                            }
                            table["columns"] = Value::Array(selected_columns);
                        }
                    }
                }
            }
        }

        Ok(serde_json::json!({
            "configuration": config_json,
            "externalDatabases": external_databases,
        }))
    }

    /// Columns of one live table behind a connection.
    pub async fn fetch_live_columns(
        &self,
        connection_guid: &str,
        database_name: &str,
        schema_name: &str,
        table_name: &str,
        authentication_type: &str,
        config_json: Option<&str>,
        use_internal_endpoint: bool,
    ) -> ThoughtSpotResult<Value> {
        let path = if use_internal_endpoint {
            if config_json.is_none() {
                return Err(ThoughtSpotError::config(
                    "the internal fetchLiveColumns endpoint requires config_json",
                ));
            }
            self.client.internal_path("connection/fetchLiveColumns")
        } else {
            self.client.v1_path("connection/fetchLiveColumns")
        };

        let tables = serde_json::json!([{
            "databaseName": database_name,
            "schemaName": schema_name,
            "tableName": table_name,
        }]);
        let mut form = vec![
            ("connection_id".to_string(), connection_guid.to_string()),
            ("tables".to_string(), tables.to_string()),
            (
                "authentication_type".to_string(),
                authentication_type.to_string(),
            ),
        ];
        if let Some(config) = config_json {
            form.push(("config".to_string(), config.to_string()));
        }

        let spec = RequestSpec::post(path).form(form);
        self.client.dispatch(spec).await?.into_json()
    }
}

/// Database names from a `fetch_connection` response.
pub fn databases_from_connection(external_databases: &Value) -> Vec<&str> {
    external_databases
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|db| db.get("name").and_then(Value::as_str))
        .collect()
}

/// Skeleton `{database: {schema: []}}` selection map covering every
/// database and schema of a `fetch_connection` response. An empty table
/// list means "bring in all tables of the schema".
pub fn databases_and_schemas_from_connection(
    external_databases: &Value,
    schema_names_to_skip: &[&str],
) -> Map<String, Value> {
    let mut databases = Map::new();
    for db in external_databases.as_array().into_iter().flatten() {
        let Some(name) = db.get("name").and_then(Value::as_str) else {
            continue;
        };
        let mut schemas = Map::new();
        for schema in db
            .get("schemas")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            if let Some(schema_name) = schema.get("name").and_then(Value::as_str) {
                if !schema_names_to_skip.contains(&schema_name) {
                    schemas.insert(schema_name.to_string(), Value::Array(Vec::new()));
                }
            }
        }
        databases.insert(name.to_string(), Value::Object(schemas));
    }
    databases
}

/// Databases an update must carry: those named by the selection map, plus
/// any database that already has selected (imported) tables — dropping
/// those from the update would delete their table objects.
pub fn selected_tables_from_connection(
    external_databases: &Value,
    tables_to_add: Option<&Map<String, Value>>,
) -> Vec<Value> {
    let mut selected = Vec::new();
    for db in external_databases.as_array().into_iter().flatten() {
        if let Some(map) = tables_to_add {
            if db
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| map.contains_key(name))
            {
                selected.push(db.clone());
                continue;
            }
        }
        let has_selected_table = db
            .get("schemas")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .flat_map(|schema| {
                schema
                    .get("tables")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
            })
            .any(|table| table.get("selected").and_then(Value::as_bool) == Some(true));
        if has_selected_table {
            selected.push(db.clone());
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn external_databases() -> Value {
        json!([
            {
                "name": "SALES_DB",
                "schemas": [
                    {"name": "PUBLIC", "tables": [
                        {"name": "ORDERS", "selected": true},
                        {"name": "RETURNS", "selected": false}
                    ]},
                    {"name": "STAGING", "tables": []}
                ]
            },
            {
                "name": "HR_DB",
                "schemas": [
                    {"name": "PUBLIC", "tables": [{"name": "EMPLOYEES", "selected": false}]}
                ]
            }
        ])
    }

    #[test]
    fn database_names() {
        let dbs = external_databases();
        assert_eq!(databases_from_connection(&dbs), vec!["SALES_DB", "HR_DB"]);
    }

    #[test]
    fn schema_skeleton_skips_named_schemas() {
        let dbs = external_databases();
        let map = databases_and_schemas_from_connection(&dbs, &["STAGING"]);
        assert!(map["SALES_DB"].get("PUBLIC").is_some());
        assert!(map["SALES_DB"].get("STAGING").is_none());
    }

    #[test]
    fn update_keeps_databases_with_imported_tables() {
        let dbs = external_databases();
        // No selection map: only SALES_DB has an already-selected table.
        let selected = selected_tables_from_connection(&dbs, None);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0]["name"], "SALES_DB");
    }

    #[test]
    fn update_includes_databases_from_selection_map() {
        let dbs = external_databases();
        let mut map = Map::new();
        map.insert("HR_DB".to_string(), Value::Object(Map::new()));
        let selected = selected_tables_from_connection(&dbs, Some(&map));
        assert_eq!(selected.len(), 2);
    }
}
