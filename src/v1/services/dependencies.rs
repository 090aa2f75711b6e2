//! Dependency listing: which objects depend on a given table, column,
//! join or liveboard. Deletion order for migrations comes from here.

use super::json_param;
use crate::errors::ThoughtSpotResult;
use crate::transport::RequestSpec;
use crate::v1::V1Client;
use serde_json::Value;

/// Dependency endpoints (`dependency/...`).
pub struct DependenciesService<'a> {
    client: &'a V1Client,
}

impl<'a> DependenciesService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Dependents of objects of one metadata type.
    pub async fn list_dependents(
        &self,
        object_type: &str,
        guids: &[String],
        batchsize: i64,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("dependency/listdependents")).form(vec![
            ("type".to_string(), object_type.to_string()),
            ("id".to_string(), json_param(&guids)),
            ("batchsize".to_string(), batchsize.to_string()),
        ]);
        self.client.dispatch(spec).await?.into_json()
    }

    /// Objects whose dependency information is incomplete.
    pub async fn list_incomplete(&self) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::get(self.client.v1_path("dependency/listincomplete"));
        self.client.dispatch(spec).await?.into_json()
    }

    /// Dependents of logical columns.
    pub async fn logical_column(&self, guids: &[String]) -> ThoughtSpotResult<Value> {
        self.id_listing("dependency/logicalcolumn", "id", guids).await
    }

    /// Dependents of logical tables.
    pub async fn logical_table(&self, guids: &[String]) -> ThoughtSpotResult<Value> {
        self.id_listing("dependency/logicaltable", "id", guids).await
    }

    /// Dependents of logical relationships (joins).
    pub async fn logical_relationship(&self, guids: &[String]) -> ThoughtSpotResult<Value> {
        self.id_listing("dependency/logicalrelationship", "id", guids)
            .await
    }

    /// Dependents of physical columns.
    pub async fn physical_column(&self, guids: &[String]) -> ThoughtSpotResult<Value> {
        self.id_listing("dependency/physicalcolumn", "id", guids).await
    }

    /// Dependents of physical tables.
    pub async fn physical_table(&self, guids: &[String]) -> ThoughtSpotResult<Value> {
        self.id_listing("dependency/physicaltable", "id", guids).await
    }

    /// Dependents of liveboards. This one spells its parameter `ids`.
    pub async fn liveboard(&self, guids: &[String]) -> ThoughtSpotResult<Value> {
        self.id_listing("dependency/pinboard", "ids", guids).await
    }

    async fn id_listing(
        &self,
        endpoint: &str,
        id_param: &str,
        guids: &[String],
    ) -> ThoughtSpotResult<Value> {
        let spec =
            RequestSpec::get(self.client.v1_path(endpoint)).query(id_param, json_param(&guids));
        self.client.dispatch(spec).await?.into_json()
    }
}
