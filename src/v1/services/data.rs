//! Data retrieval: liveboard data and search data.

use super::json_param;
use crate::errors::ThoughtSpotResult;
use crate::transport::RequestSpec;
use crate::v1::V1Client;
use serde_json::Value;

/// Result format for the data endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Column names once, rows as arrays.
    #[default]
    Compact,
    /// One object per row.
    Full,
}

impl DataFormat {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "COMPACT",
            Self::Full => "FULL",
        }
    }
}

/// Data endpoints (`pinboarddata`, `searchdata`).
pub struct DataService<'a> {
    client: &'a V1Client,
}

impl<'a> DataService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Data behind one or more visualizations of a liveboard.
    pub async fn liveboard_data(
        &self,
        liveboard_guid: &str,
        viz_guids: &[String],
        format: DataFormat,
        batch_size: i64,
        page_number: i64,
        offset: i64,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("pinboarddata"))
            .query("id", liveboard_guid)
            .query("vizid", json_param(&viz_guids))
            .query("batchsize", batch_size)
            .query("pagenumber", page_number)
            .query("offset", offset)
            .query("formattype", format.as_str());
        self.client.dispatch(spec).await?.into_json()
    }

    /// Runs a search query against a data source and returns the result
    /// data.
    pub async fn search_data(
        &self,
        query_string: &str,
        data_source_guid: &str,
        format: DataFormat,
        batch_size: i64,
        page_number: i64,
        offset: i64,
    ) -> ThoughtSpotResult<Value> {
        let spec = RequestSpec::post(self.client.v1_path("searchdata"))
            .query("query_string", query_string)
            .query("data_source_guid", data_source_guid)
            .query("batchsize", batch_size)
            .query("pagenumber", page_number)
            .query("offset", offset)
            .query("formattype", format.as_str());
        self.client.dispatch(spec).await?.into_json()
    }
}
