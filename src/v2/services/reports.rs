//! Report exports (V2). Responses are raw file bytes (PDF, PNG, CSV,
//! XLSX), returned untransformed. The HTTP status check runs before any
//! bytes are handed back.

use crate::errors::ThoughtSpotResult;
use crate::transport::{Expect, RequestSpec};
use crate::v2::V2Client;
use bytes::Bytes;
use serde_json::Value;

/// Report endpoints (`report/...`).
pub struct ReportsService<'a> {
    client: &'a V2Client,
}

impl<'a> ReportsService<'a> {
    pub(crate) fn new(client: &'a V2Client) -> Self {
        Self { client }
    }

    /// Exports a liveboard. The request names the liveboard and the
    /// `file_format` (see [`crate::types::ReportType`]).
    pub async fn liveboard(&self, request: Value) -> ThoughtSpotResult<Bytes> {
        self.binary("report/liveboard", request).await
    }

    /// Exports an answer.
    pub async fn answer(&self, request: Value) -> ThoughtSpotResult<Bytes> {
        self.binary("report/answer", request).await
    }

    async fn binary(&self, endpoint: &str, request: Value) -> ThoughtSpotResult<Bytes> {
        let spec = RequestSpec::post(self.client.api_path(endpoint))
            .json(request)
            .expect(Expect::Bytes);
        self.client.dispatch(spec).await?.into_bytes()
    }
}
