//! Report exports. The PDF comes back as raw bytes, untouched.

use super::bool_param;
use crate::errors::ThoughtSpotResult;
use crate::transport::{Expect, RequestSpec};
use crate::v1::V1Client;
use bytes::Bytes;

/// Page orientation of an exported PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfOrientation {
    /// Landscape pages.
    #[default]
    Landscape,
    /// Portrait pages.
    Portrait,
}

impl PdfOrientation {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "LANDSCAPE",
            Self::Portrait => "PORTRAIT",
        }
    }
}

/// Options for `export/pinboard/pdf`.
#[derive(Debug, Clone)]
pub struct PdfExportOptions {
    /// One visualization per page instead of the liveboard layout.
    pub one_visualization_per_page: bool,
    /// Page orientation.
    pub orientation: PdfOrientation,
    /// Include a cover page.
    pub cover_page: bool,
    /// Include the logo.
    pub logo: bool,
    /// Include page numbers.
    pub page_numbers: bool,
    /// Include the filter summary page.
    pub filter_page: bool,
    /// Truncate long tables.
    pub truncate_tables: bool,
    /// Footer text.
    pub footer_text: Option<String>,
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            one_visualization_per_page: false,
            orientation: PdfOrientation::Landscape,
            cover_page: true,
            logo: true,
            page_numbers: false,
            filter_page: true,
            truncate_tables: false,
            footer_text: None,
        }
    }
}

/// Export endpoints (`export/...`).
pub struct ExportsService<'a> {
    client: &'a V1Client,
}

impl<'a> ExportsService<'a> {
    pub(crate) fn new(client: &'a V1Client) -> Self {
        Self { client }
    }

    /// Renders a liveboard to PDF and returns the bytes.
    pub async fn liveboard_pdf(
        &self,
        liveboard_guid: &str,
        options: &PdfExportOptions,
    ) -> ThoughtSpotResult<Bytes> {
        let layout_type = if options.one_visualization_per_page {
            "VISUALIZATION"
        } else {
            "PINBOARD"
        };

        let spec = RequestSpec::post(self.client.v1_path("export/pinboard/pdf"))
            .query("id", liveboard_guid)
            .query("layout_type", layout_type)
            .query("orientation", options.orientation.as_str())
            .query("truncate_tables", bool_param(options.truncate_tables))
            .query("include_cover_page", bool_param(options.cover_page))
            .query("include_logo", bool_param(options.logo))
            .query("include_page_number", bool_param(options.page_numbers))
            .query("include_filter_page", bool_param(options.filter_page))
            .query_opt("footer_text", options.footer_text.as_deref())
            .expect(Expect::Bytes);
        self.client.dispatch(spec).await?.into_bytes()
    }
}
