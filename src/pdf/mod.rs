//! Built-in PDF renderer.
//!
//! A plain-text rendition of the quote written with `lopdf`, for hosts that
//! have no document view to rasterize (CLI tools, servers, tests). Page
//! size, orientation and margins come from [`RenderConfig`]; the raster
//! settings (`image_*`, `render_scale`, `use_cors`) do not apply and are
//! ignored.

mod layout;
mod writer;

use async_trait::async_trait;
use tracing::debug;

use crate::core::QuoteDocument;
use crate::export::{
    DEFAULT_DOCUMENT_LABEL, DocumentRenderer, HostFailure, PdfArtifact, RenderConfig,
};

use layout::PageGeometry;

/// Renders quotes to PDF without a host document view. Always ready.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    document_label: String,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::with_label(DEFAULT_DOCUMENT_LABEL)
    }

    /// Use `label` as the document title prefix.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            document_label: label.into(),
        }
    }

    /// Render `document` to PDF bytes.
    ///
    /// # Errors
    ///
    /// A `RangeError` failure if the totals overflow, a `PdfError` failure
    /// if the PDF cannot be written.
    pub fn render_bytes(
        &self,
        document: &QuoteDocument,
        config: &RenderConfig,
    ) -> Result<Vec<u8>, HostFailure> {
        let totals = document
            .try_totals()
            .map_err(|e| HostFailure::new("RangeError", e.to_string()))?;
        let geometry = PageGeometry::from_config(config);
        let rows = layout::quote_rows(&self.document_label, document, &totals, &geometry);
        let pages = layout::paginate(&rows, &geometry);
        debug!(pages = pages.len(), rows = rows.len(), "laid out quote");
        writer::write_pdf(&pages, geometry.width, geometry.height)
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    fn is_ready(&self) -> bool {
        true
    }

    async fn render(
        &self,
        document: &QuoteDocument,
        config: &RenderConfig,
    ) -> Result<PdfArtifact, HostFailure> {
        let bytes = self.render_bytes(document, config)?;
        Ok(PdfArtifact::new(config.file_name.clone(), bytes))
    }
}
