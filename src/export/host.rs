//! Contracts of the host collaborators the export flow drives.
//!
//! The orchestrator never touches a platform API directly. A host (browser
//! shell, desktop app, test) injects implementations of these traits.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use super::config::RenderConfig;
use super::error::HostFailure;
use crate::core::QuoteDocument;

/// MIME type of every artifact.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A rendered PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfArtifact {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

impl PdfArtifact {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// The file as presented to a capability query.
    pub fn descriptor(&self) -> FileDescriptor {
        FileDescriptor {
            name: self.file_name.clone(),
            mime_type: PDF_MIME_TYPE.to_string(),
            size: self.bytes.len(),
        }
    }
}

/// Metadata of a file offered to the share capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub mime_type: String,
    pub size: usize,
}

/// Payload of a native share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub files: Vec<PdfArtifact>,
    pub title: String,
    pub text: String,
}

/// Turns the quote view into a PDF.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Whether the renderer has finished loading and can accept work.
    fn is_ready(&self) -> bool;

    async fn render(
        &self,
        document: &QuoteDocument,
        config: &RenderConfig,
    ) -> Result<PdfArtifact, HostFailure>;
}

/// Native "share this file" capability of the host platform.
#[async_trait]
pub trait ShareHost: Send + Sync {
    /// Whether the host can share `file` natively.
    fn can_share_files(&self, file: &FileDescriptor) -> bool;

    /// Resolves once the share sheet closes. A user cancellation is reported
    /// as a failure named [`USER_ABORT_NAME`](super::USER_ABORT_NAME).
    async fn share(&self, request: ShareRequest) -> Result<(), HostFailure>;
}

/// Local file download and link opening. Both are fire-and-forget.
pub trait DeliveryHost: Send + Sync {
    /// Save the artifact via a synthetic download.
    fn save_file(&self, artifact: &PdfArtifact);

    /// Open `url` in a new browsing context.
    fn open_link(&self, url: &Url);
}

/// User-facing notices.
pub trait Notifier: Send + Sync {
    /// Short transient status line.
    fn status(&self, message: &str);

    /// Blocking alert.
    fn alert(&self, message: &str);
}

/// A share host for platforms without native file sharing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNativeShare;

#[async_trait]
impl ShareHost for NoNativeShare {
    fn can_share_files(&self, _file: &FileDescriptor) -> bool {
        false
    }

    async fn share(&self, _request: ShareRequest) -> Result<(), HostFailure> {
        Err(HostFailure::new(
            "NotSupportedError",
            "native file sharing is unavailable",
        ))
    }
}

/// Routes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn status(&self, message: &str) {
        info!(target: "quotekit::notice", "{message}");
    }

    fn alert(&self, message: &str) {
        warn!(target: "quotekit::notice", "{message}");
    }
}
