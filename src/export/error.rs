use std::fmt;

use thiserror::Error;

/// `name` a host reports when the user dismisses the native share sheet.
pub const USER_ABORT_NAME: &str = "AbortError";

/// An untyped failure as reported by a host collaborator.
///
/// Hosts hand these back as-is; the orchestrator classifies them into
/// [`ExportError`] or a silent cancellation before doing anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFailure {
    /// Error class name (e.g. "AbortError", "NotAllowedError").
    pub name: String,
    /// Human-readable message.
    pub message: String,
}

impl HostFailure {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The failure a host reports when the user cancels a share.
    pub fn user_abort() -> Self {
        Self::new(USER_ABORT_NAME, "share canceled")
    }

    pub fn is_user_abort(&self) -> bool {
        self.name == USER_ABORT_NAME
    }
}

impl fmt::Display for HostFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for HostFailure {}

/// Errors surfaced by an export or share request.
///
/// A user cancelling the share sheet is not an error; see
/// [`ExportOutcome::Cancelled`](super::ExportOutcome::Cancelled).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The rendering collaborator has not finished loading.
    #[error("PDF renderer is not ready yet")]
    NotReady,

    /// Another export or share request is still in flight.
    #[error("an export is already in progress")]
    Busy,

    /// The rendering collaborator failed to produce a PDF.
    #[error("PDF rendering failed: {0}")]
    Render(HostFailure),

    /// The native share call failed for a reason other than user abort.
    #[error("sharing failed: {0}")]
    Share(HostFailure),
}

/// A share failure after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShareFailure {
    Aborted,
    Failed(HostFailure),
}

pub(crate) fn classify_share_failure(failure: HostFailure) -> ShareFailure {
    if failure.is_user_abort() {
        ShareFailure::Aborted
    } else {
        ShareFailure::Failed(failure)
    }
}
