//! Export and share flow.
//!
//! Turns a [`QuoteDocument`](crate::core::QuoteDocument) into a PDF through
//! an injected renderer, then delivers it with the best path the host
//! offers: native file share, or a local download followed by a prefilled
//! messaging deep link.
//!
//! | Step | Host collaborator |
//! |------|-------------------|
//! | Render | [`DocumentRenderer`] |
//! | Capability check, native share | [`ShareHost`] |
//! | Download, deep link | [`DeliveryHost`] |
//! | Status line, alerts | [`Notifier`] |

mod config;
mod error;
mod host;
mod naming;
mod orchestrator;

pub use config::*;
pub use error::{ExportError, HostFailure, USER_ABORT_NAME};
pub use host::*;
pub use naming::*;
pub use orchestrator::*;
