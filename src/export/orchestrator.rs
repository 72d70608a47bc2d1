//! The export/share state machine.
//!
//! One job slot, driven by [`ExportOrchestrator::request`]:
//!
//! ```text
//! Idle ──► Rendering ──┬──────────────────────────────► Done ──► Idle   (download)
//!                      │
//!                      └──► AwaitingCapability ──┬──► Sharing ──┬──► Done ──► Idle
//!                                                │              ├──► Idle          (user abort)
//!                                                │              └──► Failed ──► Idle
//!                                                └──► Downloading ──► Done ──► Idle (fallback)
//! Rendering ──► Failed ──► Idle
//! ```
//!
//! Requests arriving while a job is in flight are rejected, never queued.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};
use url::Url;

use super::config::{ExportSettings, RenderConfig};
use super::error::{ExportError, ShareFailure, classify_share_failure};
use super::host::{
    DeliveryHost, DocumentRenderer, Notifier, PdfArtifact, ShareHost, ShareRequest,
};
use super::naming::{artifact_file_name, fallback_message, messaging_link, share_message};
use crate::core::{QuoteDocument, QuoteError};

const MSG_NOT_READY: &str = "The PDF generator is still loading. Please try again in a moment.";
const MSG_RENDERING: &str = "Generating PDF...";
const MSG_RENDER_FAILED: &str = "The PDF could not be generated. Please try again.";
const MSG_DOWNLOADED: &str = "PDF downloaded.";
const MSG_SHARING: &str = "Opening share options...";
const MSG_SHARED: &str = "Quote shared.";
const MSG_SHARE_FAILED: &str =
    "The file could not be shared. Use \"Download PDF\" and send it manually.";
const MSG_FALLBACK: &str = "PDF downloaded. Attach it in the chat that opens.";

/// Why a job ended in [`ExportPhase::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Render,
    Share,
}

/// Phase of the single export job slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    Rendering,
    AwaitingCapability,
    Sharing,
    Downloading,
    Done,
    Failed(FailureKind),
}

impl ExportPhase {
    /// Whether a job occupies the slot.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Rendering | Self::AwaitingCapability | Self::Sharing | Self::Downloading
        )
    }
}

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRequest {
    /// Render and save the PDF locally.
    Download,
    /// Render and deliver via native share, or download plus deep link.
    Share,
}

/// How a successful request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The PDF was saved locally.
    Downloaded { file_name: String },
    /// The native share sheet completed.
    Shared { file_name: String },
    /// Native sharing was unavailable; the PDF was saved and `link` opens
    /// the messaging app after the configured delay.
    SharedViaFallback { file_name: String, link: Url },
    /// The user dismissed the share sheet.
    Cancelled,
}

/// The host collaborators an orchestrator drives.
#[derive(Clone)]
pub struct ExportHosts {
    pub renderer: Arc<dyn DocumentRenderer>,
    pub share: Arc<dyn ShareHost>,
    pub delivery: Arc<dyn DeliveryHost>,
    pub notifier: Arc<dyn Notifier>,
}

impl ExportHosts {
    pub fn new(
        renderer: Arc<dyn DocumentRenderer>,
        share: Arc<dyn ShareHost>,
        delivery: Arc<dyn DeliveryHost>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            renderer,
            share,
            delivery,
            notifier,
        }
    }
}

#[derive(Debug, Default)]
struct Job {
    phase: ExportPhase,
    journal: Vec<ExportPhase>,
}

impl Job {
    fn check_idle(&self, request: ExportRequest) -> Result<(), ExportError> {
        if self.phase.is_in_flight() {
            debug!(?request, phase = ?self.phase, "export rejected, job in flight");
            return Err(ExportError::Busy);
        }
        Ok(())
    }

    fn enter(&mut self, phase: ExportPhase) {
        debug!(?phase, "export phase");
        self.phase = phase;
        self.journal.push(phase);
    }
}

/// Drives PDF generation and delivery for one quote at a time.
pub struct ExportOrchestrator {
    hosts: ExportHosts,
    settings: ExportSettings,
    messaging_base: Url,
    job: Mutex<Job>,
}

impl ExportOrchestrator {
    /// Fails if the messaging base URL in `settings` does not parse.
    pub fn new(hosts: ExportHosts, settings: ExportSettings) -> Result<Self, QuoteError> {
        let messaging_base = Url::parse(&settings.messaging_base_url).map_err(|e| {
            QuoteError::Config(format!(
                "invalid messaging base URL '{}': {e}",
                settings.messaging_base_url
            ))
        })?;
        Ok(Self {
            hosts,
            settings,
            messaging_base,
            job: Mutex::new(Job::default()),
        })
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Current phase of the job slot.
    pub fn phase(&self) -> ExportPhase {
        self.lock().phase
    }

    /// Whether a request is in flight. Hosts disable export actions while true.
    pub fn is_busy(&self) -> bool {
        self.phase().is_in_flight()
    }

    /// Phases entered by the most recent accepted request, in order.
    pub fn last_transitions(&self) -> Vec<ExportPhase> {
        self.lock().journal.clone()
    }

    /// Artifact file name for `document`.
    pub fn file_name_for(&self, document: &QuoteDocument) -> String {
        artifact_file_name(
            &self.settings.document_label,
            &document.client.name,
            &self.settings.fallback_file_label,
        )
    }

    /// Shorthand for `request(ExportRequest::Download, document)`.
    pub async fn download(&self, document: &QuoteDocument) -> Result<ExportOutcome, ExportError> {
        self.request(ExportRequest::Download, document).await
    }

    /// Shorthand for `request(ExportRequest::Share, document)`.
    pub async fn share(&self, document: &QuoteDocument) -> Result<ExportOutcome, ExportError> {
        self.request(ExportRequest::Share, document).await
    }

    /// Run one export or share request to completion.
    ///
    /// Every failure is reported to the user through the notifier before it
    /// is returned, and the slot is back to `Idle` when this resolves (or
    /// when the future is dropped).
    ///
    /// # Errors
    ///
    /// `NotReady` and `Busy` reject the request without touching the slot.
    /// `Render` and `Share` report collaborator failures.
    pub async fn request(
        &self,
        request: ExportRequest,
        document: &QuoteDocument,
    ) -> Result<ExportOutcome, ExportError> {
        let _slot = self.begin(request)?;

        let config = RenderConfig {
            file_name: self.file_name_for(document),
            ..self.settings.render.clone()
        };
        self.hosts.notifier.status(MSG_RENDERING);

        let artifact = match self.hosts.renderer.render(document, &config).await {
            Ok(artifact) => artifact,
            Err(failure) => {
                error!(%failure, file = %config.file_name, "PDF rendering failed");
                self.enter(ExportPhase::Failed(FailureKind::Render));
                self.hosts.notifier.alert(MSG_RENDER_FAILED);
                return Err(ExportError::Render(failure));
            }
        };
        info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "PDF rendered");

        match request {
            ExportRequest::Download => {
                self.hosts.delivery.save_file(&artifact);
                self.enter(ExportPhase::Done);
                self.hosts.notifier.status(MSG_DOWNLOADED);
                Ok(ExportOutcome::Downloaded {
                    file_name: artifact.file_name,
                })
            }
            ExportRequest::Share => self.deliver_shared(document, artifact).await,
        }
    }

    async fn deliver_shared(
        &self,
        document: &QuoteDocument,
        artifact: PdfArtifact,
    ) -> Result<ExportOutcome, ExportError> {
        self.enter(ExportPhase::AwaitingCapability);
        let descriptor = artifact.descriptor();

        if !self.hosts.share.can_share_files(&descriptor) {
            return Ok(self.download_with_link(document, artifact));
        }

        self.enter(ExportPhase::Sharing);
        self.hosts.notifier.status(MSG_SHARING);
        let file_name = artifact.file_name.clone();
        let share = ShareRequest {
            files: vec![artifact],
            title: self.settings.share_title.clone(),
            text: share_message(&document.client),
        };

        match self.hosts.share.share(share).await.map_err(classify_share_failure) {
            Ok(()) => {
                self.enter(ExportPhase::Done);
                self.hosts.notifier.status(MSG_SHARED);
                info!(file = %file_name, "quote shared");
                Ok(ExportOutcome::Shared { file_name })
            }
            Err(ShareFailure::Aborted) => {
                debug!(file = %file_name, "share dismissed by user");
                Ok(ExportOutcome::Cancelled)
            }
            Err(ShareFailure::Failed(failure)) => {
                warn!(%failure, file = %file_name, "native share failed");
                self.enter(ExportPhase::Failed(FailureKind::Share));
                self.hosts.notifier.alert(MSG_SHARE_FAILED);
                Err(ExportError::Share(failure))
            }
        }
    }

    fn download_with_link(&self, document: &QuoteDocument, artifact: PdfArtifact) -> ExportOutcome {
        self.enter(ExportPhase::Downloading);
        self.hosts.delivery.save_file(&artifact);

        let text = fallback_message(&document.client, &artifact.file_name);
        let link = messaging_link(&self.messaging_base, &text);
        self.open_link_later(link.clone());

        self.enter(ExportPhase::Done);
        self.hosts.notifier.status(MSG_FALLBACK);
        info!(file = %artifact.file_name, "native share unavailable, downloaded with deep link");
        ExportOutcome::SharedViaFallback {
            file_name: artifact.file_name,
            link,
        }
    }

    /// Open `link` after the configured delay without waiting for it.
    fn open_link_later(&self, link: Url) {
        let delivery = Arc::clone(&self.hosts.delivery);
        let delay = self.settings.fallback_link_delay();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    delivery.open_link(&link);
                });
            }
            Err(_) => {
                debug!("no async runtime, opening deep link immediately");
                delivery.open_link(&link);
            }
        }
    }

    /// Claim the job slot, or reject the request.
    fn begin(&self, request: ExportRequest) -> Result<InFlight<'_>, ExportError> {
        self.lock().check_idle(request)?;

        // Host code runs without the job lock held.
        if !self.hosts.renderer.is_ready() {
            warn!(?request, "export rejected, renderer not ready");
            self.hosts.notifier.alert(MSG_NOT_READY);
            return Err(ExportError::NotReady);
        }

        let mut job = self.lock();
        job.check_idle(request)?;
        job.journal.clear();
        job.enter(ExportPhase::Rendering);
        Ok(InFlight { job: &self.job })
    }

    fn enter(&self, phase: ExportPhase) {
        self.lock().enter(phase);
    }

    fn lock(&self) -> MutexGuard<'_, Job> {
        lock_job(&self.job)
    }
}

fn lock_job(job: &Mutex<Job>) -> MutexGuard<'_, Job> {
    job.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the job slot; returns it to `Idle` when dropped.
struct InFlight<'a> {
    job: &'a Mutex<Job>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock_job(self.job).enter(ExportPhase::Idle);
    }
}
