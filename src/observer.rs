// Upload lifecycle reporting
// --------------------------
// The dispatcher does not log on its own. It reports what happens to an
// `UploadObserver` handed in by the caller, at four points: the start of a
// run, each artifact, and the final summary. `TracingObserver` turns those
// events into `tracing` records; `NoopObserver` discards them.

use crate::ledger::FailedArtifact;
use crate::nexus::base_name;
use crate::session::{Artifact, UploadSession};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    /// Every artifact in the run, including those rejected during
    /// validation; always `successful + failed`.
    pub total: usize,
    pub successful: usize,
    /// Ledger size.
    pub failed: usize,
}

/// Receives lifecycle events from the dispatcher. Every method has an
/// empty default so implementations only override what they need.
pub trait UploadObserver {
    fn on_start(&self, _session: &UploadSession) {}

    /// An artifact's file was opened and is about to be sent.
    /// `index` is zero-based; `size` is in bytes when known.
    fn on_artifact_start(&self, _index: usize, _total: usize, _artifact: &Artifact, _size: Option<u64>) {}

    /// The server accepted the artifact. `response` is its body text.
    fn on_artifact_uploaded(&self, _artifact: &Artifact, _response: &str) {}

    fn on_artifact_failed(&self, _artifact: &Artifact, _failure: &FailedArtifact) {}

    fn on_summary(&self, _summary: &UploadSummary) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl UploadObserver for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl UploadObserver for TracingObserver {
    fn on_start(&self, session: &UploadSession) {
        tracing::info!(
            nexus_version = %session.version,
            server_url = %session.server_url,
            repository = %session.repository,
            format = %session.format,
            total = session.artifacts.len(),
            "upload configuration"
        );
    }

    fn on_artifact_start(&self, index: usize, total: usize, artifact: &Artifact, size: Option<u64>) {
        let size_mb = size.map(|bytes| format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0)));
        tracing::info!(
            file = %artifact.file,
            size = size_mb.as_deref().unwrap_or("unknown"),
            artifact_id = %artifact.artifact_id,
            group_id = %artifact.group_id,
            version = %artifact.version,
            kind = %artifact.kind,
            classifier = artifact.classifier.as_deref().unwrap_or(""),
            "uploading artifact {}/{}",
            index + 1,
            total
        );
    }

    fn on_artifact_uploaded(&self, artifact: &Artifact, response: &str) {
        if !response.is_empty() {
            tracing::debug!(response, "upload response");
        }
        tracing::info!(
            "[OK] Successfully uploaded: {} -> {}",
            base_name(&artifact.file),
            artifact.coordinates()
        );
    }

    fn on_artifact_failed(&self, _artifact: &Artifact, failure: &FailedArtifact) {
        tracing::error!(
            file = %failure.file,
            artifact_id = %failure.artifact_id,
            "{}",
            failure.err
        );
    }

    fn on_summary(&self, summary: &UploadSummary) {
        tracing::info!(
            "Upload summary: Total: {}, Successful: {}, Failed: {}",
            summary.total,
            summary.successful,
            summary.failed
        );
    }
}
