// UI layer: shows upload progress in the terminal.
// The bar is attached to a tracing span, so it is drawn by the
// `tracing-indicatif` layer installed in `cli::logging` and stays out of
// the way of regular log lines. Without that layer it is simply invisible.

use std::cell::RefCell;

use tracing::span::EnteredSpan;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_indicatif::style::ProgressStyle;

use crate::ledger::FailedArtifact;
use crate::nexus::base_name;
use crate::observer::{UploadObserver, UploadSummary};
use crate::session::{Artifact, UploadSession};

/// Wraps another observer and advances a progress bar as artifacts finish.
pub struct ProgressObserver<O> {
    inner: O,
    // Entered on start, exited (and the bar cleared) on summary.
    span: RefCell<Option<EnteredSpan>>,
}

impl<O: UploadObserver> ProgressObserver<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            span: RefCell::new(None),
        }
    }

    fn with_span(&self, f: impl FnOnce(&tracing::Span)) {
        if let Some(span) = self.span.borrow().as_ref() {
            f(span);
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} [{bar:30.green/black}] {pos}/{len} {wide_msg}")
        .unwrap_or(ProgressStyle::default_bar())
        .progress_chars("█▒ ")
}

impl<O: UploadObserver> UploadObserver for ProgressObserver<O> {
    fn on_start(&self, session: &UploadSession) {
        self.inner.on_start(session);

        let span = tracing::info_span!("upload", repository = %session.repository);
        span.pb_set_style(&bar_style());
        span.pb_set_length(session.artifacts.len() as u64);
        span.pb_set_message("uploading");
        *self.span.borrow_mut() = Some(span.entered());
    }

    fn on_artifact_start(&self, index: usize, total: usize, artifact: &Artifact, size: Option<u64>) {
        self.inner.on_artifact_start(index, total, artifact, size);
        self.with_span(|span| span.pb_set_message(base_name(&artifact.file)));
    }

    fn on_artifact_uploaded(&self, artifact: &Artifact, response: &str) {
        self.inner.on_artifact_uploaded(artifact, response);
        self.with_span(|span| span.pb_inc(1));
    }

    fn on_artifact_failed(&self, artifact: &Artifact, failure: &FailedArtifact) {
        self.inner.on_artifact_failed(artifact, failure);
        self.with_span(|span| span.pb_inc(1));
    }

    fn on_summary(&self, summary: &UploadSummary) {
        self.span.borrow_mut().take();
        self.inner.on_summary(summary);
    }
}
