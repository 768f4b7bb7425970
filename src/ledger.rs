// Failure ledger
// --------------
// Per-artifact failures for a single run. Entries are only ever appended;
// an empty ledger at the end of a run is the definition of success.

use serde::Serialize;

use crate::session::Artifact;

/// One artifact that was rejected or failed to upload.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FailedArtifact {
    pub file: String,
    #[serde(rename = "artifactId")]
    pub artifact_id: String,
    pub err: String,
}

/// Value written to the `UPLOAD_STATUS` output variable.
#[derive(Debug, PartialEq, Eq)]
pub enum UploadStatus<'a> {
    Success,
    Failed(&'a [FailedArtifact]),
}

impl UploadStatus<'_> {
    /// `Success`, or the failed artifacts as a JSON array.
    pub fn render(&self) -> serde_json::Result<String> {
        match self {
            UploadStatus::Success => Ok("Success".to_string()),
            UploadStatus::Failed(failed) => serde_json::to_string(failed),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Ledger {
    failed: Vec<FailedArtifact>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `artifact` and return the stored entry.
    pub fn record(&mut self, artifact: &Artifact, err: impl Into<String>) -> &FailedArtifact {
        let index = self.failed.len();
        self.failed.push(FailedArtifact {
            file: artifact.file.clone(),
            artifact_id: artifact.artifact_id.clone(),
            err: err.into(),
        });
        &self.failed[index]
    }

    pub fn is_empty(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failed.len()
    }

    pub fn entries(&self) -> &[FailedArtifact] {
        &self.failed
    }

    pub fn status(&self) -> UploadStatus<'_> {
        if self.failed.is_empty() {
            UploadStatus::Success
        } else {
            UploadStatus::Failed(&self.failed)
        }
    }
}
