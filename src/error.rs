// Error types
// -----------
// Two classes of failure exist in an upload run:
// - `ConfigError`: the input is missing, malformed or ambiguous. These are
//   fatal and always surface before any network call is made.
// - `ArtifactError`: one artifact could not be opened or uploaded. These
//   are recovered per artifact and end up in the failure ledger.
//
// `UploadError` is what a whole run returns to its caller.

use thiserror::Error;

use crate::api::TransportError;

/// Fatal input problems detected before dispatch starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither the artifact list nor the legacy attributes were given.
    #[error("both 'Attributes' and 'Artifact' cannot be empty")]
    NoArtifacts,
    /// Both input modes were given at once.
    #[error("both 'Attributes' and 'Artifact' provided, which is ambiguous")]
    AmbiguousMode,
    /// A required input field was empty.
    #[error("{0} cannot be empty")]
    MissingField(&'static str),
    /// The nexus version is not one this plugin knows how to talk to.
    #[error("unsupported nexus version '{0}', expected 'nexus2' or 'nexus3'")]
    UnknownNexusVersion(String),
    /// The structured artifact list could not be decoded.
    #[error("error decoding artifact list: {0}")]
    ArtifactList(#[from] serde_yaml::Error),
}

/// A single artifact failed; the rest of the batch carries on.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The artifact's file could not be opened.
    #[error("could not open file: {0}")]
    Open(#[source] std::io::Error),
    /// The repository format has no direct-upload path layout.
    #[error("unsupported format for direct upload: {0}")]
    UnsupportedFormat(String),
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with an error status.
    #[error("Upload failed with status {status}{}", body_suffix(.body))]
    Status {
        /// HTTP status code returned by Nexus.
        status: u16,
        /// Raw response body, verbatim; empty when the server sent none.
        body: String,
    },
}

impl ArtifactError {
    /// The message recorded in the ledger for this failure.
    ///
    /// Open failures already read as a cause; everything else happened
    /// while talking to the server.
    pub fn ledger_message(&self) -> String {
        match self {
            ArtifactError::Open(_) => self.to_string(),
            _ => format!("upload failed: {}", self),
        }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

/// Outcome of a whole upload run.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The run never started.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// At least one artifact ended up in the ledger.
    #[error("some artifacts failed to upload")]
    SomeArtifactsFailed,
}
