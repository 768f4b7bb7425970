// Upload dispatch
// ---------------
// Walks the session's artifacts strictly in order. For each one the file
// is opened, handed to the uploader for the session's Nexus version, and
// closed again before the next artifact starts: the `File` is moved into
// the request and dropped with it. A failing artifact is written to the
// ledger and never stops the rest of the batch.

use std::fs::File;

use crate::api::Transport;
use crate::error::{ArtifactError, UploadError};
use crate::ledger::Ledger;
use crate::nexus::{upload_nexus2, upload_nexus3};
use crate::observer::{UploadObserver, UploadSummary};
use crate::session::{Artifact, NexusVersion, UploadSession};

/// Upload every artifact in `session`, recording failures in `ledger`.
///
/// `ledger` may already hold entries from validation; they count as
/// failures of this run. Returns `SomeArtifactsFailed` iff the ledger is
/// non-empty once all artifacts have been processed.
pub fn dispatch<T, O>(
    session: &UploadSession,
    ledger: &mut Ledger,
    transport: &T,
    observer: &O,
) -> Result<(), UploadError>
where
    T: Transport + ?Sized,
    O: UploadObserver + ?Sized,
{
    observer.on_start(session);

    let total = session.artifacts.len();
    let mut successful = 0;
    for (index, artifact) in session.artifacts.iter().enumerate() {
        match upload_one(session, artifact, index, transport, observer) {
            Ok(response) => {
                successful += 1;
                observer.on_artifact_uploaded(artifact, &response);
            }
            Err(err) => {
                let failure = ledger.record(artifact, err.ledger_message());
                observer.on_artifact_failed(artifact, failure);
            }
        }
    }

    observer.on_summary(&UploadSummary {
        total: successful + ledger.len(),
        successful,
        failed: ledger.len(),
    });

    if ledger.is_empty() {
        Ok(())
    } else {
        Err(UploadError::SomeArtifactsFailed)
    }
}

fn upload_one<T, O>(
    session: &UploadSession,
    artifact: &Artifact,
    index: usize,
    transport: &T,
    observer: &O,
) -> Result<String, ArtifactError>
where
    T: Transport + ?Sized,
    O: UploadObserver + ?Sized,
{
    let file = File::open(&artifact.file).map_err(ArtifactError::Open)?;
    let size = file.metadata().ok().map(|meta| meta.len());
    observer.on_artifact_start(index, session.artifacts.len(), artifact, size);

    match session.version {
        NexusVersion::Nexus2 => upload_nexus2(transport, session, artifact, file),
        NexusVersion::Nexus3 => upload_nexus3(transport, session, artifact, file),
    }
}
