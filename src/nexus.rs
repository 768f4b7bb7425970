// Nexus protocol uploaders
// ------------------------
// Nexus 2 and Nexus 3 accept uploads in incompatible ways:
// - Nexus 2: the file is PUT directly at its repository path, which
//   depends on the repository format.
// - Nexus 3: the file and its coordinates are POSTed as a multipart form
//   to the components REST endpoint.
//
// Both read the full response body so a rejected upload reports what the
// server said, not just the status code.

use std::fs::File;

use reqwest::Method;

use crate::api::{FormPart, HttpReply, RequestBody, Transport, UploadRequest};
use crate::error::ArtifactError;
use crate::session::{Artifact, Format, UploadSession};

/// Successful upload; carries the server's response body for logging.
pub type Uploaded = String;

/// Repository path for a direct (Nexus 2) upload, if the format has one.
pub fn nexus2_url(session: &UploadSession, artifact: &Artifact) -> Option<String> {
    let base = format!("{}/repository/{}", session.server_url, session.repository);
    match session.format {
        Format::Maven2 => Some(format!(
            "{base}/{group}/{id}/{version}/{id}-{version}.{ext}",
            group = artifact.group_id,
            id = artifact.artifact_id,
            version = artifact.version,
            ext = artifact.kind,
        )),
        Format::Yum => Some(format!(
            "{base}/{}/{}",
            artifact.artifact_id, artifact.version
        )),
        Format::Raw => Some(format!(
            "{base}/{}/{}.{}",
            artifact.group_id, artifact.artifact_id, artifact.kind
        )),
        Format::Other(_) => None,
    }
}

/// PUT the file at its repository path.
pub fn upload_nexus2<T: Transport + ?Sized>(
    transport: &T,
    session: &UploadSession,
    artifact: &Artifact,
    file: File,
) -> Result<Uploaded, ArtifactError> {
    let url = nexus2_url(session, artifact)
        .ok_or_else(|| ArtifactError::UnsupportedFormat(session.format.to_string()))?;
    let reply = transport.send(UploadRequest {
        method: Method::PUT,
        url,
        credentials: &session.credentials,
        body: RequestBody::Octets(file),
    })?;
    interpret(reply)
}

/// The components endpoint for the session's repository.
pub fn nexus3_url(session: &UploadSession) -> String {
    format!(
        "{}/service/rest/v1/components?repository={}",
        session.server_url, session.repository
    )
}

/// Final path component, whichever separator the path was written with.
pub fn base_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(path)
}

/// Multipart parts for a Nexus 3 component upload.
pub fn nexus3_form(format: &Format, artifact: &Artifact, file: File) -> Vec<FormPart> {
    let text = |name: &str, value: &str| FormPart::Text {
        name: name.to_string(),
        value: value.to_string(),
    };

    let (mut parts, asset_field) = match format {
        Format::Maven2 => (
            vec![
                text("maven2.groupId", &artifact.group_id),
                text("maven2.artifactId", &artifact.artifact_id),
                text("maven2.version", &artifact.version),
                text("maven2.asset1.extension", &artifact.kind),
            ],
            "maven2.asset1".to_string(),
        ),
        Format::Raw => (
            vec![
                text("raw.directory", &artifact.group_id),
                text(
                    "raw.asset1.filename",
                    &format!("{}.{}", artifact.artifact_id, artifact.kind),
                ),
            ],
            "raw.asset1".to_string(),
        ),
        other => (Vec::new(), format!("{}.asset", other)),
    };

    parts.push(FormPart::File {
        name: asset_field,
        file_name: base_name(&artifact.file).to_string(),
        file,
    });
    parts
}

/// POST the file and its coordinates as a multipart form.
pub fn upload_nexus3<T: Transport + ?Sized>(
    transport: &T,
    session: &UploadSession,
    artifact: &Artifact,
    file: File,
) -> Result<Uploaded, ArtifactError> {
    let reply = transport.send(UploadRequest {
        method: Method::POST,
        url: nexus3_url(session),
        credentials: &session.credentials,
        body: RequestBody::Multipart(nexus3_form(&session.format, artifact, file)),
    })?;
    interpret(reply)
}

/// Anything below 400 is a success, whatever the body says.
fn interpret(reply: HttpReply) -> Result<Uploaded, ArtifactError> {
    if reply.status >= 400 {
        return Err(ArtifactError::Status {
            status: reply.status,
            body: reply.body,
        });
    }
    Ok(reply.body)
}
