// HTTP transport
// --------------
// The uploaders in `nexus` describe *what* to send as an `UploadRequest`;
// a `Transport` sends it and hands back the status and body text. The
// production transport is a small wrapper around reqwest's blocking
// client. Tests swap in a recording transport so request shape can be
// asserted without a server.

use std::fmt;
use std::fs::File;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, ClientBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use thiserror::Error;
use tracing::{debug, trace};

/// Basic-auth credentials for the Nexus server.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One part of a multipart form.
#[derive(Debug)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        /// Name reported to the server; never a full path.
        file_name: String,
        file: File,
    },
}

/// Payload of an upload request. Both variants own the open file handle,
/// so the file is closed as soon as the request is dropped.
#[derive(Debug)]
pub enum RequestBody {
    /// Raw bytes sent as `application/octet-stream`.
    Octets(File),
    /// `multipart/form-data`; the boundary is chosen by the transport.
    Multipart(Vec<FormPart>),
}

/// Everything needed to perform one upload.
#[derive(Debug)]
pub struct UploadRequest<'a> {
    pub method: Method,
    pub url: String,
    pub credentials: &'a Credentials,
    pub body: RequestBody,
}

/// Status and full body text of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// The request could not be built or did not produce a response.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid multipart part: {0}")]
    Form(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Sends upload requests.
pub trait Transport {
    fn send(&self, request: UploadRequest<'_>) -> Result<HttpReply, TransportError>;
}

/// Blocking reqwest client used against real servers.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client. `None` means requests never time out, however long
    /// an upload takes.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        Self::from_builder(Client::builder(), timeout)
    }

    fn from_builder(builder: ClientBuilder, timeout: Option<Duration>) -> Result<Self, TransportError> {
        // The blocking client otherwise applies a 30s total timeout.
        let client = builder
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client })
    }
}

fn into_form(parts: Vec<FormPart>) -> Result<multipart::Form, TransportError> {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                file_name,
                file,
            } => {
                let part = multipart::Part::reader(file)
                    .file_name(file_name)
                    .mime_str("application/octet-stream")
                    .map_err(TransportError::Form)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

impl Transport for ReqwestTransport {
    fn send(&self, request: UploadRequest<'_>) -> Result<HttpReply, TransportError> {
        let UploadRequest {
            method,
            url,
            credentials,
            body,
        } = request;
        debug!(%method, url = %url, "sending upload request");

        let builder = self
            .client
            .request(method, &url)
            .basic_auth(&credentials.username, Some(&credentials.password));
        let builder = match body {
            RequestBody::Octets(file) => builder
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(file),
            RequestBody::Multipart(parts) => builder.multipart(into_form(parts)?),
        };

        let res = builder.send().map_err(TransportError::Request)?;
        let status = res.status().as_u16();
        // The body carries Nexus' explanation on failure; an unreadable
        // body is treated as empty rather than masking the status.
        let body = res.text().unwrap_or_else(|_| "".into());
        trace!(status, bytes = body.len(), "upload response received");
        Ok(HttpReply { status, body })
    }
}
