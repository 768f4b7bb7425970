// Session model
// -------------
// The normalized shape every input mode is reduced to. A validator builds
// one `UploadSession` per run; the dispatcher only ever reads it.

use std::fmt;
use std::str::FromStr;

use crate::api::Credentials;
use crate::error::ConfigError;

/// One file plus the repository coordinates it is stored under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    pub file: String,
    pub artifact_id: String,
    pub group_id: String,
    pub version: String,
    /// File type, used as the extension in repository paths.
    pub kind: String,
    pub classifier: Option<String>,
}

impl Artifact {
    /// `group:artifact:version`, or `artifact:version` without a group.
    pub fn coordinates(&self) -> String {
        if self.group_id.is_empty() {
            format!("{}:{}", self.artifact_id, self.version)
        } else {
            format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
        }
    }
}

/// Which Nexus wire protocol to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NexusVersion {
    /// Direct PUT of the file to its repository path.
    Nexus2,
    /// Multipart POST to the components REST endpoint.
    Nexus3,
}

impl FromStr for NexusVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nexus2" | "2" => Ok(NexusVersion::Nexus2),
            "nexus3" | "3" => Ok(NexusVersion::Nexus3),
            _ => Err(ConfigError::UnknownNexusVersion(s.to_string())),
        }
    }
}

impl fmt::Display for NexusVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NexusVersion::Nexus2 => f.write_str("nexus2"),
            NexusVersion::Nexus3 => f.write_str("nexus3"),
        }
    }
}

/// Repository format. Only a few have a known layout; anything else is
/// passed through by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    Maven2,
    Raw,
    Yum,
    Other(String),
}

impl From<&str> for Format {
    fn from(s: &str) -> Self {
        match s {
            "maven2" => Format::Maven2,
            "raw" => Format::Raw,
            "yum" => Format::Yum,
            other => Format::Other(other.to_string()),
        }
    }
}

impl Format {
    pub fn as_str(&self) -> &str {
        match self {
            Format::Maven2 => "maven2",
            Format::Raw => "raw",
            Format::Yum => "yum",
            Format::Other(name) => name,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one run needs to talk to Nexus.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub credentials: Credentials,
    /// Absolute base URL without trailing slashes.
    pub server_url: String,
    pub version: NexusVersion,
    pub format: Format,
    pub repository: String,
    pub group_id: String,
    pub artifacts: Vec<Artifact>,
}

/// Remove every trailing `/` from a server URL.
pub fn trim_trailing_slashes(url: &str) -> &str {
    url.trim_end_matches('/')
}
