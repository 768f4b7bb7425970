// Input validation
// ----------------
// Turns the raw plugin settings into an `UploadSession`. Each input mode
// has its own validator:
// - `multi_file` reads a YAML (or JSON) list of artifacts. Artifacts missing
//   coordinates are rejected into the ledger without failing the run.
// - `single_file` reads the legacy `-C<key>=<value>` attribute string and
//   produces exactly one artifact, or fails the run.
//
// `prepare` picks the validator based on `mode::resolve`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::api::Credentials;
use crate::args::PluginInput;
use crate::error::ConfigError;
use crate::ledger::Ledger;
use crate::mode::{self, Mode};
use crate::session::{trim_trailing_slashes, Artifact, Format, NexusVersion, UploadSession};

/// A validated session plus any artifacts rejected on the way.
#[derive(Debug)]
pub struct Prepared {
    pub session: UploadSession,
    pub ledger: Ledger,
}

/// Resolve the input mode and run the matching validator.
pub fn prepare(input: &PluginInput) -> Result<Prepared, ConfigError> {
    match mode::resolve(input)? {
        Mode::Multi => multi_file(input),
        Mode::Single => single_file(input),
    }
}

/// Fail with the name of the first empty field.
fn require(fields: &[(&'static str, &str)]) -> Result<(), ConfigError> {
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(ConfigError::MissingField(*name)),
        None => Ok(()),
    }
}

//================================================================================================
// Multi-file mode
//================================================================================================

/// One entry of the `artifacts` setting as written in the pipeline.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ArtifactRecord {
    #[serde(deserialize_with = "scalar")]
    file: String,
    #[serde(deserialize_with = "scalar")]
    classifier: String,
    #[serde(rename = "artifactId", deserialize_with = "scalar")]
    artifact_id: String,
    #[serde(rename = "type", deserialize_with = "scalar")]
    kind: String,
    #[serde(deserialize_with = "scalar")]
    version: String,
    #[serde(rename = "groupId", deserialize_with = "scalar")]
    group_id: String,
}

/// Take any scalar as the text written in the pipeline, so `version: 1.10`
/// stays `1.10`. `null` reads as an empty value.
fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ArtifactRecord {
    /// Names of the required coordinates this record lacks.
    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("ArtifactId", &self.artifact_id),
            ("File", &self.file),
            ("Type", &self.kind),
            ("Version", &self.version),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    fn into_artifact(self, default_group: &str) -> Artifact {
        Artifact {
            file: self.file,
            artifact_id: self.artifact_id,
            group_id: if self.group_id.is_empty() {
                default_group.to_string()
            } else {
                self.group_id
            },
            version: self.version,
            kind: self.kind,
            classifier: (!self.classifier.is_empty()).then_some(self.classifier),
        }
    }
}

/// Validate the declarative multi-file input.
pub fn multi_file(input: &PluginInput) -> Result<Prepared, ConfigError> {
    require(&[
        ("username", input.username.as_str()),
        ("password", input.password.as_str()),
        ("protocol", input.protocol.as_str()),
        ("nexusUrl", input.server_url.as_str()),
        ("nexusVersion", input.nexus_version.as_str()),
        ("repository", input.repository.as_str()),
        ("groupId", input.group_id.as_str()),
        ("format", input.format.as_str()),
    ])?;

    let version: NexusVersion = input.nexus_version.parse()?;
    let server_url = format!(
        "{}://{}",
        input.protocol,
        trim_trailing_slashes(&input.server_url)
    );

    let records: Vec<ArtifactRecord> = serde_yaml::from_str(&input.artifacts)?;

    let mut ledger = Ledger::new();
    let mut artifacts = Vec::with_capacity(records.len());
    for record in records {
        let missing = record.missing_fields();
        let artifact = record.into_artifact(&input.group_id);
        if missing.is_empty() {
            artifacts.push(artifact);
        } else {
            ledger.record(&artifact, format!("Missing fields: {}", missing.join(", ")));
        }
    }

    Ok(Prepared {
        session: UploadSession {
            credentials: Credentials::new(&input.username, &input.password),
            server_url,
            version,
            format: Format::from(input.format.as_str()),
            repository: input.repository.clone(),
            group_id: input.group_id.clone(),
            artifacts,
        },
        ledger,
    })
}

//================================================================================================
// Single-file mode
//================================================================================================

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-(CgroupId|CartifactId|Cversion|Aextension|Aclassifier)=(\S+)")
        .expect("attribute pattern is a valid regex")
});

/// Coordinates parsed from the legacy attribute string.
#[derive(Debug, Default, PartialEq, Eq)]
struct Attributes {
    group_id: String,
    artifact_id: String,
    version: String,
    extension: String,
    classifier: String,
}

impl Attributes {
    /// Recognised tokens only; later occurrences of a key win.
    fn parse(raw: &str) -> Self {
        let mut attrs = Attributes::default();
        for caps in ATTRIBUTE.captures_iter(raw) {
            let value = caps[2].to_string();
            match &caps[1] {
                "CgroupId" => attrs.group_id = value,
                "CartifactId" => attrs.artifact_id = value,
                "Cversion" => attrs.version = value,
                "Aextension" => attrs.extension = value,
                "Aclassifier" => attrs.classifier = value,
                _ => {}
            }
        }
        attrs
    }
}

/// Validate the legacy single-file input.
///
/// `CartifactId` is read but not required; an artifact without one is
/// still accepted here.
pub fn single_file(input: &PluginInput) -> Result<Prepared, ConfigError> {
    require(&[
        ("Username", input.username.as_str()),
        ("Password", input.password.as_str()),
        ("ServerUrl", input.server_url.as_str()),
        ("Filename", input.filename.as_str()),
        ("Format", input.format.as_str()),
        ("Repository", input.repository.as_str()),
    ])?;

    let attrs = Attributes::parse(&input.attributes);
    require(&[
        ("CgroupId", attrs.group_id.as_str()),
        ("Cversion", attrs.version.as_str()),
        ("Aextension", attrs.extension.as_str()),
        ("Aclassifier", attrs.classifier.as_str()),
    ])?;

    let artifact = Artifact {
        file: input.filename.clone(),
        artifact_id: attrs.artifact_id,
        group_id: attrs.group_id.clone(),
        version: attrs.version,
        kind: attrs.extension,
        classifier: Some(attrs.classifier),
    };

    Ok(Prepared {
        session: UploadSession {
            credentials: Credentials::new(&input.username, &input.password),
            server_url: trim_trailing_slashes(&input.server_url).to_string(),
            version: NexusVersion::Nexus3,
            format: Format::from(input.format.as_str()),
            repository: input.repository.clone(),
            group_id: attrs.group_id,
            artifacts: vec![artifact],
        },
        ledger: Ledger::new(),
    })
}
