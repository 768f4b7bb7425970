// End-to-end runs of settings validation and dispatch against a scripted
// transport.

use std::cell::RefCell;
use std::fs;
use std::io::Read;

use nexus_publish::api::{FormPart, HttpReply, RequestBody, Transport, TransportError, UploadRequest};
use nexus_publish::args::PluginInput;
use nexus_publish::observer::NoopObserver;
use nexus_publish::{dispatch, prepare, Prepared, UploadError};
use tempfile::TempDir;

/// Answers every request with the next scripted status and remembers
/// `(method url, asset file name or body)`.
struct ScriptedTransport {
    statuses: RefCell<Vec<u16>>,
    seen: RefCell<Vec<(String, String)>>,
}

impl ScriptedTransport {
    fn new(mut statuses: Vec<u16>) -> Self {
        statuses.reverse();
        Self {
            statuses: RefCell::new(statuses),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: UploadRequest<'_>) -> Result<HttpReply, TransportError> {
        let payload = match request.body {
            RequestBody::Octets(mut file) => {
                let mut content = String::new();
                file.read_to_string(&mut content).unwrap();
                content
            }
            RequestBody::Multipart(parts) => parts
                .into_iter()
                .find_map(|part| match part {
                    FormPart::File { file_name, .. } => Some(file_name),
                    FormPart::Text { .. } => None,
                })
                .unwrap_or_default(),
        };
        self.seen
            .borrow_mut()
            .push((format!("{} {}", request.method, request.url), payload));
        let status = self.statuses.borrow_mut().pop().unwrap_or(200);
        Ok(HttpReply {
            status,
            body: if status >= 400 {
                "rejected by test server".into()
            } else {
                String::new()
            },
        })
    }
}

fn workspace(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        fs::write(dir.path().join(name), format!("contents of {}", name)).unwrap();
    }
    dir
}

fn multi_input(dir: &TempDir, artifacts: &str) -> PluginInput {
    PluginInput {
        username: "deployer".into(),
        password: "secret".into(),
        protocol: "https".into(),
        server_url: "nexus.example.com///".into(),
        nexus_version: "nexus3".into(),
        repository: "releases".into(),
        group_id: "com.acme".into(),
        format: "maven2".into(),
        artifacts: artifacts.replace("$DIR", &dir.path().to_string_lossy()),
        ..Default::default()
    }
}

#[test]
fn multi_file_batch_reports_each_failure() {
    let dir = workspace(&["core.jar", "cli.jar"]);
    let input = multi_input(
        &dir,
        r#"[
            {"file": "$DIR/core.jar", "artifactId": "core", "type": "jar", "version": "1.2.0"},
            {"file": "$DIR/cli.jar", "artifactId": "cli", "type": "jar", "version": "1.2.0"},
            {"file": "$DIR/docs.zip", "artifactId": "docs", "type": "zip", "version": "1.2.0"},
            {"file": "$DIR/untyped.bin", "artifactId": "untyped", "version": "1.2.0"}
        ]"#,
    );

    let Prepared {
        session,
        mut ledger,
    } = prepare(&input).unwrap();
    assert_eq!(session.server_url, "https://nexus.example.com");
    assert_eq!(session.artifacts.len(), 3);

    let transport = ScriptedTransport::new(vec![201, 403]);
    let result = dispatch(&session, &mut ledger, &transport, &NoopObserver);

    assert!(matches!(result, Err(UploadError::SomeArtifactsFailed)));
    let seen = transport.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[0].0,
        "POST https://nexus.example.com/service/rest/v1/components?repository=releases"
    );
    assert_eq!(seen[0].1, "core.jar");
    assert_eq!(seen[1].1, "cli.jar");

    let failures: Vec<_> = ledger
        .entries()
        .iter()
        .map(|f| (f.artifact_id.as_str(), f.err.as_str()))
        .collect();
    assert_eq!(failures[0], ("untyped", "Missing fields: Type"));
    assert_eq!(
        failures[1],
        ("cli", "upload failed: Upload failed with status 403: rejected by test server")
    );
    assert_eq!(failures[2].0, "docs");
    assert!(failures[2].1.starts_with("could not open file: "));
}

#[test]
fn only_invalid_artifacts_means_no_requests_and_failure() {
    let dir = workspace(&[]);
    let input = multi_input(
        &dir,
        r#"[{"file": "$DIR/a.jar", "artifactId": "a", "version": "1"}]"#,
    );

    let Prepared {
        session,
        mut ledger,
    } = prepare(&input).unwrap();
    let transport = ScriptedTransport::new(Vec::new());
    let result = dispatch(&session, &mut ledger, &transport, &NoopObserver);

    assert!(result.is_err());
    assert!(transport.seen.borrow().is_empty());
    assert!(ledger.entries()[0].err.contains("Type"));
}

#[test]
fn nexus2_batch_puts_file_contents() {
    let dir = workspace(&["app.tar.gz"]);
    let input = PluginInput {
        nexus_version: "nexus2".into(),
        format: "raw".into(),
        ..multi_input(
            &dir,
            r#"[{"file": "$DIR/app.tar.gz", "artifactId": "app", "type": "tar.gz", "version": "3"}]"#,
        )
    };

    let Prepared {
        session,
        mut ledger,
    } = prepare(&input).unwrap();
    let transport = ScriptedTransport::new(vec![201]);
    dispatch(&session, &mut ledger, &transport, &NoopObserver).unwrap();

    let seen = transport.seen.borrow();
    assert_eq!(
        seen[0],
        (
            "PUT https://nexus.example.com/repository/releases/com.acme/app.tar.gz".to_string(),
            "contents of app.tar.gz".to_string()
        )
    );
}

#[test]
fn legacy_single_file_upload() {
    let dir = workspace(&["service.war"]);
    let input = PluginInput {
        username: "deployer".into(),
        password: "secret".into(),
        server_url: "https://nexus.example.com/".into(),
        filename: dir.path().join("service.war").to_string_lossy().into_owned(),
        format: "maven2".into(),
        repository: "releases".into(),
        attributes: "-CgroupId=com.acme -CartifactId=service -Cversion=2.0 -Aextension=war -Aclassifier=prod".into(),
        ..Default::default()
    };

    let Prepared {
        session,
        mut ledger,
    } = prepare(&input).unwrap();
    let transport = ScriptedTransport::new(vec![204]);
    dispatch(&session, &mut ledger, &transport, &NoopObserver).unwrap();

    assert!(ledger.is_empty());
    let seen = transport.seen.borrow();
    assert_eq!(
        seen[0].0,
        "POST https://nexus.example.com/service/rest/v1/components?repository=releases"
    );
    assert_eq!(seen[0].1, "service.war");
}
