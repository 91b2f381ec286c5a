use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use jarship_core::coordinates::ProjectCoordinates;
use jarship_core::publication::PublishedArtifact;
use jarship_maven::download::build_client;
use jarship_maven::publish::RemotePublisher;
use jarship_maven::repository::MavenRepository;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn artifact(dir: &Path, name: &str, classifier: Option<&str>, extension: &str) -> PublishedArtifact {
    let path: PathBuf = dir.join(name);
    std::fs::write(&path, name.as_bytes()).unwrap();
    PublishedArtifact {
        path,
        classifier: classifier.map(str::to_string),
        extension: extension.to_string(),
    }
}

#[tokio::test]
async fn release_uploads_files_and_sidecars() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let files = vec![
        artifact(tmp.path(), "a.jar", None, "jar"),
        artifact(tmp.path(), "a-doc.jar", Some("doc"), "jar"),
        artifact(tmp.path(), "a.pom", None, "pom"),
    ];
    let coords = ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", "1.0.0");
    let repo = MavenRepository::new("staging", &format!("{}/deploy", server.uri()), None);
    let client = build_client().unwrap();

    let report = RemotePublisher::new(&client, &repo, &coords)
        .deploy_release(&files)
        .await
        .unwrap();

    assert_eq!(report.uploaded.len(), 3);
    assert!(report.uploaded[1].ends_with("/deploy/tokyo/northside/saxon-6-5-5/1.0.0/saxon-6-5-5-1.0.0-doc.jar"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3 * 5);
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    for ext in ["md5", "sha1", "sha256", "sha512"] {
        let sidecar = format!("/deploy/tokyo/northside/saxon-6-5-5/1.0.0/saxon-6-5-5-1.0.0.pom.{ext}");
        assert!(paths.contains(&sidecar), "missing {sidecar}");
    }
    let sha1 = requests
        .iter()
        .find(|r| r.url.path().ends_with("saxon-6-5-5-1.0.0.jar.sha1"))
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&sha1.body),
        jarship_util::hash::sha1_bytes(b"a.jar")
    );
}

#[tokio::test]
async fn rejected_upload_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Repository does not allow updating assets"))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let files = vec![artifact(tmp.path(), "a.jar", None, "jar")];
    let coords = ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", "1.0.0");
    let repo = MavenRepository::new("staging", &server.uri(), None);
    let client = build_client().unwrap();

    let err = RemotePublisher::new(&client, &repo, &coords)
        .deploy_release(&files)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("400"));
}

#[tokio::test]
async fn snapshot_uses_next_build_number() {
    let server = MockServer::start().await;
    let existing = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>tokyo.northside</groupId>
  <artifactId>saxon-6-5-5</artifactId>
  <version>1.0.1-SNAPSHOT</version>
  <versioning>
    <snapshot><timestamp>20240101.000000</timestamp><buildNumber>3</buildNumber></snapshot>
    <lastUpdated>20240101000000</lastUpdated>
  </versioning>
</metadata>"#;
    Mock::given(method("GET"))
        .and(path("/snapshots/tokyo/northside/saxon-6-5-5/1.0.1-SNAPSHOT/maven-metadata.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(existing))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let files = vec![
        artifact(tmp.path(), "a.jar", None, "jar"),
        artifact(tmp.path(), "a-sources.jar", Some("sources"), "jar"),
    ];
    let coords = ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", "1.0.1-SNAPSHOT");
    let repo = MavenRepository::new("snapshots", &format!("{}/snapshots/", server.uri()), None);
    let client = build_client().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 22).unwrap();

    let report = RemotePublisher::new(&client, &repo, &coords)
        .deploy_snapshot(&files, now)
        .await
        .unwrap();

    let snapshot = report.snapshot.unwrap();
    assert_eq!(snapshot.build_number, Some(4));
    assert_eq!(snapshot.snapshot_versions.len(), 2);
    assert!(report.uploaded[0].ends_with("saxon-6-5-5-1.0.1-20240615.143022-4.jar"));
    assert!(report.uploaded[1].ends_with("saxon-6-5-5-1.0.1-20240615.143022-4-sources.jar"));

    let requests = server.received_requests().await.unwrap();
    let metadata_put = requests
        .iter()
        .find(|r| {
            r.method.as_str() == "PUT"
                && r.url.path().ends_with("1.0.1-SNAPSHOT/maven-metadata.xml")
        })
        .unwrap();
    let body = String::from_utf8_lossy(&metadata_put.body);
    assert!(body.contains("<buildNumber>4</buildNumber>"));
    assert!(requests.iter().any(|r| r.method.as_str() == "PUT"
        && r.url.path() == "/snapshots/tokyo/northside/saxon-6-5-5/maven-metadata.xml"));
}
