use std::fs;

use jarship_core::coordinates::ProjectCoordinates;
use jarship_core::duplicates::DuplicatesStrategy;
use jarship_maven::local::{LocalRepository, LOCAL_METADATA_FILE};
use jarship_maven::metadata::parse_metadata;

fn saxon(version: &str) -> ProjectCoordinates {
    ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", version)
}

#[test]
fn install_copies_into_layout() {
    let tmp = tempfile::TempDir::new().unwrap();
    let src = tmp.path().join("saxon.jar");
    fs::write(&src, b"jar").unwrap();

    let repo = LocalRepository::new(tmp.path().join("m2"));
    let dest = repo
        .install_file(&saxon("1.0.0"), &src, "saxon-6-5-5-1.0.0.jar", DuplicatesStrategy::Warn)
        .unwrap();
    assert_eq!(
        dest,
        tmp.path().join("m2/tokyo/northside/saxon-6-5-5/1.0.0/saxon-6-5-5-1.0.0.jar")
    );
    assert_eq!(fs::read(dest).unwrap(), b"jar");
}

#[test]
fn reinstall_with_warn_replaces_changed_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let src = tmp.path().join("saxon.jar");
    let repo = LocalRepository::new(tmp.path().join("m2"));

    fs::write(&src, b"old").unwrap();
    repo.install_file(&saxon("1.0.0"), &src, "saxon-6-5-5-1.0.0.jar", DuplicatesStrategy::Warn)
        .unwrap();
    fs::write(&src, b"new").unwrap();
    let dest = repo
        .install_file(&saxon("1.0.0"), &src, "saxon-6-5-5-1.0.0.jar", DuplicatesStrategy::Warn)
        .unwrap();
    assert_eq!(fs::read(dest).unwrap(), b"new");
}

#[test]
fn reinstall_with_fail_rejects_changed_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let src = tmp.path().join("saxon.jar");
    let repo = LocalRepository::new(tmp.path().join("m2"));

    fs::write(&src, b"old").unwrap();
    repo.install_file(&saxon("1.0.0"), &src, "a.jar", DuplicatesStrategy::Fail)
        .unwrap();
    // Identical content is not a duplicate.
    repo.install_file(&saxon("1.0.0"), &src, "a.jar", DuplicatesStrategy::Fail)
        .unwrap();
    fs::write(&src, b"new").unwrap();
    assert!(repo
        .install_file(&saxon("1.0.0"), &src, "a.jar", DuplicatesStrategy::Fail)
        .is_err());
}

#[test]
fn local_metadata_accumulates_versions() {
    let tmp = tempfile::TempDir::new().unwrap();
    let repo = LocalRepository::new(tmp.path());

    repo.record_version(&saxon("1.0.0"), "20240101000000").unwrap();
    let path = repo
        .record_version(&saxon("1.0.1-SNAPSHOT"), "20240202000000")
        .unwrap();

    assert_eq!(
        path,
        tmp.path().join("tokyo/northside/saxon-6-5-5").join(LOCAL_METADATA_FILE)
    );
    let meta = parse_metadata(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(meta.versions, vec!["1.0.0", "1.0.1-SNAPSHOT"]);
    assert_eq!(meta.release.as_deref(), Some("1.0.0"));
    assert_eq!(meta.latest.as_deref(), Some("1.0.1-SNAPSHOT"));
    assert_eq!(meta.last_updated.as_deref(), Some("20240202000000"));
}
