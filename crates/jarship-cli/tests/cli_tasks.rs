use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn jarship_cmd() -> Command {
    Command::cargo_bin("jarship").unwrap()
}

#[test]
fn test_tasks_lists_lifecycle_tasks() {
    jarship_cmd()
        .args(["tasks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("assemble"))
        .stdout(predicate::str::contains("closeAndReleaseSonatypeStagingRepository"))
        .stdout(predicate::str::contains("compileJava").not());
}

#[test]
fn test_tasks_all_shows_dependencies() {
    jarship_cmd()
        .args(["tasks", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("signMavenJavaPublication"))
        .stdout(predicate::str::contains("depends on: jar, sourcesJar, javadocJar, documentJar"));
}
