use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn jarship_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jarship").unwrap();
    cmd.env("HOME", home.path()).env_remove("JARSHIP_HOME");
    cmd
}

#[test]
fn test_properties_masks_secrets() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    jarship_cmd(&home).current_dir(tmp.path()).args(["init"]).assert().success();

    jarship_cmd(&home)
        .current_dir(tmp.path())
        .env("JARSHIP_PROJECT_sonatypePassword", "hunter2")
        .args(["-P", "sonatypeUsername=miurahr", "properties"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sonatypeUsername = miurahr  (command line)"))
        .stdout(predicate::str::contains("sonatypePassword = ********  (environment)"))
        .stdout(predicate::str::contains("hunter2").not())
        .stdout(predicate::str::contains("Signing: skip (no signing key configured)"));
}

#[test]
fn test_properties_reveal() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    jarship_cmd(&home).current_dir(tmp.path()).args(["init"]).assert().success();

    jarship_cmd(&home)
        .current_dir(tmp.path())
        .args(["properties", "--reveal", "-P", "signingPassword=hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("signingPassword = hunter2"));
}

#[test]
fn test_property_without_name_is_rejected() {
    let home = TempDir::new().unwrap();
    jarship_cmd(&home)
        .args(["-P", "=x", "tasks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected name=value"));
}
