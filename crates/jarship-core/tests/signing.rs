use std::path::PathBuf;

use jarship_core::coordinates::ProjectCoordinates;
use jarship_core::properties::{ProjectProperties, PropertySource};
use jarship_core::signing::{signing_enabled, SigningDecision, SigningKeySource};

fn props(entries: &[(&str, &str)]) -> ProjectProperties {
    ProjectProperties::default().with(PropertySource::ProjectFile, entries)
}

fn release() -> ProjectCoordinates {
    ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", "1.0.0")
}

fn snapshot() -> ProjectCoordinates {
    ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", "1.0.1-SNAPSHOT")
}

#[test]
fn no_signing_properties_selects_nothing() {
    assert_eq!(SigningKeySource::select(&props(&[("sonatypeUsername", "u")])), None);
}

#[test]
fn in_memory_key_wins_when_all_three_are_set() {
    let p = props(&[
        ("signingKey", "ARMORED"),
        ("signingPassword", "pw"),
        ("signing.keyId", "24875D73"),
        ("signing.gnupg.keyName", "miurahr"),
    ]);
    let source = SigningKeySource::select(&p).unwrap();
    assert_eq!(
        source,
        SigningKeySource::InMemory {
            key: "ARMORED".to_string(),
            password: Some("pw".to_string()),
            key_id: None,
        }
    );
    assert_eq!(source.selector(), "signingKey");
}

#[test]
fn key_id_beats_gnupg() {
    let p = props(&[
        ("signing.keyId", "24875D73"),
        ("signing.password", "pw"),
        ("signing.secretKeyRingFile", "/home/u/.gnupg/secring.gpg"),
        ("signing.gnupg.keyName", "miurahr"),
    ]);
    assert_eq!(
        SigningKeySource::select(&p),
        Some(SigningKeySource::KeyId {
            key_id: "24875D73".to_string(),
            password: Some("pw".to_string()),
            secret_key_ring_file: Some(PathBuf::from("/home/u/.gnupg/secring.gpg")),
        })
    );
}

#[test]
fn gnupg_defaults_to_gpg2() {
    let source = SigningKeySource::select(&props(&[("signing.gnupg.keyName", "miurahr")])).unwrap();
    match source {
        SigningKeySource::GpgCommand {
            key_name,
            executable,
            use_legacy_gpg,
            home_dir,
            passphrase,
        } => {
            assert_eq!(key_name, "miurahr");
            assert_eq!(executable, "gpg2");
            assert!(!use_legacy_gpg);
            assert!(home_dir.is_none());
            assert!(passphrase.is_none());
        }
        other => panic!("unexpected source: {other:?}"),
    }
}

#[test]
fn gnupg_legacy_and_explicit_executable() {
    let legacy = SigningKeySource::select(&props(&[
        ("signing.gnupg.keyName", "k"),
        ("signing.gnupg.useLegacyGpg", "true"),
    ]))
    .unwrap();
    assert!(matches!(
        legacy,
        SigningKeySource::GpgCommand { ref executable, use_legacy_gpg: true, .. } if executable == "gpg"
    ));

    let explicit = SigningKeySource::select(&props(&[
        ("signing.gnupg.keyName", "k"),
        ("signing.gnupg.executable", "/opt/gnupg/bin/gpg"),
    ]))
    .unwrap();
    assert!(matches!(
        explicit,
        SigningKeySource::GpgCommand { ref executable, .. } if executable == "/opt/gnupg/bin/gpg"
    ));
}

#[test]
fn empty_value_still_selects() {
    let source = SigningKeySource::select(&props(&[("signingKey", "")])).unwrap();
    assert_eq!(source.selector(), "signingKey");
}

#[test]
fn snapshot_never_signs_for_any_source() {
    let all = [
        props(&[("signingKey", "ARMORED")]),
        props(&[("signing.keyId", "24875D73")]),
        props(&[("signing.gnupg.keyName", "miurahr")]),
        props(&[
            ("signingKey", "ARMORED"),
            ("signing.keyId", "24875D73"),
            ("signing.gnupg.keyName", "miurahr"),
        ]),
    ];
    for p in &all {
        let source = SigningKeySource::select(p);
        assert!(source.is_some());
        assert!(!signing_enabled(source.as_ref(), &snapshot()));
        assert_eq!(SigningDecision::evaluate(p, &snapshot()), SigningDecision::SkipSnapshot);
    }
}

#[test]
fn release_signs_only_with_a_source() {
    let with_key = props(&[("signing.keyId", "24875D73")]);
    let decision = SigningDecision::evaluate(&with_key, &release());
    assert!(decision.is_enabled());
    assert_eq!(decision.source().unwrap().selector(), "signing.keyId");

    let without = props(&[]);
    assert_eq!(
        SigningDecision::evaluate(&without, &release()),
        SigningDecision::SkipNoKey
    );
    assert!(!signing_enabled(None, &release()));
}

#[test]
fn describe_hides_secrets() {
    let source = SigningKeySource::select(&props(&[
        ("signingKey", "TOP-SECRET-ARMOR"),
        ("signingPassword", "hunter2"),
    ]))
    .unwrap();
    let text = source.describe();
    assert!(!text.contains("TOP-SECRET"));
    assert!(!text.contains("hunter2"));
}
