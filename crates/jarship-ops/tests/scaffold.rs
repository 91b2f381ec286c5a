use jarship_core::manifest::Manifest;
use jarship_ops::ops_clean::{clean, CleanResult};
use jarship_ops::ops_init::init;

#[test]
fn init_writes_reference_project() {
    let tmp = tempfile::TempDir::new().unwrap();
    let result = init(tmp.path(), false).unwrap();

    let manifest = Manifest::from_path(&result.manifest).unwrap();
    assert_eq!(manifest.coordinates().to_string(), "tokyo.northside:saxon-6-5-5:1.0.0");
    assert!(result.properties.is_some());
    assert!(tmp.path().join("src/main/java").is_dir());
    assert!(tmp.path().join("src/doc").is_dir());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Jarship.toml"), "# mine\n").unwrap();
    std::fs::write(tmp.path().join("jarship.properties"), "sonatypePassword=x\n").unwrap();

    assert!(init(tmp.path(), false).is_err());

    let result = init(tmp.path(), true).unwrap();
    assert!(result.properties.is_none());
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("jarship.properties")).unwrap(),
        "sonatypePassword=x\n"
    );
}

#[test]
fn clean_removes_build_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(clean(tmp.path()).unwrap(), CleanResult::NothingToClean);

    std::fs::create_dir_all(tmp.path().join("build/libs")).unwrap();
    assert_eq!(clean(tmp.path()).unwrap(), CleanResult::Cleaned);
    assert!(!tmp.path().join("build").exists());
}
