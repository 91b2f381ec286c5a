use std::fs;
use std::path::Path;

use jarship_compiler::resources::copy_resources;
use jarship_core::duplicates::DuplicatesStrategy;

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[test]
fn copies_nested_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    let src = tmp.path().join("src/main/resources");
    write(&src.join("com/icl/saxon/a.properties"), "a=1");
    write(&src.join("top.txt"), "top");

    let dest = tmp.path().join("build/resources/main");
    let report = copy_resources(&[src], &dest, DuplicatesStrategy::Warn).unwrap();

    assert_eq!(report.copied, 2);
    assert!(report.duplicates.is_empty());
    assert_eq!(fs::read_to_string(dest.join("com/icl/saxon/a.properties")).unwrap(), "a=1");
}

#[test]
fn warn_duplicates_let_later_root_win() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    write(&a.join("same.txt"), "from a");
    write(&b.join("same.txt"), "from b");

    let dest = tmp.path().join("out");
    let report = copy_resources(&[a, b], &dest, DuplicatesStrategy::Warn).unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(report.duplicates, vec!["same.txt".to_string()]);
    assert_eq!(fs::read_to_string(dest.join("same.txt")).unwrap(), "from b");
}

#[test]
fn exclude_duplicates_keep_first_root() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    write(&a.join("same.txt"), "from a");
    write(&b.join("same.txt"), "from b");

    let dest = tmp.path().join("out");
    copy_resources(&[a, b], &dest, DuplicatesStrategy::Exclude).unwrap();
    assert_eq!(fs::read_to_string(dest.join("same.txt")).unwrap(), "from a");
}

#[test]
fn missing_roots_copy_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dest = tmp.path().join("out");
    let report = copy_resources(&[tmp.path().join("nope")], &dest, DuplicatesStrategy::Warn).unwrap();
    assert_eq!(report.copied, 0);
    assert!(dest.is_dir());
}
