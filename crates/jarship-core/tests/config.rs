use jarship_core::config::{expand_tilde, GlobalConfig};

#[test]
fn test_global_config_defaults() {
    let config = GlobalConfig::default();
    assert!(config.toolchain.jdk.is_none());
    assert!(config.local_repository().ends_with(".m2/repository"));
    assert!(config.cache_dir().ends_with("cache"));
}

#[test]
fn test_global_config_from_toml() {
    let config: GlobalConfig = toml::from_str(
        r#"
[toolchain]
jdk = "/usr/lib/jvm/java-17"

[repository]
local = "/srv/m2"

[cache]
dir = "/tmp/jarship-cache"
"#,
    )
    .unwrap();
    assert_eq!(config.toolchain.jdk.as_deref(), Some("/usr/lib/jvm/java-17"));
    assert_eq!(config.local_repository(), std::path::PathBuf::from("/srv/m2"));
    assert_eq!(config.cache_dir(), std::path::PathBuf::from("/tmp/jarship-cache"));
}

#[test]
fn test_load_from_missing_file_gives_defaults() {
    let config = GlobalConfig::load_from(std::path::Path::new("/nonexistent/config.toml")).unwrap();
    assert!(config.repository.local.is_none());
}

#[test]
fn test_load_from_invalid_toml_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "[toolchain\njdk=").unwrap();
    assert!(GlobalConfig::load_from(tmp.path()).is_err());
}

#[test]
fn test_expand_tilde() {
    assert!(!expand_tilde("~/x").to_string_lossy().starts_with('~'));
    assert_eq!(expand_tilde("/abs"), std::path::PathBuf::from("/abs"));
}
