use jarship_util::errors::JarshipError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = JarshipError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = JarshipError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_toolchain_error_display() {
    let err = JarshipError::Toolchain {
        message: "JDK 8 cannot target 11".to_string(),
    };
    assert_eq!(err.to_string(), "Toolchain error: JDK 8 cannot target 11");
}

#[test]
fn test_signing_error_display() {
    let err = JarshipError::Signing {
        message: "gpg import failed".to_string(),
    };
    assert_eq!(err.to_string(), "Signing failed: gpg import failed");
}

#[test]
fn test_archive_error_display() {
    let err = JarshipError::Archive {
        message: "duplicate entry".to_string(),
    };
    assert_eq!(err.to_string(), "Archive error: duplicate entry");
}

#[test]
fn test_publish_error_display() {
    let err = JarshipError::Publish {
        message: "HTTP 401".to_string(),
    };
    assert_eq!(err.to_string(), "Publish failed: HTTP 401");
}

#[test]
fn test_generic_error_display() {
    let err = JarshipError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: JarshipError = io_err.into();
    assert!(matches!(err, JarshipError::Io(_)));
}
