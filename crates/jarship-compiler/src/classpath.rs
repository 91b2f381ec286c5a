//! Classpath string assembly.

use std::path::PathBuf;

/// Join JAR paths into a classpath string suitable for `-classpath`.
pub fn to_classpath_string(jars: &[PathBuf]) -> String {
    jars.iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(classpath_separator())
}

fn classpath_separator() -> &'static str {
    if cfg!(windows) {
        ";"
    } else {
        ":"
    }
}
