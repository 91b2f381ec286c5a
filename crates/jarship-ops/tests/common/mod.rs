#![allow(dead_code)]

use std::path::Path;

use jarship_core::config::GlobalConfig;
use jarship_core::manifest::Manifest;
use jarship_core::properties::{ProjectProperties, PropertySource};
use jarship_ops::context::ProjectContext;

pub fn manifest_toml(version: &str, nexus_uri: &str) -> String {
    format!(
        r#"
[package]
group = "tokyo.northside"
artifact = "saxon-6-5-5"
version = "{version}"
name = "saxon"
description = "Saxon 6.5.5 Library"
url = "https://github.com/miurahr/saxon-6-5-5"

[java]
source-compatibility = "11"
target-compatibility = "11"
encoding = "ISO-8859-1"

[archives]
doc-dir = "src/doc"

[[license]]
name = "Mozilla Public License"
url = "https://opensource.org/license/mpl-1-0"

[nexus]
staging-profile-id = "121f28671d24dc"
nexus-url = "{nexus_uri}/service/local/"
snapshot-url = "{nexus_uri}/content/repositories/snapshots/"
"#
    )
}

/// A project without Java sources, so no JDK is needed.
pub fn write_project(dir: &Path, version: &str, nexus_uri: &str) {
    let write = |rel: &str, content: &str| {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    };
    write("Jarship.toml", &manifest_toml(version, nexus_uri));
    write(
        "src/main/resources/com/icl/saxon/output/saxon-attributes.properties",
        "indent=yes\n",
    );
    write("src/doc/index.html", "<html>Saxon 6.5.5</html>\n");
}

pub fn context(dir: &Path, home: &Path, props: &[(&str, &str)]) -> ProjectContext {
    context_with_config(dir, props, config(home))
}

/// Global config keeping the local repository and cache under `home`.
pub fn config(home: &Path) -> GlobalConfig {
    let mut config = GlobalConfig::default();
    config.repository.local = Some(home.join("m2").to_string_lossy().to_string());
    config.cache.dir = Some(home.join("cache").to_string_lossy().to_string());
    config
}

pub fn context_with_config(dir: &Path, props: &[(&str, &str)], config: GlobalConfig) -> ProjectContext {
    let manifest = Manifest::from_path(&dir.join("Jarship.toml")).unwrap();
    let properties = ProjectProperties::default().with(PropertySource::CommandLine, props);
    ProjectContext::from_parts(dir, manifest, properties, config)
}

pub fn jar_entries(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    archive.file_names().map(str::to_string).collect()
}
