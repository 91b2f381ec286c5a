//! POM generation for the `mavenJava` publication.

use jarship_core::publication::PublicationDescriptor;

use crate::xml::XmlDocument;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

/// Scope given to every declared dependency.
pub const DEPENDENCY_SCOPE: &str = "runtime";

/// Render the POM for `publication`.
pub fn write_pom(publication: &PublicationDescriptor) -> miette::Result<String> {
    let coords = publication.coordinates();
    let pom = publication.pom();

    let mut doc = XmlDocument::new()?;
    doc.start_with(
        "project",
        &[
            ("xmlns", POM_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", POM_SCHEMA_LOCATION),
        ],
    )?;
    doc.element("modelVersion", "4.0.0")?;
    doc.element("groupId", &coords.group_id)?;
    doc.element("artifactId", &coords.artifact_id)?;
    doc.element("version", &coords.version)?;
    doc.optional("name", pom.name.as_deref())?;
    doc.optional("description", pom.description.as_deref())?;
    doc.optional("url", pom.url.as_deref())?;

    if !pom.licenses.is_empty() {
        doc.start("licenses")?;
        for license in &pom.licenses {
            doc.start("license")?;
            doc.element("name", &license.name)?;
            doc.optional("url", license.url.as_deref())?;
            doc.optional("distribution", license.distribution.as_deref())?;
            doc.end("license")?;
        }
        doc.end("licenses")?;
    }

    if !pom.developers.is_empty() {
        doc.start("developers")?;
        for dev in &pom.developers {
            doc.start("developer")?;
            doc.optional("id", dev.id.as_deref())?;
            doc.optional("name", dev.name.as_deref())?;
            doc.optional("email", dev.email.as_deref())?;
            doc.end("developer")?;
        }
        doc.end("developers")?;
    }

    if let Some(scm) = &pom.scm {
        doc.start("scm")?;
        doc.optional("connection", scm.connection.as_deref())?;
        doc.optional("developerConnection", scm.developer_connection.as_deref())?;
        doc.optional("url", scm.url.as_deref())?;
        doc.end("scm")?;
    }

    if !pom.dependencies.is_empty() {
        doc.start("dependencies")?;
        for dep in &pom.dependencies {
            doc.start("dependency")?;
            doc.element("groupId", &dep.group_id)?;
            doc.element("artifactId", &dep.artifact_id)?;
            doc.element("version", &dep.version)?;
            doc.element("scope", DEPENDENCY_SCOPE)?;
            doc.end("dependency")?;
        }
        doc.end("dependencies")?;
    }

    doc.end("project")?;
    doc.finish()
}
