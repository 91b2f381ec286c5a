//! Project scaffolding for `jarship init`.
//!
//! The manifest template is compiled into the binary via `include_str!` and
//! rendered with simple `{{variable}}` interpolation. Its defaults describe
//! the `tokyo.northside:saxon-6-5-5` library.

use std::collections::BTreeMap;

/// Raw `Jarship.toml` template with `{{variable}}` placeholders.
pub const MANIFEST_TEMPLATE: &str = include_str!("../templates/Jarship.toml");

/// Commented `jarship.properties` skeleton.
pub const PROPERTIES_TEMPLATE: &str = include_str!("../templates/jarship.properties");

/// Variables available for `{{variable}}` interpolation in template content.
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    /// A context pre-filled with the reference project's identity.
    pub fn reference() -> Self {
        let mut vars = BTreeMap::new();
        for (k, v) in [
            ("group", "tokyo.northside"),
            ("artifact", "saxon-6-5-5"),
            ("version", "1.0.0"),
            ("name", "saxon"),
            ("description", "Saxon 6.5.5 Library"),
            ("url", "https://github.com/miurahr/saxon-6-5-5"),
        ] {
            vars.insert(k.to_string(), v.to_string());
        }
        Self { vars }
    }

    /// Override a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

/// Replace all `{{key}}` placeholders in `input` with values from `ctx`.
/// Unknown placeholders are left as-is.
pub fn interpolate(input: &str, ctx: &TemplateContext) -> String {
    let mut result = input.to_string();
    for (key, value) in &ctx.vars {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Render the `Jarship.toml` template.
pub fn render_manifest(ctx: &TemplateContext) -> String {
    interpolate(MANIFEST_TEMPLATE, ctx)
}
