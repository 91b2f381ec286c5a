use jarship_core::template::{interpolate, render_manifest, TemplateContext, PROPERTIES_TEMPLATE};

#[test]
fn interpolate_known_and_unknown_placeholders() {
    let mut ctx = TemplateContext::reference();
    ctx.set("extra", "value");
    assert_eq!(interpolate("{{artifact}}-{{extra}}-{{unknown}}", &ctx), "saxon-6-5-5-value-{{unknown}}");
}

#[test]
fn render_manifest_with_overrides() {
    let mut ctx = TemplateContext::reference();
    ctx.set("version", "1.1.0-SNAPSHOT");
    let rendered = render_manifest(&ctx);
    assert!(rendered.contains("version = \"1.1.0-SNAPSHOT\""));
    assert!(!rendered.contains("{{"));
}

#[test]
fn properties_template_is_all_comments() {
    assert!(jarship_core::properties::parse_properties(PROPERTIES_TEMPLATE).is_empty());
}
