use miette::Result;

use jarship_core::properties::ENV_PREFIX;
use jarship_ops::ops_properties::list_properties;

pub fn exec(properties: &[(String, String)], reveal: bool) -> Result<()> {
    let ctx = super::load_context(properties)?;
    let entries = list_properties(&ctx.properties, reveal);

    if entries.is_empty() {
        println!("No project properties defined.");
        println!("  Set them in jarship.properties, ~/.jarship/jarship.properties,");
        println!("  {ENV_PREFIX}<name> environment variables or with -P name=value.");
        return Ok(());
    }

    println!("Project properties ({} entries):", entries.len());
    for entry in &entries {
        println!("  {} = {}  ({})", entry.name, entry.value, entry.source);
    }
    println!();
    println!("Signing: {}", jarship_ops::context::signing_summary(&ctx.signing));
    Ok(())
}
