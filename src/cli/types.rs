use anyhow::Result;
use std::path::PathBuf;

use mzbind::registry::TypeKind;

/// List the registered types of a schema
pub fn run(schema: Option<PathBuf>) -> Result<()> {
    let registry = super::load_registry(schema.as_deref())?;

    println!("Registered Types");
    println!("================");
    println!("Source: {}", super::source_label(schema.as_deref()));
    println!();

    let width = registry.iter().map(|def| def.name().len()).max().unwrap_or(0);
    for def in registry.iter() {
        let kind = match def.kind() {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        };
        let mut line = format!("  {:<width$}  {:<9}  {:>2} properties", def.name(), kind, def.properties().len());
        if let Some(base) = def.base() {
            line.push_str(&format!(", base {}", base));
        }
        if !def.interfaces().is_empty() {
            line.push_str(&format!(", implements {}", def.interfaces().join(", ")));
        }
        if let Some(caption) = def.attributes().display_name().filter(|c| !c.is_empty()) {
            line.push_str(&format!(" (\"{}\")", caption));
        }
        println!("{}", line);
    }

    println!();
    println!("{} types", registry.len());
    Ok(())
}
