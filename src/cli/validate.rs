use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use mzbind::config::SchemaConfig;
use mzbind::registry::validate_registry;

/// Validate a schema file
pub fn run(schema: PathBuf) -> Result<()> {
    info!("mzbind Schema Validator");
    info!("=======================");
    info!("File: {}", schema.display());

    let registry = SchemaConfig::from_file(&schema)
        .and_then(SchemaConfig::into_registry)
        .with_context(|| format!("Failed to load schema: {}", schema.display()))?;

    let report = validate_registry(&registry, &schema.display().to_string());

    // Use colorized output if available
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if report.has_warnings() {
        warn!("{} warnings in {}", report.warning_count(), schema.display());
    }

    // Exit with error code if validation failed
    if report.has_failures() {
        warn!(
            "{} of {} types failed in {}",
            report.failing_type_count(),
            report.type_count(),
            schema.display()
        );
        std::process::exit(1);
    }

    Ok(())
}
