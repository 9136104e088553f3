use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;

use mzbind::column::ColumnDescriptor;
use mzbind::schema::{ColumnOptions, DataSchema, HumanizedCaptions};
use mzbind::types::DataType;

use super::config::Config;

pub struct DescribeArgs {
    pub type_name: String,
    pub schema: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub depth: Option<usize>,
    pub all: bool,
    pub json: bool,
    pub humanize: bool,
}

/// One report column as printed by `describe`
#[derive(Debug, Serialize)]
struct ColumnRow {
    path: String,
    display_name: String,
    #[serde(rename = "type")]
    data_type: String,
    advanced: bool,
    obsolete: bool,
}

impl ColumnRow {
    fn new(schema: &DataSchema, column: &ColumnDescriptor) -> Self {
        Self {
            path: column.path(),
            display_name: schema.display_name(column),
            data_type: column.property_type().to_string(),
            advanced: schema.is_advanced(column),
            obsolete: schema.is_obsolete(column),
        }
    }

    fn flags(&self) -> &'static str {
        match (self.obsolete, self.advanced) {
            (true, _) => "obsolete",
            (false, true) => "advanced",
            (false, false) => "",
        }
    }
}

/// Show the report columns of a type
pub fn run(args: DescribeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let options = ColumnOptions {
        max_depth: args
            .depth
            .or(config.describe.max_depth)
            .unwrap_or(ColumnOptions::default().max_depth),
        include_advanced: args.all || config.describe.include_advanced.unwrap_or(false),
    };
    let humanize = args.humanize || config.describe.humanize.unwrap_or(false);
    debug!("Column options: {:?}, humanize: {}", options, humanize);

    let root_type: DataType = args
        .type_name
        .parse()
        .with_context(|| format!("Invalid type: {}", args.type_name))?;

    let registry = super::load_registry(args.schema.as_deref())?;
    let schema = DataSchema::new(registry);
    let schema = if humanize {
        schema.with_policy(HumanizedCaptions)
    } else {
        schema
    };

    if let Some(name) = schema.wrapped_value_type(&root_type).record_name() {
        if !schema.registry().contains(name) {
            anyhow::bail!("Type '{}' is not registered", name);
        }
    }

    let rows: Vec<ColumnRow> = schema
        .leaf_columns(&root_type, &options)
        .iter()
        .map(|column| ColumnRow::new(&schema, column))
        .collect();
    info!("{} columns for {}", rows.len(), root_type);

    if args.json {
        let json = serde_json::to_string_pretty(&rows).context("Failed to serialize columns")?;
        println!("{}", json);
        return Ok(());
    }

    let root_caption = schema.display_name(&schema.root_column(&root_type));
    println!("{} ({})", root_caption, root_type);
    println!("{}", "=".repeat(root_caption.len() + root_type.to_string().len() + 3));

    let path_width = rows.iter().map(|r| r.path.len()).max().unwrap_or(0).max(4);
    let name_width = rows.iter().map(|r| r.display_name.len()).max().unwrap_or(0).max(12);
    let type_width = rows.iter().map(|r| r.data_type.len()).max().unwrap_or(0).max(4);

    println!(
        "{:<path_width$}  {:<name_width$}  {:<type_width$}  Flags",
        "Path", "Display Name", "Type"
    );
    for row in &rows {
        println!(
            "{:<path_width$}  {:<name_width$}  {:<type_width$}  {}",
            row.path,
            row.display_name,
            row.data_type,
            row.flags()
        );
    }

    if !options.include_advanced {
        println!();
        println!("Advanced columns hidden; pass --all to include them.");
    }

    Ok(())
}
