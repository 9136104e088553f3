use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use log::{debug, info};

use mzbind::attributes::OneToMany;
use mzbind::registry::{PropertyDef, SchemaError, TypeDef, TypeRegistry};
use mzbind::schema::{DataSchema, HumanizedCaptions};
use mzbind::types::DataType;
use mzbind::value::{EnumValue, LinkedValue, Record, Value};

/// Columns shown by the demo report
const REPORT_COLUMNS: &[&str] = &[
    "Sequence",
    "Protein",
    "Precursor.Mz",
    "Precursor.Charge",
    "RetentionTime",
    "StandardType",
    "IdentifiedTime",
    "Results",
];

/// Print the demo peptide report sorted by `sort`
pub fn run(sort: &str, descending: bool) -> Result<()> {
    info!("mzbind Demo - Peptide Report");
    info!("============================");

    let schema = DataSchema::new(demo_registry().context("Failed to build demo schema")?)
        .with_policy(HumanizedCaptions);
    let peptide = DataType::record("Peptide");

    let rows = sorted_rows(&schema, demo_rows(), sort, descending)?;
    info!("Sorted {} peptides by {}", rows.len(), sort);

    let columns = REPORT_COLUMNS
        .iter()
        .map(|path| {
            schema
                .resolve_path(&peptide, path)
                .with_context(|| format!("Unknown column path '{}'", path))
        })
        .collect::<Result<Vec<_>>>()?;

    let header: Vec<String> = columns.iter().map(|c| schema.display_name(c)).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| c.get_value(row).to_string()).collect())
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            cells
                .iter()
                .map(|line| line[i].len())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    print_line(&header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    print_line(&rule, &widths);
    for line in &cells {
        print_line(line, &widths);
    }

    Ok(())
}

fn print_line(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    println!("{}", line.join("  ").trim_end());
}

/// Sort report rows by the column at `path`
fn sorted_rows(schema: &DataSchema, mut rows: Vec<Value>, path: &str, descending: bool) -> Result<Vec<Value>> {
    let column = schema
        .resolve_path(&DataType::record("Peptide"), path)
        .with_context(|| format!("Unknown sort column '{}'", path))?;
    debug!("Sorting by {} ({})", column.path(), column.property_type());

    rows.sort_by(|a, b| {
        let ordering = schema.compare(&column.get_value(a), &column.get_value(b));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    Ok(rows)
}

/// Small targeted-proteomics schema used when no schema file is given
pub fn demo_registry() -> Result<TypeRegistry, SchemaError> {
    let mut registry = TypeRegistry::new();

    registry.register(
        TypeDef::class("Entity")
            .property(PropertyDef::new("Id", DataType::INT).advanced(true))
            .property(PropertyDef::new("Locator", DataType::TEXT).hidden())
            .build(),
    )?;

    registry.register(
        TypeDef::class("Protein")
            .base("Entity")
            .display_name("Protein Group")
            .property(PropertyDef::new("Accession", DataType::TEXT))
            .property(PropertyDef::new("Name", DataType::TEXT))
            .property(PropertyDef::new("Gene", DataType::optional(DataType::TEXT)))
            .property(PropertyDef::new("Description", DataType::TEXT).advanced(true))
            .build(),
    )?;

    registry.register(
        TypeDef::class("Precursor")
            .property(PropertyDef::new("Mz", DataType::FLOAT).display_name("m/z"))
            .property(PropertyDef::new("Charge", DataType::INT))
            .property(
                PropertyDef::new("IsotopeDotProduct", DataType::optional(DataType::FLOAT)).advanced(true),
            )
            .property(PropertyDef::new("CollisionEnergy", DataType::FLOAT).obsolete())
            .build(),
    )?;

    registry.register(
        TypeDef::class("PeptideResult")
            .property(PropertyDef::new("Peptide", DataType::link(DataType::record("Peptide"))))
            .property(PropertyDef::new("Replicate", DataType::TEXT))
            .property(PropertyDef::new("Area", DataType::optional(DataType::FLOAT)))
            .property(PropertyDef::new("RetentionTime", DataType::optional(DataType::FLOAT)))
            .property(
                PropertyDef::new("PeptideRetentionTime", DataType::optional(DataType::FLOAT))
                    .advanced_when(DataType::record("Peptide")),
            )
            .build(),
    )?;

    registry.register(
        TypeDef::class("Peptide")
            .base("Entity")
            .property(PropertyDef::new("Sequence", DataType::TEXT))
            .property(PropertyDef::new("Protein", DataType::link(DataType::record("Protein"))))
            .property(
                PropertyDef::new("Precursor", DataType::record("Precursor")).child_display_name("Precursor {0}"),
            )
            .property(PropertyDef::new("RetentionTime", DataType::optional(DataType::FLOAT)))
            .property(PropertyDef::new(
                "StandardType",
                DataType::optional(DataType::enumeration("StandardType")),
            ))
            .property(PropertyDef::new("IdentifiedTime", DataType::DATETIME))
            .property(
                PropertyDef::new("Results", DataType::list(DataType::record("PeptideResult"))).one_to_many(
                    OneToMany::new()
                        .index_display_name("Replicate Index")
                        .item_display_name("Result")
                        .foreign_key("Peptide"),
                ),
            )
            .build(),
    )?;

    Ok(registry)
}

/// Peptides of bovine serum albumin and carbonic anhydrase
fn demo_rows() -> Vec<Value> {
    let albumin = LinkedValue::new(
        "ALBU_BOVIN",
        Record::new("Protein")
            .with("Accession", "P02769")
            .with("Name", "ALBU_BOVIN")
            .with("Gene", "ALB")
            .with_display("ALBU_BOVIN"),
    )
    .into_value();
    let anhydrase = LinkedValue::new(
        "CAH2_BOVIN",
        Record::new("Protein")
            .with("Accession", "P00921")
            .with("Name", "CAH2_BOVIN")
            .with("Gene", "CA2")
            .with_display("CAH2_BOVIN"),
    )
    .into_value();
    let irt = EnumValue::new("StandardType", "iRT", 1);

    let peptides: [(&str, &Value, f64, i32, Option<f64>, Option<EnumValue>); 6] = [
        ("LVNELTEFAK", &albumin, 582.3190, 2, Some(22.41), None),
        ("HLVDEPQNLIK", &albumin, 653.3617, 2, Some(18.93), None),
        ("YLYEIAR", &albumin, 464.2500, 2, Some(20.12), Some(irt.clone())),
        ("AEFVEVTK", &albumin, 461.7473, 2, None, None),
        ("VLDALDSIK", &anhydrase, 487.2842, 2, Some(24.70), None),
        ("AVVQDPALKPLALVYGEATSR", &anhydrase, 753.4100, 3, Some(31.05), Some(irt)),
    ];

    peptides
        .into_iter()
        .enumerate()
        .map(|(i, (sequence, protein, mz, charge, rt, standard))| {
            let results: Vec<Value> = ["Rep1", "Rep2"]
                .iter()
                .map(|replicate| {
                    Value::from(
                        Record::new("PeptideResult")
                            .with("Replicate", *replicate)
                            .with("Area", 1.0e6 * (i + 1) as f64)
                            .with("RetentionTime", rt),
                    )
                })
                .collect();
            Value::from(
                Record::new("Peptide")
                    .with("Id", i as i64 + 1)
                    .with("Sequence", sequence)
                    .with("Protein", protein.clone())
                    .with("Precursor", Record::new("Precursor").with("Mz", mz).with("Charge", charge))
                    .with("RetentionTime", rt)
                    .with("StandardType", standard)
                    .with(
                        "IdentifiedTime",
                        Utc.timestamp_opt(1_705_314_600 + 300 * i as i64, 0).single(),
                    )
                    .with("Results", results),
            )
        })
        .collect()
}
