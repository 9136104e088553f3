//! Integration tests for mzbind
//!
//! These tests load schema files from disk and drive the full pipeline from
//! registry to captioned, sorted report columns.

use std::cmp::Ordering;
use std::fs;

use mzbind::prelude::*;
use tempfile::tempdir;

const TRANSITION_SCHEMA: &str = r#"
[[types]]
name = "Identified"
kind = "interface"

[[types.properties]]
name = "Id"
type = "int"
advanced = true

[[types]]
name = "Protein"
interfaces = ["Identified"]
display_name = "Protein Group"

[[types.properties]]
name = "Accession"
type = "text"

[[types]]
name = "Precursor"

[[types.properties]]
name = "Mz"
type = "float"
display_name = "m/z"

[[types.properties]]
name = "Charge"
type = "int"

[[types]]
name = "TransitionResult"

[[types.properties]]
name = "Transition"
type = "Link<Transition>"

[[types.properties]]
name = "Area"
type = "Optional<float>"

[[types.properties]]
name = "Truncated"
type = "bool"
advanced_when = ["Transition"]

[[types]]
name = "Transition"

[[types.properties]]
name = "Protein"
type = "Link<Protein>"

[[types.properties]]
name = "Precursor"
type = "Optional<Precursor>"
child_display_name = "Precursor {0}"

[[types.properties]]
name = "ProductMz"
type = "float"

[[types.properties]]
name = "FragmentIon"
type = "text"
obsolete = true

[[types.properties]]
name = "Results"
type = "Map<text, TransitionResult>"
one_to_many = { index_display_name = "Replicate", item_display_name = "Result", foreign_key = "Transition" }
"#;

fn load_schema() -> DataSchema {
    let dir = tempdir().unwrap();
    let path = dir.path().join("transitions.toml");
    fs::write(&path, TRANSITION_SCHEMA).unwrap();

    let registry = SchemaConfig::from_file(&path).unwrap().into_registry().unwrap();
    DataSchema::new(registry)
}

fn transition_row(precursor_mz: Option<f64>, product_mz: f64, accession: &str) -> Value {
    let protein = LinkedValue::new(
        accession,
        Record::new("Protein").with("Accession", accession).with_display(accession),
    );
    let precursor = precursor_mz.map(|mz| Record::new("Precursor").with("Mz", mz).with("Charge", 2));
    Value::from(
        Record::new("Transition")
            .with("Protein", protein.into_value())
            .with("Precursor", precursor)
            .with("ProductMz", product_mz),
    )
}

/// Schema files validate cleanly and load into a working registry
#[test]
fn test_schema_file_validates() {
    let schema = load_schema();
    let report = validate_registry(schema.registry(), "transitions.toml");
    assert!(!report.has_failures(), "{}", report);
    assert!(!report.has_warnings(), "{}", report);
    assert_eq!(report.type_count(), 5);
    assert_eq!(report.clean_type_count(), 5);
}

/// Default layout hides advanced, obsolete and foreign key columns
#[test]
fn test_default_report_layout() {
    let schema = load_schema();
    let transition = DataType::record("Transition");

    let columns = schema.leaf_columns(&transition, &ColumnOptions::default());
    let layout: Vec<(String, String)> = columns
        .iter()
        .map(|c| (c.path(), schema.display_name(c)))
        .collect();

    let expected = [
        ("Protein.Accession", "Accession"),
        ("Precursor.Mz", "Precursor m/z"),
        ("Precursor.Charge", "Precursor Charge"),
        ("ProductMz", "ProductMz"),
        ("Results.Key", "Replicate"),
        ("Results.Value.Area", "Area"),
    ];
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(path, caption)| (path.to_string(), caption.to_string()))
        .collect();
    assert_eq!(layout, expected);
}

/// Full layout includes everything, flagged
#[test]
fn test_full_report_layout() {
    let schema = load_schema();
    let options = ColumnOptions {
        max_depth: 3,
        include_advanced: true,
    };
    let columns = schema.leaf_columns(&DataType::record("Transition"), &options);

    let advanced: Vec<String> = columns
        .iter()
        .filter(|c| schema.is_advanced(c))
        .map(|c| c.path())
        .collect();
    // Protein.Id comes from an interface, which classes do not inherit
    assert_eq!(
        advanced,
        [
            "FragmentIon",
            "Results.Value.Transition",
            "Results.Value.Truncated"
        ]
    );

    let obsolete: Vec<String> = columns
        .iter()
        .filter(|c| schema.is_obsolete(c))
        .map(|c| c.path())
        .collect();
    assert_eq!(obsolete, ["FragmentIon"]);
}

/// Link roots caption from the linked type
#[test]
fn test_link_root() {
    let schema = load_schema();
    let root_type: DataType = "Link<Protein>".parse().unwrap();

    assert!(schema.is_root_type_selectable(&root_type));
    assert_eq!(schema.display_name(&schema.root_column(&root_type)), "Protein Group");

    let accession = schema.resolve_path(&root_type, "Accession").unwrap();
    let row = LinkedValue::new("P02769", Record::new("Protein").with("Accession", "P02769")).into_value();
    assert_eq!(accession.get_value(&row), Value::from("P02769"));
}

/// Report rows sort through optional and link columns
#[test]
fn test_sort_report_rows() {
    let schema = load_schema();
    let transition = DataType::record("Transition");
    let mut rows = vec![
        transition_row(Some(652.8), 800.4, "CAH2_BOVIN"),
        transition_row(None, 400.2, "ALBU_BOVIN"),
        transition_row(Some(501.3), 600.3, "ALBU_BOVIN"),
    ];

    let precursor_mz = schema.resolve_path(&transition, "Precursor.Mz").unwrap();
    rows.sort_by(|a, b| schema.compare(&precursor_mz.get_value(a), &precursor_mz.get_value(b)));
    let sorted: Vec<Value> = rows.iter().map(|r| precursor_mz.get_value(r)).collect();
    assert_eq!(sorted, [Value::Null, Value::Float(501.3), Value::Float(652.8)]);

    let protein = schema.resolve_path(&transition, "Protein").unwrap();
    assert_eq!(
        schema.compare(&protein.get_value(&rows[0]), &protein.get_value(&rows[2])),
        Ordering::Less
    );
}

/// Collection items are enumerated through the collection info
#[test]
fn test_collection_items() {
    let schema = load_schema();
    let results = schema
        .resolve_path(&DataType::record("Transition"), "Results")
        .unwrap();
    let info = results.collection_info().unwrap();
    assert!(info.is_mapping());

    let value = Value::Map(vec![
        (Value::from("Rep1"), Value::from(Record::new("TransitionResult").with("Area", 10.0))),
        (Value::from("Rep2"), Value::from(Record::new("TransitionResult").with("Area", 12.5))),
    ]);
    let area = schema.property_descriptor(info.value_type(), "Area").unwrap();
    let areas: Vec<Value> = info
        .items(&value)
        .iter()
        .map(|(_, item)| area.get_value(item))
        .collect();
    assert_eq!(areas, [Value::Float(10.0), Value::Float(12.5)]);
}

/// Broken schema files surface typed errors
#[test]
fn test_schema_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[types]]\nname = \"A\"\n[[types.properties]]\nname = \"B\"\ntype = \"Map<int>\"\n").unwrap();

    let err = SchemaConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, SchemaError::TomlError(_)));
    assert!(err.to_string().contains("Map"));
}
