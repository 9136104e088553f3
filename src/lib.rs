//! # mzbind - Data Binding for Mass Spectrometry Reports
//!
//! `mzbind` is the schema layer behind report grids over proteomics results
//! (proteins, peptides, precursors, transitions, replicate results). Given an
//! arbitrary registered type it discovers the type's properties, decides which
//! of them are offered as columns, captions them, flags advanced and obsolete
//! columns, and sorts heterogeneous cell values.
//!
//! ## Key Features
//!
//! - **Schema Registry**: Types register their properties, attributes and
//!   accessors once; no runtime reflection is involved.
//!
//! - **Transparent Wrappers**: `Optional<T>` and `Link<T>` properties are
//!   navigated as if they were `T`, through synthetic chained properties.
//!
//! - **Declarative Captions**: `DisplayName`, `ChildDisplayName` and
//!   `OneToMany` attributes compose captions such as "Precursor m/z".
//!
//! - **Column Visibility**: `Advanced`, `AdvancedWhen` and `Obsolete`
//!   attributes decide what a default report layout shows.
//!
//! - **Robust Ordering**: Any two values sort deterministically, following
//!   link values and falling back to text when no natural order exists.
//!
//! ## Quick Start
//!
//! ```rust
//! use mzbind::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     TypeDef::class("UnitInfo")
//!         .property(PropertyDef::new("Name", DataType::TEXT))
//!         .property(PropertyDef::new("Symbol", DataType::TEXT))
//!         .build(),
//! )?;
//! registry.register(
//!     TypeDef::class("Measurement")
//!         .property(PropertyDef::new("Id", DataType::INT))
//!         .property(PropertyDef::new("Value", DataType::FLOAT))
//!         .property(PropertyDef::new("Unit", DataType::optional(DataType::record("UnitInfo"))))
//!         .build(),
//! )?;
//!
//! let schema = DataSchema::new(registry);
//! let columns = schema.leaf_columns(&DataType::record("Measurement"), &ColumnOptions::default());
//! let paths: Vec<String> = columns.iter().map(|c| c.path()).collect();
//! assert_eq!(paths, ["Id", "Value", "Unit.Name", "Unit.Symbol"]);
//!
//! let row = Value::from(
//!     Record::new("Measurement")
//!         .with("Id", 1)
//!         .with("Value", 0.25)
//!         .with("Unit", Record::new("UnitInfo").with("Name", "dalton").with("Symbol", "Da")),
//! );
//! assert_eq!(columns[3].get_value(&row), Value::from("Da"));
//! # Ok::<(), mzbind::registry::SchemaError>(())
//! ```
//!
//! ## Schema Files
//!
//! Registries can also be declared in TOML and loaded with
//! [`config::SchemaConfig`]:
//!
//! ```toml
//! [[types]]
//! name = "Peptide"
//!
//! [[types.properties]]
//! name = "Precursor"
//! type = "Precursor"
//! child_display_name = "Precursor {0}"
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`types`]: Declared types (`DataType`) and their textual form
//! - [`value`]: Runtime values, records and link values
//! - [`attributes`]: Declarative attributes on types and properties
//! - [`registry`]: Type registry, property discovery and validation
//! - [`property`]: Direct and chained property descriptors
//! - [`wrapper`]: Optional / link wrapper resolution
//! - [`collection`]: Collection shapes for one-to-many columns
//! - [`column`]: Column descriptor trees
//! - [`schema`]: The `DataSchema` facade
//! - [`config`]: TOML schema files

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod attributes;
pub mod collection;
pub mod column;
pub mod config;
pub mod property;
pub mod registry;
pub mod schema;
pub mod types;
pub mod value;
pub mod wrapper;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::attributes::{Attribute, Attributes, OneToMany};
    pub use crate::collection::CollectionInfo;
    pub use crate::column::ColumnDescriptor;
    pub use crate::config::SchemaConfig;
    pub use crate::property::PropertyDescriptor;
    pub use crate::registry::{
        validate_registry, PropertyDef, SchemaError, TypeDef, TypeKind, TypeRegistry, ValidationReport,
    };
    pub use crate::schema::{
        compare_values, ColumnOptions, DataSchema, DefaultPolicy, HumanizedCaptions, SchemaPolicy,
    };
    pub use crate::types::{DataType, ScalarKind};
    pub use crate::value::{EnumValue, LinkValue, LinkedValue, Record, Value};
}
