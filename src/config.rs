//! TOML schema files.
//!
//! A registry can be declared in a file instead of code:
//!
//! ```toml
//! [[types]]
//! name = "Precursor"
//!
//! [[types.properties]]
//! name = "Mz"
//! type = "float"
//! display_name = "m/z"
//!
//! [[types]]
//! name = "Transition"
//!
//! [[types.properties]]
//! name = "Precursor"
//! type = "Optional<Precursor>"
//! child_display_name = "Precursor {0}"
//! ```
//!
//! Properties loaded from files are read as record fields of the same name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, OneToMany};
use crate::registry::{PropertyDef, SchemaError, TypeDef, TypeKind, TypeRegistry};
use crate::types::DataType;

/// Root of a schema file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Declared types, registered in file order
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

/// One `[[types]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Type name
    pub name: String,

    /// `class` (default) or `interface`
    #[serde(default)]
    pub kind: TypeKind,

    /// Base class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Implemented or extended interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,

    /// Type-level caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Declared properties
    #[serde(default)]
    pub properties: Vec<PropertyConfig>,
}

/// One `[[types.properties]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Property name
    pub name: String,

    /// Property type in its textual form, e.g. `List<Transition>`
    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Offered as a column
    #[serde(default = "default_browsable")]
    pub browsable: bool,

    /// Caption override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Explicit advanced flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<bool>,

    /// Kept for compatibility only
    #[serde(default)]
    pub obsolete: bool,

    /// Ancestor types beneath which the column is advanced
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advanced_when: Vec<DataType>,

    /// Format for descendant captions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_display_name: Option<String>,

    /// One-to-many relationship settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_to_many: Option<OneToMany>,
}

fn default_browsable() -> bool {
    true
}

impl SchemaConfig {
    /// Load a schema file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a schema from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(content)?)
    }

    /// Register every declared type.
    pub fn into_registry(self) -> Result<TypeRegistry, SchemaError> {
        let mut registry = TypeRegistry::new();
        for def in self.types {
            registry.register(def.into_type_def())?;
        }
        Ok(registry)
    }
}

impl TypeConfig {
    fn into_type_def(self) -> TypeDef {
        let mut builder = match self.kind {
            TypeKind::Class => TypeDef::class(self.name),
            TypeKind::Interface => TypeDef::interface(self.name),
        };
        if let Some(base) = self.base {
            builder = builder.base(base);
        }
        for interface in self.interfaces {
            builder = builder.interface(interface);
        }
        if let Some(display_name) = self.display_name {
            builder = builder.display_name(display_name);
        }
        for property in self.properties {
            builder = builder.property(property.into_property_def());
        }
        builder.build()
    }
}

impl PropertyConfig {
    fn into_property_def(self) -> PropertyDef {
        let mut def = PropertyDef::new(self.name, self.data_type).browsable(self.browsable);
        if let Some(display_name) = self.display_name {
            def = def.display_name(display_name);
        }
        if self.obsolete {
            def = def.attribute(Attribute::Obsolete);
        }
        if let Some(advanced) = self.advanced {
            def = def.advanced(advanced);
        }
        for ancestor in self.advanced_when {
            def = def.advanced_when(ancestor);
        }
        if let Some(format) = self.child_display_name {
            def = def.child_display_name(format);
        }
        if let Some(settings) = self.one_to_many {
            def = def.one_to_many(settings);
        }
        def
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCHEMA: &str = r#"
        [[types]]
        name = "Entity"

        [[types.properties]]
        name = "Id"
        type = "int"

        [[types]]
        name = "Peptide"
        base = "Entity"
        display_name = "Peptide Match"

        [[types.properties]]
        name = "Sequence"
        type = "string"

        [[types.properties]]
        name = "Results"
        type = "List<PeptideResult>"
        one_to_many = { item_display_name = "Result", foreign_key = "Peptide" }

        [[types.properties]]
        name = "Locator"
        type = "text"
        browsable = false

        [[types]]
        name = "PeptideResult"

        [[types.properties]]
        name = "Peptide"
        type = "Link<Peptide>"

        [[types.properties]]
        name = "Area"
        type = "Optional<float>"
        advanced_when = ["Peptide"]

        [[types.properties]]
        name = "Ms1Area"
        type = "float"
        obsolete = true
        advanced = false
    "#;

    #[test]
    fn test_parse_schema() {
        let config = SchemaConfig::from_str(SCHEMA).unwrap();
        assert_eq!(config.types.len(), 3);

        let peptide = &config.types[1];
        assert_eq!(peptide.kind, TypeKind::Class);
        assert_eq!(peptide.base.as_deref(), Some("Entity"));
        assert_eq!(peptide.properties[0].data_type, DataType::TEXT);
        assert!(!peptide.properties[2].browsable);

        let results = &peptide.properties[1];
        assert_eq!(results.data_type, DataType::list(DataType::record("PeptideResult")));
        let settings = results.one_to_many.as_ref().unwrap();
        assert_eq!(settings.item_display_name.as_deref(), Some("Result"));
        assert_eq!(settings.index_display_name, None);
    }

    #[test]
    fn test_into_registry() {
        let registry = SchemaConfig::from_str(SCHEMA).unwrap().into_registry().unwrap();
        assert_eq!(registry.len(), 3);

        let peptide = registry.get("Peptide").unwrap();
        assert_eq!(peptide.attributes().display_name(), Some("Peptide Match"));
        assert_eq!(peptide.base(), Some("Entity"));

        let ms1 = &registry.get("PeptideResult").unwrap().properties()[2];
        assert!(ms1.attributes().is_obsolete());
        assert_eq!(ms1.attributes().advanced(), Some(false));

        let area = &registry.get("PeptideResult").unwrap().properties()[1];
        assert_eq!(
            area.attributes().advanced_when().collect::<Vec<_>>(),
            [&DataType::record("Peptide")]
        );
    }

    #[test]
    fn test_interface_kind() {
        let config = SchemaConfig::from_str(
            r#"
            [[types]]
            name = "Annotated"
            kind = "interface"
            "#,
        )
        .unwrap();
        let registry = config.into_registry().unwrap();
        assert_eq!(registry.get("Annotated").unwrap().kind(), TypeKind::Interface);
    }

    #[test]
    fn test_empty_schema() {
        let registry = SchemaConfig::from_str("").unwrap().into_registry().unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_type_expression() {
        let err = SchemaConfig::from_str(
            r#"
            [[types]]
            name = "Broken"

            [[types.properties]]
            name = "Values"
            type = "List<int"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::TomlError(_)));
    }

    #[test]
    fn test_duplicate_types() {
        let err = SchemaConfig::from_str(
            r#"
            [[types]]
            name = "Peptide"

            [[types]]
            name = "Peptide"
            "#,
        )
        .unwrap()
        .into_registry()
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateType(_)));
    }

    #[test]
    fn test_reserved_type_name() {
        let err = SchemaConfig::from_str(
            r#"
            [[types]]
            name = "List"
            "#,
        )
        .unwrap()
        .into_registry()
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidType(_)));
        assert!(err.to_string().contains("'List' cannot be used as a type name"));
    }

    #[test]
    fn test_reserved_names_are_not_written() {
        let mut config = SchemaConfig::from_str(SCHEMA).unwrap();
        config.types[0].properties[0].data_type = DataType::record("string");
        assert!(toml::to_string(&config).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SCHEMA.as_bytes()).unwrap();

        let config = SchemaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.types[0].name, "Entity");

        let missing = SchemaConfig::from_file(Path::new("/nonexistent/schema.toml"));
        assert!(matches!(missing, Err(SchemaError::IoError(_))));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = SchemaConfig::from_str(SCHEMA).unwrap();
        let text = toml::to_string(&config).unwrap();
        let reparsed = SchemaConfig::from_str(&text).unwrap();
        assert_eq!(reparsed.types.len(), config.types.len());
        assert_eq!(
            reparsed.types[2].properties[1].data_type,
            DataType::optional(DataType::FLOAT)
        );
    }
}
