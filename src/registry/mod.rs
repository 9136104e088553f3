//! # Schema Registry
//!
//! The registry replaces runtime reflection: every record type that can appear
//! in a report registers a [`TypeDef`] with its properties, attributes and
//! accessors. The schema service asks the registry which properties a type has.
//!
//! ## Property Discovery
//!
//! [`TypeRegistry::list_properties`] walks a type's own properties first, then
//! the interfaces it extends (for interfaces) or its base type (for classes).
//! Names accumulate in a caller-supplied set, so a property redeclared on a
//! derived type hides the base declaration. Non-browsable properties claim
//! their name but are not returned.
//!
//! ```
//! use std::collections::HashSet;
//! use mzbind::registry::{PropertyDef, TypeDef, TypeRegistry};
//! use mzbind::types::DataType;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     TypeDef::class("Entity")
//!         .property(PropertyDef::new("Id", DataType::INT))
//!         .build(),
//! )?;
//! registry.register(
//!     TypeDef::class("Peptide")
//!         .base("Entity")
//!         .property(PropertyDef::new("Sequence", DataType::TEXT))
//!         .build(),
//! )?;
//!
//! let names: Vec<_> = registry
//!     .list_properties(&DataType::record("Peptide"), &mut HashSet::new())
//!     .iter()
//!     .map(|p| p.name().to_string())
//!     .collect();
//! assert_eq!(names, ["Sequence", "Id"]);
//! # Ok::<(), mzbind::registry::SchemaError>(())
//! ```

mod error;
mod report;
mod type_def;
mod validation;


use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::property::PropertyDescriptor;
use crate::types::DataType;

pub use error::SchemaError;
pub use report::{CheckStatus, TypeFindings, ValidationCheck, ValidationReport};
pub use type_def::{PropertyDef, TypeDef, TypeDefBuilder, TypeKind};
pub use validation::validate_registry;

/// Registered record types, in registration order
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. Names must be unique, and usable in the type text
    /// form (so not `int`, `List` and the like).
    pub fn register(&mut self, def: TypeDef) -> Result<(), SchemaError> {
        DataType::try_record(&def.name)?;
        if self.index.contains_key(&def.name) {
            return Err(SchemaError::DuplicateType(def.name));
        }
        trace!("Registering type '{}' ({} properties)", def.name, def.properties.len());
        self.index.insert(def.name.clone(), self.types.len());
        self.types.push(def);
        Ok(())
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// Returns true if a type with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over registered types in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Lists the browsable properties visible on `data_type`, skipping names
    /// already in `seen` and adding every name encountered to it.
    ///
    /// Scalars, wrappers, collections and unregistered types have no declared
    /// properties.
    pub fn list_properties(
        &self,
        data_type: &DataType,
        seen: &mut HashSet<String>,
    ) -> Vec<PropertyDescriptor> {
        let mut visited = HashSet::new();
        let mut properties = Vec::new();
        self.collect_properties(data_type, seen, &mut visited, &mut properties);
        properties
    }

    fn collect_properties(
        &self,
        data_type: &DataType,
        seen: &mut HashSet<String>,
        visited: &mut HashSet<String>,
        properties: &mut Vec<PropertyDescriptor>,
    ) {
        let Some(name) = data_type.record_name() else {
            return;
        };
        // Inheritance cycles are reported by validation; here they just end the walk
        if !visited.insert(name.to_string()) {
            return;
        }
        let Some(def) = self.get(name) else {
            debug!("Type '{}' is not registered; it has no properties", name);
            return;
        };

        for property in &def.properties {
            if !seen.insert(property.name.clone()) {
                continue;
            }
            if property.browsable {
                properties.push(property.descriptor(data_type));
            }
        }

        match def.kind {
            TypeKind::Interface => {
                for interface in &def.interfaces {
                    self.collect_properties(&DataType::record(interface), seen, visited, properties);
                }
            }
            TypeKind::Class => {
                if let Some(base) = &def.base {
                    self.collect_properties(&DataType::record(base), seen, visited, properties);
                }
            }
        }
    }

    /// Returns true if a value of type `from` can be used where `to` is
    /// expected: the types are equal, or `from` is a record whose base chain
    /// or implemented interfaces reach `to`.
    pub fn is_assignable(&self, from: &DataType, to: &DataType) -> bool {
        if from == to {
            return true;
        }
        match (from.record_name(), to.record_name()) {
            (Some(from), Some(to)) => self.supertypes(from).iter().any(|t| t == to),
            _ => false,
        }
    }

    /// All base types and interfaces reachable from `name`, nearest first.
    /// Unregistered names end their branch; cycles are visited once.
    pub fn supertypes(&self, name: &str) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(name);
        let mut found = Vec::new();
        let mut queue = vec![name];
        while !queue.is_empty() {
            let mut next = Vec::new();
            for current in queue {
                let Some(def) = self.get(current) else {
                    continue;
                };
                for parent in def.base.iter().chain(def.interfaces.iter()) {
                    if visited.insert(parent.as_str()) {
                        found.push(parent.clone());
                        next.push(parent.as_str());
                    }
                }
            }
            queue = next;
        }
        found
    }
}
