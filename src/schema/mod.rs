//! # Schema Service
//!
//! [`DataSchema`] is the facade report grids talk to. Given a registered type it
//! answers:
//!
//! - which properties the type has, seeing through `Optional<T>` and
//!   `Link<T>` wrappers ([`DataSchema::property_descriptors`]);
//! - which columns a report over the type offers ([`DataSchema::child_columns`],
//!   [`DataSchema::leaf_columns`]);
//! - what each column is called ([`DataSchema::display_name`]) and whether it is
//!   shown by default ([`DataSchema::is_advanced`]);
//! - how two cell values sort ([`DataSchema::compare`]).
//!
//! Every operation is a pure function of the registry and its inputs, so a
//! schema can be shared between threads and its results cached freely.
//!
//! ## Example
//!
//! ```
//! use mzbind::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     TypeDef::class("Precursor")
//!         .property(PropertyDef::new("Mz", DataType::FLOAT).display_name("m/z"))
//!         .build(),
//! )?;
//! registry.register(
//!     TypeDef::class("Transition")
//!         .property(
//!             PropertyDef::new("Precursor", DataType::record("Precursor"))
//!                 .child_display_name("Precursor {0}"),
//!         )
//!         .build(),
//! )?;
//!
//! let schema = DataSchema::new(registry);
//! let column = schema
//!     .resolve_path(&DataType::record("Transition"), "Precursor.Mz")
//!     .unwrap();
//! assert_eq!(schema.display_name(&column), "Precursor m/z");
//! # Ok::<(), mzbind::registry::SchemaError>(())
//! ```

mod compare;
mod display;
mod policy;


use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use log::trace;

use crate::collection::{CollectionInfo, KEY_COLUMN, VALUE_COLUMN};
use crate::column::ColumnDescriptor;
use crate::property::PropertyDescriptor;
use crate::registry::TypeRegistry;
use crate::types::DataType;
use crate::value::Value;
use crate::wrapper::{self, find_wrapper_parent};

pub use compare::compare_values;
pub use policy::{DefaultPolicy, HumanizedCaptions, SchemaPolicy};

/// Options for expanding a column tree into leaf columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOptions {
    /// Maximum number of properties between the root and a leaf
    pub max_depth: usize,
    /// Include columns flagged advanced (and their descendants)
    pub include_advanced: bool,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            max_depth: 4,
            include_advanced: false,
        }
    }
}

/// Property inspection, captions and value ordering over a [`TypeRegistry`]
#[derive(Debug, Clone)]
pub struct DataSchema {
    registry: Arc<TypeRegistry>,
    policy: Arc<dyn SchemaPolicy>,
}

impl DataSchema {
    /// Schema over `registry` with the [`DefaultPolicy`]
    pub fn new(registry: impl Into<Arc<TypeRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            policy: Arc::new(DefaultPolicy),
        }
    }

    /// Replace the customization policy
    pub fn with_policy(mut self, policy: impl SchemaPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// The underlying registry
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Properties of `data_type`.
    ///
    /// `None`, scalars, collections and unregistered types have no properties.
    /// For `Optional<T>` and `Link<T>` the properties of `T` are returned, each
    /// chained through the wrapper's `Value` accessor.
    pub fn property_descriptors(&self, data_type: Option<&DataType>) -> Vec<PropertyDescriptor> {
        let Some(data_type) = data_type else {
            return Vec::new();
        };
        if let Some(wrapper) = find_wrapper_parent(data_type) {
            return self
                .property_descriptors(Some(wrapper.property_type()))
                .into_iter()
                .map(|inner| PropertyDescriptor::chained(inner.name().to_string(), wrapper.clone(), inner))
                .collect();
        }
        if data_type.is_scalar() {
            return Vec::new();
        }
        let properties = self.registry.list_properties(data_type, &mut HashSet::new());
        trace!("Type '{}' lists {} properties", data_type, properties.len());
        properties
    }

    /// The property of `data_type` named `name`
    pub fn property_descriptor(&self, data_type: &DataType, name: &str) -> Option<PropertyDescriptor> {
        self.property_descriptors(Some(data_type))
            .into_iter()
            .find(|property| property.name() == name)
    }

    /// Whether a property should be offered as a column. Delegates to the policy.
    pub fn is_browsable(&self, property: &PropertyDescriptor) -> bool {
        self.policy.is_browsable(property)
    }

    /// Collection shape of `data_type`
    pub fn collection_info(&self, data_type: &DataType) -> Option<CollectionInfo> {
        CollectionInfo::for_type(data_type)
    }

    /// Payload type of a wrapper, or `data_type` itself
    pub fn wrapped_value_type<'a>(&self, data_type: &'a DataType) -> &'a DataType {
        wrapper::wrapped_value_type(data_type)
    }

    /// Unwraps one level of link value
    pub fn unwrap_value(&self, value: &Value) -> Value {
        wrapper::unwrap_value(value)
    }

    /// Whether rows of `data_type` can be selected as report roots: true for
    /// link types.
    pub fn is_root_type_selectable(&self, data_type: &DataType) -> bool {
        matches!(data_type, DataType::Link(_))
    }

    /// Sort order of two cell values; see [`compare_values`].
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        compare_values(a, b)
    }

    /// Root column for rows of `row_type`
    pub fn root_column(&self, row_type: &DataType) -> ColumnDescriptor {
        ColumnDescriptor::root(row_type.clone())
    }

    /// Resolves the child of `parent` named `name`.
    ///
    /// Beneath a collection column the children are `Key` (the map key or the
    /// list index) and `Value` (the item); otherwise they are the properties of
    /// the parent's type.
    pub fn child_column(&self, parent: &ColumnDescriptor, name: &str) -> Option<ColumnDescriptor> {
        if let Some(info) = parent.collection_info() {
            return match name {
                KEY_COLUMN => Some(ColumnDescriptor::collection_part(parent, KEY_COLUMN, info.key_type().clone())),
                VALUE_COLUMN => Some(ColumnDescriptor::collection_part(
                    parent,
                    VALUE_COLUMN,
                    info.value_type().clone(),
                )),
                _ => None,
            };
        }
        self.property_descriptor(parent.property_type(), name)
            .map(|property| ColumnDescriptor::property(parent, property))
    }

    /// All browsable children of `parent`. Sequences only offer their `Value`
    /// column; mappings offer `Key` and `Value`.
    pub fn child_columns(&self, parent: &ColumnDescriptor) -> Vec<ColumnDescriptor> {
        if let Some(info) = parent.collection_info() {
            let mut parts = Vec::with_capacity(2);
            if info.is_mapping() {
                parts.push(ColumnDescriptor::collection_part(parent, KEY_COLUMN, info.key_type().clone()));
            }
            parts.push(ColumnDescriptor::collection_part(parent, VALUE_COLUMN, info.value_type().clone()));
            return parts;
        }
        self.property_descriptors(Some(parent.property_type()))
            .into_iter()
            .filter(|property| self.is_browsable(property))
            .map(|property| ColumnDescriptor::property(parent, property))
            .collect()
    }

    /// Resolves a dotted property path (`Precursor.Mz`) from a root type.
    /// An empty path is the root column.
    pub fn resolve_path(&self, row_type: &DataType, path: &str) -> Option<ColumnDescriptor> {
        let mut column = self.root_column(row_type);
        for name in path.split('.').filter(|name| !name.is_empty()) {
            column = self.child_column(&column, name)?;
        }
        Some(column)
    }

    /// Expands the column tree of `row_type` depth first and returns its
    /// leaves: columns without children, or columns at `max_depth`.
    ///
    /// Unless `include_advanced` is set, advanced columns are skipped together
    /// with their descendants.
    pub fn leaf_columns(&self, row_type: &DataType, options: &ColumnOptions) -> Vec<ColumnDescriptor> {
        let mut leaves = Vec::new();
        self.collect_leaves(&self.root_column(row_type), 0, options, &mut leaves);
        leaves
    }

    fn collect_leaves(
        &self,
        column: &ColumnDescriptor,
        depth: usize,
        options: &ColumnOptions,
        leaves: &mut Vec<ColumnDescriptor>,
    ) {
        let children: Vec<ColumnDescriptor> = if depth < options.max_depth {
            self.child_columns(column)
                .into_iter()
                .filter(|child| options.include_advanced || !self.is_advanced(child))
                .collect()
        } else {
            Vec::new()
        };
        if children.is_empty() {
            leaves.push(column.clone());
            return;
        }
        for child in &children {
            self.collect_leaves(child, depth + 1, options, leaves);
        }
    }
}
