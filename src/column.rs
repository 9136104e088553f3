//! # Column Descriptors
//!
//! A [`ColumnDescriptor`] is one node of a report's column tree. The root
//! column stands for the row type itself and has no name; every other column
//! is either a property of its parent's type or, beneath a collection column,
//! the synthetic `Key` / `Value` side of a one-to-many relationship.
//!
//! ```text
//! Peptide                      (root, no name)
//! ├── Sequence
//! ├── Precursor                ChildDisplayName("Precursor {0}")
//! │   └── Mz                   -> "Precursor Mz"
//! └── Results                  List<PeptideResult>, OneToMany(...)
//!     ├── Key                  (index)
//!     └── Value                (item)
//!         └── Area
//! ```
//!
//! Trees are immutable once built. Children hold their parent; parents never
//! hold children, so columns can be created on demand and shared freely.

use std::fmt;
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::collection::{CollectionInfo, VALUE_COLUMN};
use crate::property::PropertyDescriptor;
use crate::types::DataType;
use crate::value::Value;
use crate::wrapper::wrapped_value_type;

static NO_ATTRIBUTES: Attributes = Attributes::new();

/// One node of a display column tree
#[derive(Clone)]
pub struct ColumnDescriptor(Arc<ColumnNode>);

struct ColumnNode {
    name: Option<String>,
    parent: Option<ColumnDescriptor>,
    property_type: DataType,
    property_descriptor: Option<PropertyDescriptor>,
    collection_info: Option<CollectionInfo>,
}

impl ColumnDescriptor {
    fn from_node(
        name: Option<String>,
        parent: Option<ColumnDescriptor>,
        property_type: DataType,
        property_descriptor: Option<PropertyDescriptor>,
    ) -> Self {
        let collection_info = CollectionInfo::for_type(wrapped_value_type(&property_type));
        Self(Arc::new(ColumnNode {
            name,
            parent,
            property_type,
            property_descriptor,
            collection_info,
        }))
    }

    /// Root column for rows of `row_type`
    pub fn root(row_type: DataType) -> Self {
        Self::from_node(None, None, row_type, None)
    }

    /// Column reading `property` off the values of `parent`
    pub fn property(parent: &ColumnDescriptor, property: PropertyDescriptor) -> Self {
        Self::from_node(
            Some(property.name().to_string()),
            Some(parent.clone()),
            property.property_type().clone(),
            Some(property),
        )
    }

    /// Synthetic `Key` or `Value` column beneath a collection column
    pub fn collection_part(parent: &ColumnDescriptor, name: &str, property_type: DataType) -> Self {
        Self::from_node(Some(name.to_string()), Some(parent.clone()), property_type, None)
    }

    /// Column name; `None` for root columns
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Enclosing column
    pub fn parent(&self) -> Option<&ColumnDescriptor> {
        self.0.parent.as_ref()
    }

    /// Type of the values in this column
    pub fn property_type(&self) -> &DataType {
        &self.0.property_type
    }

    /// Property this column was resolved from
    pub fn property_descriptor(&self) -> Option<&PropertyDescriptor> {
        self.0.property_descriptor.as_ref()
    }

    /// Collection shape of this column's type, if it is a collection
    pub fn collection_info(&self) -> Option<&CollectionInfo> {
        self.0.collection_info.as_ref()
    }

    /// Attributes declared on the column's property
    pub fn attributes(&self) -> &Attributes {
        match &self.0.property_descriptor {
            Some(property) => property.attributes(),
            None => &NO_ATTRIBUTES,
        }
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Number of ancestors
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Dotted property path from the root, e.g. `Precursor.Mz`
    pub fn path(&self) -> String {
        let mut names: Vec<&str> = std::iter::once(self)
            .chain(self.ancestors())
            .filter_map(|c| c.name())
            .collect();
        names.reverse();
        names.join(".")
    }

    /// The collection column this column belongs to: the parent for `Key` /
    /// `Value` columns, the grandparent for properties of a collection item.
    pub fn one_to_many_column(&self) -> Option<&ColumnDescriptor> {
        let parent = self.parent()?;
        if parent.collection_info().is_some() {
            return Some(parent);
        }
        if parent.name() != Some(VALUE_COLUMN) {
            return None;
        }
        parent
            .parent()
            .filter(|grandparent| grandparent.collection_info().is_some())
    }

    /// Returns true for the `Key` / `Value` columns directly beneath a
    /// collection column.
    pub fn is_collection_part(&self) -> bool {
        self.0.property_descriptor.is_none()
            && self
                .parent()
                .is_some_and(|parent| parent.collection_info().is_some())
    }

    /// Reads this column's value off a root row value.
    ///
    /// Values beneath a collection column are not resolved here (each
    /// collection item is its own report row) and read as `Null`.
    pub fn get_value(&self, row: &Value) -> Value {
        let Some(parent) = self.parent() else {
            return row.clone();
        };
        if parent.collection_info().is_some() {
            return Value::Null;
        }
        let parent_value = parent.get_value(row);
        match &self.0.property_descriptor {
            Some(property) => property.get_value(&parent_value),
            None => Value::Null,
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("path", &self.path())
            .field("property_type", &self.0.property_type)
            .finish()
    }
}

/// Iterator over a column's ancestors, nearest first
pub struct Ancestors<'a> {
    next: Option<&'a ColumnDescriptor>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ColumnDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
