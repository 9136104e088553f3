//! # Property Descriptors
//!
//! A [`PropertyDescriptor`] is the schema's notion of one readable property of
//! a type: name, declaring type, property type, attributes, browsable flag and
//! an accessor.
//!
//! Two kinds exist:
//!
//! - **Direct**: a property registered on a type. Its accessor is the
//!   registered getter, or a record field lookup by name.
//! - **Chained**: a parent descriptor composed with an inner one. Reading a
//!   chained property reads the parent first and the inner property off the
//!   result. Chained descriptors are how the schema sees through
//!   `Optional<T>` and `Link<T>` wrappers.
//!
//! Descriptors are cheap to clone and safe to share between threads.

use std::fmt;
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::types::DataType;
use crate::value::Value;

/// Accessor reading a property value off an instance
pub type Getter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Metadata and accessor for one property of a type
#[derive(Clone)]
pub struct PropertyDescriptor(Arc<Descriptor>);

enum Descriptor {
    Direct(DirectProperty),
    Chained {
        name: String,
        parent: PropertyDescriptor,
        inner: PropertyDescriptor,
    },
}

struct DirectProperty {
    name: String,
    declaring_type: DataType,
    property_type: DataType,
    browsable: bool,
    attributes: Attributes,
    getter: Option<Getter>,
}

impl PropertyDescriptor {
    /// Create a direct property descriptor.
    ///
    /// Without a getter the value is read as the record field named `name`.
    pub fn direct(
        name: impl Into<String>,
        declaring_type: DataType,
        property_type: DataType,
        browsable: bool,
        attributes: Attributes,
        getter: Option<Getter>,
    ) -> Self {
        Self(Arc::new(Descriptor::Direct(DirectProperty {
            name: name.into(),
            declaring_type,
            property_type,
            browsable,
            attributes,
            getter,
        })))
    }

    /// Compose `parent` with `inner` under the given name.
    pub fn chained(name: impl Into<String>, parent: PropertyDescriptor, inner: PropertyDescriptor) -> Self {
        Self(Arc::new(Descriptor::Chained {
            name: name.into(),
            parent,
            inner,
        }))
    }

    /// Property name
    pub fn name(&self) -> &str {
        match &*self.0 {
            Descriptor::Direct(direct) => &direct.name,
            Descriptor::Chained { name, .. } => name,
        }
    }

    /// Type the property was declared on. For chained properties this is the
    /// wrapper type the chain starts from.
    pub fn declaring_type(&self) -> &DataType {
        match &*self.0 {
            Descriptor::Direct(direct) => &direct.declaring_type,
            Descriptor::Chained { parent, .. } => parent.declaring_type(),
        }
    }

    /// Type of the property value
    pub fn property_type(&self) -> &DataType {
        match &*self.0 {
            Descriptor::Direct(direct) => &direct.property_type,
            Descriptor::Chained { inner, .. } => inner.property_type(),
        }
    }

    /// Browsable flag declared at registration
    pub fn is_browsable(&self) -> bool {
        match &*self.0 {
            Descriptor::Direct(direct) => direct.browsable,
            Descriptor::Chained { inner, .. } => inner.is_browsable(),
        }
    }

    /// Declared attributes
    pub fn attributes(&self) -> &Attributes {
        match &*self.0 {
            Descriptor::Direct(direct) => &direct.attributes,
            Descriptor::Chained { inner, .. } => inner.attributes(),
        }
    }

    /// Returns true for chained descriptors
    pub fn is_chained(&self) -> bool {
        matches!(&*self.0, Descriptor::Chained { .. })
    }

    /// Parent of a chained descriptor
    pub fn chain_parent(&self) -> Option<&PropertyDescriptor> {
        match &*self.0 {
            Descriptor::Chained { parent, .. } => Some(parent),
            Descriptor::Direct(_) => None,
        }
    }

    /// Reads the property value off `instance`.
    pub fn get_value(&self, instance: &Value) -> Value {
        match &*self.0 {
            Descriptor::Direct(direct) => match &direct.getter {
                Some(getter) => getter(instance),
                None => instance.field(&direct.name),
            },
            Descriptor::Chained { parent, inner, .. } => {
                inner.get_value(&parent.get_value(instance))
            }
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Descriptor::Direct(direct) => f
                .debug_struct("DirectProperty")
                .field("name", &direct.name)
                .field("declaring_type", &direct.declaring_type)
                .field("property_type", &direct.property_type)
                .field("browsable", &direct.browsable)
                .field("attributes", &direct.attributes)
                .finish_non_exhaustive(),
            Descriptor::Chained {
                name,
                parent,
                inner,
            } => f
                .debug_struct("ChainedProperty")
                .field("name", name)
                .field("parent", parent)
                .field("inner", inner)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attribute;
    use crate::value::Record;

    fn mz_property() -> PropertyDescriptor {
        PropertyDescriptor::direct(
            "Mz",
            DataType::record("Precursor"),
            DataType::FLOAT,
            true,
            [Attribute::DisplayName("m/z".to_string())].into_iter().collect(),
            None,
        )
    }

    #[test]
    fn test_direct_reads_record_field() {
        let precursor = Value::from(Record::new("Precursor").with("Mz", 445.12));
        assert_eq!(mz_property().get_value(&precursor), Value::Float(445.12));
        assert_eq!(mz_property().get_value(&Value::Null), Value::Null);
    }

    #[test]
    fn test_custom_getter() {
        let neutral_mass = PropertyDescriptor::direct(
            "NeutralMass",
            DataType::record("Precursor"),
            DataType::FLOAT,
            true,
            Attributes::new(),
            Some(Arc::new(|v: &Value| match (v.field("Mz"), v.field("Charge")) {
                (Value::Float(mz), Value::Int(z)) => Value::Float(mz * z as f64),
                _ => Value::Null,
            })),
        );
        let precursor = Value::from(Record::new("Precursor").with("Mz", 400.0).with("Charge", 2));
        assert_eq!(neutral_mass.get_value(&precursor), Value::Float(800.0));
    }

    #[test]
    fn test_chained_takes_inner_metadata() {
        let parent = PropertyDescriptor::direct(
            "Precursor",
            DataType::record("Transition"),
            DataType::record("Precursor"),
            true,
            Attributes::new(),
            None,
        );
        let chained = PropertyDescriptor::chained("Mz", parent, mz_property());

        assert!(chained.is_chained());
        assert_eq!(chained.name(), "Mz");
        assert_eq!(chained.property_type(), &DataType::FLOAT);
        assert_eq!(chained.declaring_type(), &DataType::record("Transition"));
        assert_eq!(chained.attributes().display_name(), Some("m/z"));

        let transition = Value::from(
            Record::new("Transition").with("Precursor", Record::new("Precursor").with("Mz", 512.3)),
        );
        assert_eq!(chained.get_value(&transition), Value::Float(512.3));
    }
}
