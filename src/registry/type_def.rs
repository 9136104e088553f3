use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Attributes, OneToMany};
use crate::property::{Getter, PropertyDescriptor};
use crate::types::DataType;
use crate::value::Value;

/// Whether a registered type is a class or an interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Concrete type; inherits the properties of its base type
    #[default]
    Class,
    /// Abstract contract; inherits the properties of the interfaces it extends
    Interface,
}

/// One registered property: name, type, attributes and accessor.
#[derive(Clone)]
pub struct PropertyDef {
    pub(crate) name: String,
    pub(crate) data_type: DataType,
    pub(crate) browsable: bool,
    pub(crate) attributes: Attributes,
    pub(crate) getter: Option<Getter>,
}

impl PropertyDef {
    /// Browsable property read from the record field of the same name
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            browsable: true,
            attributes: Attributes::new(),
            getter: None,
        }
    }

    /// Hide the property from listings. The name still shadows same-named
    /// properties of base types.
    pub fn hidden(mut self) -> Self {
        self.browsable = false;
        self
    }

    /// Set the browsable flag
    pub fn browsable(mut self, browsable: bool) -> Self {
        self.browsable = browsable;
        self
    }

    /// Attach an attribute
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Attach a `DisplayName` attribute
    pub fn display_name(self, name: impl Into<String>) -> Self {
        self.attribute(Attribute::DisplayName(name.into()))
    }

    /// Attach an `Advanced` attribute
    pub fn advanced(self, advanced: bool) -> Self {
        self.attribute(Attribute::Advanced(advanced))
    }

    /// Attach an `Obsolete` attribute
    pub fn obsolete(self) -> Self {
        self.attribute(Attribute::Obsolete)
    }

    /// Attach an `AdvancedWhen` attribute
    pub fn advanced_when(self, ancestor_type: DataType) -> Self {
        self.attribute(Attribute::AdvancedWhen(ancestor_type))
    }

    /// Attach a `OneToMany` attribute
    pub fn one_to_many(self, settings: OneToMany) -> Self {
        self.attribute(Attribute::OneToMany(settings))
    }

    /// Attach a `ChildDisplayName` attribute
    pub fn child_display_name(self, format: impl Into<String>) -> Self {
        self.attribute(Attribute::ChildDisplayName(format.into()))
    }

    /// Read the value with a custom accessor instead of a field lookup
    pub fn getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared property type
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Declared attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Browsable flag
    pub fn is_browsable(&self) -> bool {
        self.browsable
    }

    pub(crate) fn descriptor(&self, declaring_type: &DataType) -> PropertyDescriptor {
        PropertyDescriptor::direct(
            self.name.clone(),
            declaring_type.clone(),
            self.data_type.clone(),
            self.browsable,
            self.attributes.clone(),
            self.getter.clone(),
        )
    }
}

impl fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .field("browsable", &self.browsable)
            .field("attributes", &self.attributes)
            .field("custom_getter", &self.getter.is_some())
            .finish()
    }
}

/// A registered class or interface
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) base: Option<String>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) attributes: Attributes,
    pub(crate) properties: Vec<PropertyDef>,
}

impl TypeDef {
    /// Start building a class
    pub fn class(name: impl Into<String>) -> TypeDefBuilder {
        TypeDefBuilder::new(name, TypeKind::Class)
    }

    /// Start building an interface
    pub fn interface(name: impl Into<String>) -> TypeDefBuilder {
        TypeDefBuilder::new(name, TypeKind::Interface)
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class or interface
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Base type name (classes)
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Implemented (classes) or extended (interfaces) interface names
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Type-level attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Properties declared on this type, in declaration order
    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    /// The [`DataType`] referring to this type
    pub fn data_type(&self) -> DataType {
        DataType::record(&self.name)
    }
}

/// Builder for [`TypeDef`]
#[derive(Debug)]
pub struct TypeDefBuilder {
    def: TypeDef,
}

impl TypeDefBuilder {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            def: TypeDef {
                name: name.into(),
                kind,
                base: None,
                interfaces: Vec::new(),
                attributes: Attributes::new(),
                properties: Vec::new(),
            },
        }
    }

    /// Set the base type
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.def.base = Some(base.into());
        self
    }

    /// Add an implemented or extended interface
    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.def.interfaces.push(interface.into());
        self
    }

    /// Attach a type-level attribute
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.def.attributes.push(attribute);
        self
    }

    /// Attach a type-level `DisplayName`
    pub fn display_name(self, name: impl Into<String>) -> Self {
        self.attribute(Attribute::DisplayName(name.into()))
    }

    /// Declare a property
    pub fn property(mut self, property: PropertyDef) -> Self {
        self.def.properties.push(property);
        self
    }

    /// Finish the definition
    pub fn build(self) -> TypeDef {
        self.def
    }
}
