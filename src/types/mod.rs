//! # Data Types
//!
//! The type model that stands in for runtime reflection. Every property in the
//! schema registry declares a [`DataType`], and every question the schema
//! service answers ("is this a leaf?", "is this a wrapper?", "is this a
//! collection?") is a question about a `DataType`.
//!
//! ## Textual Form
//!
//! Types have a compact textual form used by TOML schema files and CLI output:
//!
//! | Text | Type |
//! |------|------|
//! | `bool`, `int`, `float`, `text`, `datetime` | scalars (`string` is accepted for `text`) |
//! | `Enum<Polarity>` | enumeration |
//! | `Peptide` | registered record (class or interface) |
//! | `Optional<T>` | optional-value wrapper |
//! | `Link<T>` | link-value wrapper |
//! | `List<T>` | sequence |
//! | `Map<K, V>` | mapping |

mod parse;


use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

pub use parse::TypeParseError;

/// Built-in leaf value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// Boolean flag
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// UTF-8 text
    Text,
    /// UTC date/time
    DateTime,
}

impl ScalarKind {
    /// Keyword used in the textual type form
    pub fn keyword(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Text => "text",
            ScalarKind::DateTime => "datetime",
        }
    }

    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "bool" => Some(ScalarKind::Bool),
            "int" => Some(ScalarKind::Int),
            "float" => Some(ScalarKind::Float),
            "text" | "string" => Some(ScalarKind::Text),
            "datetime" => Some(ScalarKind::DateTime),
            _ => None,
        }
    }
}

/// A declared type: the shape of a property or of a root report row.
///
/// Record and enum types are referred to by name; the [`TypeRegistry`](crate::registry::TypeRegistry)
/// resolves record names to their definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DataType {
    /// Built-in leaf value
    Scalar(ScalarKind),
    /// Enumeration, ordered by member ordinal
    Enum(Arc<str>),
    /// Registered class or interface
    Record(Arc<str>),
    /// Optional-value wrapper around a payload type
    Optional(Box<DataType>),
    /// Link-value wrapper around a payload type
    Link(Box<DataType>),
    /// Sequence of items
    List(Box<DataType>),
    /// Mapping from keys to values
    Map(Box<DataType>, Box<DataType>),
}

impl DataType {
    /// `bool`
    pub const BOOL: DataType = DataType::Scalar(ScalarKind::Bool);
    /// `int`
    pub const INT: DataType = DataType::Scalar(ScalarKind::Int);
    /// `float`
    pub const FLOAT: DataType = DataType::Scalar(ScalarKind::Float);
    /// `text`
    pub const TEXT: DataType = DataType::Scalar(ScalarKind::Text);
    /// `datetime`
    pub const DATETIME: DataType = DataType::Scalar(ScalarKind::DateTime);

    /// Reference to a registered record type.
    ///
    /// The name is not checked. Names spelled like built-in types (`int`,
    /// `string`, `List`, ...) or that are not identifiers have no text form
    /// that parses back; use [`DataType::try_record`] for names from outside
    /// the program.
    pub fn record(name: impl AsRef<str>) -> Self {
        DataType::Record(Arc::from(name.as_ref()))
    }

    /// Reference to a record type, rejecting names the text form cannot carry
    pub fn try_record(name: impl AsRef<str>) -> Result<Self, TypeParseError> {
        parse::check_type_name(name.as_ref(), false)?;
        Ok(Self::record(name))
    }

    /// Reference to an enumeration. Like [`DataType::record`], the name is
    /// not checked; see [`DataType::try_enumeration`].
    pub fn enumeration(name: impl AsRef<str>) -> Self {
        DataType::Enum(Arc::from(name.as_ref()))
    }

    /// Reference to an enumeration, rejecting names that are not identifiers
    pub fn try_enumeration(name: impl AsRef<str>) -> Result<Self, TypeParseError> {
        parse::check_type_name(name.as_ref(), true)?;
        Ok(Self::enumeration(name))
    }

    /// `Optional<payload>`
    pub fn optional(payload: DataType) -> Self {
        DataType::Optional(Box::new(payload))
    }

    /// `Link<payload>`
    pub fn link(payload: DataType) -> Self {
        DataType::Link(Box::new(payload))
    }

    /// `List<item>`
    pub fn list(item: DataType) -> Self {
        DataType::List(Box::new(item))
    }

    /// `Map<key, value>`
    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map(Box::new(key), Box::new(value))
    }

    /// Checks that every record and enumeration name in the type survives the
    /// text form, so that printing and parsing give back the same type.
    pub fn check_names(&self) -> Result<(), TypeParseError> {
        match self {
            DataType::Scalar(_) => Ok(()),
            DataType::Record(name) => parse::check_type_name(name, false),
            DataType::Enum(name) => parse::check_type_name(name, true),
            DataType::Optional(inner) | DataType::Link(inner) | DataType::List(inner) => {
                inner.check_names()
            }
            DataType::Map(key, value) => {
                key.check_names()?;
                value.check_names()
            }
        }
    }

    /// Returns true for leaf types that never have sub-properties
    /// (scalars and enumerations).
    pub fn is_scalar(&self) -> bool {
        matches!(self, DataType::Scalar(_) | DataType::Enum(_))
    }

    /// Returns true for `Optional<_>` and `Link<_>`.
    pub fn is_wrapper(&self) -> bool {
        matches!(self, DataType::Optional(_) | DataType::Link(_))
    }

    /// Name of the record type, if this is one
    pub fn record_name(&self) -> Option<&str> {
        match self {
            DataType::Record(name) => Some(name),
            _ => None,
        }
    }

    /// Simple name of the type, without type arguments.
    pub fn name(&self) -> &str {
        match self {
            DataType::Scalar(kind) => kind.keyword(),
            DataType::Enum(name) | DataType::Record(name) => name,
            DataType::Optional(_) => "Optional",
            DataType::Link(_) => "Link",
            DataType::List(_) => "List",
            DataType::Map(_, _) => "Map",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Scalar(kind) => f.write_str(kind.keyword()),
            DataType::Enum(name) => write!(f, "Enum<{}>", name),
            DataType::Record(name) => f.write_str(name),
            DataType::Optional(inner) => write!(f, "Optional<{}>", inner),
            DataType::Link(inner) => write!(f, "Link<{}>", inner),
            DataType::List(item) => write!(f, "List<{}>", item),
            DataType::Map(key, value) => write!(f, "Map<{}, {}>", key, value),
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.check_names().map_err(serde::ser::Error::custom)?;
        serializer.collect_str(self)
    }
}

impl FromStr for DataType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_data_type(s)
    }
}

impl TryFrom<String> for DataType {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.to_string()
    }
}

impl From<ScalarKind> for DataType {
    fn from(kind: ScalarKind) -> Self {
        DataType::Scalar(kind)
    }
}
