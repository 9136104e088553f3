//! Collection shapes of types, used for one-to-many columns.

use crate::types::DataType;
use crate::value::Value;

/// Name of the synthetic key column beneath a collection column
pub const KEY_COLUMN: &str = "Key";
/// Name of the synthetic item column beneath a collection column
pub const VALUE_COLUMN: &str = "Value";

/// How a type behaves as a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    key_type: DataType,
    value_type: DataType,
    mapping: bool,
}

impl CollectionInfo {
    /// Describes `data_type` as a collection, or `None` for non-collections.
    ///
    /// Sequences are keyed by their `int` index.
    pub fn for_type(data_type: &DataType) -> Option<Self> {
        match data_type {
            DataType::Map(key, value) => Some(Self {
                key_type: (**key).clone(),
                value_type: (**value).clone(),
                mapping: true,
            }),
            DataType::List(item) => Some(Self {
                key_type: DataType::INT,
                value_type: (**item).clone(),
                mapping: false,
            }),
            _ => None,
        }
    }

    /// Returns true for mappings (key + value)
    pub fn is_mapping(&self) -> bool {
        self.mapping
    }

    /// Key type; `int` for sequences
    pub fn key_type(&self) -> &DataType {
        &self.key_type
    }

    /// Item (element or mapped value) type
    pub fn value_type(&self) -> &DataType {
        &self.value_type
    }

    /// Key/item pairs of a runtime collection.
    ///
    /// Lists are keyed by position. Values that are not collections yield no
    /// items.
    pub fn items(&self, value: &Value) -> Vec<(Value, Value)> {
        match value {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| (Value::Int(i as i64), item.clone()))
                .collect(),
            Value::Map(entries) => entries.clone(),
            _ => Vec::new(),
        }
    }
}
