//! # Wrapper Resolution
//!
//! `Optional<T>` and `Link<T>` are single-value wrappers: the schema treats
//! them as `T` with extra chrome. This module finds the wrapper's synthetic
//! `Value` accessor and unwraps runtime values.

use std::sync::Arc;

use crate::attributes::Attributes;
use crate::property::PropertyDescriptor;
use crate::types::DataType;
use crate::value::Value;

/// Name of the payload accessor of every wrapper type
pub const WRAPPER_VALUE_PROPERTY: &str = "Value";

/// Returns the payload accessor of a wrapper type, or `None` if `data_type`
/// is not a wrapper.
pub fn find_wrapper_parent(data_type: &DataType) -> Option<PropertyDescriptor> {
    let payload = match data_type {
        DataType::Optional(payload) | DataType::Link(payload) => payload,
        _ => return None,
    };
    Some(PropertyDescriptor::direct(
        WRAPPER_VALUE_PROPERTY,
        data_type.clone(),
        (**payload).clone(),
        true,
        Attributes::new(),
        Some(Arc::new(unwrap_value)),
    ))
}

/// Payload type of a wrapper, or `data_type` itself.
pub fn wrapped_value_type(data_type: &DataType) -> &DataType {
    match data_type {
        DataType::Optional(payload) | DataType::Link(payload) => payload,
        other => other,
    }
}

/// Unwraps one level of link value; every other value (including `Null`) is
/// returned unchanged.
pub fn unwrap_value(value: &Value) -> Value {
    match value {
        Value::Link(link) => link.value(),
        other => other.clone(),
    }
}
