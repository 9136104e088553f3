//! # Runtime Values
//!
//! Report rows are built from dynamic [`Value`]s. A registered record type is
//! instantiated as a [`Record`] (type name plus named fields), and anything that
//! should behave as a transparent proxy for another value implements
//! [`LinkValue`].
//!
//! Optional values have no runtime wrapper: an absent optional is
//! [`Value::Null`] and a present one is its payload.

mod link;
mod record;


use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use link::{LinkValue, LinkedValue};
pub use record::Record;

/// Member of an enumeration type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// Name of the enumeration type
    pub type_name: Arc<str>,
    /// Member name
    pub name: String,
    /// Underlying value used for ordering
    pub ordinal: i64,
}

impl EnumValue {
    /// Create an enumeration member
    pub fn new(type_name: &str, name: &str, ordinal: i64) -> Self {
        Self {
            type_name: Arc::from(type_name),
            name: name.to_string(),
            ordinal,
        }
    }
}

/// A dynamically typed value bound to a report cell
#[derive(Debug, Clone)]
pub enum Value {
    /// Missing value (also an absent optional)
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
    /// UTC timestamp
    DateTime(DateTime<Utc>),
    /// Enumeration member
    Enum(EnumValue),
    /// Instance of a registered record type
    Record(Arc<Record>),
    /// Transparent proxy for another value
    Link(Arc<dyn LinkValue>),
    /// Sequence of values
    List(Vec<Value>),
    /// Key/value pairs, in insertion order
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for values with a natural ordering
    /// (booleans, numbers, text, timestamps and enumeration members).
    pub fn is_orderable(&self) -> bool {
        matches!(
            self,
            Value::Bool(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::Text(_)
                | Value::DateTime(_)
                | Value::Enum(_)
        )
    }

    /// Rank of the value's kind when two values have no common natural order:
    /// booleans, numbers, timestamps, text, enumeration members, then
    /// everything without a natural order.
    pub(crate) fn sort_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::DateTime(_) => 3,
            Value::Text(_) => 4,
            Value::Enum(_) => 5,
            Value::Record(_) | Value::Link(_) | Value::List(_) | Value::Map(_) => 6,
        }
    }

    /// Natural ordering between two orderable values.
    ///
    /// Returns `None` when the values are not mutually comparable, e.g. text
    /// against a number, or members of two different enumerations. Integers
    /// and floats compare by exact numeric value; NaN sorts before every other
    /// number.
    pub fn natural_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Some(cmp_f64(*a, *b)),
            (Value::Int(a), Value::Float(b)) => Some(cmp_i64_f64(*a, *b)),
            (Value::Float(a), Value::Int(b)) => Some(cmp_i64_f64(*b, *a).reverse()),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Enum(a), Value::Enum(b)) if a.type_name == b.type_name => {
                Some(a.ordinal.cmp(&b.ordinal))
            }
            _ => None,
        }
    }

    /// Field of a record value; `Null` for anything else.
    pub fn field(&self, name: &str) -> Value {
        match self {
            Value::Record(record) => record.get(name).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Type name of a record value
    pub fn record_type(&self) -> Option<&str> {
        match self {
            Value::Record(record) => Some(record.type_name()),
            _ => None,
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compares an integer with a float without rounding the integer.
fn cmp_i64_f64(int: i64, float: f64) -> Ordering {
    // 2^63, the first float above i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return Ordering::Greater;
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    // |float| < 2^63 here, so its integral part fits in an i64 exactly
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_f64(0.0, float - whole),
        ordering => ordering,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Link(a), Value::Link(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            Value::Enum(v) => f.write_str(&v.name),
            Value::Record(record) => write!(f, "{}", record),
            Value::Link(link) => write!(f, "{}", link),
            Value::List(items) => write!(f, "{} items", items.len()),
            Value::Map(entries) => write!(f, "{} entries", entries.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(Arc::new(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
