use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Value;

/// Runtime instance of a registered record type.
///
/// Fields are looked up by property name. A record prints as its type name
/// unless a display text was attached with [`Record::with_display`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: Arc<str>,
    fields: HashMap<String, Value>,
    display: Option<String>,
}

impl Record {
    /// Create an empty record of the given type
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: Arc::from(type_name),
            fields: HashMap::new(),
            display: None,
        }
    }

    /// Set a field value (builder style)
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Attach the text this record prints as
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Set a field value
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Field value, if the record carries one
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Name of the record's type
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of fields set on the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are set
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display {
            Some(display) => f.write_str(display),
            None => f.write_str(&self.type_name),
        }
    }
}
