use std::fmt;
use std::sync::Arc;

use super::Value;

/// Capability of a value that stands in for another value.
///
/// Link values are selectable as report roots and are unwrapped wherever
/// values are compared or displayed. `value()` may itself return a link.
pub trait LinkValue: fmt::Debug + fmt::Display + Send + Sync {
    /// The value this link points at
    fn value(&self) -> Value;
}

/// A link that carries its target alongside a caption.
///
/// Report rows use this for entities that should display as a short name
/// (e.g. a protein accession) while sorting and drilling down by the target.
#[derive(Debug, Clone)]
pub struct LinkedValue {
    caption: String,
    target: Value,
}

impl LinkedValue {
    /// Create a link with the given caption
    pub fn new(caption: impl Into<String>, target: impl Into<Value>) -> Self {
        Self {
            caption: caption.into(),
            target: target.into(),
        }
    }

    /// Wrap into a [`Value::Link`]
    pub fn into_value(self) -> Value {
        Value::Link(Arc::new(self))
    }
}

impl LinkValue for LinkedValue {
    fn value(&self) -> Value {
        self.target.clone()
    }
}

impl fmt::Display for LinkedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.caption)
    }
}
