use std::fmt;

use crate::property::PropertyDescriptor;

/// Customization hooks of a [`DataSchema`](super::DataSchema).
///
/// Applications pass a policy when constructing the schema instead of
/// subclassing it. Every method has a default.
pub trait SchemaPolicy: fmt::Debug + Send + Sync {
    /// Caption for a property or type name
    fn caption_from_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Whether a property should be offered as a column
    fn is_browsable(&self, property: &PropertyDescriptor) -> bool {
        property.is_browsable()
    }
}

/// Names are used as captions verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl SchemaPolicy for DefaultPolicy {}

/// Splits identifier names into words: `PrecursorMz` becomes `Precursor Mz`,
/// `ms_level` becomes `ms level`. Acronym runs such as `TIC` stay together.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanizedCaptions;

impl SchemaPolicy for HumanizedCaptions {
    fn caption_from_name(&self, name: &str) -> String {
        humanize(name)
    }
}

pub(crate) fn humanize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            continue;
        }
        if i > 0 && c.is_uppercase() && !out.is_empty() && !out.ends_with(' ') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out.trim_end().to_string()
}
