//! # Declarative Attributes
//!
//! Attributes are attached to types and properties when they are registered and
//! drive captions and column visibility:
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `DisplayName` | Overrides the caption of a property or type |
//! | `Obsolete` | Column is obsolete (and therefore advanced) |
//! | `Advanced` | Explicitly marks a column advanced or not |
//! | `AdvancedWhen` | Column is advanced beneath an ancestor of the given type |
//! | `OneToMany` | Captions and foreign key of a collection property |
//! | `ChildDisplayName` | Format applied to the captions of descendant columns |

use serde::{Deserialize, Serialize};

use crate::types::DataType;

/// Display settings of a one-to-many (collection) property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneToMany {
    /// Caption of the collection's key column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_display_name: Option<String>,
    /// Caption of the collection's item column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_display_name: Option<String>,
    /// Property of the item type that points back at the owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
}

impl OneToMany {
    /// Relationship with no caption overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Caption for the key column
    pub fn index_display_name(mut self, name: impl Into<String>) -> Self {
        self.index_display_name = Some(name.into());
        self
    }

    /// Caption for the item column
    pub fn item_display_name(mut self, name: impl Into<String>) -> Self {
        self.item_display_name = Some(name.into());
        self
    }

    /// Name of the foreign key property on the item type
    pub fn foreign_key(mut self, name: impl Into<String>) -> Self {
        self.foreign_key = Some(name.into());
        self
    }
}

/// One declarative metadata tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    /// Caption override. An empty string is a placeholder and is ignored for
    /// type captions.
    DisplayName(String),
    /// The property is kept for compatibility only
    Obsolete,
    /// Explicit advanced flag
    Advanced(bool),
    /// Advanced when any ancestor column's type is assignable to this type
    AdvancedWhen(DataType),
    /// One-to-many relationship settings
    OneToMany(OneToMany),
    /// Format for descendant captions; `{0}` is replaced by the child caption
    ChildDisplayName(String),
}

/// Ordered attribute list of a type or property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Empty attribute list
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an attribute
    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    /// Iterate in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no attributes are declared
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First declared display name
    pub fn display_name(&self) -> Option<&str> {
        self.iter().find_map(|a| match a {
            Attribute::DisplayName(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Returns true if an `Obsolete` attribute is declared
    pub fn is_obsolete(&self) -> bool {
        self.iter().any(|a| matches!(a, Attribute::Obsolete))
    }

    /// First declared explicit advanced flag
    pub fn advanced(&self) -> Option<bool> {
        self.iter().find_map(|a| match a {
            Attribute::Advanced(advanced) => Some(*advanced),
            _ => None,
        })
    }

    /// All `AdvancedWhen` ancestor types
    pub fn advanced_when(&self) -> impl Iterator<Item = &DataType> {
        self.iter().filter_map(|a| match a {
            Attribute::AdvancedWhen(ty) => Some(ty),
            _ => None,
        })
    }

    /// First declared one-to-many settings
    pub fn one_to_many(&self) -> Option<&OneToMany> {
        self.iter().find_map(|a| match a {
            Attribute::OneToMany(settings) => Some(settings),
            _ => None,
        })
    }

    /// First declared child display name format
    pub fn child_display_name(&self) -> Option<&str> {
        self.iter().find_map(|a| match a {
            Attribute::ChildDisplayName(format) => Some(format.as_str()),
            _ => None,
        })
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Applies a child display name format.
///
/// `{0}` is replaced by `child`; `{{` and `}}` produce literal braces. Any
/// other placeholder is copied through unchanged.
pub fn format_child_caption(format: &str, child: &str) -> String {
    let mut out = String::with_capacity(format.len() + child.len());
    let mut rest = format;
    while let Some(idx) = rest.find(|c: char| c == '{' || c == '}') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with("{0}") {
            out.push_str(child);
            rest = &tail[3..];
        } else {
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_take_first_declaration() {
        let attributes: Attributes = vec![
            Attribute::DisplayName("Precursor m/z".to_string()),
            Attribute::Advanced(true),
            Attribute::DisplayName("ignored".to_string()),
            Attribute::Advanced(false),
        ]
        .into_iter()
        .collect();

        assert_eq!(attributes.display_name(), Some("Precursor m/z"));
        assert_eq!(attributes.advanced(), Some(true));
        assert!(!attributes.is_obsolete());
    }

    #[test]
    fn test_advanced_when_collects_all() {
        let attributes: Attributes = vec![
            Attribute::AdvancedWhen(DataType::record("Peptide")),
            Attribute::Obsolete,
            Attribute::AdvancedWhen(DataType::record("Protein")),
        ]
        .into_iter()
        .collect();

        let types: Vec<_> = attributes.advanced_when().map(|t| t.to_string()).collect();
        assert_eq!(types, vec!["Peptide", "Protein"]);
        assert!(attributes.is_obsolete());
    }

    #[test]
    fn test_format_child_caption() {
        assert_eq!(format_child_caption("Precursor {0}", "Mz"), "Precursor Mz");
        assert_eq!(format_child_caption("{0} (heavy)", "Area"), "Area (heavy)");
        assert_eq!(format_child_caption("{{{0}}}", "x"), "{x}");
        assert_eq!(format_child_caption("no placeholder", "x"), "no placeholder");
        assert_eq!(format_child_caption("{1} {0}", "x"), "{1} x");
    }

    #[test]
    fn test_one_to_many_builder() {
        let settings = OneToMany::new()
            .index_display_name("Replicate")
            .item_display_name("Result")
            .foreign_key("Peptide");
        assert_eq!(settings.index_display_name.as_deref(), Some("Replicate"));
        assert_eq!(settings.foreign_key.as_deref(), Some("Peptide"));
    }
}
