use crate::attributes::format_child_caption;
use crate::collection::{KEY_COLUMN, VALUE_COLUMN};
use crate::column::ColumnDescriptor;
use crate::types::DataType;
use crate::wrapper::find_wrapper_parent;

use super::DataSchema;

impl DataSchema {
    /// Caption for a property or type name. Delegates to the policy.
    pub fn caption_from_name(&self, name: &str) -> String {
        self.policy.caption_from_name(name)
    }

    /// Caption for a type.
    ///
    /// Wrappers take the caption of their payload. Registered types use their
    /// non-empty `DisplayName` attribute, and everything else is captioned from
    /// its simple name.
    pub fn caption_from_type(&self, data_type: &DataType) -> String {
        if let Some(wrapper) = find_wrapper_parent(data_type) {
            return self.caption_from_type(wrapper.property_type());
        }
        let display_name = data_type
            .record_name()
            .and_then(|name| self.registry.get(name))
            .and_then(|def| def.attributes().display_name())
            .filter(|name| !name.is_empty());
        match display_name {
            Some(name) => name.to_string(),
            None => self.caption_from_name(data_type.name()),
        }
    }

    /// Caption of a column before ancestor formats are applied.
    pub fn base_display_name(&self, column: &ColumnDescriptor) -> String {
        if let Some(caption) = self.collection_part_caption(column) {
            return caption;
        }
        if let Some(name) = column.attributes().display_name() {
            return name.to_string();
        }
        match column.name() {
            Some(name) => self.caption_from_name(name),
            None => match column.parent() {
                Some(parent) => self.display_name(parent),
                None => self.caption_from_type(column.property_type()),
            },
        }
    }

    /// Index / item caption declared by the one-to-many relationship a `Key`
    /// or `Value` column belongs to.
    fn collection_part_caption(&self, column: &ColumnDescriptor) -> Option<String> {
        if !column.is_collection_part() {
            return None;
        }
        let settings = column.one_to_many_column()?.attributes().one_to_many()?;
        match column.name()? {
            KEY_COLUMN => settings.index_display_name.clone(),
            VALUE_COLUMN => settings.item_display_name.clone(),
            _ => None,
        }
    }

    /// Applies the ancestor formats of `column` to `base_name`.
    pub fn format_display_name(&self, column: &ColumnDescriptor, base_name: &str) -> String {
        self.format_child_display_name(column.parent(), base_name)
    }

    /// Applies the `ChildDisplayName` format of `column` and of each of its
    /// ancestors, nearest first, to `child_display_name`.
    pub fn format_child_display_name(
        &self,
        column: Option<&ColumnDescriptor>,
        child_display_name: &str,
    ) -> String {
        let mut caption = child_display_name.to_string();
        let mut current = column;
        while let Some(column) = current {
            if let Some(format) = column.attributes().child_display_name() {
                caption = format_child_caption(format, &caption);
            }
            current = column.parent();
        }
        caption
    }

    /// Full display name of a column.
    pub fn display_name(&self, column: &ColumnDescriptor) -> String {
        self.format_display_name(column, &self.base_display_name(column))
    }

    /// Base caption of a grid column that is bound to a property path.
    ///
    /// A path that did not resolve to a column is shown as written. Bound
    /// columns use their one-to-many index / item caption, the caption of
    /// their type when they are nameless, and otherwise their full display
    /// name.
    pub fn display_column_base_name(
        &self,
        column: Option<&ColumnDescriptor>,
        property_path: &str,
    ) -> String {
        let Some(column) = column else {
            return property_path.to_string();
        };
        if let Some(caption) = self.collection_part_caption(column) {
            return caption;
        }
        match column.name() {
            None => self.caption_from_type(column.property_type()),
            Some(_) => self.display_name(column),
        }
    }

    /// Whether a column is hidden from default report layouts.
    ///
    /// Obsolete columns are always advanced. Otherwise an explicit `Advanced`
    /// attribute decides; then `AdvancedWhen` types are matched against the
    /// column's ancestors; finally the foreign key of a one-to-many
    /// relationship is advanced.
    pub fn is_advanced(&self, column: &ColumnDescriptor) -> bool {
        if self.is_obsolete(column) {
            return true;
        }
        let attributes = column.attributes();
        if let Some(advanced) = attributes.advanced() {
            return advanced;
        }

        let advanced_when: Vec<&DataType> = attributes.advanced_when().collect();
        if !advanced_when.is_empty() {
            let beneath_match = column.ancestors().any(|ancestor| {
                advanced_when
                    .iter()
                    .any(|target| self.registry.is_assignable(ancestor.property_type(), target))
            });
            if beneath_match {
                return true;
            }
        }

        let foreign_key = column
            .one_to_many_column()
            .and_then(|owner| owner.attributes().one_to_many())
            .and_then(|settings| settings.foreign_key.as_deref());
        matches!((foreign_key, column.name()), (Some(key), Some(name)) if key == name)
    }

    /// Whether a column's property is declared `Obsolete`.
    pub fn is_obsolete(&self, column: &ColumnDescriptor) -> bool {
        column.attributes().is_obsolete()
    }
}
