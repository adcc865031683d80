//! Repeatable sub-list (meal items)

use super::schema::{FieldDescriptor, RepeatableGroupConfig};
use super::validation::{validate_repeatable_items, ValidationError};
use super::value::{Locale, RepeatableGroupItem};

/// Ordered list of sub-records nested inside one field.
///
/// The list never becomes empty through [`remove`](Self::remove): the last
/// remaining item cannot be deleted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepeatableList {
    items: Vec<RepeatableGroupItem>,
}

impl RepeatableList {
    pub fn new(items: Vec<RepeatableGroupItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[RepeatableGroupItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<RepeatableGroupItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an empty item
    pub fn add(&mut self) {
        self.items.push(RepeatableGroupItem::default());
    }

    /// Delete the item at `index`; refuses the last remaining item
    pub fn remove(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Set one locale text of one item
    pub fn update(&mut self, index: usize, locale: Locale, text: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.description.set(locale, text);
                true
            }
            None => false,
        }
    }

    pub fn can_remove(&self) -> bool {
        self.items.len() > 1
    }

    pub fn validate(
        &self,
        field: &FieldDescriptor,
        config: &RepeatableGroupConfig,
    ) -> Vec<ValidationError> {
        validate_repeatable_items(field, config, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::FieldKind;

    #[test]
    fn test_add_update_remove() {
        let mut list = RepeatableList::new(vec![RepeatableGroupItem::default()]);
        list.add();
        assert_eq!(list.len(), 2);

        assert!(list.update(1, Locale::Primary, "Eggs"));
        assert!(list.update(1, Locale::Secondary, "بيض"));
        assert!(!list.update(5, Locale::Primary, "nope"));
        assert_eq!(list.items()[1], RepeatableGroupItem::new("Eggs", "بيض"));

        assert!(list.remove(0));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].description.primary, "Eggs");
    }

    #[test]
    fn test_last_item_not_removable() {
        let mut list = RepeatableList::new(vec![RepeatableGroupItem::new("Oats", "شوفان")]);
        assert!(!list.can_remove());
        assert!(!list.remove(0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = RepeatableList::new(vec![
            RepeatableGroupItem::default(),
            RepeatableGroupItem::default(),
        ]);
        assert!(!list.remove(2));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_validate_reports_each_missing_text() {
        let config = RepeatableGroupConfig::default();
        let field = FieldDescriptor::new("mealItems", "Meal items", FieldKind::RepeatableGroup(config.clone()));
        let list = RepeatableList::new(vec![
            RepeatableGroupItem::new("Oats", "شوفان"),
            RepeatableGroupItem::new("", ""),
        ]);

        let errors = list.validate(&field, &config);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["mealItems[1].description.en", "mealItems[1].description.ar"]
        );
    }
}
