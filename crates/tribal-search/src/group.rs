use serde::Serialize;

use crate::filter::derive_categories;
use crate::listing::Listing;

/// One display section: a category and the listings filed under it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryGroup<'a, T> {
    pub category: String,
    pub items: Vec<&'a T>,
}

impl<T> CategoryGroup<'_, T> {
    /// Heading shown above the section, e.g. `"tabla Instruments"`.
    pub fn section_title(&self) -> String {
        format!("{} Instruments", self.category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Group `items` by category, categories in first-seen order.
pub fn group_by_category<'a, T, I>(items: I) -> Vec<CategoryGroup<'a, T>>
where
    T: Listing + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let items: Vec<&'a T> = items.into_iter().collect();
    let categories = derive_categories(items.iter().copied());
    group_into(&categories, &items)
}

/// One group per entry of `categories`, skipping categories no listing in
/// `items` belongs to.
pub fn group_into<'a, T: Listing>(
    categories: &[String],
    items: &[&'a T],
) -> Vec<CategoryGroup<'a, T>> {
    categories
        .iter()
        .map(|category| CategoryGroup {
            category: category.clone(),
            items: items
                .iter()
                .copied()
                .filter(|item| item.category() == category.as_str())
                .collect(),
        })
        .filter(|group| !group.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_by_substring;
    use crate::filter::tests::{item, Item};

    #[test]
    fn search_term_drops_unmatched_categories() {
        let items = vec![item("Tabla A", "tabla"), item("Sitar B", "string")];
        let filtered = filter_by_substring(&items, "tabla");
        let groups = group_by_category(filtered);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "tabla");
        assert_eq!(groups[0].items, vec![&items[0]]);
    }

    #[test]
    fn groups_keep_item_order() {
        let items = vec![
            item("Tabla A", "tabla"),
            item("Sitar", "string"),
            item("Tabla B", "tabla"),
        ];
        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 2);
        let tabla: Vec<_> = groups[0].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(tabla, ["Tabla A", "Tabla B"]);
        assert_eq!(groups[1].category, "string");
    }

    #[test]
    fn group_into_skips_empty_categories() {
        let items = vec![item("Bansuri", "wind")];
        let refs: Vec<&Item> = items.iter().collect();
        let categories = vec!["brass".to_string(), "wind".to_string()];
        let groups = group_into(&categories, &refs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "wind");
    }

    #[test]
    fn section_title() {
        let items = vec![item("Tabla", "tabla")];
        let groups = group_by_category(&items);
        assert_eq!(groups[0].section_title(), "tabla Instruments");
    }

    #[test]
    fn no_items_no_groups() {
        let items: Vec<Item> = Vec::new();
        assert!(group_by_category(&items).is_empty());
    }
}
