use std::collections::HashSet;

use crate::listing::Listing;

/// Suggestions shown while typing.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Case-insensitive title substring matcher. The term is lowercased once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleMatcher {
    needle: String,
}

impl TitleMatcher {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    /// An empty term matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, title: &str) -> bool {
        self.is_empty() || title.to_lowercase().contains(&self.needle)
    }
}

/// Listings whose title contains `term`, ignoring case, in input order.
///
/// An empty term returns every listing.
pub fn filter_by_substring<'a, T: Listing>(items: &'a [T], term: &str) -> Vec<&'a T> {
    let matcher = TitleMatcher::new(term);
    items.iter().filter(|item| matcher.matches(item.title())).collect()
}

/// At most `limit` listings matching `term`, in input order.
pub fn suggest<'a, T: Listing>(items: &'a [T], term: &str, limit: usize) -> Vec<&'a T> {
    let matcher = TitleMatcher::new(term);
    items
        .iter()
        .filter(|item| matcher.matches(item.title()))
        .take(limit)
        .collect()
}

/// Distinct categories present in `items`, in first-seen order.
pub fn derive_categories<'a, T, I>(items: I) -> Vec<String>
where
    T: Listing + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(Listing::category)
        .filter(|category| seen.insert(*category))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Item {
        pub title: String,
        pub category: String,
    }

    impl Listing for Item {
        fn title(&self) -> &str {
            &self.title
        }

        fn category(&self) -> &str {
            &self.category
        }
    }

    pub(crate) fn item(title: &str, category: &str) -> Item {
        Item {
            title: title.into(),
            category: category.into(),
        }
    }

    fn catalog() -> Vec<Item> {
        vec![
            item("Tabla A", "tabla"),
            item("Sitar B", "string"),
            item("Bass Tabla", "tabla"),
            item("Bansuri", "wind"),
        ]
    }

    fn titles(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn empty_term_returns_everything() {
        let items = catalog();
        let out = filter_by_substring(&items, "");
        assert_eq!(out.len(), items.len());
        assert!(out.iter().zip(&items).all(|(a, b)| *a == b));
    }

    #[test]
    fn match_is_case_insensitive_and_stable() {
        let items = catalog();
        assert_eq!(
            titles(&filter_by_substring(&items, "TABLA")),
            ["Tabla A", "Bass Tabla"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let items = catalog();
        assert!(filter_by_substring(&items, "trumpet").is_empty());
    }

    #[test]
    fn whitespace_in_term_is_significant() {
        let items = catalog();
        assert!(filter_by_substring(&items, " tabla ").is_empty());
        assert_eq!(titles(&filter_by_substring(&items, "s tabla")), ["Bass Tabla"]);
    }

    #[test]
    fn suggestions_capped() {
        let items: Vec<Item> = (0..8).map(|i| item(&format!("Drum {i}"), "percussion")).collect();
        let out = suggest(&items, "drum", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].title, "Drum 0");
        assert_eq!(out[4].title, "Drum 4");
    }

    #[test]
    fn suggestions_zero_limit() {
        let items = catalog();
        assert!(suggest(&items, "", 0).is_empty());
    }

    #[test]
    fn categories_first_seen_order() {
        let items = catalog();
        assert_eq!(derive_categories(&items), ["tabla", "string", "wind"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let items: Vec<Item> = Vec::new();
        assert!(derive_categories(&items).is_empty());
        assert!(suggest(&items, "x", 5).is_empty());
        assert!(filter_by_substring(&items, "x").is_empty());
    }

    #[test]
    fn unicode_case_folding() {
        let items = vec![item("ÉKTARA", "string")];
        assert_eq!(filter_by_substring(&items, "éktara").len(), 1);
    }

    fn arb_items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec(
            ("[A-Za-z ]{0,12}", prop::sample::select(vec!["tabla", "string", "wind", "brass"])),
            0..20,
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(title, category)| item(&title, category))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn filtered_items_all_match(items in arb_items(), term in "[A-Za-z ]{0,3}") {
            let out = filter_by_substring(&items, &term);
            let needle = term.to_lowercase();
            for it in &out {
                prop_assert!(it.title.to_lowercase().contains(&needle));
            }
            // nothing that matches is dropped
            let expected = items
                .iter()
                .filter(|it| it.title.to_lowercase().contains(&needle))
                .count();
            prop_assert_eq!(out.len(), expected);
        }

        #[test]
        fn filter_preserves_relative_order(items in arb_items(), term in "[a-z]{0,2}") {
            let out = filter_by_substring(&items, &term);
            let positions: Vec<usize> = out
                .iter()
                .map(|o| items.iter().position(|i| std::ptr::eq(i, *o)).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn suggest_bounded(items in arb_items(), term in "[a-z]{0,2}", limit in 0usize..8) {
            let matched = filter_by_substring(&items, &term).len();
            prop_assert!(suggest(&items, &term, limit).len() <= limit.min(matched));
        }

        #[test]
        fn categories_are_exactly_those_matched(items in arb_items(), term in "[a-z]{0,2}") {
            let filtered = filter_by_substring(&items, &term);
            let categories = derive_categories(filtered.iter().copied());
            let expected: HashSet<&str> = filtered.iter().map(|i| i.category.as_str()).collect();
            prop_assert_eq!(categories.len(), expected.len());
            for c in &categories {
                prop_assert!(expected.contains(c.as_str()));
            }
        }
    }
}
