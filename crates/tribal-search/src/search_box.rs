use serde::Serialize;

use crate::filter::{suggest, DEFAULT_SUGGESTION_LIMIT};
use crate::listing::Listing;

/// State behind a search input with a suggestion dropdown.
///
/// Every keystroke goes through [`SearchBox::input`]; picking a suggestion
/// copies its title into the term and closes the dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchBox {
    term: String,
    suggestions: Vec<String>,
    #[serde(skip)]
    limit: usize,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_SUGGESTION_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            term: String::new(),
            suggestions: Vec::new(),
            limit,
        }
    }

    /// Record a new term and recompute suggestions from `items`.
    /// An empty term matches every title, so it offers the first listings.
    pub fn input<T: Listing>(&mut self, items: &[T], term: &str) {
        self.term = term.to_string();
        self.suggestions = suggest(items, term, self.limit)
            .into_iter()
            .map(|item| item.title().to_string())
            .collect();
    }

    /// Take the suggestion at `index` as the term.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index >= self.suggestions.len() {
            return None;
        }
        self.term = self.suggestions.swap_remove(index);
        self.suggestions.clear();
        Some(&self.term)
    }

    /// The term to hand to [`ListingCache::apply_search`](crate::ListingCache::apply_search).
    pub fn submit(&mut self) -> &str {
        self.suggestions.clear();
        &self.term
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.suggestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ListingCache;
    use crate::filter::tests::{item, Item};

    fn drums() -> Vec<Item> {
        (0..7)
            .map(|i| item(&format!("Drum {i}"), "percussion"))
            .chain([item("Sitar", "string")])
            .collect()
    }

    #[test]
    fn typing_updates_suggestions() {
        let items = drums();
        let mut sb = SearchBox::new();
        sb.input(&items, "dr");
        assert_eq!(sb.suggestions().len(), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(sb.suggestions()[0], "Drum 0");

        sb.input(&items, "sit");
        assert_eq!(sb.suggestions(), ["Sitar"]);
        assert_eq!(sb.term(), "sit");
    }

    #[test]
    fn empty_term_offers_first_listings() {
        let items = vec![item("Tabla A", "tabla"), item("Sitar B", "string")];
        let mut sb = SearchBox::new();
        sb.input(&items, "ta");
        assert_eq!(sb.suggestions(), ["Tabla A"]);

        sb.input(&items, "");
        let expected: Vec<&str> = suggest(&items, "", DEFAULT_SUGGESTION_LIMIT)
            .into_iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(sb.suggestions(), expected.as_slice());
        assert_eq!(sb.suggestions(), ["Tabla A", "Sitar B"]);
        assert_eq!(sb.term(), "");
    }

    #[test]
    fn empty_term_is_capped_by_limit() {
        let items = drums();
        let mut sb = SearchBox::new();
        sb.input(&items, "");
        assert_eq!(sb.suggestions().len(), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(sb.suggestions()[0], "Drum 0");
    }

    #[test]
    fn select_copies_title() {
        let items = drums();
        let mut sb = SearchBox::new();
        sb.input(&items, "drum");
        assert_eq!(sb.select(2), Some("Drum 2"));
        assert_eq!(sb.term(), "Drum 2");
        assert!(sb.suggestions().is_empty());
    }

    #[test]
    fn select_out_of_range() {
        let items = drums();
        let mut sb = SearchBox::new();
        sb.input(&items, "sitar");
        assert_eq!(sb.select(1), None);
        assert_eq!(sb.term(), "sitar");
        assert_eq!(sb.suggestions().len(), 1);
    }

    #[test]
    fn custom_limit() {
        let items = drums();
        let mut sb = SearchBox::with_limit(2);
        sb.input(&items, "drum");
        assert_eq!(sb.suggestions(), ["Drum 0", "Drum 1"]);
    }

    #[test]
    fn submit_drives_cache() {
        let items = vec![item("Tabla A", "tabla"), item("Sitar B", "string")];
        let mut cache = ListingCache::new();
        cache.load(items.clone());

        let mut sb = SearchBox::new();
        sb.input(&items, "tab");
        let term = sb.submit().to_string();
        cache.apply_search(&term);
        assert_eq!(cache.categories(), ["tabla"]);
        assert!(sb.suggestions().is_empty());

        sb.clear();
        assert_eq!(sb.term(), "");
    }
}
