use tracing::debug;

use crate::filter::{derive_categories, TitleMatcher};
use crate::group::{group_into, CategoryGroup};
use crate::listing::Listing;

/// The loaded listing set together with the view derived from the current
/// search term.
///
/// `categories` always reflects the filtered subset, so a category with no
/// matching listing never produces a section.
#[derive(Clone, Debug)]
pub struct ListingCache<T> {
    all: Vec<T>,
    filtered: Vec<usize>,
    categories: Vec<String>,
    term: String,
}

impl<T> Default for ListingCache<T> {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            categories: Vec::new(),
            term: String::new(),
        }
    }
}

impl<T: Listing> ListingCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full set and clear the search term.
    pub fn load(&mut self, items: Vec<T>) {
        self.all = items;
        self.reset();
    }

    /// Narrow the view to listings whose title contains `term`.
    /// An empty term shows everything again.
    pub fn apply_search(&mut self, term: &str) {
        if term.is_empty() {
            self.reset();
            return;
        }
        let matcher = TitleMatcher::new(term);
        self.term = term.to_string();
        self.filtered = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, item)| matcher.matches(item.title()))
            .map(|(i, _)| i)
            .collect();
        self.categories = derive_categories(self.filtered.iter().map(|&i| &self.all[i]));
        debug!(
            term,
            matched = self.filtered.len(),
            total = self.all.len(),
            "search applied"
        );
    }

    fn reset(&mut self) {
        self.term.clear();
        self.filtered = (0..self.all.len()).collect();
        self.categories = derive_categories(&self.all);
    }

    pub fn all(&self) -> &[T] {
        &self.all
    }

    pub fn filtered(&self) -> Vec<&T> {
        self.filtered.iter().map(|&i| &self.all[i]).collect()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Display sections for the filtered subset.
    pub fn groups(&self) -> Vec<CategoryGroup<'_, T>> {
        group_into(&self.categories, &self.filtered())
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
