//! Client-side search over a loaded set of catalog listings.
//!
//! Everything here is pure and synchronous: the caller loads listings once
//! and every keystroke or submit re-derives the view from that set.
//!
//! # Modules
//!
//! - [`listing`]: the [`Listing`] trait (title + category) the engine works on
//! - [`filter`]: case-insensitive title matching, category derivation, suggestions
//! - [`group`]: [`CategoryGroup`] sections, omitting empty categories
//! - [`cache`]: [`ListingCache`] holding the full set, filtered subset, categories
//! - [`search_box`]: [`SearchBox`] with the live term and suggestion dropdown state
//!
//! Search terms are matched exactly as given, including leading and trailing
//! whitespace. Callers that want trimming trim before searching.

pub mod cache;
pub mod filter;
pub mod group;
pub mod listing;
pub mod search_box;

pub use cache::ListingCache;
pub use filter::{
    derive_categories, filter_by_substring, suggest, TitleMatcher, DEFAULT_SUGGESTION_LIMIT,
};
pub use group::{group_by_category, CategoryGroup};
pub use listing::Listing;
pub use search_box::SearchBox;
