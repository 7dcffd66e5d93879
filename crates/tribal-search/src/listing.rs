use tribal_types::InstrumentPost;

/// Anything that can be searched by title and grouped by category.
pub trait Listing {
    fn title(&self) -> &str;
    fn category(&self) -> &str;
}

impl Listing for InstrumentPost {
    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        &self.category
    }
}

impl<T: Listing + ?Sized> Listing for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn category(&self) -> &str {
        (**self).category()
    }
}
