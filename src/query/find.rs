//! Find specifications: filter plus cursor options.

use mongodb::bson::Document;
use mongodb::options::FindOptions;

use super::ast::{Filter, Projection, SortSpec};

/// Everything needed to issue one `find`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindSpec {
    pub filter: Filter,
    pub projection: Option<Projection>,
    pub sort: Option<SortSpec>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl FindSpec {
    /// Find every document in natural order
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: impl Into<Filter>) -> Self {
        Self {
            filter: filter.into(),
            ..Self::default()
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Bounded window: `page` is 1-based.
    pub fn page(self, page: u64, page_size: i64) -> Self {
        let size = u64::try_from(page_size).unwrap_or(0);
        let offset = page.saturating_sub(1).saturating_mul(size);
        let spec = self.with_limit(page_size);
        if offset == 0 {
            spec
        } else {
            spec.with_skip(offset)
        }
    }

    pub fn filter_document(&self) -> Document {
        self.filter.to_document()
    }

    pub fn options(&self) -> FindOptions {
        let mut options = FindOptions::default();
        options.projection = self.projection.as_ref().map(Projection::to_document);
        options.sort = self.sort.as_ref().map(SortSpec::to_document);
        options.skip = self.skip;
        options.limit = self.limit;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Predicate;
    use mongodb::bson::doc;

    #[test]
    fn test_find_all_has_no_options() {
        let spec = FindSpec::all();
        let options = spec.options();

        assert_eq!(spec.filter_document(), doc! {});
        assert!(options.projection.is_none());
        assert!(options.sort.is_none());
        assert!(options.skip.is_none());
        assert!(options.limit.is_none());
    }

    #[test]
    fn test_options_carry_projection_and_sort() {
        let spec = FindSpec::filtered(Predicate::eq("in_stock", true))
            .with_projection(Projection::include(["title"]).without_id())
            .with_sort(SortSpec::desc("price"));
        let options = spec.options();

        assert_eq!(options.projection, Some(doc! { "title": 1, "_id": 0 }));
        assert_eq!(options.sort, Some(doc! { "price": -1 }));
    }

    #[test]
    fn test_first_page_has_no_skip() {
        let options = FindSpec::all().page(1, 5).options();
        assert_eq!(options.skip, None);
        assert_eq!(options.limit, Some(5));
    }

    #[test]
    fn test_second_page_skips_first() {
        let options = FindSpec::all().page(2, 5).options();
        assert_eq!(options.skip, Some(5));
        assert_eq!(options.limit, Some(5));
    }

    #[test]
    fn test_far_page_saturates_offset() {
        let options = FindSpec::all().page(u64::MAX, 5).options();
        assert_eq!(options.skip, Some(u64::MAX));
        assert_eq!(options.limit, Some(5));
    }
}
