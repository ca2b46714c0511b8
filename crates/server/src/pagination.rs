use db::QuerySelect;
use serde::Deserialize;

pub const PER_PAGE: u64 = 25;
pub const MAX_PAGES: u64 = 10000;

/// Optional page-based pagination.
///
/// Requests without a `page` query parameter receive the full result set.
#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default)]
    page: Option<u64>,
}

impl Pagination {
    pub fn limit(&self) -> Option<u64> {
        self.page.map(|_| PER_PAGE)
    }

    pub fn offset(&self) -> Option<u64> {
        self.page
            .map(|page| page.min(MAX_PAGES).saturating_sub(1) * PER_PAGE)
    }

    /// Apply pagination to a query.
    pub fn paginate<Q: QuerySelect>(&self, query: Q) -> Q {
        match (self.limit(), self.offset()) {
            (Some(limit), Some(offset)) => query.limit(limit).offset(offset),
            _ => query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Pagination, PER_PAGE};

    #[test]
    fn pages() {
        let pagination = Pagination { page: None };
        assert_eq!(pagination.limit(), None);
        assert_eq!(pagination.offset(), None);

        let pagination = Pagination { page: Some(0) };
        assert_eq!(pagination.offset(), Some(0));

        let pagination = Pagination { page: Some(3) };
        assert_eq!(pagination.limit(), Some(PER_PAGE));
        assert_eq!(pagination.offset(), Some(2 * PER_PAGE));
    }
}
