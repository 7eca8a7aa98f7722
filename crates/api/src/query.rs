//! Shared query parameter types for API handlers.

use cityguide_core::error::CoreError;
use cityguide_core::listing::{ListingFilter, PageRequest};
use serde::Deserialize;

/// Query parameters of the place and event listings
/// (`?page=&per_page=&search=&categories=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    /// Comma-separated category names.
    pub categories: Option<String>,
}

impl ListingParams {
    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(self.page, self.per_page)
    }

    pub fn filter(&self) -> ListingFilter {
        ListingFilter::from_params(self.search.as_deref(), self.categories.as_deref())
    }
}
