//! Pagination and filter helpers for the place and event listings.
//!
//! The repositories turn a [`ListingFilter`] and a [`PageRequest`] into SQL;
//! everything that does not need the database lives here.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page returned when `page` is omitted.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `per_page` is omitted.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Largest page size served; larger requests are clamped.
pub const MAX_PER_PAGE: i64 = 100;

/// A validated page window (1-based page number, positive page size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    /// Build a page window from raw query values.
    ///
    /// Non-positive values are rejected; `per_page` above [`MAX_PER_PAGE`]
    /// is clamped.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page < 1 {
            return Err(CoreError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }
        if per_page < 1 {
            return Err(CoreError::Validation(
                "per_page must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            page,
            per_page: per_page.min(MAX_PER_PAGE),
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// `ceil(total / per_page)` in integer arithmetic.
    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.per_page - 1) / self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Category-set and keyword restrictions for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Exact category names; `None` means no category restriction.
    pub categories: Option<Vec<String>>,
    /// Free-text keyword matched against name and description.
    pub keyword: Option<String>,
}

impl ListingFilter {
    /// Build a filter from the raw `search` and `categories` query values.
    ///
    /// Empty values mean "no filter".
    pub fn from_params(search: Option<&str>, categories: Option<&str>) -> Self {
        Self {
            categories: categories.and_then(parse_category_filter),
            keyword: search.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// The `LIKE` pattern for the keyword, if any, folded with
    /// [`fold_for_search`] to match the stored search columns.
    pub fn keyword_pattern(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .map(|keyword| like_pattern(&fold_for_search(keyword)))
    }
}

/// Case-fold text for keyword search.
///
/// SQLite's `LOWER` only folds ASCII, so searchable columns are stored
/// pre-folded and compared against a keyword folded the same way.
///
/// ```
/// use cityguide_core::listing::fold_for_search;
/// assert_eq!(fold_for_search("KARAĐORĐEV Park"), "karađorđev park");
/// assert_eq!(fold_for_search("ČŠŽĆ"), "čšžć");
/// ```
pub fn fold_for_search(text: &str) -> String {
    text.to_lowercase()
}

/// Split a comma-separated category list and trim each token.
///
/// Blank tokens are kept: `"Parks,"` yields `["Parks", ""]`, and the blank
/// token simply matches no category.
///
/// ```
/// use cityguide_core::listing::parse_category_filter;
/// assert_eq!(
///     parse_category_filter(" Food , Parks,"),
///     Some(vec!["Food".to_string(), "Parks".to_string(), String::new()])
/// );
/// assert_eq!(parse_category_filter(""), None);
/// ```
pub fn parse_category_filter(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.split(',').map(|t| t.trim().to_string()).collect())
}

/// Wrap a keyword in `%` wildcards, escaping `LIKE` metacharacters so the
/// keyword itself matches literally.
///
/// ```
/// use cityguide_core::listing::like_pattern;
/// assert_eq!(like_pattern("caf"), "%caf%");
/// assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
/// ```
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
