use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::rc::Rc;

use super::{error::AppError, product::ProductType};

/// A row of a filtered listing.
pub trait ListingRow {
    fn id(&self) -> i64;

    /// Name shown in chart headers and the supplier picker.
    fn title(&self) -> &str;
}

/// Wire-format filter object for a listing endpoint.
pub trait ListingFilters: Serialize + Clone + PartialEq + Default + Debug + 'static {
    fn page(&self) -> u32;

    fn page_size(&self) -> u32;

    fn with_page(self, page: u32) -> Self;

    /// Re-applies the shape invariants the backend relies on: ordered
    /// ranges inside their bounds and a positive page and page size.
    fn normalized(self) -> Self;

    /// Filters for a fresh search; any filter change restarts at page 1.
    fn first_page(self) -> Self {
        self.with_page(1).normalized()
    }

    /// Filters for another page of the same search, or `None` when the
    /// page lies outside the known range.
    fn turn_to(&self, page: u32, pagination: &Pagination) -> Option<Self> {
        pagination
            .contains(page)
            .then(|| self.clone().with_page(page))
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub rows: Vec<R>,
    pub total_pages: u32,
}

impl<R: DeserializeOwned> Page<R> {
    /// Decodes `{<rows_key>: [...], total_pages: n}`.
    ///
    /// A missing or zero `total_pages` counts as a single page.
    pub fn from_response(product: ProductType, mut body: serde_json::Value) -> Result<Self, AppError> {
        let rows_value = [Some(product.rows_key()), product.legacy_rows_key()]
            .into_iter()
            .flatten()
            .find_map(|key| body.get_mut(key).map(serde_json::Value::take))
            .ok_or_else(|| {
                AppError::DataError(format!("Response has no '{}' field", product.rows_key()))
            })?;

        let rows: Vec<R> = match rows_value {
            serde_json::Value::Null => Vec::new(),
            value => serde_json::from_value(value)
                .map_err(|e| AppError::DataError(format!("Failed to parse rows: {e}")))?,
        };

        let total_pages = body
            .get("total_pages")
            .and_then(serde_json::Value::as_u64)
            .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX))
            .max(1);

        Ok(Self { rows, total_pages })
    }
}

/// Position within a paged listing, always kept inside `[1, total]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    total: u32,
}

impl Pagination {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn total(&self) -> u32 {
        self.total
    }

    pub const fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total
    }

    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub const fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    pub fn label(&self) -> String {
        format!("Сторінка {} з {}", self.current, self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// What a listing view shows: the last page received, where it sits, and
/// whether a request is in flight or the last one failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState<R> {
    pub rows: Rc<Vec<R>>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
}

impl<R> ListingState<R> {
    /// Initial state before the first response arrives.
    pub fn new() -> Self {
        Self {
            rows: Rc::new(Vec::new()),
            pagination: Pagination::default(),
            loading: true,
            error: None,
        }
    }

    /// Marks a request as in flight, keeping the current rows on screen.
    pub fn begin(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            pagination: self.pagination,
            loading: true,
            error: None,
        }
    }

    pub fn loaded(page: Page<R>, requested_page: u32) -> Self {
        Self {
            rows: Rc::new(page.rows),
            pagination: Pagination::new(requested_page, page.total_pages),
            loading: false,
            error: None,
        }
    }

    /// A failed fetch leaves an empty first page and a visible message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            rows: Rc::new(Vec::new()),
            pagination: Pagination::default(),
            loading: false,
            error: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R> Default for ListingState<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pagination_clamps_into_range() {
        assert_eq!(Pagination::new(0, 3).current(), 1);
        assert_eq!(Pagination::new(7, 3).current(), 3);
        assert_eq!(Pagination::new(2, 0).total(), 1);
    }

    #[test]
    fn test_pagination_boundaries() {
        let first = Pagination::new(1, 3);
        assert!(!first.has_previous());
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pagination::new(3, 3);
        assert!(!last.has_next());
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(2));
    }

    #[test]
    fn test_pagination_label() {
        assert_eq!(Pagination::new(1, 3).label(), "Сторінка 1 з 3");
    }

    #[test]
    fn test_page_defaults_total_pages() {
        let page: Page<serde_json::Value> =
            Page::from_response(ProductType::Batteries, json!({"batteries": []})).unwrap();
        assert_eq!(page.total_pages, 1);

        let page: Page<serde_json::Value> = Page::from_response(
            ProductType::Batteries,
            json!({"batteries": [], "total_pages": 0}),
        )
        .unwrap();
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_page_requires_rows_key() {
        let result: Result<Page<serde_json::Value>, _> =
            Page::from_response(ProductType::Batteries, json!({"total_pages": 2}));
        assert!(matches!(result, Err(AppError::DataError(_))));
    }

    #[test]
    fn test_page_accepts_legacy_solar_key() {
        let page: Page<serde_json::Value> = Page::from_response(
            ProductType::SolarPanels,
            json!({"sollar_panels": [{"id": 1}], "total_pages": 4}),
        )
        .unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_failed_state_is_empty_first_page() {
        let state: ListingState<u8> = ListingState::failed("boom");
        assert!(state.is_empty());
        assert_eq!(state.pagination, Pagination::new(1, 1));
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }
}
