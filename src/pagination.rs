//! Offset pagination shared by listing endpoints.

use serde::Serialize;
use thiserror::Error;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Upper bound on a single page; larger requests are clamped.
pub const MAX_PAGE_SIZE: usize = 100;

/// Rejected page request.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid pagination: page number {page_number} must be >= 0 and page size {page_size} must be >= 1")]
pub struct PaginationError {
    pub page_number: i64,
    pub page_size: i64,
}

/// Zero-based page coordinates with the page size already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validates raw page coordinates, clamping the size to [`MAX_PAGE_SIZE`].
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, PaginationError> {
        if page_number < 0 || page_size < 1 {
            return Err(PaginationError {
                page_number,
                page_size,
            });
        }

        let page_number = usize::try_from(page_number).map_err(|_| PaginationError {
            page_number,
            page_size,
        })?;
        let page_size = usize::try_from(page_size)
            .unwrap_or(MAX_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of rows skipped before this page starts.
    pub fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }
}

/// One page of an ordered result set plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<T> {
    pub content: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> ResultPage<T> {
    pub fn new(content: Vec<T>, page: PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            page_number: page.page_number(),
            page_size: page.page_size(),
            total_elements,
            total_pages: total_elements.div_ceil(page.page_size()),
        }
    }

    /// Converts every item, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> ResultPage<U>
    where
        F: FnMut(T) -> U,
    {
        ResultPage {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
