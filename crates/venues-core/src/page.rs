//! Paging types: the request, the raw repository page and the response
//! envelope.

use serde::Serialize;

use crate::error::DomainError;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A zero-based page number and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `size` is zero or larger than
    /// [`MAX_PAGE_SIZE`].
    pub fn new(page: u32, size: u32) -> Result<Self, DomainError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(DomainError::Validation(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
            )));
        }
        Ok(Self { page, size })
    }

    /// Zero-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of elements per page.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Number of rows to fetch.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A page as returned by a repository, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Elements of this page, in query order.
    pub content: Vec<T>,
    /// Zero-based page number.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Number of matching elements across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Wraps `content` with the metadata of `request`.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    /// Returns `true` if this page holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages needed for `total_elements`.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }
}

/// Response envelope for paged listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<T> {
    /// Elements of this page.
    pub content: Vec<T>,
    /// Zero-based page number.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Number of matching elements across all pages.
    pub total_elements: u64,
    /// Number of pages.
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    /// An envelope with no content and zero totals.
    #[must_use]
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            content: Vec::new(),
            page,
            size,
            total_elements: 0,
            total_pages: 0,
        }
    }
}
