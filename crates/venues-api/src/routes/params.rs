//! Query-string parameters shared by the listing routes.

use serde::Deserialize;
use venues_core::error::DomainError;
use venues_core::page::{DEFAULT_PAGE_SIZE, PageRequest};

/// `?page=&size=` with zero-based pages.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Zero-based page index (default 0).
    pub page: Option<u32>,
    /// Page size (default 20, at most 100).
    pub size: Option<u32>,
}

impl PageParams {
    /// Converts to a validated page request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the size is out of range.
    pub fn page_request(&self) -> Result<PageRequest, DomainError> {
        page_request(self.page, self.size)
    }
}

/// Builds a page request from optional query values.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the size is out of range.
pub fn page_request(page: Option<u32>, size: Option<u32>) -> Result<PageRequest, DomainError> {
    PageRequest::new(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE))
}

/// Parses a comma-separated id list such as `1,2,5`. Empty items are
/// skipped.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an item that is not an integer.
pub fn parse_id_list(raw: &str) -> Result<Vec<i32>, DomainError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse()
                .map_err(|_| DomainError::Validation(format!("invalid id in list: {item}")))
        })
        .collect()
}
