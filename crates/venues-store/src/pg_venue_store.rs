//! The pooled `PostgreSQL` store shared by every repository implementation.

use sqlx::PgPool;
use tracing::warn;
use venues_core::error::DomainError;
use venues_core::page::{Page, PageRequest};

/// PostgreSQL-backed implementation of every repository trait.
#[derive(Debug, Clone)]
pub struct PgVenueStore {
    pub(crate) pool: PgPool,
}

impl PgVenueStore {
    /// Creates a new `PgVenueStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Wraps a driver error as an infrastructure failure.
pub(crate) fn storage_error(operation: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        warn!(operation, error = %e, "database operation failed");
        DomainError::Infrastructure(format!("{operation} failed: {e}"))
    }
}

/// Builds a page from fetched rows and a `COUNT(*)` result.
pub(crate) fn page_from<R, T: From<R>>(rows: Vec<R>, request: PageRequest, total: i64) -> Page<T> {
    let content = rows.into_iter().map(T::from).collect();
    Page::new(content, request, u64::try_from(total).unwrap_or(0))
}
