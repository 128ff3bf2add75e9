//! Assembly of enriched, paginated venue responses.

use std::collections::HashMap;

use venues_core::error::DomainError;
use venues_core::model::Venue;
use venues_core::page::{Page, PagedResult};
use venues_core::repository::{RatingRepository, ReservationRepository};
use venues_core::time_window::TimeWindow;

use super::enrichment::enrich_venues;

/// Enriches a raw repository page and wraps it with paging metadata.
///
/// An empty page short-circuits to an empty result without touching either
/// repository.
///
/// # Errors
///
/// Returns `DomainError` if enrichment fails.
pub async fn assemble_page(
    raw: Page<Venue>,
    window: TimeWindow,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<PagedResult<Venue>, DomainError> {
    if raw.is_empty() {
        return Ok(PagedResult::empty(raw.page, raw.size));
    }

    let total_pages = raw.total_pages();
    let content = enrich_venues(raw.content, window, ratings, reservations).await?;

    Ok(PagedResult {
        content,
        page: raw.page,
        size: raw.size,
        total_elements: raw.total_elements,
        total_pages,
    })
}

/// Reorders `venues` to follow `ranked_ids`. Ids without a matching record
/// are dropped.
#[must_use]
pub fn order_by_ranking(ranked_ids: &[i32], venues: Vec<Venue>) -> Vec<Venue> {
    let mut by_id: HashMap<i32, Venue> = venues.into_iter().map(|v| (v.id, v)).collect();
    ranked_ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
