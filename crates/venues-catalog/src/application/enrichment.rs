//! Batch enrichment of venue pages with availability and rating.
//!
//! One ratings query and one reservations query serve the whole page,
//! however many venues it holds; the results are grouped by venue id in
//! memory.

use std::collections::HashMap;

use tracing::debug;
use venues_core::capacity;
use venues_core::error::DomainError;
use venues_core::model::Venue;
use venues_core::repository::{RatingRepository, ReservationRepository};
use venues_core::time_window::TimeWindow;

use crate::domain::rating;

fn group_by_venue<T>(records: Vec<T>, venue_id: impl Fn(&T) -> i32) -> HashMap<i32, Vec<T>> {
    let mut grouped: HashMap<i32, Vec<T>> = HashMap::new();
    for record in records {
        grouped.entry(venue_id(&record)).or_default().push(record);
    }
    grouped
}

/// Returns `venues` with `average_rating` and `available_capacity` derived
/// from the stored ratings and the reservations inside `window`. Every other
/// field is passed through unchanged and the order is preserved.
///
/// # Errors
///
/// Returns `DomainError` if either batch query fails.
pub async fn enrich_venues(
    venues: Vec<Venue>,
    window: TimeWindow,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<Vec<Venue>, DomainError> {
    if venues.is_empty() {
        return Ok(venues);
    }

    let venue_ids: Vec<i32> = venues.iter().map(|v| v.id).collect();
    let ratings_by_venue = group_by_venue(
        ratings.find_ratings_by_venue_ids(&venue_ids).await?,
        |r| r.venue_id,
    );
    let reservations_by_venue = group_by_venue(
        reservations.find_reservations_in_window(window).await?,
        |r| r.venue_id,
    );

    debug!(
        venues = venue_ids.len(),
        rated = ratings_by_venue.len(),
        occupied = reservations_by_venue.len(),
        "enriching venue page"
    );

    Ok(venues
        .into_iter()
        .map(|venue| {
            let average_rating = ratings_by_venue
                .get(&venue.id)
                .map_or(0.0, |venue_ratings| rating::recompute(venue_ratings));
            let available_capacity = capacity::available_capacity(
                &venue,
                reservations_by_venue
                    .get(&venue.id)
                    .map_or(&[][..], Vec::as_slice),
            );
            Venue {
                average_rating,
                available_capacity,
                ..venue
            }
        })
        .collect())
}
