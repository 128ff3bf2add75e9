//! Query handlers for the catalog context.
//!
//! Every listing resolves the active time window once from the injected
//! clock, loads one raw page from the venue repository and hands it to
//! [`assemble_page`] for enrichment.

use tracing::debug;
use venues_core::capacity;
use venues_core::clock::Clock;
use venues_core::error::DomainError;
use venues_core::geolocation::GeolocationService;
use venues_core::model::{Rating, Venue, VenueType};
use venues_core::page::{Page, PageRequest, PagedResult};
use venues_core::repository::{
    RatingRepository, ReservationRepository, VenueRepository, VenueTypeRepository,
};

use super::pagination::{assemble_page, order_by_ranking};
use crate::domain::queries::{FindNearbyVenues, ListVenues};
use crate::domain::search_area::{SearchArea, resolve_search_area};
use crate::domain::rating;

/// Returns a single venue with its current availability and rating.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the venue does not exist, or
/// `DomainError::Infrastructure` if a lookup fails.
pub async fn get_venue(
    venue_id: i32,
    clock: &dyn Clock,
    venues: &dyn VenueRepository,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<Venue, DomainError> {
    let window = clock.active_window();
    let venue = venues
        .find_venue_by_id(venue_id)
        .await?
        .ok_or_else(|| DomainError::venue_not_found(venue_id))?;

    let venue_ratings = ratings.find_ratings_by_venue_id(venue_id).await?;
    let occupied = reservations
        .find_reservations_by_venue_and_window(venue_id, window)
        .await?;

    let average_rating = rating::recompute(&venue_ratings);
    let available_capacity = capacity::available_capacity(&venue, &occupied);
    Ok(Venue {
        average_rating,
        available_capacity,
        ..venue
    })
}

/// Lists venues filtered by search text and venue types.
///
/// # Errors
///
/// Returns `DomainError` if a repository call fails.
pub async fn get_all_venues(
    query: &ListVenues,
    clock: &dyn Clock,
    venues: &dyn VenueRepository,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<PagedResult<Venue>, DomainError> {
    let window = clock.active_window();
    let raw = venues
        .find_venues_filtered(query.page, query.search_query(), query.type_filter())
        .await?;
    assemble_page(raw, window, ratings, reservations).await
}

/// Lists venues in the caller's city and the cities around it.
///
/// # Errors
///
/// Returns `DomainError::Geolocation` if the location lookup fails, or
/// `DomainError::Infrastructure` if a repository call fails.
pub async fn get_nearby_venues(
    query: &FindNearbyVenues,
    clock: &dyn Clock,
    geolocation: &dyn GeolocationService,
    venues: &dyn VenueRepository,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<PagedResult<Venue>, DomainError> {
    let window = clock.active_window();
    let area = resolve_search_area(query.latitude, query.longitude, geolocation).await?;
    debug!(?area, "resolved search area");

    let raw = match &area {
        SearchArea::DefaultCity(city) | SearchArea::SingleCity(city) => {
            venues.find_venues_by_location(city, query.page).await?
        }
        SearchArea::CitySet(cities) => venues.find_venues_by_location_in(cities, query.page).await?,
    };
    assemble_page(raw, window, ratings, reservations).await
}

/// Lists venues newest first.
///
/// # Errors
///
/// Returns `DomainError` if a repository call fails.
pub async fn get_new_venues(
    page: PageRequest,
    clock: &dyn Clock,
    venues: &dyn VenueRepository,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<PagedResult<Venue>, DomainError> {
    let window = clock.active_window();
    let raw = venues.find_all_venues(page).await?;
    assemble_page(raw, window, ratings, reservations).await
}

/// Lists venues by total reservation count, most reserved first.
///
/// # Errors
///
/// Returns `DomainError` if a repository call fails.
pub async fn get_trending_venues(
    page: PageRequest,
    clock: &dyn Clock,
    venues: &dyn VenueRepository,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<PagedResult<Venue>, DomainError> {
    let window = clock.active_window();
    let ranking = reservations.find_top_venues_by_reservation_count(page).await?;
    if ranking.is_empty() {
        return Ok(PagedResult::empty(page.page(), page.size()));
    }

    let ranked_ids: Vec<i32> = ranking.content.iter().map(|entry| entry.venue_id).collect();
    let fetched = venues.find_venues_by_ids(&ranked_ids).await?;
    let ordered = order_by_ranking(&ranked_ids, fetched);

    assemble_page(
        Page::new(ordered, page, ranking.total_elements),
        window,
        ratings,
        reservations,
    )
    .await
}

/// Lists highly rated venues that still have free seats right now.
///
/// # Errors
///
/// Returns `DomainError` if a repository call fails.
pub async fn get_suggested_venues(
    page: PageRequest,
    clock: &dyn Clock,
    venues: &dyn VenueRepository,
    ratings: &dyn RatingRepository,
    reservations: &dyn ReservationRepository,
) -> Result<PagedResult<Venue>, DomainError> {
    let window = clock.active_window();
    let raw = venues.find_suggested_venues(window, page).await?;
    assemble_page(raw, window, ratings, reservations).await
}

/// Returns the stored average rating of a venue.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the venue does not exist.
pub async fn get_venue_rating(
    venue_id: i32,
    venues: &dyn VenueRepository,
) -> Result<f64, DomainError> {
    venues
        .find_venue_by_id(venue_id)
        .await?
        .map(|venue| venue.average_rating)
        .ok_or_else(|| DomainError::venue_not_found(venue_id))
}

/// Returns every rating of a venue, newest first.
///
/// # Errors
///
/// Returns `DomainError` if the lookup fails.
pub async fn get_venue_ratings(
    venue_id: i32,
    ratings: &dyn RatingRepository,
) -> Result<Vec<Rating>, DomainError> {
    let mut venue_ratings = ratings.find_ratings_by_venue_id(venue_id).await?;
    venue_ratings.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(venue_ratings)
}

/// Returns the name of a venue type.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the type does not exist.
pub async fn get_venue_type(
    type_id: i32,
    venue_types: &dyn VenueTypeRepository,
) -> Result<String, DomainError> {
    venue_types
        .find_venue_type_by_id(type_id)
        .await?
        .map(|venue_type| venue_type.name)
        .ok_or_else(|| DomainError::venue_type_not_found(type_id))
}

/// Returns every venue type.
///
/// # Errors
///
/// Returns `DomainError` if the lookup fails.
pub async fn get_venue_types(
    venue_types: &dyn VenueTypeRepository,
) -> Result<Vec<VenueType>, DomainError> {
    venue_types.find_all_venue_types().await
}
